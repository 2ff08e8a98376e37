//! Loopback stand-ins for the external relay services, so the harness runs
//! end-to-end without the real relay linked in. A deployment embeds the
//! harness library and provides its own implementations of these seams.

use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, http::header::ContentType, web, web::Data};
use async_trait::async_trait;
use harness_node::services::{HousekeepingService, RelayApiService};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::info;

/// Housekeeping stand-in: logs and idles until process shutdown.
pub struct DevHousekeeping;

#[async_trait]
impl HousekeepingService for DevHousekeeping {
    async fn start(self: Arc<Self>) -> anyhow::Result<()> {
        info!("Housekeeping stand-in running");
        std::future::pending::<()>().await;
        Ok(())
    }

    fn update_duties_without_checks(&self, slot: u64) {
        info!(slot, "Housekeeping stand-in forced duty update");
    }
}

type SignalSender = Arc<Mutex<Option<oneshot::Sender<()>>>>;

/// Relay API stand-in: serves a placeholder payload on the configured listen
/// address and fires the validator-update readiness signal on the first
/// request it receives. In signal-gated seeding the harness stays blocked
/// until that first request arrives.
pub struct DevRelayApi {
    listen_addr: String,
    listen_port: u16,
    signal_sender: SignalSender,
    signal_receiver: Mutex<Option<oneshot::Receiver<()>>>,
}

impl DevRelayApi {
    pub fn new(listen_addr: String, listen_port: u16) -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            listen_addr,
            listen_port,
            signal_sender: Arc::new(Mutex::new(Some(sender))),
            signal_receiver: Mutex::new(Some(receiver)),
        }
    }
}

async fn placeholder_response(signal: Data<SignalSender>) -> HttpResponse {
    if let Some(sender) = signal.lock().take() {
        let _ = sender.send(());
    }
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(r#"{"message":"relay API stand-in"}"#)
}

#[async_trait]
impl RelayApiService for DevRelayApi {
    async fn start_server(self: Arc<Self>) -> anyhow::Result<()> {
        let signal = self.signal_sender.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(signal.clone()))
                .default_service(web::to(placeholder_response))
        })
        .bind((self.listen_addr.as_str(), self.listen_port))?
        .run();
        server.await?;
        Ok(())
    }

    fn take_validator_update_signal(&self) -> Option<oneshot::Receiver<()>> {
        self.signal_receiver.lock().take()
    }

    fn update_duties_without_checks(&self, slot: u64) {
        info!(slot, "API stand-in forced duty update");
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use super::*;

    #[actix_web::test]
    async fn first_request_fires_the_readiness_signal() {
        let api = DevRelayApi::new("127.0.0.1".to_string(), 0);
        let mut signal = api.take_validator_update_signal().expect("signal available");
        assert!(api.take_validator_update_signal().is_none());

        let app = test::init_service(
            App::new()
                .app_data(Data::new(api.signal_sender.clone()))
                .default_service(web::to(placeholder_response)),
        )
        .await;

        assert!(signal.try_recv().is_err());
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(response.status().is_success());
        assert!(signal.try_recv().is_ok());
    }
}
