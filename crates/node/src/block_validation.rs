use actix_web::{App, HttpResponse, HttpServer, http::header::ContentType, web};
use anyhow::Context;
use harness_executor::HarnessExecutor;
use rand::Rng;
use tracing::{error, info};
use url::Url;

/// The canned answer: every submitted block is valid.
pub const VALIDATION_RESPONSE: &str = r#"{"jsonrpc":"2.0","id":1,"result":null}"#;

const PORT_RANGE: std::ops::RangeInclusive<u16> = 10000..=65535;

async fn validation_response() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(VALIDATION_RESPONSE)
}

/// Start the stub block-validation responder on a random local port and
/// return its advertised URL.
///
/// The responder parses nothing and rejects nothing: any request on any path
/// gets HTTP 200 with [`VALIDATION_RESPONSE`]. It runs for the lifetime of
/// the process; a bind failure is fatal and is not retried.
pub fn start_block_validation_stub(executor: &HarnessExecutor) -> anyhow::Result<Url> {
    let port = rand::rng().random_range(PORT_RANGE);

    let server = HttpServer::new(|| App::new().default_service(web::to(validation_response)))
        .bind(("127.0.0.1", port))
        .with_context(|| format!("Failed to bind block validation stub to port {port}"))?
        .run();

    executor.spawn(async move {
        if let Err(err) = server.await {
            error!("Block validation stub failed: {err:?}");
        }
    });

    let url = Url::parse(&format!("http://127.0.0.1:{port}"))?;
    info!(%url, "Block validation stub started");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use actix_web::{body::to_bytes, test};

    use super::*;

    #[actix_web::test]
    async fn answers_arbitrary_body_with_canned_payload() {
        let app =
            test::init_service(App::new().default_service(web::to(validation_response))).await;

        let request = test::TestRequest::post()
            .uri("/")
            .set_payload(r#"{"jsonrpc":"2.0","method":"flashbots_validateBuilderSubmissionV2"}"#)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, VALIDATION_RESPONSE.as_bytes());
    }

    #[actix_web::test]
    async fn answers_empty_body_on_any_path() {
        let app =
            test::init_service(App::new().default_service(web::to(validation_response))).await;

        let request = test::TestRequest::get().uri("/some/unknown/path").to_request();
        let response = test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, VALIDATION_RESPONSE.as_bytes());
    }
}
