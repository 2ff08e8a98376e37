use std::{sync::Arc, time::Duration};

use futures::Future;
use tokio::{
    runtime::Runtime,
    sync::watch,
    task::JoinHandle,
};
use tracing::debug;

/// A handle to the tokio runtime shared by every harness service.
///
/// Tasks spawned through the executor race against the shutdown signal: once
/// [`HarnessExecutor::shutdown_signal`] fires, pending tasks resolve to `None`
/// instead of running to completion.
#[derive(Clone)]
pub struct HarnessExecutor {
    runtime: Arc<Runtime>,
    shutdown_sender: Arc<watch::Sender<bool>>,
    shutdown_receiver: watch::Receiver<bool>,
}

impl HarnessExecutor {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);

        Ok(Self {
            runtime: Arc::new(runtime),
            shutdown_sender: Arc::new(shutdown_sender),
            shutdown_receiver,
        })
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Spawn a task that is cancelled when the shutdown signal fires.
    pub fn spawn<R: Send + 'static>(
        &self,
        task: impl Future<Output = R> + Send + 'static,
    ) -> JoinHandle<Option<R>> {
        let mut shutdown = self.shutdown_receiver.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                value = task => Some(value),
                _ = shutdown.changed() => {
                    debug!("task cancelled by shutdown signal");
                    None
                }
            }
        })
    }

    /// Notify every spawned task that the process is shutting down.
    pub fn shutdown_signal(&self) {
        let _ = self.shutdown_sender.send(true);
    }

    /// Tear down the runtime if this is the last handle to it.
    pub fn shutdown_runtime(self) {
        let Self { runtime, .. } = self;
        if let Ok(runtime) = Arc::try_unwrap(runtime) {
            runtime.shutdown_timeout(Duration::from_secs(2));
        }
    }
}
