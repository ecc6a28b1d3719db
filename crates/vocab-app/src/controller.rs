use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owns the cancellation token passes watch for Ctrl+C
pub struct ShutdownController {
    cancel_token: CancellationToken,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel_token.child_token()
    }

    /// Cancel everything on the first Ctrl+C
    pub fn listen_for_ctrl_c(&self) -> JoinHandle<()> {
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = signal::ctrl_c() => {
                    match result {
                        Ok(()) => tracing::warn!("Shutdown requested, saving progress..."),
                        Err(e) => {
                            tracing::error!("Failed to listen for ctrl+c: {e}");
                            return;
                        }
                    }
                    cancel.cancel();
                }
                _ = cancel.cancelled() => {}
            }
        })
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
