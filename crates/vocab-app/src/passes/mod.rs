use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vocab_core::store::{self, Checkpoint};
use vocab_core::{StoreError, VocabularyRecord};

pub mod fill;
pub mod repair;

pub use fill::run_fill;
pub use repair::run_repair;

/// Where snapshots of the collection go
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    pub output: PathBuf,
    /// Script constant file written at the end, with its constant name
    pub js: Option<(PathBuf, String)>,
    pub checkpoint: Option<PathBuf>,
}

impl SnapshotSink {
    /// Rewrite the canonical file and refresh the checkpoint
    pub fn snapshot(&self, records: &[VocabularyRecord], checkpoint: &Checkpoint) -> Result<(), StoreError> {
        store::save_records(&self.output, records)?;
        tracing::info!(
            "Saved progress to {} ({}/{})",
            self.output.display(),
            checkpoint.processed,
            checkpoint.total
        );
        self.save_checkpoint(checkpoint);
        Ok(())
    }

    /// Final write: canonical file, script constant, checkpoint
    pub fn finish(&self, records: &[VocabularyRecord], checkpoint: &Checkpoint) -> Result<(), StoreError> {
        store::save_records(&self.output, records)?;
        tracing::info!("Saved {} records to {}", records.len(), self.output.display());

        if let Some((path, name)) = &self.js {
            store::save_js(path, name, records)?;
        }
        self.save_checkpoint(checkpoint);
        Ok(())
    }

    fn save_checkpoint(&self, checkpoint: &Checkpoint) {
        if let Some(path) = &self.checkpoint {
            if let Err(e) = checkpoint.save(path) {
                tracing::warn!("Could not write checkpoint {}: {e}", path.display());
            }
        }
    }
}

/// Sleep unless cancelled first. Returns false on cancellation.
pub(crate) async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !cancel.is_cancelled();
    }
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
