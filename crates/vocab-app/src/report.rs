use vocab_core::VocabularyRecord;
use vocab_core::store::Checkpoint;

/// Counters collected while a pass runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub processed: usize,
    /// Records whose data changed through an override or a fetch
    pub updated: usize,
    /// Records only touched by the cosmetic cleanup
    pub cleaned: usize,
    /// Records whose lookups all went through
    pub succeeded: usize,
    /// Words whose lookup failed or returned nothing usable
    pub failed: Vec<String>,
    pub cancelled: bool,
}

impl PassReport {
    pub fn checkpoint(&self, pass: &str, total: usize) -> Checkpoint {
        let mut checkpoint = Checkpoint::new(pass, self.processed, total);
        checkpoint.updated = self.updated;
        checkpoint.failed = self.failed.clone();
        checkpoint
    }

    pub fn log_summary(&self, pass: &str, records: &[VocabularyRecord]) {
        let total = records.len();
        let with_translation = records.iter().filter(|r| r.has_translate()).count();
        let rate = if total == 0 {
            0.0
        } else {
            with_translation as f64 / total as f64 * 100.0
        };

        if self.cancelled {
            tracing::warn!("{pass} cancelled after {}/{} records", self.processed, total);
        } else {
            tracing::info!("{pass} complete");
        }
        tracing::info!("  - Words updated: {}", self.updated);
        tracing::info!("  - Words cleaned: {}", self.cleaned);
        tracing::info!("  - Failed lookups: {}", self.failed.len());
        tracing::info!("  - Words with translation: {with_translation}/{total} ({rate:.1}%)");
        if !self.failed.is_empty() {
            tracing::debug!("  - Failed words: {}", self.failed.join(", "));
        }
    }
}
