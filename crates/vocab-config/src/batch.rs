use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_batch_size() -> usize {
    50
}

fn default_max_in_flight() -> usize {
    50
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_fetch_delay_ms() -> u64 {
    500
}

fn default_snapshot_every() -> usize {
    100
}

/// Pacing for both passes
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BatchConfig {
    /// Records per concurrent fill batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Upper bound on records being fetched at the same time
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    /// Pause between fill batches
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
    /// Pause after each record the repair pass had to fetch
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    /// Repair pass writes a snapshot every N records
    #[serde(default = "default_snapshot_every")]
    pub snapshot_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_in_flight: default_max_in_flight(),
            batch_pause_ms: default_batch_pause_ms(),
            fetch_delay_ms: default_fetch_delay_ms(),
            snapshot_every: default_snapshot_every(),
        }
    }
}

impl BatchConfig {
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}
