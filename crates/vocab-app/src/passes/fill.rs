use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vocab_core::cleanup::CosmeticCleaner;
use vocab_core::{FetchError, StoreError, VocabularyRecord};
use vocab_dictionary::Dictionary;
use vocab_translator::TranslationFetcher;

use super::{SnapshotSink, pause};
use crate::report::PassReport;
use crate::state::AppState;

/// Inputs a fill task needs, copied out of the record it owns
#[derive(Debug, Clone)]
struct FillJob {
    offset: usize,
    word: String,
    need_reading: bool,
    need_examples: bool,
    need_translate: bool,
}

impl FillJob {
    fn for_record(offset: usize, record: &VocabularyRecord) -> Option<Self> {
        if record.is_complete() {
            return None;
        }
        Some(Self {
            offset,
            word: record.word.clone(),
            need_reading: !record.has_reading(),
            need_examples: !record.has_examples(),
            need_translate: !record.has_translate(),
        })
    }
}

/// Fields fetched for one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub reading: Option<String>,
    pub examples: Option<Vec<String>>,
    pub translate: Option<String>,
}

impl RecordPatch {
    /// Fill only what is still missing; returns whether anything changed
    pub fn apply(self, record: &mut VocabularyRecord) -> bool {
        let mut updated = false;
        if let Some(reading) = self.reading.filter(|_| !record.has_reading()) {
            record.reading = Some(reading);
            updated = true;
        }
        if let Some(examples) = self.examples.filter(|_| !record.has_examples()) {
            record.examples = examples;
            updated = true;
        }
        if let Some(translate) = self.translate.filter(|_| !record.has_translate()) {
            record.translate = Some(translate);
            updated = true;
        }
        updated
    }
}

#[derive(Debug, Clone, Default)]
pub struct FillOutcome {
    pub patch: RecordPatch,
    pub errors: Vec<FetchError>,
}

/// Per-batch tally
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub updated: usize,
    pub failed: Vec<String>,
    pub cancelled: usize,
}

/// Concurrent fill of missing readings, examples and translations
pub async fn run_fill(
    state: &AppState,
    records: &mut [VocabularyRecord],
    sink: &SnapshotSink,
    cancel: &CancellationToken,
) -> Result<PassReport, StoreError> {
    let total = records.len();
    let batch_size = state.config.batch.batch_size.max(1);
    let semaphore = Arc::new(Semaphore::new(state.config.batch.max_in_flight.max(1)));
    let started = Instant::now();
    let mut report = PassReport::default();

    tracing::info!("Starting auto-fill for {total} words, batches of {batch_size}");

    let mut start = 0;
    while start < total {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let end = (start + batch_size).min(total);
        tracing::info!("Processing batch {start}-{end}...");

        let batch = run_batch(state, &mut records[start..end], &semaphore, cancel).await;
        tracing::info!(
            "Batch complete: {} words updated, {}/{} lookups succeeded",
            batch.updated,
            batch.succeeded,
            batch.attempted
        );

        report.updated += batch.updated;
        report.succeeded += batch.succeeded;
        report.failed.extend(batch.failed);
        report.processed = end;
        if batch.cancelled > 0 {
            report.cancelled = true;
        }

        sink.snapshot(records, &report.checkpoint("fill", total))?;

        let elapsed = started.elapsed().as_secs_f64() / 60.0;
        tracing::info!(
            "Progress: {:.1}% ({end}/{total}) - Elapsed: {elapsed:.1}m",
            end as f64 / total as f64 * 100.0
        );

        if report.cancelled {
            break;
        }
        start = end;
        if start < total && !pause(state.config.batch.batch_pause(), cancel).await {
            report.cancelled = true;
            break;
        }
    }

    sink.finish(records, &report.checkpoint("fill", total))?;
    report.log_summary("Auto-fill", records);
    Ok(report)
}

/// Fan out one batch, wait for every task, apply the patches
pub async fn run_batch(
    state: &AppState,
    batch: &mut [VocabularyRecord],
    semaphore: &Arc<Semaphore>,
    cancel: &CancellationToken,
) -> BatchReport {
    let mut report = BatchReport::default();
    let mut tasks = JoinSet::new();

    for (offset, record) in batch.iter_mut().enumerate() {
        if let Some(true) = state.overrides.apply(record) {
            report.updated += 1;
        }

        let Some(job) = FillJob::for_record(offset, record) else {
            continue;
        };
        report.attempted += 1;

        let dictionary = state.dictionary.clone();
        let translator = state.translator.clone();
        let cleaner = state.cleaner.clone();
        let semaphore = semaphore.clone();
        let cancel = cancel.clone();

        tasks.spawn(async move {
            let offset = job.offset;
            let outcome = tokio::select! {
                _ = cancel.cancelled() => None,
                outcome = async {
                    let _permit = semaphore.acquire_owned().await.ok()?;
                    Some(fill_record(&job, dictionary.as_ref(), &translator, &cleaner).await)
                } => outcome,
            };
            (offset, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((offset, Some(outcome))) => {
                let record = &mut batch[offset];
                if outcome.errors.is_empty() {
                    report.succeeded += 1;
                } else {
                    report.failed.push(record.word.clone());
                }
                if outcome.patch.apply(record) {
                    report.updated += 1;
                }
            }
            Ok((offset, None)) => {
                tracing::debug!("Lookup for '{}' cancelled", batch[offset].word);
                report.cancelled += 1;
            }
            Err(e) => {
                tracing::error!("Fill task panicked: {e}");
                report.failed.push(String::from("<panicked task>"));
            }
        }
    }

    report
}

async fn fill_record(
    job: &FillJob,
    dictionary: &dyn Dictionary,
    translator: &TranslationFetcher,
    cleaner: &CosmeticCleaner,
) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    if job.need_reading || job.need_examples {
        match dictionary.lookup(&job.word).await {
            Ok(Some(entry)) => {
                if job.need_reading {
                    outcome.patch.reading = entry.reading;
                }
                if job.need_examples && !entry.examples.is_empty() {
                    outcome.patch.examples = Some(entry.examples);
                }
            }
            Ok(None) => tracing::debug!("No dictionary entry for '{}'", job.word),
            Err(e) => {
                tracing::warn!("Dictionary lookup failed for '{}': {e}", job.word);
                outcome.errors.push(e);
            }
        }
    }

    if job.need_translate {
        match translator.fetch(&job.word).await {
            Ok(Some(text)) => {
                let text = cleaner.clean(&text);
                if !text.is_empty() {
                    outcome.patch.translate = Some(text);
                }
            }
            Ok(None) => tracing::debug!("No translation for '{}'", job.word),
            Err(e) => {
                tracing::warn!("Translation failed for '{}': {e}", job.word);
                outcome.errors.push(e);
            }
        }
    }

    outcome
}
