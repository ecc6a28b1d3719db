use tokio_util::sync::CancellationToken;
use vocab_core::{RepairReason, StoreError, VocabularyRecord};

use super::{SnapshotSink, pause};
use crate::report::PassReport;
use crate::state::AppState;

/// What the repair pass did with one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Manual override applied; `changed` is false when it already matched
    Override { changed: bool },
    AlreadyClean,
    CosmeticallyCleaned,
    /// Markup removed and the rest was good enough, no fetch needed
    Sanitized,
    Fetched,
    FetchFailed,
}

impl RepairOutcome {
    pub fn fetched(&self) -> bool {
        matches!(self, RepairOutcome::Fetched | RepairOutcome::FetchFailed)
    }
}

/// Sequential repair over the whole collection
pub async fn run_repair(
    state: &AppState,
    records: &mut [VocabularyRecord],
    sink: &SnapshotSink,
    cancel: &CancellationToken,
) -> Result<PassReport, StoreError> {
    let total = records.len();
    let snapshot_every = state.config.batch.snapshot_every.max(1);
    let delay = state.config.batch.fetch_delay();
    let mut report = PassReport::default();

    tracing::info!("Scanning {total} words for issues...");

    for i in 0..total {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let record = &mut records[i];
        let outcome = repair_record(state, record).await;
        tracing::debug!("[{}/{}] {}: {:?}", i + 1, total, record.word, outcome);

        match &outcome {
            RepairOutcome::Override { changed: true }
            | RepairOutcome::Sanitized
            | RepairOutcome::Fetched => report.updated += 1,
            RepairOutcome::CosmeticallyCleaned => report.cleaned += 1,
            RepairOutcome::FetchFailed => report.failed.push(record.word.clone()),
            RepairOutcome::Override { changed: false } | RepairOutcome::AlreadyClean => {}
        }
        report.processed += 1;

        if (i + 1) % snapshot_every == 0 {
            tracing::info!("Progress: {}/{} words processed...", i + 1, total);
            sink.snapshot(records, &report.checkpoint("repair", total))?;
        }

        if outcome.fetched() && !pause(delay, cancel).await {
            report.cancelled = true;
            break;
        }
    }

    sink.finish(records, &report.checkpoint("repair", total))?;
    report.log_summary("Repair", records);
    Ok(report)
}

/// Override, then classify, then fetch or clean one record in place
pub async fn repair_record(state: &AppState, record: &mut VocabularyRecord) -> RepairOutcome {
    if let Some(changed) = state.overrides.apply(record) {
        if changed {
            tracing::info!("[FIXING] {} (manual override)", record.word);
        }
        return RepairOutcome::Override { changed };
    }

    let assessment = state
        .classifier
        .assess(&record.word, record.translate.as_deref());

    let Some(reason) = assessment.reason else {
        return clean_passing(state, record);
    };

    tracing::info!(
        "[FIXING] {}: {} -> '{}'",
        record.word,
        reason,
        preview(record.translate_str())
    );

    if reason == RepairReason::TagPollution {
        let clean = state.cleaner.sanitizer().sanitize(record.translate_str());
        record.translate = Some(clean);
    }

    let still_bad = !state.classifier.passes_content(record.translate_str());
    if !assessment.denylisted && !still_bad {
        return RepairOutcome::Sanitized;
    }

    match state.translator.fetch(&record.word).await {
        Ok(Some(text)) => {
            let text = state.cleaner.clean(&text);
            if state.classifier.passes_content(&text) {
                tracing::info!("   -> New: {text}");
                record.translate = Some(text.clone());
                record.meanings = Some(vec![text]);
                RepairOutcome::Fetched
            } else {
                tracing::warn!("   -> Rejected fetched value for '{}': '{}'", record.word, preview(&text));
                RepairOutcome::FetchFailed
            }
        }
        Ok(None) => {
            tracing::warn!("   -> No translation found for '{}'", record.word);
            RepairOutcome::FetchFailed
        }
        Err(e) => {
            tracing::warn!("   -> Failed to fetch '{}': {e}", record.word);
            RepairOutcome::FetchFailed
        }
    }
}

fn clean_passing(state: &AppState, record: &mut VocabularyRecord) -> RepairOutcome {
    let current = record.translate_str();
    let cleaned = state.cleaner.clean(current);

    if cleaned != current && state.classifier.passes_content(&cleaned) {
        record.translate = Some(cleaned);
        RepairOutcome::CosmeticallyCleaned
    } else {
        RepairOutcome::AlreadyClean
    }
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(30).collect();
    if text.chars().count() > 30 {
        preview.push_str("...");
    }
    preview
}
