//! Fill pass tests

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use vocab_core::VocabularyRecord;
use vocab_core::store::{self, Checkpoint};

use super::fakes::*;
use crate::passes::fill::{RecordPatch, run_batch};
use crate::passes::run_fill;

fn words(n: usize) -> Vec<VocabularyRecord> {
    (0..n).map(|i| record(&format!("word{i}"), None)).collect()
}

/// Test 1: One batch of 50 with two failing lookups
#[tokio::test]
async fn test_batch_reports_failures_per_record() {
    let dictionary = Arc::new(FakeDictionary::new().fail("word7").fail("word31"));
    let state = state_with(
        fast_config(),
        &[],
        &[],
        Arc::new(FakeTranslator::new()),
        dictionary.clone(),
    );

    let mut batch = words(50);
    let semaphore = Arc::new(Semaphore::new(50));
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        run_batch(&state, &mut batch, &semaphore, &CancellationToken::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.attempted, 50);
    assert_eq!(report.succeeded, 48);
    let mut failed = report.failed.clone();
    failed.sort();
    assert_eq!(failed, vec!["word31".to_string(), "word7".to_string()]);
    assert_eq!(report.cancelled, 0);

    // failed dictionary lookups still get their translation
    let word7 = batch.iter().find(|r| r.word == "word7").unwrap();
    assert_eq!(word7.reading, None);
    assert_eq!(word7.translate.as_deref(), Some("คำแปล"));

    let word8 = batch.iter().find(|r| r.word == "word8").unwrap();
    assert_eq!(word8.reading.as_deref(), Some("/word8/"));
    assert_eq!(word8.examples, vec!["An example with word8.".to_string()]);
    assert_eq!(dictionary.calls().len(), 50);
}

/// Test 2: Complete records make no requests
#[tokio::test]
async fn test_complete_records_are_skipped() {
    let translator = Arc::new(FakeTranslator::new());
    let dictionary = Arc::new(FakeDictionary::new());
    let state = state_with(
        fast_config(),
        &[],
        &[],
        translator.clone(),
        dictionary.clone(),
    );

    let mut batch = vec![complete_record("ankle"), complete_record("coast")];
    let before = batch.clone();
    let report = run_batch(
        &state,
        &mut batch,
        &Arc::new(Semaphore::new(4)),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(report.attempted, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(batch, before);
    assert!(translator.calls().is_empty());
    assert!(dictionary.calls().is_empty());
}

/// Test 3: Only the missing translation is requested
#[tokio::test]
async fn test_only_missing_fields_are_fetched() {
    let translator = Arc::new(FakeTranslator::new().answer("ankle", "ข้อเท้า k̄ĥx thêā"));
    let dictionary = Arc::new(FakeDictionary::new());
    let state = state_with(
        fast_config(),
        &[],
        &[],
        translator.clone(),
        dictionary.clone(),
    );

    let mut ankle = complete_record("ankle");
    ankle.translate = None;
    let mut batch = vec![ankle];

    let report = run_batch(
        &state,
        &mut batch,
        &Arc::new(Semaphore::new(4)),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(report.updated, 1);
    assert!(dictionary.calls().is_empty());
    // fetched text goes through the same cleanup as repaired values
    assert_eq!(batch[0].translate.as_deref(), Some("ข้อเท้า"));
    assert_eq!(batch[0].reading.as_deref(), Some("/ankle/"));
}

/// Test 4: Echoed word is not stored as a translation
#[tokio::test]
async fn test_identity_translation_is_not_stored() {
    let state = state_with(
        fast_config(),
        &[],
        &[],
        Arc::new(FakeTranslator::new().answer("xenon", "Xenon")),
        Arc::new(FakeDictionary::new()),
    );

    let mut batch = vec![record("xenon", None)];
    let report = run_batch(
        &state,
        &mut batch,
        &Arc::new(Semaphore::new(1)),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(report.succeeded, 1);
    assert_eq!(batch[0].translate, None);
    assert_eq!(batch[0].reading.as_deref(), Some("/xenon/"));
}

/// Test 5: Overrides are applied before anything is fetched
#[tokio::test]
async fn test_override_fills_translation_without_fetch() {
    let translator = Arc::new(FakeTranslator::new());
    let state = state_with(
        fast_config(),
        &[("kilogram", "กิโลกรัม")],
        &[],
        translator.clone(),
        Arc::new(FakeDictionary::new()),
    );

    let mut batch = vec![record("kilogram", None)];
    run_batch(
        &state,
        &mut batch,
        &Arc::new(Semaphore::new(1)),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(batch[0].translate.as_deref(), Some("กิโลกรัม"));
    assert_eq!(batch[0].meanings, Some(vec!["กิโลกรัม".to_string()]));
    assert!(translator.calls().is_empty());
}

/// Test 6: Patches never overwrite a value that showed up meanwhile
#[test]
fn test_patch_only_fills_missing_fields() {
    let mut record = record("coast", Some("ชายฝั่ง"));
    let patch = RecordPatch {
        reading: Some("/kəʊst/".into()),
        examples: None,
        translate: Some("ฝั่ง".into()),
    };

    assert!(patch.apply(&mut record));
    assert_eq!(record.translate.as_deref(), Some("ชายฝั่ง"));
    assert_eq!(record.reading.as_deref(), Some("/kəʊst/"));
    assert!(!RecordPatch::default().apply(&mut record));
}

/// Test 7: Whole pass over several batches saves everything
#[tokio::test]
async fn test_run_fill_over_multiple_batches() {
    let dir = tempfile::tempdir().unwrap();
    let sink = sink_in(dir.path());

    let mut config = fast_config();
    config.batch.batch_size = 50;
    config.batch.max_in_flight = 8;
    let state = state_with(
        config,
        &[],
        &[],
        Arc::new(FakeTranslator::new()),
        Arc::new(FakeDictionary::new().fail("word99")),
    );

    let mut records = words(120);
    let report = tokio::time::timeout(
        Duration::from_secs(10),
        run_fill(&state, &mut records, &sink, &CancellationToken::new()),
    )
    .await
    .unwrap()
    .unwrap();

    assert!(!report.cancelled);
    assert_eq!(report.processed, 120);
    assert_eq!(report.succeeded, 119);
    assert_eq!(report.updated, 120);
    assert_eq!(report.failed, vec!["word99".to_string()]);
    assert!(records.iter().all(|r| r.has_translate()));

    let saved = store::load_records(&sink.output).unwrap();
    assert_eq!(saved, records);

    let checkpoint = Checkpoint::load(&dir.path().join("progress.json")).unwrap();
    assert_eq!(checkpoint.pass, "fill");
    assert_eq!(checkpoint.processed, 120);
    assert_eq!(checkpoint.total, 120);
    assert!(dir.path().join("data.js").exists());
}

/// Test 8: Cancellation interrupts stalled lookups and keeps earlier work
#[tokio::test]
async fn test_cancel_interrupts_hanging_batch() {
    let dir = tempfile::tempdir().unwrap();
    let sink = sink_in(dir.path());
    let state = state_with(
        fast_config(),
        &[],
        &[],
        Arc::new(FakeTranslator::new()),
        Arc::new(FakeDictionary::hanging()),
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let mut records = words(3);
    records.push(complete_record("ankle"));
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        run_fill(&state, &mut records, &sink, &cancel),
    )
    .await
    .expect("fill should stop once cancelled")
    .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.succeeded, 0);
    assert!(records[..3].iter().all(|r| !r.has_translate()));
    assert_eq!(store::load_records(&sink.output).unwrap(), records);
}

/// Test 9: Semaphore caps how many lookups run at once
#[tokio::test]
async fn test_in_flight_lookups_are_bounded() {
    let dictionary = Arc::new(FakeDictionary::slow(Duration::from_millis(20)));
    let state = state_with(
        fast_config(),
        &[],
        &[],
        Arc::new(FakeTranslator::new()),
        dictionary.clone(),
    );

    let mut batch = words(20);
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        run_batch(&state, &mut batch, &Arc::new(Semaphore::new(3)), &CancellationToken::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.succeeded, 20);
    assert_eq!(dictionary.calls().len(), 20);
    assert!(dictionary.peak_in_flight() <= 3, "peak was {}", dictionary.peak_in_flight());
    assert!(dictionary.peak_in_flight() >= 1);
}

/// Test 10: Each finished batch is on disk before the next one starts
#[tokio::test]
async fn test_batch_snapshot_survives_later_failure() {
    let dir = tempfile::tempdir().unwrap();
    let sink = sink_in(dir.path());
    let output = sink.output.clone();

    let mut config = fast_config();
    config.batch.batch_size = 2;
    let translator = FakeTranslator::new().on_call(move |word| {
        if word == "word2" {
            block_output(&output);
        }
    });
    let state = state_with(
        config,
        &[],
        &[],
        Arc::new(translator),
        Arc::new(FakeDictionary::new()),
    );

    let mut records = words(4);
    let result = run_fill(&state, &mut records, &sink, &CancellationToken::new()).await;
    assert!(result.is_err());

    let saved = store::load_records(&sink.output).unwrap();
    assert!(saved[..2].iter().all(|r| r.has_translate() && r.has_reading()));
    assert!(saved[2..].iter().all(|r| !r.has_translate() && !r.has_reading()));

    let checkpoint = Checkpoint::load(&dir.path().join("progress.json")).unwrap();
    assert_eq!(checkpoint.pass, "fill");
    assert_eq!(checkpoint.processed, 2);
    assert_eq!(checkpoint.total, 4);
}
