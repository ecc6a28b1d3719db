use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tokio_util::sync::CancellationToken;
use vocab_config::Config;
use vocab_core::normalize::normalize_value;
use vocab_core::store;

use crate::passes::{self, SnapshotSink};
use crate::prompt;
use crate::report::PassReport;
use crate::state::{self, AppState};

#[derive(Args, Debug)]
pub struct DatasetArgs {
    #[arg(short, long, help = "Dataset file (JSON array of records)")]
    pub input: PathBuf,
    #[arg(short, long, help = "Where to write the dataset, defaults to the input file")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Script constant file, defaults to output.js_path from the config")]
    pub js: Option<PathBuf>,
    #[arg(long, help = "Skip writing the script constant file")]
    pub no_js: bool,
    #[arg(long, help = "Progress checkpoint file")]
    pub checkpoint: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    #[arg(long, help = "JSON object of manual overrides, replaces the built-in table")]
    pub overrides: Option<PathBuf>,
    #[arg(long, help = "JSON array of denylisted words, replaces the built-in list")]
    pub denylist: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RepairArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[command(flatten)]
    pub tables: TableArgs,
}

#[derive(Args, Debug)]
pub struct FillArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[command(flatten)]
    pub tables: TableArgs,
    #[arg(short, long, help = "Don't ask for confirmation")]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[arg(short, long, help = "Raw word list: array of strings or loosely shaped objects")]
    pub input: PathBuf,
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long)]
    pub input: PathBuf,
    #[arg(long, help = "Script constant file, defaults to output.js_path from the config")]
    pub js: Option<PathBuf>,
}

impl DatasetArgs {
    fn sink(&self, config: &Config) -> SnapshotSink {
        let js = (!self.no_js).then(|| {
            let path = self
                .js
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.js_path));
            (path, config.output.js_const.clone())
        });

        SnapshotSink {
            output: self.output.clone().unwrap_or_else(|| self.input.clone()),
            js,
            checkpoint: self
                .checkpoint
                .clone()
                .or_else(|| config.output.checkpoint_path.as_ref().map(PathBuf::from)),
        }
    }
}

fn build_state(config: Config, tables: &TableArgs) -> anyhow::Result<AppState> {
    let overrides = state::load_overrides(tables.overrides.as_deref(), &config)?;
    let denylist = state::load_denylist(tables.denylist.as_deref(), &config)?;
    tracing::info!(
        "{} overrides, {} denylisted words",
        overrides.len(),
        denylist.len()
    );
    AppState::from_config(config, overrides, denylist)
}

pub async fn repair(config: Config, args: RepairArgs, cancel: CancellationToken) -> anyhow::Result<PassReport> {
    let sink = args.dataset.sink(&config);
    let mut records = load(&args.dataset.input)?;
    let state = build_state(config, &args.tables)?;

    passes::run_repair(&state, &mut records, &sink, &cancel)
        .await
        .context("Repair pass failed")
}

pub async fn fill(config: Config, args: FillArgs, cancel: CancellationToken) -> anyhow::Result<Option<PassReport>> {
    let sink = args.dataset.sink(&config);
    let mut records = load(&args.dataset.input)?;

    if !args.yes {
        let minutes = records.len() as f64 * config.batch.fetch_delay_ms as f64 / 1000.0 / 60.0;
        println!("WARNING:");
        println!("   - This will make ~{}+ API requests", records.len());
        println!("   - Estimated time: ~{minutes:.1} minutes");
        println!("   - Uses free APIs (may have rate limits)");

        if !prompt::confirm("Do you want to proceed?".to_string()).await? {
            tracing::info!("Cancelled by user");
            return Ok(None);
        }
    }

    // Ctrl+C while the prompt was blocked on stdin
    if cancel.is_cancelled() {
        tracing::info!("Cancelled before the run started, dataset left untouched");
        return Ok(None);
    }

    let state = build_state(config, &args.tables)?;
    let report = passes::run_fill(&state, &mut records, &sink, &cancel)
        .await
        .context("Fill pass failed")?;
    Ok(Some(report))
}

pub fn normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Source file not found: {}", args.input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Error parsing JSON in {}", args.input.display()))?;

    let records = normalize_value(&value)?;
    store::save_records(&args.output, &records)?;
    tracing::info!("Wrote {} normalized records to {}", records.len(), args.output.display());
    Ok(())
}

pub fn export(config: Config, args: ExportArgs) -> anyhow::Result<()> {
    let records = load(&args.input)?;
    let js = args
        .js
        .unwrap_or_else(|| PathBuf::from(&config.output.js_path));
    store::save_js(&js, &config.output.js_const, &records)?;
    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Vec<vocab_core::VocabularyRecord>> {
    store::load_records(path).with_context(|| format!("Failed to load {}", path.display()))
}
