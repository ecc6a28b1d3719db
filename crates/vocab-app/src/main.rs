use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vocab_config::Config;

pub mod commands;
pub mod controller;
pub mod passes;
pub mod prompt;
pub mod report;
pub mod state;

#[cfg(test)]
mod tests;

use self::commands::{ExportArgs, FillArgs, NormalizeArgs, RepairArgs};
use self::controller::ShutdownController;

#[derive(Parser)]
#[command(name = "vocab", about = "Build and repair the vocabulary dataset")]
struct Args {
    #[arg(long, global = true, help = "JSON config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-check existing translations and re-fetch the broken ones
    Repair(RepairArgs),
    /// Fetch missing readings, examples and translations in batches
    Fill(FillArgs),
    /// Turn a raw word list into dataset records
    Normalize(NormalizeArgs),
    /// Regenerate the script constant file from the dataset
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let controller = ShutdownController::new();
    let listener = controller.listen_for_ctrl_c();

    let result = match args.command {
        Command::Repair(cargs) => commands::repair(config, cargs, controller.token())
            .await
            .map(|_| ()),
        Command::Fill(cargs) => commands::fill(config, cargs, controller.token())
            .await
            .map(|_| ()),
        Command::Normalize(cargs) => commands::normalize(cargs),
        Command::Export(cargs) => commands::export(config, cargs),
    };

    controller.shutdown();
    let _ = listener.await;
    result
}
