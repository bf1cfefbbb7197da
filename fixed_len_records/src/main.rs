mod process_folder;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use sequence_common::WindowConfig;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
pub struct Args {
    /// Annotation folders of video snippets, each holding 000000.xml, 000001.xml, ...
    #[arg(required = true)]
    folders: Vec<PathBuf>,
    /// Directory to write one .jsonl record file per folder into.
    #[arg(long, short)]
    output_dir: PathBuf,
    /// Length of each sequence example.
    #[arg(long, default_value_t = 32)]
    length: usize,
    /// Minimum number of examples taken from a single track.
    #[arg(long, default_value_t = 2)]
    min_num_examples: usize,
    /// Maximum number of examples taken from a single track.
    #[arg(long, default_value_t = 16)]
    max_num_examples: usize,
    /// Log and skip folders that fail instead of aborting the run.
    #[arg(long, action, default_value = "false")]
    skip_errors: bool,
}

impl Args {
    fn window_config(&self) -> anyhow::Result<WindowConfig> {
        Ok(WindowConfig::new(
            self.length,
            self.min_num_examples,
            self.max_num_examples,
        )?)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fixed_len_records=info,ilsvrc_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.window_config()?;
    log::info!("Window config: {}", serde_json::to_string(&config)?);

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output dir {:?}", args.output_dir))?;

    let pb = ProgressBar::new(args.folders.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.green/dim}] {pos}/{len} {msg:.dim}")?
            .progress_chars("█▓▒░ "),
    );

    let mut outputs = process_folder::OutputFiles::new(&args.output_dir);
    let mut totals = process_folder::Totals::default();
    for folder in &args.folders {
        pb.set_message(folder.display().to_string());
        match process_folder::process_folder(folder, &mut outputs, &config) {
            Ok(summary) => totals.add(&summary),
            Err(err) if args.skip_errors => {
                log::warn!("Skipping {folder:?}: {err:#}");
                totals.skipped += 1;
            }
            Err(err) => {
                pb.abandon();
                return Err(err);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    log::info!(
        "Wrote {} records from {} tracks in {} folders ({} skipped)",
        totals.records,
        totals.tracks,
        totals.folders,
        totals.skipped
    );

    Ok(())
}
