use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use wpfl_history::config::Config;
use wpfl_history::extraction::{Extractor, SheetOutcome};
use wpfl_history::workbook::{SheetSource, Workbook};

#[derive(Parser)]
#[command(name = "extract-sections")]
#[command(about = "Dump fixed sections of the condensed WPFL workbook to JSON files", long_about = None)]
struct Cli {
    /// Path to the workbook (default: $WPFL_CONDENSED_PATH or data/WPFLHistoryCondensed.xlsx)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Directory the JSON files are written to (default: $WPFL_OUTPUT_DIR or data/wpfl_extracted)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let file = cli.file.unwrap_or_else(|| config.condensed_path.clone());
    let output_dir = cli.output_dir.unwrap_or_else(|| config.output_dir.clone());

    let start = Instant::now();
    let mut workbook = match Workbook::open(&file) {
        Ok(workbook) => workbook,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!("Loaded workbook {}", workbook.path().display());
    let extractor = Extractor::new(&output_dir);

    let pb = ProgressBar::new(workbook.sheet_names().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut failed = 0;
    let summary = extractor.extract_workbook(&mut workbook, |sheet_name, outcome| {
        if matches!(outcome, SheetOutcome::Failed { .. }) {
            failed += 1;
        }
        pb.set_message(sheet_name.to_string());
        pb.inc(1);
    })?;
    drop(workbook);
    pb.finish_with_message(format!(
        "✓ Processed {} sheets, {failed} failed",
        summary.len()
    ));

    extractor.write_summary(&summary)?;
    extractor.write_simplified()?;

    info!(
        "Extraction complete in {:.2?}; review the JSON files in {}",
        start.elapsed(),
        output_dir.display()
    );

    Ok(())
}
