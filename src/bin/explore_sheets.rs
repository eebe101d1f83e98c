use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use wpfl_history::analysis::{explore_workbook, render_insights, ExploreOptions};
use wpfl_history::config::Config;
use wpfl_history::workbook::Workbook;

#[derive(Parser)]
#[command(name = "explore-sheets")]
#[command(about = "Summarize the sheets of the WPFL history workbook as JSON", long_about = None)]
struct Cli {
    /// Path to the workbook (default: $WPFL_HISTORY_PATH or data/WPFLHistory.xlsx)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Data rows sampled per sheet
    #[arg(long)]
    sample_rows: Option<usize>,

    /// Number of leading sheets to analyse
    #[arg(long)]
    max_sheets: Option<usize>,
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

    let file = cli.file.unwrap_or_else(|| config.history_path.clone());
    let mut options = ExploreOptions::from(&config);
    if let Some(sample_rows) = cli.sample_rows {
        options.sample_rows = sample_rows;
    }
    if let Some(max_sheets) = cli.max_sheets {
        options.max_sheets = max_sheets;
    }

    info!("Reading Excel file: {}", file.display());
    let mut workbook = match Workbook::open(&file) {
        Ok(workbook) => workbook,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let insights = explore_workbook(&mut workbook, options);
    drop(workbook);

    println!("\n{}", render_insights(&insights)?);

    Ok(())
}
