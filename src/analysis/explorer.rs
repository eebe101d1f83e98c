use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use super::summary::SheetSummary;
use crate::config::Config;
use crate::workbook::SheetSource;

pub const INSIGHTS_START: &str = "=== INSIGHTS JSON START ===";
pub const INSIGHTS_END: &str = "=== INSIGHTS JSON END ===";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreOptions {
    /// Data rows read per sheet
    pub sample_rows: usize,
    /// Only the first sheets of the workbook are analysed
    pub max_sheets: usize,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            sample_rows: 100,
            max_sheets: 5,
        }
    }
}

impl From<&Config> for ExploreOptions {
    fn from(config: &Config) -> Self {
        Self {
            sample_rows: config.sample_rows,
            max_sheets: config.max_sheets,
        }
    }
}

/// Analysis of one sheet, or the reason it could not be read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetAnalysis {
    Summary(Box<SheetSummary>),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub sheets: Vec<String>,
    pub sheet_analysis: IndexMap<String, SheetAnalysis>,
}

/// Summarize the leading sheets of a workbook
///
/// A sheet that fails to read is reported inline and does not stop the run.
pub fn explore_workbook(source: &mut impl SheetSource, options: ExploreOptions) -> Insights {
    let sheets = source.sheet_names();
    info!("Available sheets: {:?}", sheets);

    let mut sheet_analysis = IndexMap::new();
    for sheet_name in sheets.iter().take(options.max_sheets) {
        info!("Analyzing sheet: {}", sheet_name);
        let analysis = match source.read_sheet(sheet_name) {
            Ok(range) => SheetAnalysis::Summary(Box::new(SheetSummary::from_grid(
                &range,
                options.sample_rows,
            ))),
            Err(e) => {
                warn!("Error analyzing sheet {}: {}", sheet_name, e);
                SheetAnalysis::Failed {
                    error: e.to_string(),
                }
            }
        };
        sheet_analysis.insert(sheet_name.clone(), analysis);
    }

    Insights {
        sheets,
        sheet_analysis,
    }
}

/// Pretty JSON framed by sentinel lines so it can be cut out of mixed log output
pub fn render_insights(insights: &Insights) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(insights)?;
    Ok(format!("{INSIGHTS_START}\n{json}\n{INSIGHTS_END}"))
}
