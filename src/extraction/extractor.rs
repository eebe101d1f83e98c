use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::samples::{sample_sheet, SheetInfo};
use super::section::{extract_section, write_section};
use super::seed::SimplifiedData;
use super::{write_json, ExtractionError};
use crate::config::{Section, HEADER_ROWS, SAMPLE_ROW_LIMIT, SAMPLE_ROW_STEP, SECTIONS};
use crate::workbook::{CellGrid, CellWindow, SheetSource};

pub const SUMMARY_FILE: &str = "extraction_summary.json";
pub const SIMPLIFIED_FILE: &str = "wpfl_simplified.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRecord {
    pub rows: usize,
    pub file: String,
}

/// Summary entry for a sheet whose sections were extracted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetExtraction {
    pub info: SheetInfo,
    pub headers: Vec<Vec<String>>,
    /// Only sections that produced a file
    pub data_sections: IndexMap<String, SectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetOutcome {
    Extracted(SheetExtraction),
    Failed { error: String },
}

/// Sheet name to outcome, in workbook order
pub type ExtractionSummary = IndexMap<String, SheetOutcome>;

/// Cells a streamed sheet must keep: header rows, sampled rows and every
/// section rectangle
pub fn extraction_window(sections: &[Section]) -> CellWindow {
    let window = sections.iter().fold(
        CellWindow::new().with_rows(0..HEADER_ROWS),
        |window, s| {
            window.with_rect(
                s.start_row.saturating_sub(1)..s.end_row,
                s.start_col.saturating_sub(1)..s.end_col,
            )
        },
    );
    (0..SAMPLE_ROW_LIMIT)
        .step_by(SAMPLE_ROW_STEP)
        .fold(window, |window, row| window.with_rows(row..row + 1))
}

/// Writes the fixed sections of every sheet to `output_dir`
pub struct Extractor {
    output_dir: PathBuf,
    sections: Vec<Section>,
}

impl Extractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_sections(output_dir, SECTIONS.to_vec())
    }

    pub fn with_sections(output_dir: impl Into<PathBuf>, sections: Vec<Section>) -> Self {
        Self {
            output_dir: output_dir.into(),
            sections,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the samples file and every non-empty section of one sheet
    ///
    /// A section that fails to write is logged and left out of the result.
    pub fn extract_sheet(
        &self,
        sheet_name: &str,
        grid: &impl CellGrid,
    ) -> Result<SheetExtraction, ExtractionError> {
        let (max_row, max_col) = grid.extent();
        info!("Processing sheet {}: {} rows x {} columns", sheet_name, max_row, max_col);

        let samples = sample_sheet(sheet_name, grid);
        let sample_file = self.output_dir.join(format!("{sheet_name}_samples.json"));
        write_json(&sample_file, &samples)?;
        info!("Saved samples to {}", sample_file.display());

        let mut data_sections = IndexMap::new();
        for section in &self.sections {
            let rows = extract_section(grid, section);
            match write_section(&self.output_dir, sheet_name, section, &rows) {
                Ok(Some(path)) => {
                    info!("Saved {} rows to {}", rows.len(), path.display());
                    data_sections.insert(
                        section.name.to_string(),
                        SectionRecord {
                            rows: rows.len(),
                            file: path.display().to_string(),
                        },
                    );
                }
                Ok(None) => {}
                Err(e) => warn!("Error extracting {} from {}: {}", section.name, sheet_name, e),
            }
        }

        Ok(SheetExtraction {
            info: samples.sheet_info,
            headers: samples.headers,
            data_sections,
        })
    }

    /// Stream every sheet of `source` and extract it
    ///
    /// Sheets that cannot be read or written are recorded as failures;
    /// `on_sheet` is called after each sheet.
    pub fn extract_workbook(
        &self,
        source: &mut impl SheetSource,
        mut on_sheet: impl FnMut(&str, &SheetOutcome),
    ) -> Result<ExtractionSummary, ExtractionError> {
        fs::create_dir_all(&self.output_dir)?;

        let sheet_names = source.sheet_names();
        info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

        let window = extraction_window(&self.sections);
        let mut summary = ExtractionSummary::new();
        for sheet_name in &sheet_names {
            let extracted = source
                .stream_sheet(sheet_name, &window)
                .map_err(|e| e.to_string())
                .and_then(|sheet| {
                    self.extract_sheet(sheet_name, &sheet)
                        .map_err(|e| e.to_string())
                });
            let outcome = match extracted {
                Ok(extraction) => SheetOutcome::Extracted(extraction),
                Err(error) => {
                    warn!("Error processing sheet {}: {}", sheet_name, error);
                    SheetOutcome::Failed { error }
                }
            };
            on_sheet(sheet_name, &outcome);
            summary.insert(sheet_name.clone(), outcome);
        }

        Ok(summary)
    }

    pub fn write_summary(&self, summary: &ExtractionSummary) -> Result<PathBuf, ExtractionError> {
        let path = self.output_dir.join(SUMMARY_FILE);
        write_json(&path, summary)?;
        info!("Extraction summary saved to {}", path.display());
        Ok(path)
    }

    pub fn write_simplified(&self) -> Result<PathBuf, ExtractionError> {
        let path = self.output_dir.join(SIMPLIFIED_FILE);
        write_json(&path, &SimplifiedData::seed())?;
        info!("Simplified data saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_covers_sections_and_samples() {
        let window = extraction_window(&SECTIONS);
        // head_to_head reaches row 200, column 55
        assert!(window.contains(199, 54));
        assert!(!window.contains(199, 55));
        // sampled rows keep every column
        assert!(window.contains(950, 500));
        assert!(!window.contains(951, 500));
        assert!(!window.contains(1000, 0));
        // trade_history reaches row 250
        assert!(window.contains(249, 0));
    }

    #[test]
    fn test_extractor_defaults_to_known_sections() {
        let extractor = Extractor::new("out");
        assert_eq!(extractor.sections.len(), 4);
        assert_eq!(extractor.output_dir(), Path::new("out"));
    }
}
