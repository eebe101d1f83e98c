use std::path::{Path, PathBuf};
use tracing::debug;

use super::{write_json, ExtractionError};
use crate::config::Section;
use crate::workbook::CellGrid;

/// Stringify the cells of `section`, dropping rows with no content
///
/// The requested bounds are clipped to the sheet's extent, so a region lying
/// entirely outside the sheet yields no rows.
pub fn extract_section(grid: &impl CellGrid, section: &Section) -> Vec<Vec<String>> {
    let (max_row, max_col) = grid.extent();
    let end_row = section.end_row.min(max_row);
    let end_col = section.end_col.min(max_col);
    if section.start_row > end_row || section.start_col > end_col {
        debug!("Section {} lies outside a {}x{} sheet", section.name, max_row, max_col);
        return Vec::new();
    }

    let first_col = section.start_col.saturating_sub(1);
    (section.start_row.saturating_sub(1)..end_row)
        .map(|row| grid.row_strings(row, first_col..end_col))
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// File a section of a sheet is written to
pub fn section_path(output_dir: &Path, sheet_name: &str, section_name: &str) -> PathBuf {
    output_dir.join(format!("{sheet_name}_{section_name}.json"))
}

/// Write extracted rows to `<sheet>_<section>.json`
///
/// Nothing is written for an empty section and `None` is returned.
pub fn write_section(
    output_dir: &Path,
    sheet_name: &str,
    section: &Section,
    rows: &[Vec<String>],
) -> Result<Option<PathBuf>, ExtractionError> {
    if rows.is_empty() {
        return Ok(None);
    }
    let path = section_path(output_dir, sheet_name, section.name);
    write_json(&path, &rows)?;
    Ok(Some(path))
}
