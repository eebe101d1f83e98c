use serde::Serialize;

use crate::config::{HEADER_ROWS, SAMPLE_ROW_LIMIT, SAMPLE_ROW_STEP};
use crate::workbook::CellGrid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetInfo {
    pub sheet_name: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    /// 1-based
    pub row_num: usize,
    pub data: Vec<String>,
    pub non_empty_count: usize,
}

/// Contents of `<sheet>_samples.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSamples {
    pub sheet_info: SheetInfo,
    pub headers: Vec<Vec<String>>,
    pub sample_rows: Vec<SampleRow>,
}

/// Rows among the first few that have any content
pub fn header_rows(grid: &impl CellGrid) -> Vec<Vec<String>> {
    let (max_row, max_col) = grid.extent();
    (0..HEADER_ROWS.min(max_row))
        .map(|row| grid.row_strings(row, 0..max_col))
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// Every `SAMPLE_ROW_STEP`th row from the top, blank rows included
pub fn sample_rows(grid: &impl CellGrid) -> Vec<SampleRow> {
    let (max_row, max_col) = grid.extent();
    (0..max_row.min(SAMPLE_ROW_LIMIT))
        .step_by(SAMPLE_ROW_STEP)
        .map(|row| {
            let data = grid.row_strings(row, 0..max_col);
            let non_empty_count = data.iter().filter(|cell| !cell.is_empty()).count();
            SampleRow {
                row_num: row + 1,
                data,
                non_empty_count,
            }
        })
        .collect()
}

pub fn sample_sheet(sheet_name: &str, grid: &impl CellGrid) -> SheetSamples {
    let (rows, columns) = grid.extent();
    SheetSamples {
        sheet_info: SheetInfo {
            sheet_name: sheet_name.to_string(),
            rows,
            columns,
        },
        headers: header_rows(grid),
        sample_rows: sample_rows(grid),
    }
}
