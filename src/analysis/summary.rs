use calamine::Data;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use super::patterns::{identify_patterns, PatternReport, Sample, SampleColumn};
use crate::config::SAMPLE_VALUES_PER_COLUMN;
use crate::workbook::{cell_to_json, cell_to_string, is_missing, CellGrid};

/// Column-level overview of a sheet sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    /// `[data rows, columns]`
    pub shape: [usize; 2],
    pub columns: Vec<String>,
    pub non_null_counts: IndexMap<String, usize>,
    /// First present values of every column that has any
    pub sample_data: IndexMap<String, Vec<JsonValue>>,
    pub data_patterns: PatternReport,
}

impl SheetSummary {
    pub fn from_grid(grid: &impl CellGrid, sample_rows: usize) -> Self {
        Self::from_sample(&build_sample(grid, sample_rows))
    }

    pub fn from_sample(sample: &Sample) -> Self {
        let mut non_null_counts = IndexMap::new();
        let mut sample_data = IndexMap::new();

        for column in &sample.columns {
            non_null_counts.insert(column.name.clone(), column.present().count());

            let values: Vec<JsonValue> = column
                .values
                .iter()
                .filter_map(cell_to_json)
                .take(SAMPLE_VALUES_PER_COLUMN)
                .collect();
            if !values.is_empty() {
                sample_data.insert(column.name.clone(), values);
            }
        }

        Self {
            shape: [sample.rows, sample.columns.len()],
            columns: sample.columns.iter().map(|c| c.name.clone()).collect(),
            non_null_counts,
            sample_data,
            data_patterns: identify_patterns(sample),
        }
    }
}

fn is_blank_row(grid: &impl CellGrid, row: usize, width: usize) -> bool {
    (0..width).all(|col| grid.cell(row, col).is_none_or(is_missing))
}

/// Column names from the header row
///
/// Blank headers become `Unnamed: <index>` and repeated names get `.1`, `.2`
/// suffixes so every column can be used as a JSON key.
pub fn column_names(headers: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, header) in headers.iter().enumerate() {
        let base = if is_missing(header) {
            format!("Unnamed: {idx}")
        } else {
            cell_to_string(header)
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Read a bounded sample: the first non-blank row is the header, followed by
/// up to `sample_rows` non-blank data rows
pub fn build_sample(grid: &impl CellGrid, sample_rows: usize) -> Sample {
    let (max_row, max_col) = grid.extent();

    let Some(header_row) = (0..max_row).find(|&row| !is_blank_row(grid, row, max_col)) else {
        return Sample::default();
    };

    let headers: Vec<Data> = (0..max_col)
        .map(|col| grid.cell(header_row, col).cloned().unwrap_or(Data::Empty))
        .collect();
    let names = column_names(&headers);

    let data_rows: Vec<usize> = (header_row + 1..max_row)
        .filter(|&row| !is_blank_row(grid, row, max_col))
        .take(sample_rows)
        .collect();

    let columns = names
        .into_iter()
        .zip(headers)
        .enumerate()
        .map(|(col, (name, header))| {
            let values = data_rows
                .iter()
                .map(|&row| grid.cell(row, col).cloned().unwrap_or(Data::Empty))
                .collect();
            SampleColumn::new(name, header, values)
        })
        .collect();

    Sample {
        columns,
        rows: data_rows.len(),
    }
}
