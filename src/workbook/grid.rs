use std::collections::HashMap;
use std::ops::Range as Span;

use calamine::{Data, Range};

use super::cell::cell_to_string;

/// Read access to a sheet's cells by absolute, 0-based position
pub trait CellGrid {
    /// 1-based `(max_row, max_col)` of the last non-empty cell, `(0, 0)` for an empty sheet
    fn extent(&self) -> (usize, usize);

    fn cell(&self, row: usize, col: usize) -> Option<&Data>;

    /// String rendering of `cols` in `row`, missing cells as `""`
    fn row_strings(&self, row: usize, cols: Span<usize>) -> Vec<String> {
        cols.map(|col| self.cell(row, col).map(cell_to_string).unwrap_or_default())
            .collect()
    }
}

impl CellGrid for Range<Data> {
    fn extent(&self) -> (usize, usize) {
        let (row_offset, col_offset) = match self.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => return (0, 0),
        };
        self.used_cells()
            .filter(|(_, _, value)| !matches!(value, Data::Empty))
            .fold((0, 0), |(max_row, max_col), (row, col, _)| {
                (
                    max_row.max(row + row_offset + 1),
                    max_col.max(col + col_offset + 1),
                )
            })
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        let row = u32::try_from(row).ok()?;
        let col = u32::try_from(col).ok()?;
        self.get_value((row, col))
    }
}

/// Set of cell positions a streaming read keeps in memory
#[derive(Debug, Clone, Default)]
pub struct CellWindow {
    rects: Vec<(Span<usize>, Span<usize>)>,
}

impl CellWindow {
    /// Window that keeps nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Window that keeps every cell
    pub fn everything() -> Self {
        Self::new().with_rows(0..usize::MAX)
    }

    /// Keep whole rows (0-based, half-open)
    pub fn with_rows(self, rows: Span<usize>) -> Self {
        self.with_rect(rows, 0..usize::MAX)
    }

    /// Keep a rectangle (0-based, half-open)
    pub fn with_rect(mut self, rows: Span<usize>, cols: Span<usize>) -> Self {
        if !rows.is_empty() && !cols.is_empty() {
            self.rects.push((rows, cols));
        }
        self
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rects
            .iter()
            .any(|(rows, cols)| rows.contains(&row) && cols.contains(&col))
    }
}

/// Sheet assembled from a cell stream, holding only the cells inside a
/// [`CellWindow`] while still tracking the full sheet extent
#[derive(Debug, Clone, Default)]
pub struct SparseSheet {
    cells: HashMap<(usize, usize), Data>,
    max_row: usize,
    max_col: usize,
}

impl SparseSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a streamed cell. Empty cells never widen the extent.
    pub fn insert(&mut self, row: usize, col: usize, value: Data, window: &CellWindow) {
        if matches!(value, Data::Empty) {
            return;
        }
        self.max_row = self.max_row.max(row + 1);
        self.max_col = self.max_col.max(col + 1);
        if window.contains(row, col) {
            self.cells.insert((row, col), value);
        }
    }

    pub fn from_range(range: &Range<Data>, window: &CellWindow) -> Self {
        let (row_offset, col_offset) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or_default();
        let mut sheet = Self::new();
        for (row, col, value) in range.used_cells() {
            sheet.insert(row + row_offset, col + col_offset, value.clone(), window);
        }
        sheet
    }

    /// Number of cells held in memory
    pub fn retained(&self) -> usize {
        self.cells.len()
    }
}

impl CellGrid for SparseSheet {
    fn extent(&self) -> (usize, usize) {
        (self.max_row, self.max_col)
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.cells.get(&(row, col))
    }
}
