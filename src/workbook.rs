// ! Workbook access: opening files, full-range and streaming sheet reads

pub mod cell;
pub mod grid;
pub mod reader;

// Re-export commonly used items
pub use cell::{cell_to_f64, cell_to_json, cell_to_string, is_missing};
pub use grid::{CellGrid, CellWindow, SparseSheet};
pub use reader::{SheetSource, Workbook, WorkbookError};
