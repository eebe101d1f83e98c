use calamine::{open_workbook_auto, Data, DataRef, Range, Reader, Sheets};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::grid::{CellGrid, CellWindow, SparseSheet};

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open workbook: {0}")]
    Open(String),

    #[error("Failed to read sheet {sheet}: {msg}")]
    SheetRead { sheet: String, msg: String },
}

impl WorkbookError {
    fn sheet_read(sheet: &str, err: impl Display) -> Self {
        WorkbookError::SheetRead {
            sheet: sheet.to_string(),
            msg: err.to_string(),
        }
    }
}

/// Anything that can hand out named sheets
///
/// Implemented by [`Workbook`] for files on disk; tests implement it over
/// in-memory ranges.
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read a whole sheet into memory
    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, WorkbookError>;

    /// Read a sheet keeping only the cells inside `window`
    fn stream_sheet(
        &mut self,
        name: &str,
        window: &CellWindow,
    ) -> Result<SparseSheet, WorkbookError> {
        let range = self.read_sheet(name)?;
        Ok(SparseSheet::from_range(&range, window))
    }
}

/// Stream cells from an xlsx/xlsb cell reader into a [`SparseSheet`]
macro_rules! cells_reader_to_sheet {
    ($name:expr, $window:expr, $reader:expr) => {{
        let mut sheet = SparseSheet::new();
        while let Some(cell) = $reader
            .next_cell()
            .map_err(|e| WorkbookError::sheet_read($name, e))?
        {
            let (row, col) = cell.get_position();
            let value = match cell.get_value() {
                DataRef::Int(value) => Data::Int(*value),
                DataRef::Float(value) => Data::Float(*value),
                DataRef::String(value) => Data::String(value.to_owned()),
                DataRef::SharedString(value) => Data::String(value.to_string()),
                DataRef::Bool(value) => Data::Bool(*value),
                DataRef::DateTime(value) => Data::DateTime(*value),
                DataRef::DateTimeIso(value) => Data::DateTimeIso(value.to_owned()),
                DataRef::DurationIso(value) => Data::DurationIso(value.to_owned()),
                DataRef::Error(value) => Data::Error(value.to_owned()),
                DataRef::Empty => Data::Empty,
            };
            sheet.insert(row as usize, col as usize, value, $window);
        }
        sheet
    }};
}

/// A spreadsheet file opened for reading (xlsx, xlsm, xlsb, xls or ods)
///
/// The underlying file handle is released when the workbook is dropped.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WorkbookError::NotFound(path.to_path_buf()));
        }

        info!("Loading workbook from {}", path.display());
        let sheets = open_workbook_auto(path).map_err(|e| WorkbookError::Open(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, WorkbookError> {
        debug!("Reading sheet {} into memory", name);
        self.sheets
            .worksheet_range(name)
            .map_err(|e| WorkbookError::sheet_read(name, e))
    }

    fn stream_sheet(
        &mut self,
        name: &str,
        window: &CellWindow,
    ) -> Result<SparseSheet, WorkbookError> {
        let streamed = match &mut self.sheets {
            Sheets::Xlsx(xlsx) => {
                let mut reader = xlsx
                    .worksheet_cells_reader(name)
                    .map_err(|e| WorkbookError::sheet_read(name, e))?;
                Some(cells_reader_to_sheet!(name, window, reader))
            }
            Sheets::Xlsb(xlsb) => {
                let mut reader = xlsb
                    .worksheet_cells_reader(name)
                    .map_err(|e| WorkbookError::sheet_read(name, e))?;
                Some(cells_reader_to_sheet!(name, window, reader))
            }
            _ => None,
        };

        match streamed {
            Some(sheet) => {
                debug!(
                    "Streamed sheet {}: kept {} cells of a {:?} extent",
                    name,
                    sheet.retained(),
                    sheet.extent()
                );
                Ok(sheet)
            }
            // xls and ods have no cell streaming; read the range and filter
            None => {
                let range = self.read_sheet(name)?;
                Ok(SparseSheet::from_range(&range, window))
            }
        }
    }
}
