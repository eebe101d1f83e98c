#![allow(dead_code)]

use calamine::{Data, Range};
use wpfl_history::workbook::{SheetSource, WorkbookError};

/// Workbook held in memory; a sheet given as `Err` fails to read
pub struct MemoryWorkbook {
    sheets: Vec<(String, Result<Range<Data>, String>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn with_sheet(mut self, name: &str, range: Range<Data>) -> Self {
        self.sheets.push((name.to_string(), Ok(range)));
        self
    }

    pub fn with_broken_sheet(mut self, name: &str, msg: &str) -> Self {
        self.sheets.push((name.to_string(), Err(msg.to_string())));
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, WorkbookError> {
        match self.sheets.iter().find(|(n, _)| n == name) {
            Some((_, Ok(range))) => Ok(range.clone()),
            Some((_, Err(msg))) => Err(WorkbookError::SheetRead {
                sheet: name.to_string(),
                msg: msg.clone(),
            }),
            None => Err(WorkbookError::SheetRead {
                sheet: name.to_string(),
                msg: "sheet not found".to_string(),
            }),
        }
    }
}

/// Build a sheet from rows of cells starting at A1
pub fn sheet(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Range::empty();
    }
    let mut range = Range::new((0, 0), (height as u32 - 1, width as u32 - 1));
    for (row, cells) in rows.into_iter().enumerate() {
        for (col, value) in cells.into_iter().enumerate() {
            range.set_value((row as u32, col as u32), value);
        }
    }
    range
}

pub fn s(value: &str) -> Data {
    Data::String(value.to_string())
}

pub fn f(value: f64) -> Data {
    Data::Float(value)
}

/// Owner/score table shaped like the league history sheets
pub fn league_sheet() -> Range<Data> {
    let owners = ["Adler", "Nixon", "AJ", "Todd", "Jimmy", "Dave"];
    let weekly = [60.0, 145.0, 80.0, 95.0, 100.0, 90.0];
    let totals = [1200.0, 1850.0, 1450.0, 1500.0, 1500.0, 1500.0];

    let mut rows = vec![vec![s("Owner"), s("2015"), s("Total"), s("Notes")]];
    for i in 0..owners.len() {
        rows.push(vec![
            s(owners[i]),
            f(weekly[i]),
            f(totals[i]),
            if i == 0 { s("champion") } else { Data::Empty },
        ]);
    }
    sheet(rows)
}
