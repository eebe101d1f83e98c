// ! Section extraction: fixed sheet regions dumped to JSON files for manual review

pub mod extractor;
pub mod samples;
pub mod section;
pub mod seed;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

// Re-export commonly used items
pub use extractor::{
    extraction_window, ExtractionSummary, Extractor, SectionRecord, SheetExtraction, SheetOutcome,
    SIMPLIFIED_FILE, SUMMARY_FILE,
};
pub use samples::{header_rows, sample_rows, sample_sheet, SampleRow, SheetInfo, SheetSamples};
pub use section::{extract_section, write_section};
pub use seed::SimplifiedData;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `value` as pretty-printed JSON; the file is closed before returning
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<(), ExtractionError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
