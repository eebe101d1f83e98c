use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Header cells parsing to a year in this range mark a year column
pub const YEAR_HEADER_RANGE: RangeInclusive<i64> = 2000..=2030;

/// Distinct value count of a plausible owner roster
pub const OWNER_DISTINCT_RANGE: RangeInclusive<usize> = 5..=20;
/// Owner names are expected to be shorter than this
pub const OWNER_NAME_MAX_CHARS: usize = 20;
/// Number of leading distinct values inspected when deciding if a column holds names
pub const OWNER_PROBE_VALUES: usize = 5;
/// Number of leading distinct values taken from a column that looks like names
pub const OWNER_TAKE_VALUES: usize = 10;
pub const OWNER_CANDIDATE_CAP: usize = 15;

/// Value band for a numeric column. A column matches when every bound it
/// defines contains the corresponding statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBand {
    pub min: RangeInclusive<f64>,
    pub max: RangeInclusive<f64>,
    pub mean: Option<RangeInclusive<f64>>,
}

impl ScoreBand {
    pub fn matches(&self, min: f64, max: f64, mean: f64) -> bool {
        self.min.contains(&min)
            && self.max.contains(&max)
            && self.mean.as_ref().is_none_or(|band| band.contains(&mean))
    }
}

/// Weekly fantasy scores, calibrated against the WPFL history workbook
pub const WEEKLY_SCORE_BAND: ScoreBand = ScoreBand {
    min: 0.0..=100.0,
    max: 50.0..=250.0,
    mean: Some(50.0..=150.0),
};

/// Season point totals, calibrated against the WPFL history workbook
pub const SEASON_TOTAL_BAND: ScoreBand = ScoreBand {
    min: 500.0..=2500.0,
    max: 1000.0..=3000.0,
    mean: None,
};

/// Sample values reported per column by the sheet summarizer
pub const SAMPLE_VALUES_PER_COLUMN: usize = 5;

/// Leading rows scanned for header content (1-based count)
pub const HEADER_ROWS: usize = 5;
/// Distance between sampled rows
pub const SAMPLE_ROW_STEP: usize = 50;
/// Rows beyond this are never sampled
pub const SAMPLE_ROW_LIMIT: usize = 1000;

/// Rectangular region of a sheet presumed to hold one logical table.
/// Bounds are 1-based and inclusive, as shown in a spreadsheet UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// Table locations found by manual inspection of the condensed workbook
pub const SECTIONS: [Section; 4] = [
    Section {
        name: "trade_history",
        start_row: 1,
        end_row: 250,
        start_col: 1,
        end_col: 10,
    },
    Section {
        name: "owner_stats",
        start_row: 1,
        end_row: 50,
        start_col: 40,
        end_col: 50,
    },
    Section {
        name: "head_to_head",
        start_row: 1,
        end_row: 200,
        start_col: 43,
        end_col: 55,
    },
    Section {
        name: "season_data",
        start_row: 1,
        end_row: 100,
        start_col: 12,
        end_col: 30,
    },
];

/// Curated league owners. Maintained by hand, not derived from any workbook.
pub const KNOWN_OWNERS: [&str; 14] = [
    "Mike S", "Adler", "Nixon", "AJ", "Forrest", "Todd", "Jimmy", "Dave", "Neill", "Ryan", "Doug",
    "Hoyle", "Rick", "Mims",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub history_path: PathBuf,
    pub condensed_path: PathBuf,
    pub output_dir: PathBuf,
    pub sample_rows: usize,
    pub max_sheets: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            history_path: env::var("WPFL_HISTORY_PATH")
                .unwrap_or_else(|_| "data/WPFLHistory.xlsx".to_string())
                .into(),
            condensed_path: env::var("WPFL_CONDENSED_PATH")
                .unwrap_or_else(|_| "data/WPFLHistoryCondensed.xlsx".to_string())
                .into(),
            output_dir: env::var("WPFL_OUTPUT_DIR")
                .unwrap_or_else(|_| "data/wpfl_extracted".to_string())
                .into(),
            sample_rows: env::var("WPFL_SAMPLE_ROWS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            max_sheets: env::var("WPFL_MAX_SHEETS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }
}
