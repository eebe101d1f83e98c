//! Column pattern heuristics
//!
//! Guesses which columns of a sheet sample hold season years, owner names,
//! weekly scores or season totals. The thresholds come from the shape of the
//! WPFL history workbook; every result is a candidate for a human to review,
//! never a classification to rely on.

use calamine::Data;
use serde::Serialize;

use crate::config::{
    OWNER_CANDIDATE_CAP, OWNER_DISTINCT_RANGE, OWNER_NAME_MAX_CHARS, OWNER_PROBE_VALUES,
    OWNER_TAKE_VALUES, SEASON_TOTAL_BAND, WEEKLY_SCORE_BAND, YEAR_HEADER_RANGE,
};
use crate::workbook::{cell_to_f64, cell_to_string, is_missing};

/// One named column of a [`Sample`]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleColumn {
    pub name: String,
    pub header: Data,
    /// One entry per sampled row, `Data::Empty` where the row has no value
    pub values: Vec<Data>,
}

impl SampleColumn {
    pub fn new(name: impl Into<String>, header: Data, values: Vec<Data>) -> Self {
        Self {
            name: name.into(),
            header,
            values,
        }
    }

    /// Values that are present, in row order
    pub fn present(&self) -> impl Iterator<Item = &Data> {
        self.values.iter().filter(|v| !is_missing(v))
    }

    pub fn kind(&self) -> ColumnKind {
        let mut kind = ColumnKind::Empty;
        for value in self.present() {
            let this = match value {
                Data::Int(_) | Data::Float(_) => ColumnKind::Numeric,
                Data::Bool(_) => ColumnKind::Boolean,
                Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
                    ColumnKind::Temporal
                }
                _ => return ColumnKind::Text,
            };
            kind = match kind {
                ColumnKind::Empty => this,
                same if same == this => same,
                _ => return ColumnKind::Text,
            };
        }
        kind
    }
}

/// Bounded prefix of a sheet, one entry per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub columns: Vec<SampleColumn>,
    pub rows: usize,
}

/// Value type shared by every present value of a column. Mixed columns are `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Empty,
    Numeric,
    Boolean,
    Temporal,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumnStats {
    pub column: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Heuristic guesses for one sheet. Empty lists are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternReport {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub year_columns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_owners: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_weekly_scores: Vec<NumericColumnStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_season_totals: Vec<NumericColumnStats>,
}

impl PatternReport {
    pub fn is_empty(&self) -> bool {
        self.year_columns.is_empty()
            && self.possible_owners.is_empty()
            && self.possible_weekly_scores.is_empty()
            && self.possible_season_totals.is_empty()
    }
}

/// Which score band a numeric column falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Weekly,
    SeasonTotal,
}

/// Run every heuristic over a sample
pub fn identify_patterns(sample: &Sample) -> PatternReport {
    let mut report = PatternReport {
        year_columns: sample
            .columns
            .iter()
            .filter(|c| is_year_header(&c.header))
            .map(|c| c.name.clone())
            .collect(),
        possible_owners: owner_candidates(&sample.columns),
        ..Default::default()
    };

    for column in &sample.columns {
        let Some(stats) = numeric_stats(column) else {
            continue;
        };
        match classify_scores(stats.min, stats.max, stats.mean) {
            Some(ScoreKind::Weekly) => report.possible_weekly_scores.push(stats),
            Some(ScoreKind::SeasonTotal) => report.possible_season_totals.push(stats),
            None => {}
        }
    }

    report
}

/// A header is a year when it is all digits and falls in the league's era
pub fn is_year_header(header: &Data) -> bool {
    let text = cell_to_string(header);
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && text
            .parse::<i64>()
            .is_ok_and(|year| YEAR_HEADER_RANGE.contains(&year))
}

/// Weekly scores win when a column matches both bands
pub fn classify_scores(min: f64, max: f64, mean: f64) -> Option<ScoreKind> {
    if WEEKLY_SCORE_BAND.matches(min, max, mean) {
        Some(ScoreKind::Weekly)
    } else if SEASON_TOTAL_BAND.matches(min, max, mean) {
        Some(ScoreKind::SeasonTotal)
    } else {
        None
    }
}

/// Min, max and mean of a numeric column, `None` for other columns
pub fn numeric_stats(column: &SampleColumn) -> Option<NumericColumnStats> {
    if column.kind() != ColumnKind::Numeric {
        return None;
    }
    let values: Vec<f64> = column.present().filter_map(cell_to_f64).collect();
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(NumericColumnStats {
        column: column.name.clone(),
        min,
        max,
        mean,
    })
}

/// Distinct present values in first-seen order
fn distinct_values(column: &SampleColumn) -> Vec<&Data> {
    let mut distinct: Vec<&Data> = Vec::new();
    for value in column.present() {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct
}

fn looks_like_name(value: &Data) -> bool {
    match value {
        Data::String(s) => !s.contains(' ') && s.chars().count() < OWNER_NAME_MAX_CHARS,
        _ => false,
    }
}

/// Owner names gathered from text columns whose distinct value count fits a
/// league roster
pub fn owner_candidates(columns: &[SampleColumn]) -> Vec<String> {
    let mut owners: Vec<String> = Vec::new();

    for column in columns.iter().filter(|c| c.kind() == ColumnKind::Text) {
        let distinct = distinct_values(column);
        if !OWNER_DISTINCT_RANGE.contains(&distinct.len()) {
            continue;
        }
        if !distinct
            .iter()
            .take(OWNER_PROBE_VALUES)
            .any(|v| looks_like_name(v))
        {
            continue;
        }

        for value in distinct.into_iter().take(OWNER_TAKE_VALUES) {
            let name = cell_to_string(value);
            if !owners.contains(&name) {
                owners.push(name);
            }
        }
    }

    owners.truncate(OWNER_CANDIDATE_CAP);
    owners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, values: &[&str]) -> SampleColumn {
        SampleColumn::new(
            name,
            Data::String(name.to_string()),
            values.iter().map(|v| Data::String(v.to_string())).collect(),
        )
    }

    fn number_column(name: &str, values: &[f64]) -> SampleColumn {
        SampleColumn::new(
            name,
            Data::String(name.to_string()),
            values.iter().map(|v| Data::Float(*v)).collect(),
        )
    }

    #[test]
    fn test_year_header_digits_in_range() {
        assert!(is_year_header(&Data::String("2015".into())));
        assert!(is_year_header(&Data::Float(2000.0)));
        assert!(is_year_header(&Data::Int(2030)));
    }

    #[test]
    fn test_year_header_rejections() {
        assert!(!is_year_header(&Data::String("2031".into())));
        assert!(!is_year_header(&Data::String("1999".into())));
        assert!(!is_year_header(&Data::String("Total".into())));
        assert!(!is_year_header(&Data::String(" 2015".into())));
        assert!(!is_year_header(&Data::String("+2015".into())));
        assert!(!is_year_header(&Data::String("２０１５".into())));
        assert!(!is_year_header(&Data::Float(2015.5)));
        assert!(!is_year_header(&Data::Empty));
    }

    #[test]
    fn test_classify_scores() {
        assert_eq!(classify_scores(60.0, 145.0, 95.0), Some(ScoreKind::Weekly));
        assert_eq!(
            classify_scores(1200.0, 1850.0, 1500.0),
            Some(ScoreKind::SeasonTotal)
        );
        assert_eq!(classify_scores(-5.0, 145.0, 95.0), None);
        assert_eq!(classify_scores(-5.0, 1850.0, 1500.0), None);
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(number_column("Pts", &[1.0, 2.0]).kind(), ColumnKind::Numeric);
        assert_eq!(text_column("Owner", &["AJ"]).kind(), ColumnKind::Text);
        assert_eq!(number_column("Pts", &[]).kind(), ColumnKind::Empty);

        let mixed = SampleColumn::new(
            "Mixed",
            Data::Empty,
            vec![Data::Float(1.0), Data::Empty, Data::String("x".into())],
        );
        assert_eq!(mixed.kind(), ColumnKind::Text);

        let flags = SampleColumn::new("Flag", Data::Empty, vec![Data::Bool(true), Data::Empty]);
        assert_eq!(flags.kind(), ColumnKind::Boolean);
    }

    #[test]
    fn test_numeric_stats_skips_missing() {
        let column = SampleColumn::new(
            "Week 1",
            Data::Empty,
            vec![Data::Float(60.0), Data::Empty, Data::Int(130)],
        );
        let stats = numeric_stats(&column).unwrap();
        assert_eq!(stats.min, 60.0);
        assert_eq!(stats.max, 130.0);
        assert_eq!(stats.mean, 95.0);
    }

    #[test]
    fn test_numeric_stats_ignores_text_columns() {
        assert!(numeric_stats(&text_column("Owner", &["AJ", "Todd"])).is_none());
    }

    #[test]
    fn test_owner_candidates_six_names() {
        let column = text_column(
            "Owner",
            &["Adler", "Nixon", "AJ", "Todd", "Jimmy", "Dave", "Adler", "Nixon"],
        );
        assert_eq!(
            owner_candidates(&[column]),
            vec!["Adler", "Nixon", "AJ", "Todd", "Jimmy", "Dave"]
        );
    }

    #[test]
    fn test_owner_candidates_too_many_distinct() {
        let names: Vec<String> = (0..25).map(|i| format!("Owner{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        assert!(owner_candidates(&[text_column("Owner", &refs)]).is_empty());
    }

    #[test]
    fn test_owner_candidates_needs_a_short_single_word() {
        let column = text_column(
            "Notes",
            &["Mike S", "Trade one", "Trade two", "Trade three", "Trade four", "Ok"],
        );
        // "Ok" is sixth, outside the five probed values
        assert!(owner_candidates(&[column]).is_empty());
    }

    #[test]
    fn test_owner_candidates_take_ten_and_cap_fifteen() {
        let first: Vec<String> = (0..12).map(|i| format!("A{i}")).collect();
        let second: Vec<String> = (0..12).map(|i| format!("B{i}")).collect();
        let first: Vec<&str> = first.iter().map(String::as_str).collect();
        let second: Vec<&str> = second.iter().map(String::as_str).collect();

        let owners = owner_candidates(&[text_column("X", &first), text_column("Y", &second)]);
        assert_eq!(owners.len(), 15);
        assert_eq!(owners[9], "A9");
        assert_eq!(owners[10], "B0");
    }

    #[test]
    fn test_identify_patterns_full_report() {
        let sample = Sample {
            columns: vec![
                text_column("Owner", &["Adler", "Nixon", "AJ", "Todd", "Jimmy", "Dave"]),
                SampleColumn::new(
                    "2015",
                    Data::Float(2015.0),
                    [60.0, 145.0, 80.0, 95.0, 100.0, 90.0]
                        .iter()
                        .map(|v| Data::Float(*v))
                        .collect(),
                ),
                number_column("Total", &[1200.0, 1850.0, 1450.0, 1500.0, 1500.0, 1500.0]),
                number_column("Rank", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            ],
            rows: 6,
        };

        let report = identify_patterns(&sample);
        assert_eq!(report.year_columns, vec!["2015"]);
        assert_eq!(report.possible_owners.len(), 6);
        assert_eq!(report.possible_weekly_scores.len(), 1);
        assert_eq!(report.possible_weekly_scores[0].column, "2015");
        assert_eq!(report.possible_weekly_scores[0].mean, 95.0);
        assert_eq!(report.possible_season_totals.len(), 1);
        assert_eq!(report.possible_season_totals[0].column, "Total");
    }

    #[test]
    fn test_empty_report_serializes_to_empty_object() {
        let report = identify_patterns(&Sample::default());
        assert!(report.is_empty());
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }
}
