use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::config::KNOWN_OWNERS;

/// Hand-maintained starting point for the league data set
///
/// The owner list is curated, not read from the workbook. The remaining maps
/// are placeholders filled in by later manual work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedData {
    pub owners: Vec<String>,
    pub trade_summary: Map<String, JsonValue>,
    pub head_to_head: Map<String, JsonValue>,
    pub statistics: Map<String, JsonValue>,
}

impl SimplifiedData {
    pub fn seed() -> Self {
        Self {
            owners: KNOWN_OWNERS.iter().map(|o| o.to_string()).collect(),
            trade_summary: Map::new(),
            head_to_head: Map::new(),
            statistics: Map::new(),
        }
    }
}
