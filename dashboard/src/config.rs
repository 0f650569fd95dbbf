//! FILENAME: dashboard/src/config.rs
//! Dashboard configuration.
//!
//! Everything has a default matching the published dashboard, and every field
//! may be omitted when deserializing. Patterns are kept as text and parsed
//! when a report is built, so a bad pattern surfaces as an engine error there.

use serde::{Deserialize, Serialize};

/// One ranked list: which entity to group by and which value to total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopListSpec {
    pub id: String,
    pub entity: String,
    pub value: String,
}

impl TopListSpec {
    pub fn new(id: &str, entity: &str, value: &str) -> Self {
        TopListSpec {
            id: id.to_string(),
            entity: entity.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of entries kept per ranked list.
    pub top_n: usize,

    /// Select value meaning "no filter".
    pub wildcard: String,

    /// Checkbox value meaning "checked".
    pub checked: String,

    /// Value a boolean indicator cell must hold for a checked filter to keep it.
    pub indicator_true: String,

    pub top_lists: Vec<TopListSpec>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            top_n: 10,
            wildcard: "*".to_string(),
            checked: "on".to_string(),
            indicator_true: "1".to_string(),
            top_lists: vec![
                TopListSpec::new("top.orgs", "#org+name", "#value+total"),
                TopListSpec::new("top.sectors", "#sector", "#value+net"),
                TopListSpec::new("top.countries", "#country", "#value+net"),
            ],
        }
    }
}
