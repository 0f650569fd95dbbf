//! FILENAME: tests/common/mod.rs
//! Fixtures for hxl-engine integration tests.

#![allow(dead_code)]

use hxl_engine::{Column, Dataset, TagPattern};

/// Shorthand for patterns that are known to be valid.
pub fn pattern(text: &str) -> TagPattern {
    TagPattern::parse(text).unwrap()
}

pub fn dataset(tags: &[&str], rows: &[&[&str]]) -> Dataset {
    let columns = tags
        .iter()
        .map(|tag| Column::new(tag.trim_start_matches('#'), tag).unwrap())
        .collect();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect::<Vec<String>>())
        .collect();
    Dataset::new(columns, rows).unwrap()
}

/// Rows as plain string vectors, for order-sensitive comparisons.
pub fn table(data: &Dataset) -> Vec<Vec<String>> {
    data.rows().map(|r| r.to_vec()).collect()
}

/// Transaction-shaped data: one row per transaction split, with two sector
/// columns for multi-sector activities.
pub struct TransactionsFixture;

impl TransactionsFixture {
    pub fn tags() -> Vec<&'static str> {
        vec![
            "#date+month",
            "#org+name",
            "#sector",
            "#sector",
            "#country",
            "#indicator+bool+humanitarian",
            "#indicator+bool+strict",
            "#x_transaction_type",
            "#activity+code",
            "#value+net",
            "#value+total",
        ]
    }

    pub fn rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["2020-03", "Oxfam", "Health", "", "Kenya", "1", "1", "spending", "A1", "100", "120"],
            vec!["2020-03", "Oxfam", "WASH", "Health", "Somalia", "1", "0", "commitments", "A1", "500", "600"],
            vec!["2020-04", "UNICEF", "Education", "", "Kenya", "0", "1", "spending", "A2", "250", "250"],
            vec!["2020-04", "UNICEF", "Health", "", "Uganda", "1", "1", "spending", "A3", "N/A", "80"],
            vec!["2020-05", "WFP", "Food", "Health", "Somalia", "1", "0", "spending", "A4", "75", ""],
            vec!["2020-05", "WFP", "Food", "", "Kenya", "0", "0", "commitments", "A4", "300", "300"],
            vec!["2020-05", "", "Health", "", "", "0", "0", "spending", "A5", "5", "5"],
        ]
    }

    pub fn dataset() -> Dataset {
        let rows: Vec<Vec<&str>> = Self::rows();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        dataset(&Self::tags(), &row_refs)
    }
}
