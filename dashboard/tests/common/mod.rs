//! FILENAME: tests/common/mod.rs
//! Fixtures for dashboard integration tests.

#![allow(dead_code)]

use hxl_engine::Dataset;
use iati_dashboard::load_table;

/// A small transactions table laid out like the published JSON: header row,
/// tag row, then one row per transaction split.
pub struct TransactionsFixture;

impl TransactionsFixture {
    pub fn raw_rows() -> Vec<Vec<String>> {
        let raw: Vec<Vec<&str>> = vec![
            vec![
                "Month", "Reporting org", "Sector", "Country", "Humanitarian", "Strict",
                "Transaction type", "Activity", "Net money", "Total money",
            ],
            vec![
                "#date+month", "#org+name", "#sector", "#country",
                "#indicator+bool+humanitarian", "#indicator+bool+strict",
                "#x_transaction_type", "#activity+code", "#value+net", "#value+total",
            ],
            vec!["2020-03", "Oxfam", "Health", "Kenya", "1", "1", "spending", "A1", "100", "120"],
            vec!["2020-03", "Oxfam", "WASH", "Somalia", "1", "0", "commitments", "A1", "500", "600"],
            vec!["2020-04", "UNICEF", "Education", "Kenya", "0", "1", "spending", "A2", "250", "250"],
            vec!["2020-04", "UNICEF", "Health", "Uganda", "1", "1", "spending", "A3", "N/A", "80"],
            vec!["2020-05", "WFP", "Food", "Somalia", "1", "0", "spending", "A4", "75", ""],
            vec!["2020-05", "WFP", "Food", "Kenya", "0", "0", "commitments", "A4", "300", "300"],
            vec!["2020-05", "IFRC", "Health", "Chad", "1", "1", "spending", "A5", "40", "45"],
        ];
        raw.into_iter()
            .map(|row| row.into_iter().map(String::from).collect::<Vec<String>>())
            .collect()
    }

    pub fn dataset() -> Dataset {
        load_table(Self::raw_rows()).unwrap()
    }
}
