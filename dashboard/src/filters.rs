//! FILENAME: dashboard/src/filters.rs
//! PURPOSE: Translates request parameters into a chain of View filters.
//! CONTEXT: Nothing is copied here; each present parameter appends one
//! predicate, and the rows are only walked when a summary or list asks.

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::params::FilterParams;
use hxl_engine::{log_debug, Predicate, TagPattern, View};

/// Select-style parameters: any value other than the wildcard filters on it.
pub const SELECT_FILTERS: [(&str, &str); 4] = [
    ("org", "#org+name"),
    ("sector", "#sector"),
    ("country", "#country"),
    ("month", "#date+month"),
];

/// Checkbox parameters: when checked, the indicator column must be true.
pub const CHECKBOX_FILTERS: [(&str, &str); 2] = [
    ("humanitarian", "#indicator+bool+humanitarian"),
    ("strict", "#indicator+bool+strict"),
];

pub fn apply_filters<'a>(
    view: &View<'a>,
    params: &FilterParams,
    config: &DashboardConfig,
) -> Result<View<'a>, DashboardError> {
    let mut result = view.clone();

    for (name, pattern) in SELECT_FILTERS {
        match params.get(name) {
            Some(value) if !value.is_empty() && value != config.wildcard => {
                log_debug!("FILTER", "{} -> {}={}", name, pattern, value);
                result = result.with_rows(Predicate::equals(TagPattern::parse(pattern)?, value));
            }
            _ => {}
        }
    }

    for (name, pattern) in CHECKBOX_FILTERS {
        if params.get(name) == Some(config.checked.as_str()) {
            log_debug!("FILTER", "{} -> {}={}", name, pattern, config.indicator_true);
            result = result.with_rows(Predicate::equals(
                TagPattern::parse(pattern)?,
                config.indicator_true.as_str(),
            ));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxl_engine::{Column, Dataset};

    fn dataset() -> Dataset {
        let columns = vec![
            Column::new("Org", "#org+name").unwrap(),
            Column::new("Country", "#country").unwrap(),
            Column::new("Humanitarian", "#indicator+bool+humanitarian").unwrap(),
        ];
        let rows = vec![
            vec!["Oxfam".to_string(), "Kenya".to_string(), "1".to_string()],
            vec!["WFP".to_string(), "Kenya".to_string(), "0".to_string()],
            vec!["Oxfam".to_string(), "Chad".to_string(), "0".to_string()],
        ];
        Dataset::new(columns, rows).unwrap()
    }

    #[test]
    fn test_no_params_means_no_filters() {
        let data = dataset();
        let view = apply_filters(&data.view(), &FilterParams::default(), &DashboardConfig::default())
            .unwrap();
        assert_eq!(view.predicates().count(), 0);
        assert_eq!(view.row_count(), 3);
    }

    #[test]
    fn test_wildcard_and_empty_values_are_ignored() {
        let data = dataset();
        let params = FilterParams::from_pairs(vec![("org", "*"), ("country", "")]);
        let view = apply_filters(&data.view(), &params, &DashboardConfig::default()).unwrap();
        assert_eq!(view.predicates().count(), 0);
    }

    #[test]
    fn test_select_and_checkbox_filters_combine() {
        let data = dataset();
        let params = FilterParams::from_pairs(vec![
            ("org", "Oxfam"),
            ("humanitarian", "on"),
        ]);
        let view = apply_filters(&data.view(), &params, &DashboardConfig::default()).unwrap();
        assert_eq!(view.predicates().count(), 2);
        let indices: Vec<usize> = view.rows().map(|r| r.source_index()).collect();
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn test_unchecked_checkbox_values_do_not_filter() {
        let data = dataset();
        let params = FilterParams::from_pairs(vec![("humanitarian", "off")]);
        let view = apply_filters(&data.view(), &params, &DashboardConfig::default()).unwrap();
        assert_eq!(view.row_count(), 3);
    }
}
