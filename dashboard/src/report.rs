//! FILENAME: dashboard/src/report.rs
//! PURPOSE: Computes everything the dashboard shows from one filtered View.
//! CONTEXT: Choice lists, unique counts, commitment/spending totals and the
//! ranked top lists are each an independent chain off the same filtered
//! base. Values are returned raw; number formatting is the caller's job.

use crate::config::{DashboardConfig, TopListSpec};
use crate::error::DashboardError;
use crate::filters::apply_filters;
use crate::params::FilterParams;
use hxl_engine::{
    log_enter, log_exit, log_info, parse_number, Dataset, Predicate, TagPattern, View, SUM_TAG,
};
use serde::{Deserialize, Serialize};

pub const COMMITMENTS: &str = "x_transaction_type=commitments";
pub const SPENDING: &str = "x_transaction_type=spending";

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Sorted option lists for the select controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choices {
    pub orgs: Vec<String>,
    pub sectors: Vec<String>,
    pub countries: Vec<String>,
    pub months: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub org_count: usize,
    pub sector_count: usize,
    pub country_count: usize,
    pub activity_count: usize,
    pub net_commitments: f64,
    pub total_commitments: f64,
    pub net_spending: f64,
    pub total_spending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopList {
    pub id: String,
    pub entries: Vec<TopEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub params: FilterParams,
    pub choices: Choices,
    pub summary: Summary,
    pub top_lists: Vec<TopList>,
}

// ============================================================================
// SECTIONS
// ============================================================================

fn sorted_values(view: &View<'_>, pattern: &str) -> Result<Vec<String>, DashboardError> {
    let mut values: Vec<String> = view.get_values(&TagPattern::parse(pattern)?).into_iter().collect();
    values.sort();
    Ok(values)
}

fn unique_count(view: &View<'_>, pattern: &str) -> Result<usize, DashboardError> {
    Ok(view.get_values(&TagPattern::parse(pattern)?).len())
}

pub fn choices(view: &View<'_>) -> Result<Choices, DashboardError> {
    Ok(Choices {
        orgs: sorted_values(view, "#org+name")?,
        sectors: sorted_values(view, "#sector")?,
        countries: sorted_values(view, "#country")?,
        months: sorted_values(view, "#date+month")?,
    })
}

pub fn summary(view: &View<'_>) -> Result<Summary, DashboardError> {
    let commitments = view.with_rows(Predicate::parse(COMMITMENTS)?);
    let spending = view.with_rows(Predicate::parse(SPENDING)?);
    let net = TagPattern::parse("#value+net")?;
    let total = TagPattern::parse("#value+total")?;

    Ok(Summary {
        org_count: unique_count(view, "#org+name")?,
        sector_count: unique_count(view, "#sector")?,
        country_count: unique_count(view, "#country")?,
        activity_count: unique_count(view, "#activity+code")?,
        net_commitments: commitments.get_sum(&net),
        total_commitments: commitments.get_sum(&total),
        net_spending: spending.get_sum(&net),
        total_spending: spending.get_sum(&total),
    })
}

/// One ranked list over an already-filtered View: count, sort descending by
/// the sum, keep the first `top_n`.
pub fn top_list(
    view: &View<'_>,
    spec: &TopListSpec,
    top_n: usize,
) -> Result<TopList, DashboardError> {
    let entity = TagPattern::parse(&spec.entity)?;
    let value = TagPattern::parse(&spec.value)?;
    let sum = TagPattern::parse(SUM_TAG)?;

    let counted = view.count(&entity, &value);
    let limit = i64::try_from(top_n).unwrap_or(i64::MAX);
    let ranked = counted.view().sort_by(&sum, true).preview(limit)?;

    let entries = ranked
        .rows()
        .map(|row| TopEntry {
            label: row.values()[0].clone(),
            value: row.get(&sum).and_then(parse_number).unwrap_or_default(),
        })
        .collect();

    Ok(TopList {
        id: spec.id.clone(),
        entries,
    })
}

/// The configured top lists, all ranked over spending only.
pub fn top_lists(view: &View<'_>, config: &DashboardConfig) -> Result<Vec<TopList>, DashboardError> {
    let spending = view.with_rows(Predicate::parse(SPENDING)?);
    config
        .top_lists
        .iter()
        .map(|spec| top_list(&spending, spec, config.top_n))
        .collect()
}

pub fn build_report(
    data: &Dataset,
    params: &FilterParams,
    config: &DashboardConfig,
) -> Result<DashboardReport, DashboardError> {
    log_enter!("DASHBOARD", "build_report", "params={:?}", params);

    let filtered = apply_filters(&data.view(), params, config)?;
    let report = DashboardReport {
        params: params.clone(),
        choices: choices(&filtered)?,
        summary: summary(&filtered)?,
        top_lists: top_lists(&filtered, config)?,
    };

    log_info!(
        "DASHBOARD",
        "report filters={} orgs={} activities={} net_spending={}",
        filtered.predicates().count(),
        report.summary.org_count,
        report.summary.activity_count,
        report.summary.net_spending
    );
    log_exit!("DASHBOARD", "build_report");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxl_engine::Column;

    fn dataset() -> Dataset {
        let columns = vec![
            Column::new("Org", "#org+name").unwrap(),
            Column::new("Type", "#x_transaction_type").unwrap(),
            Column::new("Net", "#value+net").unwrap(),
        ];
        let rows = [
            ["B", "spending", "10"],
            ["A", "spending", "30"],
            ["A", "commitments", "70"],
            ["C", "spending", "20"],
        ]
        .iter()
        .map(|r| r.iter().map(|v| v.to_string()).collect::<Vec<String>>())
        .collect();
        Dataset::new(columns, rows).unwrap()
    }

    #[test]
    fn test_top_list_ranks_and_truncates() {
        let data = dataset();
        let view = data.view();
        let spec = TopListSpec::new("top.orgs", "#org+name", "#value+net");
        let list = top_list(&view, &spec, 2).unwrap();
        assert_eq!(list.id, "top.orgs");
        assert_eq!(
            list.entries,
            vec![
                TopEntry { label: "A".to_string(), value: 100.0 },
                TopEntry { label: "C".to_string(), value: 20.0 },
            ]
        );
    }

    #[test]
    fn test_top_lists_only_count_spending() {
        let data = dataset();
        let config = DashboardConfig {
            top_lists: vec![TopListSpec::new("top.orgs", "#org+name", "#value+net")],
            ..DashboardConfig::default()
        };
        let lists = top_lists(&data.view(), &config).unwrap();
        assert_eq!(lists[0].entries[0], TopEntry { label: "A".to_string(), value: 30.0 });
        assert_eq!(lists[0].entries.len(), 3);
    }

    #[test]
    fn test_bad_configured_pattern_is_reported() {
        let data = dataset();
        let spec = TopListSpec::new("broken", "org+name", "#value+net");
        let err = top_list(&data.view(), &spec, 10).unwrap_err();
        assert!(matches!(err, DashboardError::Engine(_)));
    }

    #[test]
    fn test_summary_without_totals_column_is_zero() {
        let data = dataset();
        let summary = summary(&data.view()).unwrap();
        assert_eq!(summary.org_count, 3);
        assert_eq!(summary.net_commitments, 70.0);
        assert_eq!(summary.net_spending, 60.0);
        assert_eq!(summary.total_spending, 0.0);
        assert_eq!(summary.activity_count, 0);
    }
}
