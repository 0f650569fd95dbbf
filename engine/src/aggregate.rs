//! FILENAME: engine/src/aggregate.rs
//! Aggregation - group a View's rows and summarize each group.
//!
//! Output is always a fresh, ordinary Dataset (group key column + one
//! synthetic summary column), so it can be viewed, filtered, sorted and
//! previewed like any other table.
//!
//! Algorithm:
//! 1. Resolve the group column (first match) and the summed columns (all matches)
//! 2. Walk the View once; skip rows with a blank or missing group value
//! 3. Accumulate per group key, remembering first-appearance order
//! 4. Emit one row per group in that order

use crate::dataset::Dataset;
use crate::number::{format_number, is_blank, parse_number};
use crate::pattern::TagPattern;
use crate::tag::{Attributes, Column, Tag};
use crate::view::View;
use rustc_hash::FxHashMap;

/// Tag of the summary column produced by [`View::count`].
pub const SUM_TAG: &str = "#value+sum";

/// Tag of the summary column produced by [`View::count_rows`].
pub const COUNT_TAG: &str = "#meta+count";

fn summary_tag(hashtag: &str, attribute: &str) -> Tag {
    let mut attributes = Attributes::new();
    attributes.push(attribute.to_string());
    Tag::from_parts(hashtag.to_string(), attributes)
}

/// Per-group running totals in first-appearance order.
struct GroupAccumulator<'a> {
    order: Vec<&'a str>,
    totals: FxHashMap<&'a str, f64>,
}

impl<'a> GroupAccumulator<'a> {
    fn new() -> Self {
        GroupAccumulator {
            order: Vec::new(),
            totals: FxHashMap::default(),
        }
    }

    fn add(&mut self, key: &'a str, amount: f64) {
        let order = &mut self.order;
        let total = self.totals.entry(key).or_insert_with(|| {
            order.push(key);
            0.0
        });
        *total += amount;
    }

    fn into_rows(self) -> Vec<Vec<String>> {
        self.order
            .iter()
            .map(|key| {
                let total = self.totals.get(key).copied().unwrap_or_default();
                vec![key.to_string(), format_number(total)]
            })
            .collect()
    }
}

impl<'a> View<'a> {
    /// Groups rows by the first column `group` selects and sums every column
    /// `sum` selects within each group. The result has a key column tagged
    /// like `group` and a `#value+sum` column.
    pub fn count(&self, group: &TagPattern, sum: &TagPattern) -> Dataset {
        log_enter!("AGGREGATE", "count", "group={} sum={}", group, sum);

        let columns = self.columns();
        let sum_columns = sum.find_columns(columns);

        let groups = self.accumulate(group, |values| {
            sum_columns
                .iter()
                .filter_map(|&i| parse_number(&values[i]))
                .sum()
        });

        let dataset = self.summary_table(group, groups, "Sum", summary_tag("value", "sum"));
        log_exit!("AGGREGATE", "count", "groups={}", dataset.row_count());
        dataset
    }

    /// Groups rows by the first column `group` selects and counts the rows in
    /// each group into a `#meta+count` column.
    pub fn count_rows(&self, group: &TagPattern) -> Dataset {
        log_enter!("AGGREGATE", "count_rows", "group={}", group);
        let groups = self.accumulate(group, |_| 1.0);
        let dataset = self.summary_table(group, groups, "Count", summary_tag("meta", "count"));
        log_exit!("AGGREGATE", "count_rows", "groups={}", dataset.row_count());
        dataset
    }

    fn accumulate<F>(&self, group: &TagPattern, amount: F) -> GroupAccumulator<'a>
    where
        F: Fn(&[String]) -> f64,
    {
        let mut groups = GroupAccumulator::new();
        let Some(key_column) = group.find_column(self.columns()) else {
            log_debug!("AGGREGATE", "no column matches {}, result is empty", group);
            return groups;
        };

        for row in self.rows() {
            let values = row.values();
            let key = values[key_column].as_str();
            if is_blank(key) {
                continue;
            }
            groups.add(key, amount(values));
        }
        groups
    }

    fn summary_table(
        &self,
        group: &TagPattern,
        groups: GroupAccumulator<'a>,
        summary_header: &str,
        summary_tag: Tag,
    ) -> Dataset {
        let key_header = group
            .find_column(self.columns())
            .map(|i| self.columns()[i].header().to_string())
            .unwrap_or_else(|| group.to_string());

        let columns = vec![
            Column::tagged(key_header, group.to_tag()),
            Column::tagged(summary_header, summary_tag),
        ];
        Dataset::from_aligned(columns, groups.into_rows())
    }
}
