//! FILENAME: engine/src/view.rs
//! PURPOSE: Lazy, composable views over a Dataset.
//! CONTEXT: A View is a borrowed base Dataset plus an ordered list of stages
//! (filters, sorts, previews). Building a View does no work. Every terminal
//! call (`rows`, `get_values`, `get_sum`, `count`, ...) walks the base rows
//! again from the start, so results always reflect the stages as written.
//!
//! Deriving a View clones the stage list and appends one stage. The source
//! View is untouched, which is what lets several chains branch off one
//! filtered base (e.g. commitments vs. spending) without interfering.

use crate::dataset::{Dataset, RowRef};
use crate::error::EngineError;
use crate::number::{is_blank, parse_number};
use crate::pattern::TagPattern;
use crate::predicate::Predicate;
use crate::tag::Column;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Distinct cell values. Iteration order is unspecified.
pub type ValueSet = FxHashSet<String>;

type RowIter<'v, 'a> = Box<dyn Iterator<Item = RowRef<'a>> + 'v>;

// ============================================================================
// STAGES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    /// Keep rows whose predicate result equals `keep`.
    Filter { predicate: Predicate, keep: bool },
    Sort { pattern: TagPattern, descending: bool },
    Preview(usize),
}

// ============================================================================
// VIEW
// ============================================================================

#[derive(Debug, Clone)]
pub struct View<'a> {
    base: &'a Dataset,
    stages: Vec<Stage>,
}

impl<'a> View<'a> {
    pub fn new(base: &'a Dataset) -> View<'a> {
        View {
            base,
            stages: Vec::new(),
        }
    }

    fn with_stage(&self, stage: Stage) -> View<'a> {
        let mut stages = self.stages.clone();
        stages.push(stage);
        View {
            base: self.base,
            stages,
        }
    }

    /// Keeps only rows that pass `predicate`, in addition to every earlier stage.
    pub fn with_rows(&self, predicate: Predicate) -> View<'a> {
        self.with_stage(Stage::Filter {
            predicate,
            keep: true,
        })
    }

    /// Drops rows that pass `predicate`.
    pub fn without_rows(&self, predicate: Predicate) -> View<'a> {
        self.with_stage(Stage::Filter {
            predicate,
            keep: false,
        })
    }

    /// Orders rows by the numeric value of the first column `pattern` selects.
    /// Blank, non-numeric and missing values rank lowest; equal keys keep
    /// their incoming order.
    pub fn sort_by(&self, pattern: &TagPattern, descending: bool) -> View<'a> {
        self.with_stage(Stage::Sort {
            pattern: pattern.clone(),
            descending,
        })
    }

    /// Keeps the first `n` rows of the current ordering. Negative counts are
    /// rejected; counts beyond the row total keep everything.
    pub fn preview(&self, n: i64) -> Result<View<'a>, EngineError> {
        if n < 0 {
            return Err(EngineError::InvalidArgument(format!(
                "preview count must be >= 0, got {}",
                n
            )));
        }
        let limit = usize::try_from(n).unwrap_or(usize::MAX);
        Ok(self.with_stage(Stage::Preview(limit)))
    }

    pub fn base(&self) -> &'a Dataset {
        self.base
    }

    pub fn columns(&self) -> &'a [Column] {
        self.base.columns()
    }

    /// Filters attached to this view, in the order they were added.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> + '_ {
        self.stages.iter().filter_map(|stage| match stage {
            Stage::Filter { predicate, .. } => Some(predicate),
            _ => None,
        })
    }

    /// A fresh pass over the base rows through every stage.
    ///
    /// Filters and previews stream row by row. A sort stage has to see all of
    /// its input, so it collects the rows that reach it (references only).
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'a>> + '_ {
        let columns = self.base.columns();
        let mut rows: RowIter<'_, 'a> = Box::new(self.base.rows());

        for stage in &self.stages {
            rows = match stage {
                Stage::Filter { predicate, keep } => {
                    let compiled = predicate.compile(columns);
                    let keep = *keep;
                    Box::new(rows.filter(move |row| compiled.test(row.values()) == keep))
                }
                Stage::Sort { pattern, descending } => {
                    let sorted = sort_rows(rows, pattern.find_column(columns), *descending);
                    Box::new(sorted.into_iter())
                }
                Stage::Preview(limit) => Box::new(rows.take(*limit)),
            };
        }

        rows
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Copies the current rows into a standalone Dataset.
    pub fn to_dataset(&self) -> Dataset {
        let rows = self.rows().map(|row| row.to_vec()).collect();
        Dataset::from_aligned(self.columns().to_vec(), rows)
    }

    // ------------------------------------------------------------------------
    // VALUE EXTRACTION
    // ------------------------------------------------------------------------

    /// Distinct non-blank values across every column `pattern` selects.
    pub fn get_values(&self, pattern: &TagPattern) -> ValueSet {
        let targets = pattern.find_columns(self.columns());
        let mut values = ValueSet::default();
        if targets.is_empty() {
            return values;
        }

        for row in self.rows() {
            for &i in &targets {
                let value = &row.values()[i];
                if !is_blank(value) && !values.contains(value) {
                    values.insert(value.clone());
                }
            }
        }
        values
    }

    /// Sum of every parseable cell across the columns `pattern` selects.
    /// Blank and non-numeric cells contribute nothing.
    pub fn get_sum(&self, pattern: &TagPattern) -> f64 {
        self.numbers(pattern).sum()
    }

    pub fn get_min(&self, pattern: &TagPattern) -> Option<f64> {
        self.numbers(pattern).reduce(f64::min)
    }

    pub fn get_max(&self, pattern: &TagPattern) -> Option<f64> {
        self.numbers(pattern).reduce(f64::max)
    }

    fn numbers(&self, pattern: &TagPattern) -> impl Iterator<Item = f64> + '_ {
        let targets = pattern.find_columns(self.columns());
        self.rows().flat_map(move |row| {
            targets
                .clone()
                .into_iter()
                .filter_map(move |i| parse_number(&row.values()[i]))
        })
    }
}

// ============================================================================
// SORTING
// ============================================================================

fn sort_rows<'a>(
    rows: impl Iterator<Item = RowRef<'a>>,
    key_column: Option<usize>,
    descending: bool,
) -> Vec<RowRef<'a>> {
    let mut keyed: Vec<(Option<f64>, RowRef<'a>)> = rows
        .map(|row| {
            let key = key_column.and_then(|i| parse_number(&row.values()[i]));
            (key, row)
        })
        .collect();

    // sort_by is stable, and reversing the comparator keeps ties in order
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_keys(*a, *b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Missing keys rank below every number.
fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}
