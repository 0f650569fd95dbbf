//! FILENAME: engine/src/predicate.rs
//! PURPOSE: Row predicates attached to Views.
//! CONTEXT: A predicate pairs a tag pattern with a test condition. The kind of
//! test is fixed when the predicate is built, so evaluation never has to guess
//! whether a string is a value or a column reference.
//!
//! A row passes a predicate when ANY column selected by the pattern satisfies
//! the test. Values are compared as raw, case-sensitive strings; numeric
//! semantics only exist for sums and sorting.

use crate::dataset::RowRef;
use crate::error::EngineError;
use crate::pattern::{ColumnIndices, TagPattern};
use crate::tag::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestCondition {
    /// Cell equals the value exactly.
    Equals(String),
    /// Cell differs from the value.
    NotEquals(String),
    /// A column selected by `pattern` (not the predicate's own) equals `value`.
    CrossColumn { pattern: TagPattern, value: String },
    /// A column selected by `pattern` (not the predicate's own) differs from `value`.
    CrossColumnNotEquals { pattern: TagPattern, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pattern: TagPattern,
    test: TestCondition,
}

impl Predicate {
    /// Resolves free-form test text against `pattern`. Text of the form
    /// `#pattern=value` or `#pattern!=value` becomes a cross-column test, read
    /// with the same operator rules as [`Predicate::parse`]. Anything else is
    /// an exact-match value, including text whose left side is not a valid
    /// pattern.
    pub fn new(pattern: TagPattern, test_text: &str) -> Predicate {
        let test = split_cross_column(test_text)
            .map(|(other, value, negate)| {
                let value = value.to_string();
                if negate {
                    TestCondition::CrossColumnNotEquals { pattern: other, value }
                } else {
                    TestCondition::CrossColumn { pattern: other, value }
                }
            })
            .unwrap_or_else(|| TestCondition::Equals(test_text.to_string()));
        Predicate { pattern, test }
    }

    pub fn equals(pattern: TagPattern, value: impl Into<String>) -> Predicate {
        Predicate {
            pattern,
            test: TestCondition::Equals(value.into()),
        }
    }

    pub fn not_equals(pattern: TagPattern, value: impl Into<String>) -> Predicate {
        Predicate {
            pattern,
            test: TestCondition::NotEquals(value.into()),
        }
    }

    pub fn cross_column(
        pattern: TagPattern,
        other: TagPattern,
        value: impl Into<String>,
    ) -> Predicate {
        Predicate {
            pattern,
            test: TestCondition::CrossColumn {
                pattern: other,
                value: value.into(),
            },
        }
    }

    /// Parses the shorthand `pattern=value` / `pattern!=value`. The leading
    /// `#` may be left out here, as in `x_transaction_type=spending`.
    ///
    /// The operator is the first `=`; a `!` right before it makes it `!=`, so
    /// the value itself may contain `=` or `!=`. Whitespace around the
    /// operator is ignored. An absolute pattern compared with `=` needs a
    /// space before the operator (`#org! =x`).
    pub fn parse(text: &str) -> Result<Predicate, EngineError> {
        let (lhs, value, negate) =
            split_operator(text).ok_or_else(|| EngineError::InvalidPattern(text.to_string()))?;

        let lhs = lhs.trim();
        let pattern = if lhs.starts_with('#') {
            TagPattern::parse(lhs)?
        } else {
            TagPattern::parse(&format!("#{}", lhs))
                .map_err(|_| EngineError::InvalidPattern(text.to_string()))?
        };

        Ok(if negate {
            Predicate::not_equals(pattern, value)
        } else {
            Predicate::equals(pattern, value)
        })
    }

    pub fn pattern(&self) -> &TagPattern {
        &self.pattern
    }

    pub fn test(&self) -> &TestCondition {
        &self.test
    }

    /// Evaluates against a single row. Views compile predicates once per pass
    /// instead of calling this per row.
    pub fn matches(&self, row: &RowRef<'_>) -> bool {
        self.compile(row.columns()).test(row.values())
    }

    /// Resolves the column positions this predicate reads.
    pub(crate) fn compile(&self, columns: &[Column]) -> CompiledPredicate<'_> {
        match &self.test {
            TestCondition::Equals(value) => CompiledPredicate {
                columns: self.pattern.find_columns(columns),
                value,
                negate: false,
            },
            TestCondition::NotEquals(value) => CompiledPredicate {
                columns: self.pattern.find_columns(columns),
                value,
                negate: true,
            },
            TestCondition::CrossColumn { pattern, value } => CompiledPredicate {
                columns: pattern.find_columns(columns),
                value,
                negate: false,
            },
            TestCondition::CrossColumnNotEquals { pattern, value } => CompiledPredicate {
                columns: pattern.find_columns(columns),
                value,
                negate: true,
            },
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.test {
            TestCondition::Equals(value) => write!(f, "{}={}", self.pattern, value),
            TestCondition::NotEquals(value) => write!(f, "{}!={}", self.pattern, value),
            TestCondition::CrossColumn { pattern, value } => {
                write!(f, "{} where {}={}", self.pattern, pattern, value)
            }
            TestCondition::CrossColumnNotEquals { pattern, value } => {
                write!(f, "{} where {}!={}", self.pattern, pattern, value)
            }
        }
    }
}

/// Splits `lhs=value` / `lhs!=value` at the first `=`. Returns the raw left
/// side, the trimmed value and whether the operator was `!=`.
fn split_operator(text: &str) -> Option<(&str, &str, bool)> {
    let pos = text.find('=')?;
    let value = text[pos + 1..].trim();
    match text[..pos].strip_suffix('!') {
        Some(lhs) => Some((lhs, value, true)),
        None => Some((&text[..pos], value, false)),
    }
}

fn split_cross_column(text: &str) -> Option<(TagPattern, &str, bool)> {
    if !text.trim_start().starts_with('#') {
        return None;
    }
    let (lhs, value, negate) = split_operator(text)?;
    TagPattern::parse(lhs).ok().map(|pattern| (pattern, value, negate))
}

// ============================================================================
// COMPILED FORM
// ============================================================================

/// A predicate bound to one column layout.
#[derive(Debug)]
pub(crate) struct CompiledPredicate<'p> {
    columns: ColumnIndices,
    value: &'p str,
    negate: bool,
}

impl CompiledPredicate<'_> {
    pub(crate) fn test(&self, values: &[String]) -> bool {
        self.columns
            .iter()
            .any(|&i| (values[i] == self.value) != self.negate)
    }
}
