//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the tag-addressed table engine.
//! CONTEXT: Columns are found by hashtag patterns (`#org+name`) rather than by
//! position or name. A `Dataset` owns the cells; `View`s layer lazy filters,
//! sorts and previews on top of it; aggregation turns a View into a new
//! Dataset.
//!
//! Layers:
//! - `tag` / `pattern`: what a column IS and how queries select it
//! - `dataset`: immutable storage
//! - `predicate` / `view`: lazy row selection (HOW we filter)
//! - `aggregate`: grouping and summing (WHAT callers rank and display)

#[macro_use]
pub mod logging;

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod number;
pub mod pattern;
pub mod predicate;
pub mod tag;
pub mod view;

// Re-export commonly used types at the crate root
pub use aggregate::{COUNT_TAG, SUM_TAG};
pub use dataset::{Dataset, RowRef};
pub use error::EngineError;
pub use number::{format_number, parse_number};
pub use pattern::{ColumnIndices, TagPattern};
pub use predicate::{Predicate, TestCondition};
pub use tag::{Attributes, Column, Tag};
pub use view::{ValueSet, View};

#[doc(hidden)]
pub use log as __log;
