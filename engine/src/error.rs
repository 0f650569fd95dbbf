//! FILENAME: engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid tag pattern: {0:?}")]
    InvalidPattern(String),

    #[error("Schema mismatch: row {row} has {actual} cells, expected {expected}")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
