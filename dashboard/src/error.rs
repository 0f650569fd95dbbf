//! FILENAME: dashboard/src/error.rs

use hxl_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Input has no rows")]
    EmptyInput,

    #[error("No tag row found in the first {0} rows")]
    MissingTagRow(usize),
}
