//! FILENAME: dashboard/src/lib.rs
//! IATI Covid-19 funding dashboard driver.
//!
//! Drives `hxl-engine` the way the published dashboard page does: load the
//! transaction table, narrow it by the request's filter parameters, then
//! compute choice lists, headline figures and top-10 rankings from that one
//! filtered View. Presentation (HTML, number formatting) stays with the caller.

pub mod config;
pub mod error;
pub mod filters;
pub mod params;
pub mod report;
pub mod table;

pub use config::{DashboardConfig, TopListSpec};
pub use error::DashboardError;
pub use filters::apply_filters;
pub use params::FilterParams;
pub use report::{
    build_report, choices, summary, top_list, top_lists, Choices, DashboardReport, Summary,
    TopEntry, TopList,
};
pub use table::load_table;
