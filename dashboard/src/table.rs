//! FILENAME: dashboard/src/table.rs
//! PURPOSE: Turns already-parsed rows (header row, tag row, data rows) into a Dataset.
//! CONTEXT: Published transaction files put free-text headers first and the
//! tag row second, but some sources add title rows above. The tag row is the
//! first row, within `TAG_ROW_SCAN_LIMIT`, whose non-blank cells all parse as
//! tags. The row right above it, if any, supplies the headers.

use crate::error::DashboardError;
use hxl_engine::{log_debug, Column, Dataset, Tag};

pub const TAG_ROW_SCAN_LIMIT: usize = 25;

fn is_tag_row(row: &[String]) -> bool {
    let mut cells = row.iter().filter(|cell| !cell.trim().is_empty()).peekable();
    cells.peek().is_some() && cells.all(|cell| Tag::parse(cell).is_ok())
}

pub fn load_table(mut rows: Vec<Vec<String>>) -> Result<Dataset, DashboardError> {
    if rows.is_empty() {
        return Err(DashboardError::EmptyInput);
    }

    let tag_index = rows
        .iter()
        .take(TAG_ROW_SCAN_LIMIT)
        .position(|row| is_tag_row(row))
        .ok_or(DashboardError::MissingTagRow(TAG_ROW_SCAN_LIMIT.min(rows.len())))?;

    let data = rows.split_off(tag_index + 1);
    let tag_row = rows.pop().unwrap_or_default();
    let header_row = rows.pop().unwrap_or_default();

    let columns = tag_row
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let header = header_row.get(i).cloned().unwrap_or_default();
            Column::new(header, tag)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log_debug!(
        "TABLE",
        "tag row at {} columns={} rows={}",
        tag_index,
        columns.len(),
        data.len()
    );

    Ok(Dataset::new(columns, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxl_engine::EngineError;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect::<Vec<String>>())
            .collect()
    }

    #[test]
    fn test_header_then_tags_then_data() {
        let data = load_table(rows(&[
            &["Organisation", "Notes", "Value"],
            &["#org+name", "", "#value+net"],
            &["Oxfam", "x", "10"],
        ]))
        .unwrap();

        assert_eq!(data.row_count(), 1);
        assert_eq!(data.columns()[0].header(), "Organisation");
        assert_eq!(data.columns()[0].display_tag(), "#org+name");
        assert!(data.columns()[1].tag().is_none());
    }

    #[test]
    fn test_tag_row_below_title_rows() {
        let data = load_table(rows(&[
            &["Covid-19 transactions", ""],
            &["Org", "Value"],
            &["#org", "#value"],
            &["A", "1"],
            &["B", "2"],
        ]))
        .unwrap();
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.columns()[1].header(), "Value");
    }

    #[test]
    fn test_tag_row_first_has_blank_headers() {
        let data = load_table(rows(&[&["#org", "#value"], &["A", "1"]])).unwrap();
        assert_eq!(data.columns()[0].header(), "");
        assert_eq!(data.row_count(), 1);
    }

    #[test]
    fn test_missing_tag_row() {
        let err = load_table(rows(&[&["Org"], &["A"]])).unwrap_err();
        assert_eq!(err, DashboardError::MissingTagRow(2));
        assert_eq!(load_table(Vec::new()).unwrap_err(), DashboardError::EmptyInput);
    }

    #[test]
    fn test_ragged_data_row_is_a_schema_mismatch() {
        let err = load_table(rows(&[&["#org", "#value"], &["A"]])).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Engine(EngineError::SchemaMismatch { row: 0, .. })
        ));
    }
}
