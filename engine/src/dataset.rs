//! FILENAME: engine/src/dataset.rs
//! PURPOSE: The immutable base table and the borrowed row handle.
//! CONTEXT: A Dataset owns every cell. Views, aggregations and value
//! extraction only ever borrow it, so one Dataset can feed any number of
//! independent query chains.

use crate::error::EngineError;
use crate::pattern::TagPattern;
use crate::tag::Column;
use crate::view::View;
use serde::{Deserialize, Serialize};

// ============================================================================
// DATASET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetParts")]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

/// Unchecked wire shape; deserialization goes through [`Dataset::new`].
#[derive(Deserialize)]
struct DatasetParts {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<DatasetParts> for Dataset {
    type Error = EngineError;

    fn try_from(parts: DatasetParts) -> Result<Self, Self::Error> {
        Dataset::new(parts.columns, parts.rows)
    }
}

impl Dataset {
    /// Builds a Dataset, rejecting any row whose length differs from the
    /// column count.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Result<Dataset, EngineError> {
        let expected = columns.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(EngineError::SchemaMismatch {
                row,
                expected,
                actual: values.len(),
            });
        }
        Ok(Dataset { columns, rows })
    }

    /// For engine-built tables whose rows are aligned by construction.
    pub(crate) fn from_aligned(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Dataset {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Dataset { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|values| RowRef {
            columns: &self.columns,
            values,
            index,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().enumerate().map(|(index, values)| RowRef {
            columns: &self.columns,
            values,
            index,
        })
    }

    /// An unfiltered View over this Dataset.
    pub fn view(&self) -> View<'_> {
        View::new(self)
    }
}

// ============================================================================
// ROW HANDLE
// ============================================================================

/// A borrowed row: the cells plus the columns they line up with.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [Column],
    values: &'a [String],
    index: usize,
}

impl<'a> RowRef<'a> {
    pub fn columns(&self) -> &'a [Column] {
        self.columns
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// Position of this row in its base Dataset.
    pub fn source_index(&self) -> usize {
        self.index
    }

    /// Value of the first column the pattern selects.
    pub fn get(&self, pattern: &TagPattern) -> Option<&'a str> {
        pattern
            .find_column(self.columns)
            .map(|i| self.values[i].as_str())
    }

    /// Values of every column the pattern selects, in column order.
    pub fn get_all(&self, pattern: &TagPattern) -> Vec<&'a str> {
        pattern
            .find_columns(self.columns)
            .iter()
            .map(|&i| self.values[i].as_str())
            .collect()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Org", "#org+name").unwrap(),
            Column::new("Sector", "#sector").unwrap(),
            Column::new("Sector 2", "#sector").unwrap(),
        ]
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_new_accepts_aligned_rows() {
        let ds = Dataset::new(columns(), vec![row(&["A", "Health", ""])]).unwrap();
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.row_count(), 1);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_new_rejects_short_and_long_rows() {
        let err = Dataset::new(
            columns(),
            vec![row(&["A", "Health", ""]), row(&["B", "Health"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::SchemaMismatch { row: 1, expected: 3, actual: 2 }
        );

        let err = Dataset::new(columns(), vec![row(&["A", "B", "C", "D"])]).unwrap_err();
        assert!(matches!(err, EngineError::SchemaMismatch { actual: 4, .. }));
    }

    #[test]
    fn test_row_get_by_pattern() {
        let ds = Dataset::new(columns(), vec![row(&["A", "Health", "Education"])]).unwrap();
        let r = ds.row(0).unwrap();
        let sector = TagPattern::parse("#sector").unwrap();
        assert_eq!(r.get(&sector), Some("Health"));
        assert_eq!(r.get_all(&sector), vec!["Health", "Education"]);
        assert_eq!(r.get(&TagPattern::parse("#country").unwrap()), None);
        assert_eq!(r.source_index(), 0);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let good = r##"{"columns":[{"header":"Org","tag":"#org"}],"rows":[["A"]]}"##;
        let ds: Dataset = serde_json::from_str(good).unwrap();
        assert_eq!(ds.row_count(), 1);

        let bad = r##"{"columns":[{"header":"Org","tag":"#org"}],"rows":[["A","B"]]}"##;
        assert!(serde_json::from_str::<Dataset>(bad).is_err());
    }
}
