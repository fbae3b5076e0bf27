//! Provider-agnostic tabular payload handed from fetchers to the normalizer.

/// Layout of a [`RawTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// One row per entity, one column per period.
    Wide,
    /// One row per `(entity, period)` pair.
    Long,
}

/// A header row plus text cells, exactly as the provider delivered them.
///
/// Rows shorter than the header are treated as having empty trailing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    shape: TableShape,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(shape: TableShape, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { shape, columns, rows }
    }

    pub fn shape(&self) -> TableShape {
        self.shape
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, column)`, or `""` when the row is short.
    pub fn cell<'a>(row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }
}
