//! In-memory tabular input.
//!
//! [`TextTable`] is the narrow collaborator the engine and presenter work
//! against: an ordered set of rows with named columns, text-or-missing cell
//! values and a caller-supplied key per row. The same type doubles as a
//! [`RowProjection`] when a presentation call wants to filter, reorder or
//! augment the rendered rows.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;

/// Opaque, caller-supplied row identifier. Unique within a batch and
/// order-preserving: rows compare in the order they were pushed, not by key.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RowKey(pub u64);

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error("[TXDIFF_TABLE_001] duplicate column name '{name}'. Suggestion: column names must be unique within a table.")]
    DuplicateColumn { name: String },

    #[error("[TXDIFF_TABLE_002] row {key} has {got} values but the table has {expected} columns. Suggestion: supply one value (or None) per column.")]
    ColumnCountMismatch {
        key: RowKey,
        expected: usize,
        got: usize,
    },

    #[error("[TXDIFF_TABLE_003] duplicate row key {key}. Suggestion: row keys must be unique within a table.")]
    DuplicateKey { key: RowKey },
}

impl TableError {
    pub fn code(&self) -> &'static str {
        match self {
            TableError::DuplicateColumn { .. } => error_codes::TABLE_DUPLICATE_COLUMN,
            TableError::ColumnCountMismatch { .. } => error_codes::TABLE_COLUMN_COUNT_MISMATCH,
            TableError::DuplicateKey { .. } => error_codes::TABLE_DUPLICATE_KEY,
        }
    }
}

/// One table row: a key plus one optional text value per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    key: RowKey,
    values: Vec<Option<String>>,
}

impl TableRow {
    pub fn key(&self) -> RowKey {
        self.key
    }

    /// Value of the column at `index`, if present and non-missing.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}

/// An ordered table with named text columns and unique row keys.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
    key_index: FxHashMap<RowKey, usize>,
}

impl TextTable {
    pub fn new(columns: Vec<String>) -> Result<TextTable, TableError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(TextTable {
            columns,
            rows: Vec::new(),
            key_index: FxHashMap::default(),
        })
    }

    /// Appends a row. `values` must hold one entry per column, in column
    /// order; `None` marks a missing cell.
    pub fn push_row(
        &mut self,
        key: RowKey,
        values: Vec<Option<String>>,
    ) -> Result<(), TableError> {
        if values.len() != self.columns.len() {
            return Err(TableError::ColumnCountMismatch {
                key,
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        if self.key_index.contains_key(&key) {
            return Err(TableError::DuplicateKey { key });
        }
        self.key_index.insert(key, self.rows.len());
        self.rows.push(TableRow { key, values });
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, key: RowKey) -> Option<&TableRow> {
        self.key_index.get(&key).map(|&idx| &self.rows[idx])
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An external row source used to filter, reorder or add columns to a
/// rendered comparison result.
pub trait RowProjection {
    /// Names of the extra columns this projection contributes.
    fn columns(&self) -> &[String];

    /// Row keys to render, in render order.
    fn keys(&self) -> Vec<RowKey>;

    /// Value of the projection column at `column` for `key`.
    fn value(&self, key: RowKey, column: usize) -> Option<&str>;
}

impl RowProjection for TextTable {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(|row| row.key).collect()
    }

    fn value(&self, key: RowKey, column: usize) -> Option<&str> {
        self.get(key).and_then(|row| row.value(column))
    }
}
