//! Flat column/value representation of one storage row.
//!
//! # Invariants
//! - Column order is insertion order and drives INSERT/UPDATE column lists.
//! - Column names are unique; re-inserting a name replaces its value in place.

use crate::repo::mapper::{MapResult, MappingError};
use rusqlite::types::Value;
use rusqlite::Row;

/// One storage row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`, keeping the original position when the column
    /// already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Builder form of `insert`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Reads a text column.
    pub fn text(&self, column: &str) -> MapResult<String> {
        match self.require(column)? {
            Value::Text(value) => Ok(value.clone()),
            _ => Err(MappingError::UnexpectedType {
                column: column.to_string(),
                expected: "text",
            }),
        }
    }

    /// Reads an integer column.
    pub fn integer(&self, column: &str) -> MapResult<i64> {
        match self.require(column)? {
            Value::Integer(value) => Ok(*value),
            _ => Err(MappingError::UnexpectedType {
                column: column.to_string(),
                expected: "integer",
            }),
        }
    }

    fn require(&self, column: &str) -> MapResult<&Value> {
        self.get(column)
            .ok_or_else(|| MappingError::MissingColumn(column.to_string()))
    }

    /// Copies every column of a result row, using the statement's column names.
    pub(crate) fn from_row(column_names: &[String], row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut record = Self::new();
        for (index, name) in column_names.iter().enumerate() {
            record.insert(name.as_str(), row.get::<_, Value>(index)?);
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
