//! Statement text for the generic repository.
//!
//! # Invariants
//! - Values never appear in statement text; every value is a numbered `?N`
//!   placeholder bound at execution time.
//! - Table and column names are always emitted as quoted identifiers.

use crate::repo::mapper::ID_COLUMN;

/// Storage-only soft-delete flag column.
pub const DELETED_COLUMN: &str = "deleted";

/// Quotes an SQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn select_all(table: &str, include_deleted: bool) -> String {
    let table = quote_identifier(table);
    if include_deleted {
        format!("SELECT * FROM {table}")
    } else {
        format!(
            "SELECT * FROM {table} WHERE {} = 0",
            quote_identifier(DELETED_COLUMN)
        )
    }
}

/// `SELECT *` filtered by one bound column value (`?1`).
pub fn select_where(table: &str, column: &str) -> String {
    format!(
        "SELECT * FROM {} WHERE {} = ?1",
        quote_identifier(table),
        quote_identifier(column)
    )
}

pub fn select_by_id(table: &str) -> String {
    select_where(table, ID_COLUMN)
}

pub fn insert<'a>(table: &str, columns: impl IntoIterator<Item = &'a str>) -> String {
    let columns: Vec<String> = columns.into_iter().map(quote_identifier).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|index| format!("?{index}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Updates `columns` (bound as `?1..?N`) on the row whose id is bound as `?N+1`.
pub fn update_by_id<'a>(table: &str, columns: impl IntoIterator<Item = &'a str>) -> String {
    let assignments: Vec<String> = columns
        .into_iter()
        .enumerate()
        .map(|(index, column)| format!("{} = ?{}", quote_identifier(column), index + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        quote_identifier(table),
        assignments.join(", "),
        quote_identifier(ID_COLUMN),
        assignments.len() + 1
    )
}

pub fn soft_delete_by_id(table: &str) -> String {
    format!(
        "UPDATE {} SET {} = 1 WHERE {} = ?1",
        quote_identifier(table),
        quote_identifier(DELETED_COLUMN),
        quote_identifier(ID_COLUMN)
    )
}

pub fn delete_by_id(table: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?1",
        quote_identifier(table),
        quote_identifier(ID_COLUMN)
    )
}
