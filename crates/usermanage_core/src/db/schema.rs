//! Schema bootstrap for the repository tables.
//!
//! # Responsibility
//! - Create the `user` table (with its soft-delete flag) on an empty store.
//!
//! # Invariants
//! - Applied schema version is mirrored to `PRAGMA user_version`.
//! - A store stamped with a newer version than this binary knows is rejected.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = include_str!("sql/0001_user.sql");

/// Returns the schema version this binary creates.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Creates the schema when the store is still at version 0.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
