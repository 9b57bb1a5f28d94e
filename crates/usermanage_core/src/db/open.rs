//! Connection bootstrap for file-backed SQLite stores.
//!
//! # Responsibility
//! - Open one connection per call and apply connection pragmas.
//! - Bootstrap the schema when the config asks for it.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and the configured busy timeout.
//! - With `bootstrap_schema`, the returned connection sees the `user` table.

use super::schema::apply_schema;
use super::{DbConfig, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::time::Instant;

/// Opens the configured SQLite file and prepares it for repository use.
///
/// # Side effects
/// - Creates the database file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start");

    let mut conn = match Connection::open(&config.path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, config) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, config: &DbConfig) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(config.busy_timeout)?;
    if config.bootstrap_schema {
        apply_schema(conn)?;
    }
    Ok(())
}
