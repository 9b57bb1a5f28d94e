//! Generic CRUD engine over one table and one mapper.
//!
//! # Responsibility
//! - Run the fixed statement set (scan, lookup, insert, update, soft delete,
//!   hard delete) against any table whose rows a `Mapper` understands.
//! - Return mapped entities, or `None` when the row does not exist.
//!
//! # Invariants
//! - Every storage touch opens a fresh connection and closes it before the
//!   method returns; no connection outlives a single statement sequence.
//! - Caller-supplied values are always bound parameters.
//! - Storage and mapping failures propagate unchanged; absence is `Ok(None)`.
//!
//! # Concurrency
//! Not safe for concurrent writers on the same id. Delete paths check for the
//! row and then mutate on a separate connection, and add/update re-read on a
//! separate connection after committing; nothing ties those steps together.

use crate::db::{ConnectionSource, DbError};
use crate::model::entity::Entity;
use crate::repo::mapper::{Mapper, MappingError, ID_COLUMN};
use crate::repo::record::Record;
use crate::repo::sql;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure. Row absence is not an error and never appears here.
#[derive(Debug)]
pub enum RepoError {
    /// Opening a connection or executing a statement failed.
    Storage(DbError),
    /// A fetched row could not be turned into an entity.
    Mapping(MappingError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Mapping(err) => write!(f, "mapping error: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Mapping(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl From<MappingError> for RepoError {
    fn from(value: MappingError) -> Self {
        Self::Mapping(value)
    }
}

/// CRUD over `table_name`, translating rows with a shared mapper.
///
/// The table must have a `uuid` primary key, the mapper's columns, and an
/// integer `deleted` flag.
pub struct Repository<M, S> {
    table_name: String,
    mapper: Arc<M>,
    source: S,
}

impl<M: Mapper, S: ConnectionSource> Repository<M, S> {
    pub fn new(table_name: impl Into<String>, mapper: Arc<M>, source: S) -> Self {
        Self {
            table_name: table_name.into(),
            mapper,
            source,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn mapper(&self) -> &Arc<M> {
        &self.mapper
    }

    /// Reads every row, skipping soft-deleted ones unless `include_deleted`.
    ///
    /// Rows come back in the store's scan order; no ordering is promised.
    pub fn fetch_all(&self, include_deleted: bool) -> RepoResult<Vec<M::Entity>> {
        let statement = sql::select_all(&self.table_name, include_deleted);
        let records = self.with_connection(|conn| query_records(conn, &statement, []))?;
        self.map_records(records)
    }

    /// Looks up the row whose `uuid` equals `id`.
    ///
    /// Soft-deleted rows are still returned.
    pub fn fetch_one_by_uuid(&self, id: &str) -> RepoResult<Option<M::Entity>> {
        let statement = sql::select_by_id(&self.table_name);
        let records = self.with_connection(|conn| query_records(conn, &statement, params![id]))?;
        match records.first() {
            Some(record) => Ok(Some(self.mapper.map_from_storage(record)?)),
            None => Ok(None),
        }
    }

    /// Reads every row where `column` equals `value`, in scan order.
    ///
    /// No soft-delete filter is applied.
    pub(crate) fn fetch_by_column(
        &self,
        column: &str,
        value: impl ToSql,
    ) -> RepoResult<Vec<M::Entity>> {
        let statement = sql::select_where(&self.table_name, column);
        let records =
            self.with_connection(|conn| query_records(conn, &statement, params![value]))?;
        self.map_records(records)
    }

    /// Inserts `entity`, then returns the row as stored.
    ///
    /// The result is a fresh read, so store-side defaults are visible. It is
    /// `None` if the row vanished between the insert and the read.
    pub fn add_one(&self, entity: &M::Entity) -> RepoResult<Option<M::Entity>> {
        let record = self.mapper.map_to_storage(entity);
        let statement = sql::insert(&self.table_name, record.columns());
        let values: Vec<Value> = record.into_iter().map(|(_, value)| value).collect();

        let inserted = self.execute_committed(&statement, params_from_iter(values.iter()))?;
        debug!(
            "event=repo_add_one module=repo status=ok table={} rows={}",
            self.table_name, inserted
        );

        self.fetch_one_by_uuid(entity.id())
    }

    /// Overwrites every non-key column of the row keyed by `entity.id()`, then
    /// returns the row as stored.
    ///
    /// A missing row is a zero-row write, not an error; the read-back then
    /// yields `None`.
    pub fn update_one(&self, entity: &M::Entity) -> RepoResult<Option<M::Entity>> {
        let record = self.mapper.map_to_storage(entity);
        let (columns, mut values): (Vec<String>, Vec<Value>) = record
            .into_iter()
            .filter(|(column, _)| column != ID_COLUMN)
            .unzip();

        if !columns.is_empty() {
            let statement =
                sql::update_by_id(&self.table_name, columns.iter().map(String::as_str));
            values.push(Value::Text(entity.id().to_string()));

            let updated = self.execute_committed(&statement, params_from_iter(values.iter()))?;
            debug!(
                "event=repo_update_one module=repo status=ok table={} rows={}",
                self.table_name, updated
            );
        }

        self.fetch_one_by_uuid(entity.id())
    }

    /// Sets the `deleted` flag on the row keyed by `id`.
    ///
    /// Returns the entity as it was before the flag was set. When no row
    /// exists, returns `None` without opening a write connection.
    pub fn soft_delete_one_by_uuid(&self, id: &str) -> RepoResult<Option<M::Entity>> {
        let Some(snapshot) = self.fetch_one_by_uuid(id)? else {
            return Ok(None);
        };

        let statement = sql::soft_delete_by_id(&self.table_name);
        let changed = self.execute_committed(&statement, params![id])?;
        debug!(
            "event=repo_soft_delete module=repo status=ok table={} rows={}",
            self.table_name, changed
        );

        Ok(Some(snapshot))
    }

    /// Removes the row keyed by `id`.
    ///
    /// Returns the entity as it was before removal. When no row exists,
    /// returns `None` without opening a write connection.
    pub fn delete_one_by_uuid(&self, id: &str) -> RepoResult<Option<M::Entity>> {
        let Some(snapshot) = self.fetch_one_by_uuid(id)? else {
            return Ok(None);
        };

        let statement = sql::delete_by_id(&self.table_name);
        let removed = self.execute_committed(&statement, params![id])?;
        debug!(
            "event=repo_delete module=repo status=ok table={} rows={}",
            self.table_name, removed
        );

        Ok(Some(snapshot))
    }

    fn map_records(&self, records: Vec<Record>) -> RepoResult<Vec<M::Entity>> {
        records
            .iter()
            .map(|record| self.mapper.map_from_storage(record).map_err(RepoError::from))
            .collect()
    }

    fn execute_committed(&self, statement: &str, params: impl Params) -> RepoResult<usize> {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(statement, params)?;
            tx.commit()?;
            Ok(changed)
        })
    }

    /// Runs `work` on a fresh connection and closes it afterwards.
    ///
    /// A failure inside `work` wins over a failure to close.
    fn with_connection<T>(
        &self,
        work: impl FnOnce(&mut Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut conn = self.source.open()?;
        let outcome = work(&mut conn);
        let closed = conn.close().map_err(|(_, err)| RepoError::from(err));
        let value = outcome?;
        closed?;
        Ok(value)
    }
}

fn query_records(
    conn: &Connection,
    statement: &str,
    params: impl Params,
) -> RepoResult<Vec<Record>> {
    let mut stmt = conn.prepare(statement)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(Record::from_row(&column_names, row)?);
    }

    Ok(records)
}
