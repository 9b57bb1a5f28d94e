//! Generic entity repository over SQLite, with a `User` specialization.
//!
//! Callers build a `Repository` (or `UserRepository`) from a table name, a
//! `Mapper` and a `ConnectionSource`, then call its CRUD operations directly.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ConnectionSource, DbConfig, DbError, DbResult, SqliteFile};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::entity::{new_entity_id, Entity, EntityId};
pub use model::user::{User, UserType, ValidationError};
pub use repo::mapper::{MapResult, Mapper, MappingError, UserMapper};
pub use repo::record::Record;
pub use repo::repository::{RepoError, RepoResult, Repository};
pub use repo::user_repo::{UserRepository, USER_TABLE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
