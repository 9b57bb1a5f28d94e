//! Translation boundary between domain entities and storage records.
//!
//! # Responsibility
//! - Define the two-way mapping contract the generic repository relies on.
//! - Provide the `user` table mapping.
//!
//! # Invariants
//! - Mapping is pure: no I/O, no logging, no side effects.
//! - Record keys equal the table's column names.
//! - Storage-only columns (e.g. `deleted`) are ignored on read and never
//!   produced on write.

use crate::model::entity::Entity;
use crate::model::user::{User, ValidationError};
use crate::repo::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MapResult<T> = Result<T, MappingError>;

/// Failure turning a storage record into an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    MissingColumn(String),
    UnexpectedType {
        column: String,
        expected: &'static str,
    },
    Validation(ValidationError),
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(column) => write!(f, "record is missing column `{column}`"),
            Self::UnexpectedType { column, expected } => {
                write!(f, "column `{column}` is not {expected}")
            }
            Self::Validation(err) => write!(f, "record failed validation: {err}"),
        }
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::MissingColumn(_) | Self::UnexpectedType { .. } => None,
        }
    }
}

impl From<ValidationError> for MappingError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Two-way mapping between an entity type and its row shape.
///
/// Implementing this for a new entity type is all the generic repository
/// needs to provide full CRUD over that entity's table.
pub trait Mapper {
    type Entity: Entity;

    /// Builds an entity from a fetched row.
    fn map_from_storage(&self, record: &Record) -> MapResult<Self::Entity>;

    /// Flattens an entity into the columns to write. Must include `uuid`.
    fn map_to_storage(&self, entity: &Self::Entity) -> Record;
}

/// Column holding the entity id in every repository table.
pub const ID_COLUMN: &str = "uuid";

pub const USER_NAME_COLUMN: &str = "user_name";
pub const EMAIL_COLUMN: &str = "email";
pub const LAST_LOGIN_IP_COLUMN: &str = "last_login_ip";
pub const USER_TYPE_COLUMN: &str = "user_type";

/// Maps `User` to and from the `user` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserMapper;

impl Mapper for UserMapper {
    type Entity = User;

    fn map_from_storage(&self, record: &Record) -> MapResult<User> {
        let user = User::new(
            record.text(ID_COLUMN)?,
            record.text(USER_NAME_COLUMN)?,
            record.text(EMAIL_COLUMN)?,
            record.text(LAST_LOGIN_IP_COLUMN)?,
            record.integer(USER_TYPE_COLUMN)?,
        )?;
        Ok(user)
    }

    fn map_to_storage(&self, user: &User) -> Record {
        Record::new()
            .with(ID_COLUMN, user.id().to_string())
            .with(USER_NAME_COLUMN, user.name().to_string())
            .with(EMAIL_COLUMN, user.email().to_string())
            .with(LAST_LOGIN_IP_COLUMN, user.last_login_address().to_string())
            .with(USER_TYPE_COLUMN, user.user_type().code())
    }
}
