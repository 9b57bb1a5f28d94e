//! User domain model.
//!
//! # Responsibility
//! - Hold one user's profile and enforce field-level validation.
//!
//! # Invariants
//! - `email` always matches `^[\w.-]+@[\w.-]+\.\w+$`, where `$` also accepts
//!   one trailing newline.
//! - `last_login_address` always parses as an IPv4 or IPv6 literal and is kept
//!   exactly as supplied (no normalization).
//! - `user_type` is always one of regular/premium/admin.
//! - A rejected assignment leaves the previous value in place.

use crate::model::entity::{Entity, EntityId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

// `\n?\z` mirrors a pattern-final `$` that also matches before one trailing newline.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+\n?\z").expect("valid email regex"));

/// Field validation failure raised by `User` constructors and setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail(String),
    InvalidIpAddress(String),
    InvalidUserType(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email format: `{value}`"),
            Self::InvalidIpAddress(value) => {
                write!(f, "invalid IPv4/IPv6 address: `{value}`")
            }
            Self::InvalidUserType(code) => {
                write!(f, "invalid user type {code}; expected 1, 2 or 3")
            }
        }
    }
}

impl Error for ValidationError {}

/// Account tier stored as an integer code in `user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UserType {
    Regular,
    Premium,
    Admin,
}

impl UserType {
    /// Storage code: regular=1, premium=2, admin=3.
    pub fn code(self) -> i64 {
        match self {
            Self::Regular => 1,
            Self::Premium => 2,
            Self::Admin => 3,
        }
    }
}

impl TryFrom<i64> for UserType {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Regular),
            2 => Ok(Self::Premium),
            3 => Ok(Self::Admin),
            other => Err(ValidationError::InvalidUserType(other)),
        }
    }
}

impl From<UserType> for i64 {
    fn from(value: UserType) -> Self {
        value.code()
    }
}

/// Validated user profile.
///
/// Fields are private; every write goes through a validating setter, so an
/// instance can never hold a malformed email, address or type code.
/// Serialized field names match the `user` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserFields")]
pub struct User {
    #[serde(rename = "uuid")]
    id: EntityId,
    #[serde(rename = "user_name")]
    name: String,
    email: String,
    #[serde(rename = "last_login_ip")]
    last_login_address: String,
    user_type: UserType,
}

/// Unvalidated wire shape; converted through `User::new`.
#[derive(Deserialize)]
struct UserFields {
    uuid: EntityId,
    user_name: String,
    email: String,
    last_login_ip: String,
    user_type: i64,
}

impl TryFrom<UserFields> for User {
    type Error = ValidationError;

    fn try_from(value: UserFields) -> Result<Self, Self::Error> {
        User::new(
            value.uuid,
            value.user_name,
            value.email,
            value.last_login_ip,
            value.user_type,
        )
    }
}

impl User {
    /// Builds a user, validating email, address and type code.
    ///
    /// # Errors
    /// - `InvalidEmail` when `email` fails the syntactic pattern.
    /// - `InvalidIpAddress` when `last_login_address` is not an IP literal.
    /// - `InvalidUserType` when `user_type` is outside `1..=3`.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        email: impl Into<String>,
        last_login_address: impl Into<String>,
        user_type: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            email: validate_email(email.into())?,
            last_login_address: validate_ip_address(last_login_address.into())?,
            user_type: UserType::try_from(user_type)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn last_login_address(&self) -> &str {
        &self.last_login_address
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Name is free-form; this never fails.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), ValidationError> {
        self.email = validate_email(email.into())?;
        Ok(())
    }

    pub fn set_last_login_address(
        &mut self,
        address: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.last_login_address = validate_ip_address(address.into())?;
        Ok(())
    }

    pub fn set_user_type(&mut self, code: i64) -> Result<(), ValidationError> {
        self.user_type = UserType::try_from(code)?;
        Ok(())
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

fn validate_email(value: String) -> Result<String, ValidationError> {
    if EMAIL_RE.is_match(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidEmail(value))
    }
}

fn validate_ip_address(value: String) -> Result<String, ValidationError> {
    match value.parse::<IpAddr>() {
        Ok(_) => Ok(value),
        Err(_) => Err(ValidationError::InvalidIpAddress(value)),
    }
}
