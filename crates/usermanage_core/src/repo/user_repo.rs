//! Repository bound to the `user` table.
//!
//! # Responsibility
//! - Fix the generic engine to `user` + `UserMapper`.
//! - Add user-specific queries on top of the shared CRUD set.

use crate::db::ConnectionSource;
use crate::model::user::User;
use crate::repo::mapper::{UserMapper, USER_TYPE_COLUMN};
use crate::repo::repository::{RepoResult, Repository};
use std::sync::Arc;

/// Table backing `UserRepository`.
pub const USER_TABLE: &str = "user";

pub type UserRepository<S> = Repository<UserMapper, S>;

impl<S: ConnectionSource> Repository<UserMapper, S> {
    /// Creates a user repository reading and writing through `source`.
    pub fn with_source(source: S) -> Self {
        Repository::new(USER_TABLE, Arc::new(UserMapper), source)
    }

    /// Returns every user whose type code equals `user_type`, in scan order.
    ///
    /// Soft-deleted users are included.
    pub fn fetch_users_by_user_type(&self, user_type: i64) -> RepoResult<Vec<User>> {
        self.fetch_by_column(USER_TYPE_COLUMN, user_type)
    }
}
