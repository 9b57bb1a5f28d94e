//! Base identity contract shared by every persisted domain object.
//!
//! # Responsibility
//! - Expose the stable identifier the repository keys rows by.
//!
//! # Invariants
//! - The identifier is opaque to core; emptiness and format are the caller's
//!   concern.

use uuid::Uuid;

/// Opaque identifier stored in the `uuid` column.
pub type EntityId = String;

/// Domain object with a unique identifier, mapped to and from one storage row.
pub trait Entity {
    /// Returns the identifier used as the row's primary key.
    fn id(&self) -> &str;

    /// Replaces the identifier.
    fn set_id(&mut self, id: EntityId);
}

/// Generates a fresh random identifier (UUID v4, hyphenated lowercase).
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}
