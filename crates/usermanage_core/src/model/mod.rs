//! Domain model for repository-managed entities.
//!
//! # Responsibility
//! - Define the identity contract every persisted object implements.
//! - Keep field validation inside the domain types themselves.
//!
//! # Invariants
//! - Domain objects are only reachable in a validated state.
//! - Storage-only flags (such as the soft-delete marker) never appear here.

pub mod entity;
pub mod user;
