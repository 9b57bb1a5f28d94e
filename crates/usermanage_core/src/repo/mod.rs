//! Repository layer: generic CRUD engine, mapping contract and
//! per-entity specializations.
//!
//! # Responsibility
//! - Keep SQL text and row handling inside core's persistence boundary.
//! - Let a new entity type gain CRUD by implementing one `Mapper`.
//!
//! # Invariants
//! - Repositories hold no entity state; storage is the only source of truth.
//! - Row absence is reported as `None`, never as an error.

pub mod mapper;
pub mod record;
pub mod repository;
pub mod sql;
pub mod user_repo;
