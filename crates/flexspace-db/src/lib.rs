//! Flexspace Storage Layer
//!
//! This crate provides the storage collaborator of the pricing core. It
//! includes:
//!
//! - A flat-file JSON document store (one array per collection)
//! - Repository implementations for units, room types and rate records
//! - The reference seed data set

pub mod repositories;
pub mod seed;
pub mod store;

pub use repositories::*;
pub use seed::{seed_if_empty, SeedReport};
pub use store::{Collection, JsonStore};

// Re-export commonly used types
pub use flexspace_core::{AppError, AppResult};
