//! Flexspace Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Flexspace booking platform. It includes:
//!
//! - Calendar-day interval algebra used by rate resolution
//! - Domain models (RateRecord, RoomType, Unit, PriceBreakdown, etc.)
//! - Collaborator traits for storage lookups and the pricing service
//! - Typed pricing errors and infrastructure errors
//! - Application configuration

pub mod config;
pub mod error;
pub mod interval;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::{AppError, PricingError};
pub use interval::DateRange;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias using PricingError
pub type PricingResult<T> = Result<T, PricingError>;
