//! HTTP request handlers

pub mod booking;
pub mod health;
pub mod pricing;

pub use booking::configure as configure_bookings;
pub use health::configure as configure_health;
pub use pricing::configure as configure_pricing;
