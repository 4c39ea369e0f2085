//! Flexspace Pricing Engine
//!
//! Maps a room type's rate records and a booking interval onto a
//! deterministic, auditable price breakdown:
//!
//! - `selector`: per-day winning rate record of each rate type, overlap audit
//! - `segmenter`: coverage runs, rate type choice per run, gaps
//! - `calculator`: hourly/daily/monthly subtotals and money rounding
//! - `policy`: minimum stay, rate type preference, weekend premium,
//!   length-of-stay discounts
//! - `engine`: the pure pricing pipeline
//! - `service`: `PricingService` implementation over the repositories
//! - `booking`: `BookingService` creating priced bookings

pub mod booking;
pub mod calculator;
pub mod engine;
pub mod policy;
pub mod segmenter;
pub mod selector;
pub mod service;

pub use booking::BookingServiceImpl;
pub use calculator::{round_money, PriceCalculator};
pub use engine::{EngineSettings, PricingEngine, PricingInput};
pub use service::PricingServiceImpl;
