//! Domain models for Flexspace
//!
//! This module contains all the core domain models used by the pricing
//! engine and its storage collaborators.

pub mod booking;
pub mod breakdown;
pub mod rate;
pub mod room_type;
pub mod stage;
pub mod unit;

pub use booking::{Booking, BookingFilter, BookingRequest, BookingStatus, NewBooking, PricingOptions};
pub use breakdown::{
    AdjustmentKind, OverlapResolution, PriceAdjustment, PriceBreakdown, PriceQuote, PriceSegment,
};
pub use rate::{RateRecord, RateType};
pub use room_type::{
    LengthOfStayDiscount, PricingConfig, RateSelectionStrategy, RoomType, WeekendPricing,
};
pub use stage::PricingStage;
pub use unit::{Unit, UnitStatus};
