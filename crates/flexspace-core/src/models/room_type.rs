//! Room type model
//!
//! A room type groups interchangeable units (e.g. "Hot Desk") and carries
//! the optional pricing configuration consumed by the pricing policy.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the pricing policy picks a rate type for each coverage run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateSelectionStrategy {
    /// Match granularity to duration: monthly for 30+ nights, else daily
    #[default]
    DurationBased,
    /// Daily whenever a daily rate is available, monthly never preferred
    PreferDaily,
    /// Price every available rate type and keep the cheapest
    LowestPrice,
}

impl fmt::Display for RateSelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSelectionStrategy::DurationBased => write!(f, "duration_based"),
            RateSelectionStrategy::PreferDaily => write!(f, "prefer_daily"),
            RateSelectionStrategy::LowestPrice => write!(f, "lowest_price"),
        }
    }
}

impl RateSelectionStrategy {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "duration_based" | "auto" => Some(RateSelectionStrategy::DurationBased),
            "prefer_daily" => Some(RateSelectionStrategy::PreferDaily),
            "lowest_price" | "cheapest" => Some(RateSelectionStrategy::LowestPrice),
            _ => None,
        }
    }
}

/// Percentage discount for stays of at least `min_nights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthOfStayDiscount {
    /// Minimum number of nights for the tier to apply
    pub min_nights: u32,

    /// Discount percentage, `0 < pct <= 100`
    pub discount_pct: Decimal,
}

/// Premium charged for nights falling on selected weekdays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendPricing {
    /// Premium percentage added to the charge of each weekend night
    pub premium_pct: Decimal,

    /// Weekdays treated as weekend nights
    #[serde(default = "default_weekend_days")]
    pub days: Vec<Weekday>,
}

fn default_weekend_days() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

/// Business rules applied on top of raw rate resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PricingConfig {
    /// Rate type selection policy
    #[serde(default)]
    pub rate_selection_strategy: RateSelectionStrategy,

    /// Shortest bookable stay in nights
    #[serde(default)]
    pub minimum_stay_nights: Option<u32>,

    /// Length-of-stay discount tiers
    #[serde(default)]
    pub length_of_stay_discounts: Vec<LengthOfStayDiscount>,

    /// Weekend premium
    #[serde(default)]
    pub weekend_pricing: Option<WeekendPricing>,
}

impl PricingConfig {
    /// Configuration using a given strategy and no other rules
    pub fn with_strategy(strategy: RateSelectionStrategy) -> Self {
        Self {
            rate_selection_strategy: strategy,
            ..Default::default()
        }
    }

    /// Highest-threshold discount tier whose `min_nights` is reached.
    ///
    /// Tiers with a percentage outside `(0, 100]` are never selected.
    pub fn applicable_discount(&self, nights: i64) -> Option<&LengthOfStayDiscount> {
        self.length_of_stay_discounts
            .iter()
            .filter(|tier| i64::from(tier.min_nights) <= nights)
            .filter(|tier| {
                tier.discount_pct > Decimal::ZERO && tier.discount_pct <= Decimal::ONE_HUNDRED
            })
            .max_by(|a, b| {
                a.min_nights
                    .cmp(&b.min_nights)
                    .then(a.discount_pct.cmp(&b.discount_pct))
            })
    }
}

/// Room type entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    /// Unique identifier
    pub room_type_id: String,

    /// Owning property
    pub property_id: String,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Number of people the space holds
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Amenity labels
    #[serde(default)]
    pub amenities: Vec<String>,

    /// Pricing rules; `None` means defaults apply
    #[serde(default)]
    pub pricing_config: Option<PricingConfig>,
}

fn default_capacity() -> u32 {
    1
}

impl RoomType {
    /// Effective pricing configuration (defaults when none is set)
    pub fn effective_pricing_config(&self) -> PricingConfig {
        self.pricing_config.clone().unwrap_or_default()
    }
}
