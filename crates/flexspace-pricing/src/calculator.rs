//! Price calculator
//!
//! Converts segmenter pieces into priced segments:
//!
//! - hourly: `amount × 24 × nights`
//! - daily: `amount × nights`
//! - monthly: `amount × nights / 30`, rounded half-up to 2 decimal places
//!
//! Money values leaving this module always carry exactly two decimals.

use crate::segmenter::Piece;
use flexspace_core::{
    models::{PriceSegment, PricingStage, RateRecord, RateType},
    PricingError, PricingResult,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeSet;

/// Hours billed per booked day
pub const HOURS_PER_DAY: i64 = 24;

/// Decimal places of money values
pub const MONEY_SCALE: u32 = 2;

/// Decimal places of pro-rated monthly quantities
pub const MONTH_FRACTION_SCALE: u32 = 4;

/// Round half-up (away from zero) to two decimal places
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Turns rate records and day counts into money
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator {
    proration_days: Decimal,
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PriceCalculator {
    /// Create a calculator pro-rating monthly rates over `monthly_proration_days`
    pub fn new(monthly_proration_days: u32) -> Self {
        Self {
            proration_days: Decimal::from(monthly_proration_days.max(1)),
        }
    }

    /// Billed quantity for `days` nights, in the rate type's unit
    pub fn units_of_duration(&self, rate_type: RateType, days: i64) -> Decimal {
        match rate_type {
            RateType::Hourly => Decimal::from(HOURS_PER_DAY * days),
            RateType::Daily => Decimal::from(days),
            RateType::Monthly => (Decimal::from(days) / self.proration_days)
                .round_dp_with_strategy(MONTH_FRACTION_SCALE, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Charge for `days` nights at `rate`, rounded to 2 decimal places
    pub fn subtotal(&self, rate: &RateRecord, days: i64) -> Decimal {
        let raw = match rate.rate_type {
            RateType::Hourly => rate.amount * Decimal::from(HOURS_PER_DAY * days),
            RateType::Daily => rate.amount * Decimal::from(days),
            // Multiply first so the fraction is not truncated
            RateType::Monthly => rate.amount * Decimal::from(days) / self.proration_days,
        };
        round_money(raw)
    }

    /// Price a single piece
    pub fn price_piece(&self, piece: &Piece<'_>) -> PriceSegment {
        let days = piece.span.days();
        PriceSegment {
            period_start: piece.span.start(),
            period_end: piece.span.end(),
            days,
            units_of_duration: self.units_of_duration(piece.rate.rate_type, days),
            rate_type: piece.rate.rate_type,
            rate_id: piece.rate.rate_id.clone(),
            rate_amount: piece.rate.amount,
            currency: piece.rate.currency.clone(),
            subtotal: self.subtotal(piece.rate, days),
        }
    }

    /// Sum of the rounded subtotals of `pieces`
    pub fn cost_of(&self, pieces: &[Piece<'_>]) -> Decimal {
        round_money(
            pieces
                .iter()
                .map(|piece| self.subtotal(piece.rate, piece.span.days()))
                .sum(),
        )
    }
}

/// Single currency shared by every segment.
///
/// More than one currency is `CurrencyMismatch`; no segments at all is an
/// internal inconsistency, since an empty result never reaches the
/// calculator.
pub fn settle_currency(segments: &[PriceSegment]) -> PricingResult<String> {
    let currencies: BTreeSet<&str> = segments.iter().map(|s| s.currency.as_str()).collect();

    match currencies.len() {
        0 => Err(PricingError::inconsistency(
            PricingStage::Calculating,
            "no priced segments to settle a currency for",
        )),
        1 => Ok(currencies
            .into_iter()
            .next()
            .map(str::to_string)
            .unwrap_or_default()),
        _ => Err(PricingError::CurrencyMismatch {
            currencies: currencies.into_iter().map(str::to_string).collect(),
        }),
    }
}

/// Sum of segment subtotals, rounded once more after summation
pub fn sum_subtotals(segments: &[PriceSegment]) -> Decimal {
    round_money(segments.iter().map(|s| s.subtotal).sum())
}
