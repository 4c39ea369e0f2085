//! Pricing policy
//!
//! Business rules layered on raw rate resolution: minimum stay, the rate
//! type preference applied to each coverage run, the weekend premium and
//! length-of-stay discounts. Malformed discount or premium entries are
//! ignored and reported as warnings instead of failing the request.

use crate::calculator::{round_money, PriceCalculator, HOURS_PER_DAY};
use crate::segmenter::Run;
use chrono::Datelike;
use flexspace_core::{
    models::{
        AdjustmentKind, PriceAdjustment, PriceSegment, PricingConfig, PricingStage,
        RateSelectionStrategy, RateType, WeekendPricing,
    },
    PricingError, PricingResult,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Stays of at least this many nights prefer monthly rates
pub const MONTHLY_THRESHOLD_NIGHTS: i64 = 30;

/// Fail with `MinimumStayViolation` when the stay is shorter than configured
pub fn check_minimum_stay(config: &PricingConfig, nights: i64) -> PricingResult<()> {
    match config.minimum_stay_nights {
        Some(minimum) if nights < i64::from(minimum) => Err(PricingError::MinimumStayViolation {
            minimum_nights: minimum,
            requested_nights: nights,
        }),
        _ => Ok(()),
    }
}

/// Rate types in order of preference for a run of `run_days` nights.
///
/// Whole-day runs are always at least 24 hours long, so hourly is only
/// reached when nothing coarser is available.
pub fn preference_order(strategy: RateSelectionStrategy, run_days: i64) -> [RateType; 3] {
    match strategy {
        RateSelectionStrategy::DurationBased | RateSelectionStrategy::LowestPrice
            if run_days >= MONTHLY_THRESHOLD_NIGHTS =>
        {
            [RateType::Monthly, RateType::Daily, RateType::Hourly]
        }
        _ => [RateType::Daily, RateType::Monthly, RateType::Hourly],
    }
}

/// Pick the rate type used over a coverage run.
///
/// `lowest_price` prices every available type over the run and keeps the
/// cheapest; ties keep the `duration_based` order.
pub fn choose_rate_type(
    strategy: RateSelectionStrategy,
    run: &Run<'_, '_>,
    calculator: &PriceCalculator,
) -> PricingResult<RateType> {
    let mut ordered = preference_order(strategy, run.days())
        .into_iter()
        .filter(|rate_type| run.offers(*rate_type));

    let chosen = if strategy == RateSelectionStrategy::LowestPrice {
        let mut best: Option<(RateType, Decimal)> = None;
        for rate_type in ordered {
            let cost = calculator.cost_of(&run.pieces(rate_type));
            debug!(run = %run.span, %rate_type, %cost, "Priced candidate rate type");
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((rate_type, cost));
            }
        }
        best.map(|(rate_type, _)| rate_type)
    } else {
        ordered.next()
    };

    chosen.ok_or_else(|| {
        PricingError::inconsistency(
            PricingStage::Segmenting,
            format!("coverage run {} offers no rate type", run.span),
        )
    })
}

fn pct_in_range(pct: Decimal) -> bool {
    pct > Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}

/// Warnings for configuration entries the policy ignores
pub fn config_warnings(config: &PricingConfig) -> Vec<String> {
    let mut warnings: Vec<String> = config
        .length_of_stay_discounts
        .iter()
        .filter(|tier| !pct_in_range(tier.discount_pct))
        .map(|tier| {
            format!(
                "ignoring length-of-stay discount for {}+ nights: discount_pct {} is outside (0, 100]",
                tier.min_nights, tier.discount_pct
            )
        })
        .collect();

    if let Some(weekend) = &config.weekend_pricing {
        if !pct_in_range(weekend.premium_pct) {
            warnings.push(format!(
                "ignoring weekend pricing: premium_pct {} is outside (0, 100]",
                weekend.premium_pct
            ));
        }
    }

    warnings
}

/// Charge of one booked day of a segment, if the premium applies to its type
fn per_day_charge(segment: &PriceSegment) -> Option<Decimal> {
    match segment.rate_type {
        RateType::Hourly => Some(segment.rate_amount * Decimal::from(HOURS_PER_DAY)),
        RateType::Daily => Some(segment.rate_amount),
        RateType::Monthly => None,
    }
}

/// Premium for nights falling on the configured weekdays of hourly and
/// daily segments
pub fn weekend_premium(weekend: &WeekendPricing, segments: &[PriceSegment]) -> Option<PriceAdjustment> {
    if !pct_in_range(weekend.premium_pct) {
        return None;
    }

    let mut nights = 0_i64;
    let mut base = Decimal::ZERO;
    for segment in segments {
        let Some(charge) = per_day_charge(segment) else {
            continue;
        };
        let Some(period) = segment.period() else {
            continue;
        };
        for day in period.iter_days() {
            if weekend.days.contains(&day.weekday()) {
                nights += 1;
                base += charge;
            }
        }
    }

    let amount = round_money(base * weekend.premium_pct / Decimal::ONE_HUNDRED);
    if nights == 0 || amount.is_zero() {
        return None;
    }

    Some(PriceAdjustment {
        kind: AdjustmentKind::WeekendPremium,
        description: format!(
            "Weekend premium {}% on {} night{}",
            weekend.premium_pct.normalize(),
            nights,
            if nights == 1 { "" } else { "s" }
        ),
        amount,
    })
}

/// Discount of the highest tier reached by `nights`, taken from `base`
pub fn length_of_stay_discount(
    config: &PricingConfig,
    nights: i64,
    base: Decimal,
) -> Option<PriceAdjustment> {
    let tier = config.applicable_discount(nights)?;
    let amount = round_money(base * tier.discount_pct / Decimal::ONE_HUNDRED);
    if amount.is_zero() {
        return None;
    }

    Some(PriceAdjustment {
        kind: AdjustmentKind::LengthOfStayDiscount,
        description: format!(
            "Length-of-stay discount {}% for {}+ nights",
            tier.discount_pct.normalize(),
            tier.min_nights
        ),
        amount: -amount,
    })
}

/// Adjustments and the amount due after them
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub adjustments: Vec<PriceAdjustment>,
    pub total: Decimal,
}

/// Apply the weekend premium, then the length-of-stay discount on the
/// premium-inclusive amount
pub fn apply(
    config: &PricingConfig,
    nights: i64,
    subtotal: Decimal,
    segments: &[PriceSegment],
) -> PolicyOutcome {
    let mut adjustments = Vec::new();

    if let Some(premium) = config
        .weekend_pricing
        .as_ref()
        .and_then(|weekend| weekend_premium(weekend, segments))
    {
        adjustments.push(premium);
    }

    let premium_inclusive = subtotal + adjustments.iter().map(|a| a.amount).sum::<Decimal>();
    if let Some(discount) = length_of_stay_discount(config, nights, premium_inclusive) {
        adjustments.push(discount);
    }

    let total = round_money(subtotal + adjustments.iter().map(|a| a.amount).sum::<Decimal>());
    PolicyOutcome { adjustments, total }
}
