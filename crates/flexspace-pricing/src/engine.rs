//! Pricing engine
//!
//! The engine is a pure function of a room type's rate snapshot, its pricing
//! configuration and a booking interval. It performs no I/O and keeps no
//! state between calls, so concurrent invocations are independent.
//!
//! Each request moves through `Validating → ResolvingRates → Segmenting →
//! Calculating → ApplyingPolicy → Done`; any stage may fail with a typed
//! `PricingError`, which ends the request in `Failed`.

use crate::calculator::{self, PriceCalculator};
use crate::policy;
use crate::segmenter;
use crate::selector;
use flexspace_core::{
    config::PricingSettings,
    interval::DateRange,
    models::{
        OverlapResolution, PriceBreakdown, PriceSegment, PricingConfig, PricingOptions,
        PricingStage, RateRecord, RateSelectionStrategy,
    },
    PricingError, PricingResult,
};
use tracing::{debug, warn};

/// Engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Longest bookable stay in nights
    pub max_booking_nights: i64,
    /// Days in a pro-rated month
    pub monthly_proration_days: u32,
    /// Strategy for room types without a pricing configuration
    pub default_strategy: RateSelectionStrategy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&PricingSettings::default())
    }
}

impl From<&PricingSettings> for EngineSettings {
    fn from(settings: &PricingSettings) -> Self {
        Self {
            max_booking_nights: settings.max_booking_nights,
            monthly_proration_days: settings.monthly_proration_days,
            default_strategy: settings.default_strategy,
        }
    }
}

/// Everything the engine needs to price one booking
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub room_type_id: &'a str,
    pub rates: &'a [RateRecord],
    pub config: &'a PricingConfig,
    pub stay: DateRange,
    pub options: PricingOptions,
}

/// Stateless rate resolution and price calculation
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    settings: EngineSettings,
    calculator: PriceCalculator,
}

impl PricingEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            calculator: PriceCalculator::new(settings.monthly_proration_days),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Configuration applied to room types that carry none
    pub fn default_config(&self) -> PricingConfig {
        PricingConfig::with_strategy(self.settings.default_strategy)
    }

    /// Price a booking.
    ///
    /// Identical inputs always produce identical breakdowns.
    pub fn price(&self, input: &PricingInput<'_>) -> PricingResult<PriceBreakdown> {
        let (reached, result) = self.attempt(input);
        result.map_err(|err| {
            debug!(
                room_type_id = input.room_type_id,
                stage = %PricingStage::Failed,
                failed_at = %reached,
                error_code = err.error_code(),
                "Pricing failed: {}",
                err
            );
            err
        })
    }

    /// Run the pipeline, returning the last stage entered with the result
    fn attempt(&self, input: &PricingInput<'_>) -> (PricingStage, PricingResult<PriceBreakdown>) {
        let mut reached = PricingStage::Validating;
        let result = self.run(input, &mut reached);
        (reached, result)
    }

    fn run(
        &self,
        input: &PricingInput<'_>,
        stage: &mut PricingStage,
    ) -> PricingResult<PriceBreakdown> {
        let room_type_id = input.room_type_id;
        let mut warnings = Vec::new();

        enter(stage, PricingStage::Validating, room_type_id);
        let nights = input.stay.days();
        if nights > self.settings.max_booking_nights {
            return Err(PricingError::InvalidDateRange(format!(
                "booking of {} nights exceeds the maximum of {} nights",
                nights, self.settings.max_booking_nights
            )));
        }
        policy::check_minimum_stay(input.config, nights)?;
        warnings.extend(policy::config_warnings(input.config));
        let usable = usable_rates(room_type_id, input.rates, &mut warnings);

        enter(stage, PricingStage::ResolvingRates, room_type_id);
        let selection = selector::select(&usable, &input.stay);
        for overlap in &selection.overlaps {
            let message = overlap_warning(room_type_id, overlap);
            warn!(room_type_id, rate_type = %overlap.rate_type, "{}", message);
            warnings.push(message);
        }

        enter(stage, PricingStage::Segmenting, room_type_id);
        let strategy = input.config.rate_selection_strategy;
        let segmentation = segmenter::segment(&selection, &input.stay, |run| {
            policy::choose_rate_type(strategy, run, &self.calculator)
        })?;

        if !segmentation.gaps.is_empty() {
            if !input.options.allow_partial || segmentation.pieces.is_empty() {
                return Err(PricingError::RateGap {
                    room_type_id: room_type_id.to_string(),
                    gaps: segmentation.gaps,
                });
            }
            let message = partial_warning(nights, &segmentation.gaps);
            warn!(room_type_id, "{}", message);
            warnings.push(message);
        }

        enter(stage, PricingStage::Calculating, room_type_id);
        let segments: Vec<PriceSegment> = segmentation
            .pieces
            .iter()
            .map(|piece| self.calculator.price_piece(piece))
            .collect();
        let currency = calculator::settle_currency(&segments)?;
        let subtotal = calculator::sum_subtotals(&segments);

        enter(stage, PricingStage::ApplyingPolicy, room_type_id);
        let outcome = policy::apply(input.config, nights, subtotal, &segments);

        enter(stage, PricingStage::Done, room_type_id);
        debug!(
            room_type_id,
            nights,
            segments = segments.len(),
            total = %outcome.total,
            %currency,
            "Price calculated"
        );

        Ok(PriceBreakdown {
            room_type_id: room_type_id.to_string(),
            total_nights: nights,
            subtotal,
            adjustments: outcome.adjustments,
            total_price: outcome.total,
            currency,
            segments,
            gaps: segmentation.gaps,
            overlaps: selection.overlaps,
            warnings,
        })
    }
}

fn enter(current: &mut PricingStage, stage: PricingStage, room_type_id: &str) {
    *current = stage;
    debug!(%stage, room_type_id, "Pricing stage");
}

/// Records fit for pricing; every other record is reported in `warnings`
fn usable_rates(room_type_id: &str, rates: &[RateRecord], warnings: &mut Vec<String>) -> Vec<RateRecord> {
    rates
        .iter()
        .filter(|rate| {
            let mut problems = rate.validation_errors();
            if rate.room_type_id != room_type_id {
                problems.push(format!("belongs to room type {}", rate.room_type_id));
            }
            if problems.is_empty() {
                return true;
            }

            let message = format!("ignoring rate {}: {}", rate.rate_id, problems.join("; "));
            warn!(room_type_id, rate_id = %rate.rate_id, "{}", message);
            warnings.push(message);
            false
        })
        .cloned()
        .collect()
}

fn overlap_warning(room_type_id: &str, overlap: &OverlapResolution) -> String {
    let last_day = overlap
        .period_end
        .pred_opt()
        .unwrap_or(overlap.period_start);
    format!(
        "overlapping rates detected for room_type {} between {} and {}: {} rate {} supersedes {}",
        room_type_id,
        overlap.period_start,
        last_day,
        overlap.rate_type,
        overlap.winning_rate_id,
        overlap.superseded_rate_ids.join(", ")
    )
}

fn partial_warning(nights: i64, gaps: &[DateRange]) -> String {
    let missing: i64 = gaps.iter().map(DateRange::days).sum();
    let ranges = gaps
        .iter()
        .map(|gap| format!("{} to {}", gap.start(), gap.last_day()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "partial pricing: {} of {} nights have no applicable rate ({})",
        missing, nights, ranges
    )
}
