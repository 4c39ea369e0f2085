//! Pricing request stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a single pricing request.
///
/// A request moves forward through these stages in order and ends in either
/// `Done` or `Failed`. A failure at any stage ends the request with a
/// `PricingError` carrying no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStage {
    Validating,
    ResolvingRates,
    Segmenting,
    Calculating,
    ApplyingPolicy,
    Done,
    Failed,
}

impl PricingStage {
    /// No further stage follows
    pub fn is_terminal(&self) -> bool {
        matches!(self, PricingStage::Done | PricingStage::Failed)
    }
}

impl fmt::Display for PricingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingStage::Validating => write!(f, "validating"),
            PricingStage::ResolvingRates => write!(f, "resolving_rates"),
            PricingStage::Segmenting => write!(f, "segmenting"),
            PricingStage::Calculating => write!(f, "calculating"),
            PricingStage::ApplyingPolicy => write!(f, "applying_policy"),
            PricingStage::Done => write!(f, "done"),
            PricingStage::Failed => write!(f, "failed"),
        }
    }
}
