//! Pricing service implementation
//!
//! Resolves unit → room type → rate snapshot through the repositories, then
//! hands the snapshot to the pure pricing engine. Each request reads its
//! collaborators once before computing.

use crate::engine::{PricingEngine, PricingInput};
use async_trait::async_trait;
use flexspace_core::{
    models::{BookingRequest, PriceQuote, PricingOptions},
    traits::{PricingService, RateRepository, RoomTypeRepository, UnitRepository},
    PricingError, PricingResult,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Pricing service backed by unit, room type and rate repositories
pub struct PricingServiceImpl<U, T, R>
where
    U: UnitRepository,
    T: RoomTypeRepository,
    R: RateRepository,
{
    units: Arc<U>,
    room_types: Arc<T>,
    rates: Arc<R>,
    engine: PricingEngine,
}

impl<U, T, R> PricingServiceImpl<U, T, R>
where
    U: UnitRepository,
    T: RoomTypeRepository,
    R: RateRepository,
{
    /// Create a new pricing service
    pub fn new(units: Arc<U>, room_types: Arc<T>, rates: Arc<R>, engine: PricingEngine) -> Self {
        Self {
            units,
            room_types,
            rates,
            engine,
        }
    }
}

#[async_trait]
impl<U, T, R> PricingService for PricingServiceImpl<U, T, R>
where
    U: UnitRepository,
    T: RoomTypeRepository,
    R: RateRepository,
{
    #[instrument(skip(self, request), fields(unit_id = %request.unit_id))]
    async fn quote(
        &self,
        request: &BookingRequest,
        options: PricingOptions,
    ) -> PricingResult<PriceQuote> {
        let stay = request.stay()?;

        let unit = self
            .units
            .find_by_id(&request.unit_id)
            .await?
            .ok_or_else(|| {
                warn!("Unit not found: {}", request.unit_id);
                PricingError::UnitNotFound(request.unit_id.clone())
            })?;

        let room_type = self
            .room_types
            .find_by_id(&unit.room_type_id)
            .await?
            .ok_or_else(|| {
                error!(
                    "Unit {} references missing room type {}",
                    unit.unit_id, unit.room_type_id
                );
                PricingError::RoomTypeNotFound {
                    unit_id: unit.unit_id.clone(),
                    room_type_id: unit.room_type_id.clone(),
                }
            })?;

        let rates = self.rates.find_by_room_type(&room_type.room_type_id).await?;
        let config = room_type
            .pricing_config
            .clone()
            .unwrap_or_else(|| self.engine.default_config());

        let breakdown = self.engine.price(&PricingInput {
            room_type_id: &room_type.room_type_id,
            rates: &rates,
            config: &config,
            stay,
            options,
        })?;

        info!(
            room_type_id = %room_type.room_type_id,
            nights = breakdown.total_nights,
            total = %breakdown.total_price,
            currency = %breakdown.currency,
            "Price quoted"
        );

        Ok(PriceQuote {
            unit_id: unit.unit_id,
            room_type_id: room_type.room_type_id,
            room_type_name: room_type.name,
            start_date: request.start_date,
            end_date: request.end_date,
            breakdown,
        })
    }
}
