//! Rate record repository implementation
//!
//! Writes refuse records that fail validation; records already on disk are
//! returned as stored and left to the engine to filter.

use super::page;
use crate::store::JsonStore;
use async_trait::async_trait;
use flexspace_core::{
    models::RateRecord,
    traits::{RateRepository, Repository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// JSON store implementation of RateRepository
pub struct JsonRateRepository {
    store: Arc<JsonStore>,
}

impl JsonRateRepository {
    /// Create a new rate repository
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    fn validate(rate: &RateRecord) -> AppResult<()> {
        let errors = rate.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            warn!("Rejecting rate {}: {}", rate.rate_id, errors.join("; "));
            Err(AppError::Validation(errors.join("; ")))
        }
    }
}

#[async_trait]
impl Repository<RateRecord, str> for JsonRateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<RateRecord>> {
        debug!("Finding rate by id: {}", id);
        Ok(self
            .store
            .rates
            .read(|rates| rates.iter().find(|r| r.rate_id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<RateRecord>> {
        debug!("Finding all rates with limit {} offset {}", limit, offset);
        Ok(self.store.rates.read(|rates| page(rates, limit, offset)))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.store.rates.len() as i64)
    }

    /// Store a new rate, generating `rate_{uuid}` when no id is given
    #[instrument(skip(self, entity), fields(room_type_id = %entity.room_type_id))]
    async fn create(&self, entity: &RateRecord) -> AppResult<RateRecord> {
        let mut rate = entity.clone();
        if rate.rate_id.trim().is_empty() {
            rate.rate_id = format!("rate_{}", Uuid::new_v4());
        }
        Self::validate(&rate)?;

        let created = self
            .store
            .rates
            .mutate(|rates| {
                if rates.iter().any(|r| r.rate_id == rate.rate_id) {
                    return Err(AppError::AlreadyExists(format!("Rate {}", rate.rate_id)));
                }
                rates.push(rate.clone());
                Ok(rate)
            })
            .await?;

        info!(
            rate_id = %created.rate_id,
            rate_type = %created.rate_type,
            "Rate created"
        );
        Ok(created)
    }

    #[instrument(skip(self, entity), fields(rate_id = %entity.rate_id))]
    async fn update(&self, entity: &RateRecord) -> AppResult<RateRecord> {
        Self::validate(entity)?;

        let rate = entity.clone();
        self.store
            .rates
            .mutate(|rates| match rates.iter_mut().find(|r| r.rate_id == rate.rate_id) {
                Some(existing) => {
                    *existing = rate.clone();
                    Ok(rate)
                }
                None => Err(AppError::NotFound(format!("Rate {}", rate.rate_id))),
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store
            .rates
            .mutate(|rates| {
                let before = rates.len();
                rates.retain(|r| r.rate_id != id);
                Ok(rates.len() != before)
            })
            .await
    }
}

#[async_trait]
impl RateRepository for JsonRateRepository {
    #[instrument(skip(self))]
    async fn find_by_room_type(&self, room_type_id: &str) -> AppResult<Vec<RateRecord>> {
        let rates: Vec<RateRecord> = self.store.rates.read(|rates| {
            rates
                .iter()
                .filter(|r| r.room_type_id == room_type_id)
                .cloned()
                .collect()
        });
        debug!("Found {} rates for room type {}", rates.len(), room_type_id);
        Ok(rates)
    }
}
