//! Unit repository implementation

use super::page;
use crate::store::JsonStore;
use async_trait::async_trait;
use flexspace_core::{
    models::Unit,
    traits::{Repository, UnitRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// JSON store implementation of UnitRepository
pub struct JsonUnitRepository {
    store: Arc<JsonStore>,
}

impl JsonUnitRepository {
    /// Create a new unit repository
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository<Unit, str> for JsonUnitRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Unit>> {
        debug!("Finding unit by id: {}", id);
        Ok(self
            .store
            .units
            .read(|units| units.iter().find(|u| u.unit_id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Unit>> {
        debug!("Finding all units with limit {} offset {}", limit, offset);
        Ok(self.store.units.read(|units| page(units, limit, offset)))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.store.units.len() as i64)
    }

    #[instrument(skip(self, entity), fields(unit_id = %entity.unit_id))]
    async fn create(&self, entity: &Unit) -> AppResult<Unit> {
        if entity.unit_id.trim().is_empty() || entity.room_type_id.trim().is_empty() {
            return Err(AppError::Validation(
                "unit_id and room_type_id are required".to_string(),
            ));
        }

        let unit = entity.clone();
        self.store
            .units
            .mutate(|units| {
                if units.iter().any(|u| u.unit_id == unit.unit_id) {
                    warn!("Unit {} already exists", unit.unit_id);
                    return Err(AppError::AlreadyExists(format!("Unit {}", unit.unit_id)));
                }
                units.push(unit.clone());
                Ok(unit)
            })
            .await
    }

    #[instrument(skip(self, entity), fields(unit_id = %entity.unit_id))]
    async fn update(&self, entity: &Unit) -> AppResult<Unit> {
        let unit = entity.clone();
        self.store
            .units
            .mutate(|units| match units.iter_mut().find(|u| u.unit_id == unit.unit_id) {
                Some(existing) => {
                    *existing = unit.clone();
                    Ok(unit)
                }
                None => Err(AppError::NotFound(format!("Unit {}", unit.unit_id))),
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store
            .units
            .mutate(|units| {
                let before = units.len();
                units.retain(|u| u.unit_id != id);
                Ok(units.len() != before)
            })
            .await
    }
}

#[async_trait]
impl UnitRepository for JsonUnitRepository {
    #[instrument(skip(self))]
    async fn find_by_room_type(&self, room_type_id: &str) -> AppResult<Vec<Unit>> {
        debug!("Finding units of room type {}", room_type_id);
        Ok(self.store.units.read(|units| {
            units
                .iter()
                .filter(|u| u.room_type_id == room_type_id)
                .cloned()
                .collect()
        }))
    }
}
