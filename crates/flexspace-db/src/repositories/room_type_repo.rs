//! Room type repository implementation
//!
//! Room types carry their pricing configuration inline, so the trait's
//! default `pricing_config` lookup is used as is.

use super::page;
use crate::store::JsonStore;
use async_trait::async_trait;
use flexspace_core::{
    models::RoomType,
    traits::{Repository, RoomTypeRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// JSON store implementation of RoomTypeRepository
pub struct JsonRoomTypeRepository {
    store: Arc<JsonStore>,
}

impl JsonRoomTypeRepository {
    /// Create a new room type repository
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository<RoomType, str> for JsonRoomTypeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<RoomType>> {
        debug!("Finding room type by id: {}", id);
        Ok(self
            .store
            .room_types
            .read(|room_types| room_types.iter().find(|r| r.room_type_id == id).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<RoomType>> {
        debug!("Finding all room types with limit {} offset {}", limit, offset);
        Ok(self
            .store
            .room_types
            .read(|room_types| page(room_types, limit, offset)))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.store.room_types.len() as i64)
    }

    #[instrument(skip(self, entity), fields(room_type_id = %entity.room_type_id))]
    async fn create(&self, entity: &RoomType) -> AppResult<RoomType> {
        if entity.room_type_id.trim().is_empty() || entity.name.trim().is_empty() {
            return Err(AppError::Validation(
                "room_type_id and name are required".to_string(),
            ));
        }

        let room_type = entity.clone();
        self.store
            .room_types
            .mutate(|room_types| {
                if room_types
                    .iter()
                    .any(|r| r.room_type_id == room_type.room_type_id)
                {
                    warn!("Room type {} already exists", room_type.room_type_id);
                    return Err(AppError::AlreadyExists(format!(
                        "Room type {}",
                        room_type.room_type_id
                    )));
                }
                room_types.push(room_type.clone());
                Ok(room_type)
            })
            .await
    }

    #[instrument(skip(self, entity), fields(room_type_id = %entity.room_type_id))]
    async fn update(&self, entity: &RoomType) -> AppResult<RoomType> {
        let room_type = entity.clone();
        self.store
            .room_types
            .mutate(|room_types| {
                match room_types
                    .iter_mut()
                    .find(|r| r.room_type_id == room_type.room_type_id)
                {
                    Some(existing) => {
                        *existing = room_type.clone();
                        Ok(room_type)
                    }
                    None => Err(AppError::NotFound(format!(
                        "Room type {}",
                        room_type.room_type_id
                    ))),
                }
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store
            .room_types
            .mutate(|room_types| {
                let before = room_types.len();
                room_types.retain(|r| r.room_type_id != id);
                Ok(room_types.len() != before)
            })
            .await
    }
}

impl RoomTypeRepository for JsonRoomTypeRepository {}
