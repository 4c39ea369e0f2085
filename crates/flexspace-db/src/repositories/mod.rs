//! Repository implementations
//!
//! This module contains concrete implementations of the repository traits
//! defined in flexspace-core, backed by the JSON document store.

pub mod booking_repo;
pub mod rate_repo;
pub mod room_type_repo;
pub mod unit_repo;

pub use booking_repo::JsonBookingRepository;
pub use rate_repo::JsonRateRepository;
pub use room_type_repo::JsonRoomTypeRepository;
pub use unit_repo::JsonUnitRepository;

/// One page of `items`, storage order preserved
pub(crate) fn page<T: Clone>(items: &[T], limit: i64, offset: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}
