//! Unit model
//!
//! A unit is one bookable space (a specific desk or office). The pricing
//! core only reads its `room_type_id`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// Free to book
    #[default]
    Available,
    /// Currently in use
    Occupied,
    /// Out of service
    Maintenance,
    /// Held for a pending booking
    Reserved,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Available => write!(f, "available"),
            UnitStatus::Occupied => write!(f, "occupied"),
            UnitStatus::Maintenance => write!(f, "maintenance"),
            UnitStatus::Reserved => write!(f, "reserved"),
        }
    }
}

/// Unit entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier
    pub unit_id: String,

    /// Room type this unit belongs to
    pub room_type_id: String,

    /// Label shown on the door (e.g. "EO-101")
    pub unit_number: String,

    /// Floor number
    #[serde(default)]
    pub floor: Option<i32>,

    /// Availability status
    #[serde(default)]
    pub status: UnitStatus,
}
