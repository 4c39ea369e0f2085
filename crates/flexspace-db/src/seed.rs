//! Reference seed data
//!
//! Two properties with five room types. The rate data deliberately carries
//! the coverage problems the pricing engine has to handle:
//!
//! - Executive Office has no rates for April to June
//! - Hot Desk is covered all year at every granularity
//! - Meeting Room Large has no rates at all
//! - Private Office has two daily rates overlapping in June
//! - Collaboration Space has no rates after June
//!
//! Two confirmed bookings hold the occupied units.
//!
//! Seeding only fills collections that are empty.

use crate::store::{Collection, JsonStore};
use chrono::NaiveDate;
use flexspace_core::{
    models::{Booking, BookingStatus, RateRecord, RateType, RoomType, Unit, UnitStatus},
    AppError, AppResult,
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

/// Number of records written per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub room_types: usize,
    pub units: usize,
    pub rates: usize,
    pub bookings: usize,
}

fn room_type(
    room_type_id: &str,
    property_id: &str,
    name: &str,
    description: &str,
    capacity: u32,
    amenities: &[&str],
) -> RoomType {
    RoomType {
        room_type_id: room_type_id.to_string(),
        property_id: property_id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        capacity,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        pricing_config: None,
    }
}

pub fn room_types() -> Vec<RoomType> {
    vec![
        room_type(
            "rt_exec_office_dt",
            "prop_downtown_hub",
            "Executive Office",
            "Private office with premium amenities, ideal for executives and senior management",
            2,
            &[
                "Standing Desk",
                "Herman Miller Chair",
                "Whiteboard",
                "External Monitor",
                "High-Speed Internet",
            ],
        ),
        room_type(
            "rt_hot_desk_dt",
            "prop_downtown_hub",
            "Hot Desk",
            "Flexible workspace in open area, first-come first-served",
            1,
            &["Desk", "Chair", "Power Outlet", "WiFi"],
        ),
        room_type(
            "rt_meeting_large_dt",
            "prop_downtown_hub",
            "Meeting Room Large",
            "Large conference room with AV equipment",
            12,
            &[
                "Conference Table",
                "65-inch Display",
                "Video Conferencing",
                "Whiteboard",
                "Catering Setup",
            ],
        ),
        room_type(
            "rt_private_office_tc",
            "prop_tech_campus",
            "Private Office",
            "Standard private office with essential amenities",
            1,
            &["Desk", "Ergonomic Chair", "Storage Cabinet", "Window View"],
        ),
        room_type(
            "rt_collab_space_tc",
            "prop_tech_campus",
            "Collaboration Space",
            "Open collaboration area with flexible seating",
            6,
            &[
                "Modular Furniture",
                "Whiteboard Walls",
                "Standing Tables",
                "Lounge Seating",
            ],
        ),
    ]
}

pub fn units() -> Vec<Unit> {
    use UnitStatus::*;

    // (unit_id, room_type_id, unit_number, floor, status)
    let rows: [(&str, &str, &str, i32, UnitStatus); 30] = [
        ("unit_dt_exec_001", "rt_exec_office_dt", "EO-101", 1, Available),
        ("unit_dt_exec_002", "rt_exec_office_dt", "EO-102", 1, Available),
        ("unit_dt_exec_003", "rt_exec_office_dt", "EO-201", 2, Occupied),
        ("unit_dt_desk_001", "rt_hot_desk_dt", "HD-A01", 1, Available),
        ("unit_dt_desk_002", "rt_hot_desk_dt", "HD-A02", 1, Available),
        ("unit_dt_desk_003", "rt_hot_desk_dt", "HD-A03", 1, Available),
        ("unit_dt_desk_004", "rt_hot_desk_dt", "HD-A04", 1, Available),
        ("unit_dt_desk_005", "rt_hot_desk_dt", "HD-A05", 1, Available),
        ("unit_dt_desk_006", "rt_hot_desk_dt", "HD-B01", 2, Available),
        ("unit_dt_desk_007", "rt_hot_desk_dt", "HD-B02", 2, Available),
        ("unit_dt_desk_008", "rt_hot_desk_dt", "HD-B03", 2, Available),
        ("unit_dt_desk_009", "rt_hot_desk_dt", "HD-B04", 2, Available),
        ("unit_dt_desk_010", "rt_hot_desk_dt", "HD-B05", 2, Maintenance),
        ("unit_dt_meet_001", "rt_meeting_large_dt", "MR-301", 3, Available),
        ("unit_dt_meet_002", "rt_meeting_large_dt", "MR-302", 3, Available),
        ("unit_tc_office_001", "rt_private_office_tc", "PO-101", 1, Available),
        ("unit_tc_office_002", "rt_private_office_tc", "PO-102", 1, Available),
        ("unit_tc_office_003", "rt_private_office_tc", "PO-103", 1, Occupied),
        ("unit_tc_office_004", "rt_private_office_tc", "PO-104", 1, Available),
        ("unit_tc_office_005", "rt_private_office_tc", "PO-201", 2, Available),
        ("unit_tc_office_006", "rt_private_office_tc", "PO-202", 2, Available),
        ("unit_tc_office_007", "rt_private_office_tc", "PO-203", 2, Available),
        ("unit_tc_office_008", "rt_private_office_tc", "PO-204", 2, Available),
        ("unit_tc_office_009", "rt_private_office_tc", "PO-301", 3, Available),
        ("unit_tc_office_010", "rt_private_office_tc", "PO-302", 3, Available),
        ("unit_tc_collab_001", "rt_collab_space_tc", "CS-A", 1, Available),
        ("unit_tc_collab_002", "rt_collab_space_tc", "CS-B", 2, Available),
        ("unit_tc_collab_003", "rt_collab_space_tc", "CS-C", 2, Available),
        ("unit_tc_collab_004", "rt_collab_space_tc", "CS-D", 3, Available),
        ("unit_tc_collab_005", "rt_collab_space_tc", "CS-E", 3, Available),
    ];

    rows.iter()
        .map(|&(unit_id, room_type_id, unit_number, floor, status)| Unit {
            unit_id: unit_id.to_string(),
            room_type_id: room_type_id.to_string(),
            unit_number: unit_number.to_string(),
            floor: Some(floor),
            status,
        })
        .collect()
}

/// 2025 calendar day; seed rows are all valid dates
fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap_or_default()
}

fn rate(
    rate_id: &str,
    room_type_id: &str,
    rate_type: RateType,
    whole_amount: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> RateRecord {
    RateRecord {
        rate_id: rate_id.to_string(),
        room_type_id: room_type_id.to_string(),
        rate_type,
        amount: Decimal::new(whole_amount * 100, 2),
        currency: "USD".to_string(),
        effective_date: from,
        end_date: to,
    }
}

pub fn rates() -> Vec<RateRecord> {
    use RateType::*;

    vec![
        // Executive Office: nothing between April and June
        rate("rate_exec_dt_daily_q1", "rt_exec_office_dt", Daily, 150, day(1, 1), day(3, 31)),
        rate("rate_exec_dt_daily_h2", "rt_exec_office_dt", Daily, 175, day(7, 1), day(12, 31)),
        rate("rate_exec_dt_monthly_q1", "rt_exec_office_dt", Monthly, 3500, day(1, 1), day(3, 31)),
        // Hot Desk
        rate("rate_desk_dt_hourly_2025", "rt_hot_desk_dt", Hourly, 15, day(1, 1), day(12, 31)),
        rate("rate_desk_dt_daily_2025", "rt_hot_desk_dt", Daily, 50, day(1, 1), day(12, 31)),
        rate("rate_desk_dt_monthly_2025", "rt_hot_desk_dt", Monthly, 800, day(1, 1), day(12, 31)),
        // Private Office: the overlap rate shares June 15-30 with h1
        rate("rate_office_tc_daily_h1", "rt_private_office_tc", Daily, 120, day(1, 1), day(6, 30)),
        rate("rate_office_tc_daily_overlap", "rt_private_office_tc", Daily, 125, day(6, 15), day(9, 30)),
        rate("rate_office_tc_daily_q4", "rt_private_office_tc", Daily, 130, day(10, 1), day(12, 31)),
        rate("rate_office_tc_monthly_2025", "rt_private_office_tc", Monthly, 2800, day(1, 1), day(12, 31)),
        // Collaboration Space: first half only
        rate("rate_collab_tc_hourly_h1", "rt_collab_space_tc", Hourly, 35, day(1, 1), day(6, 30)),
        rate("rate_collab_tc_daily_h1", "rt_collab_space_tc", Daily, 200, day(1, 1), day(6, 30)),
    ]
}

fn booking(
    booking_id: &str,
    unit_id: &str,
    customer_name: &str,
    customer_email: &str,
    (start_date, end_date): (NaiveDate, NaiveDate),
    whole_price: i64,
) -> Booking {
    Booking {
        booking_id: booking_id.to_string(),
        unit_id: unit_id.to_string(),
        customer_name: customer_name.to_string(),
        customer_email: customer_email.to_string(),
        start_date,
        end_date,
        calculated_price: Decimal::new(whole_price * 100, 2),
        currency: "USD".to_string(),
        status: BookingStatus::Confirmed,
    }
}

pub fn bookings() -> Vec<Booking> {
    vec![
        booking(
            "book_001",
            "unit_dt_exec_003",
            "Acme Corporation",
            "booking@acme.com",
            (day(1, 15), day(2, 14)),
            3500,
        ),
        booking(
            "book_002",
            "unit_tc_office_003",
            "Jane Smith",
            "jane@example.com",
            (day(2, 1), day(2, 28)),
            2800,
        ),
    ]
}

async fn fill<T>(collection: &Collection<T>, records: Vec<T>) -> AppResult<usize>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    if !collection.is_empty() {
        info!("Collection {} already has data, skipping seed", collection.name());
        return Ok(0);
    }

    let count = records.len();
    collection
        .mutate(move |items| {
            if !items.is_empty() {
                return Err(AppError::Conflict(format!(
                    "{} was filled while seeding",
                    collection.name()
                )));
            }
            *items = records;
            Ok(())
        })
        .await?;

    info!("Seeded {} {}", count, collection.name());
    Ok(count)
}

/// Write the reference data set into every empty collection
pub async fn seed_if_empty(store: &JsonStore) -> AppResult<SeedReport> {
    Ok(SeedReport {
        room_types: fill(&store.room_types, room_types()).await?,
        units: fill(&store.units, units()).await?,
        rates: fill(&store.rates, rates()).await?,
        bookings: fill(&store.bookings, bookings()).await?,
    })
}
