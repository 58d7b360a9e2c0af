//! Demo fixtures for the binary and tests: three fields with hourly slots
//! in morning/afternoon/evening shifts, two promo codes, and one holiday.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use turf_catalog::{
    BusinessCalendar, DiscountCode, DiscountResolver, DiscountType, SlotCatalog, SlotDefinition,
};

use crate::app_config::BusinessRules;
use crate::memory::FacilityStore;

pub const FOOTBALL_FIELD_ID: &str = "6f9a2c1e-8d3b-4a5f-9c70-1b2e3d4f5a60";
pub const CRICKET_FIELD_ID: &str = "b4d81f7a-2c9e-4e6b-8a51-7f0c9d2e3b41";
pub const SWIMMING_POOL_ID: &str = "e1c53a9d-7b4f-4c2a-b683-5d8e9f0a1b22";

fn shift_label(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Morning",
        12..=16 => "Afternoon",
        _ => "Evening",
    }
}

fn add_field(catalog: &mut SlotCatalog, resource_id: Uuid, prefix: &str, price: i64) {
    for hour in 6..22 {
        catalog.add_definition(SlotDefinition {
            slot_id: format!("{prefix}-{hour:02}"),
            resource_id,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour"),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).expect("valid hour"),
            shift_label: shift_label(hour).to_string(),
            price,
        });
    }
}

pub fn demo_catalog() -> SlotCatalog {
    let mut catalog = SlotCatalog::new();
    add_field(
        &mut catalog,
        FOOTBALL_FIELD_ID.parse().expect("valid uuid"),
        "FB",
        1500,
    );
    add_field(
        &mut catalog,
        CRICKET_FIELD_ID.parse().expect("valid uuid"),
        "CK",
        1200,
    );
    add_field(
        &mut catalog,
        SWIMMING_POOL_ID.parse().expect("valid uuid"),
        "SW",
        800,
    );
    catalog
}

pub fn demo_discounts() -> DiscountResolver {
    let mut resolver = DiscountResolver::new();
    resolver.add(DiscountCode::new("FIRST10", DiscountType::Percentage, 10));
    resolver.add(DiscountCode::new("SAVE20", DiscountType::Percentage, 20));
    resolver.add(DiscountCode::new("FLAT500", DiscountType::Fixed, 500));
    resolver
}

/// A date the demo venue is closed, for exercising the holiday path.
pub fn demo_holiday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date")
}

pub fn demo_calendar() -> BusinessCalendar {
    let mut calendar = BusinessCalendar::new();
    calendar.close(demo_holiday(), "Eid holiday");
    calendar
}

pub fn demo_store(rules: BusinessRules) -> FacilityStore {
    FacilityStore::new(demo_catalog(), demo_calendar(), demo_discounts(), rules)
}
