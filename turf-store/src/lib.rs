pub mod app_config;
pub mod memory;
pub mod seed;

pub use app_config::{BusinessRules, Config};
pub use memory::{BookingRequest, FacilityStore, HoldReceipt, StoreError};
