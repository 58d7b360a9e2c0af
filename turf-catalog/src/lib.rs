pub mod slot;
pub mod schedule;
pub mod pricing;
pub mod discount;

pub use slot::{CatalogError, Slot, SlotCatalog, SlotDefinition, SlotKey, SlotStatus, ShiftSlots};
pub use schedule::{BusinessCalendar, DayAvailability, ScheduleEntry};
pub use pricing::{compute_pricing, PaymentPlan, PricingResult};
pub use discount::{DiscountCode, DiscountResolver, DiscountType};
