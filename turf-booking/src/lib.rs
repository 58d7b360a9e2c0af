pub mod models;
pub mod holds;
pub mod committer;

pub use committer::{BookingLedger, CommitError, CommitRequest};
pub use holds::{HoldError, HoldManager, ReleaseOutcome};
pub use models::{Booking, BookedSlot, CustomerInfo, Hold, PaymentStatus};
