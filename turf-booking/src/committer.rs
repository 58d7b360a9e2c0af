use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use uuid::Uuid;

use turf_catalog::{PricingResult, SlotDefinition, SlotKey};

use crate::holds::HoldManager;
use crate::models::{generate_booking_code, BookedSlot, Booking, CustomerInfo, PaymentStatus};

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// One or more slots are no longer available or held by the committing
    /// session. The whole booking is rejected; nothing was mutated.
    #[error("slot conflict on {}", slot_ids.join(", "))]
    SlotConflict { slot_ids: Vec<String> },

    #[error("booking must reference at least one slot")]
    EmptySelection,

    #[error("duplicate slot in selection: {0}")]
    DuplicateSlot(String),
}

/// Everything the committer needs besides catalog state. `paid_amount`
/// always comes from a server-side pricing pass, never from the client.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub resource_id: Uuid,
    pub date: NaiveDate,
    pub session_id: String,
    pub customer: CustomerInfo,
    pub payment_method: String,
    pub discount_id: Option<Uuid>,
}

/// Append-only booking table plus the set of booked slot keys. Committed
/// bookings are immutable; the booked set is what makes a slot read as
/// `booked` on every subsequent catalog query.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    booked: HashSet<SlotKey>,
    by_code: HashMap<String, usize>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_booked(&self, key: &SlotKey) -> bool {
        self.booked.contains(key)
    }

    pub fn by_code(&self, booking_code: &str) -> Option<&Booking> {
        self.by_code
            .get(booking_code)
            .and_then(|&idx| self.bookings.get(idx))
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// All-or-nothing commit. Every slot must be either free or held by the
    /// committing session; any offender aborts the whole operation before a
    /// single slot is mutated. Holds on committed slots are consumed, since
    /// the booking now owns them.
    pub fn commit(
        &mut self,
        holds: &mut HoldManager,
        slots: &[&SlotDefinition],
        pricing: &PricingResult,
        req: CommitRequest,
        now: DateTime<Utc>,
    ) -> Result<Booking, CommitError> {
        if slots.is_empty() {
            return Err(CommitError::EmptySelection);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for def in slots {
            if !seen.insert(def.slot_id.as_str()) {
                return Err(CommitError::DuplicateSlot(def.slot_id.clone()));
            }
        }

        // Validation pass: no mutation until every slot has been checked.
        let mut conflicts: Vec<String> = Vec::new();
        for def in slots {
            let key = SlotKey::new(def.slot_id.clone(), req.date);
            let booked = self.is_booked(&key);
            let held_by_other = holds
                .active_hold(&key, now)
                .map(|h| h.session_id != req.session_id)
                .unwrap_or(false);
            if booked || held_by_other {
                conflicts.push(def.slot_id.clone());
            }
        }
        if !conflicts.is_empty() {
            warn!(
                session_id = %req.session_id,
                slots = ?conflicts,
                "booking rejected: slot conflict"
            );
            return Err(CommitError::SlotConflict { slot_ids: conflicts });
        }

        for def in slots {
            let key = SlotKey::new(def.slot_id.clone(), req.date);
            holds.take(&key);
            self.booked.insert(key);
        }

        let payment_status = if pricing.payable_now < pricing.total {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::FullyPaid
        };

        let booking = Booking {
            id: Uuid::new_v4(),
            booking_code: generate_booking_code(),
            resource_id: req.resource_id,
            date: req.date,
            slots: slots
                .iter()
                .map(|def| BookedSlot {
                    slot_id: def.slot_id.clone(),
                    price: def.price,
                })
                .collect(),
            customer: req.customer,
            payment_method: req.payment_method,
            payment_status,
            paid_amount: pricing.payable_now,
            total_amount: pricing.total,
            discount_id: req.discount_id,
            created_at: now,
        };

        info!(
            booking_code = %booking.booking_code,
            session_id = %req.session_id,
            paid_amount = booking.paid_amount,
            "booking committed"
        );

        self.by_code
            .insert(booking.booking_code.clone(), self.bookings.len());
        self.bookings.push(booking.clone());
        Ok(booking)
    }
}
