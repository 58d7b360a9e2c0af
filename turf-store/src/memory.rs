use chrono::{DateTime, Duration, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use turf_booking::committer::{BookingLedger, CommitError, CommitRequest};
use turf_booking::holds::{HoldError, HoldManager, ReleaseOutcome};
use turf_booking::models::{Booking, CustomerInfo};
use turf_catalog::slot::CatalogError;
use turf_catalog::{
    compute_pricing, BusinessCalendar, DayAvailability, DiscountCode, DiscountResolver,
    PaymentPlan, PricingResult, Slot, SlotCatalog, SlotKey, SlotStatus,
};

use crate::app_config::BusinessRules;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Hold(#[from] HoldError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("venue is closed on {date}")]
    ClosedDay { date: NaiveDate },

    #[error("slot {slot_id} does not belong to resource {resource_id}")]
    SlotMismatch { slot_id: String, resource_id: Uuid },
}

/// Receipt returned by a successful hold.
#[derive(Debug, Clone)]
pub struct HoldReceipt {
    pub slot_id: String,
    pub held_until: DateTime<Utc>,
}

/// Everything `create_booking` needs from the caller. Prices, totals, and
/// discount effects are deliberately absent: all monetary values are
/// recomputed here from the catalog and the discount table.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub resource_id: Uuid,
    pub date: NaiveDate,
    pub slot_ids: Vec<String>,
    pub session_id: String,
    pub customer: CustomerInfo,
    pub payment_method: String,
    pub plan: PaymentPlan,
    pub discount_code: Option<String>,
}

struct ReservationState {
    holds: HoldManager,
    ledger: BookingLedger,
}

/// Owned application state: the read-only catalog plus a single-writer
/// reservation store. The write lock serializes every hold/release/commit,
/// which gives per-slot mutual exclusion and a linearizable event order;
/// catalog reads take the read lock only.
pub struct FacilityStore {
    catalog: SlotCatalog,
    calendar: BusinessCalendar,
    discounts: DiscountResolver,
    rules: BusinessRules,
    state: RwLock<ReservationState>,
}

impl FacilityStore {
    pub fn new(
        catalog: SlotCatalog,
        calendar: BusinessCalendar,
        discounts: DiscountResolver,
        rules: BusinessRules,
    ) -> Self {
        let holds = HoldManager::new(rules.hold_minutes);
        Self {
            catalog,
            calendar,
            discounts,
            rules,
            state: RwLock::new(ReservationState {
                holds,
                ledger: BookingLedger::new(),
            }),
        }
    }

    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Slot Catalog query surface: every slot the resource defines for the
    /// date, annotated with a status derived from live holds and bookings.
    /// Closed days report an explicit indicator instead of an empty list.
    pub async fn get_slots(
        &self,
        resource_id: Uuid,
        date: NaiveDate,
    ) -> Result<DayAvailability, StoreError> {
        // Resource validation first: an unknown resource is 404 even on a
        // holiday, so the two outcomes never shadow each other.
        let defs = self.catalog.resource_slots(resource_id)?;

        if let Some(closure) = self.calendar.closure(date) {
            return Ok(DayAvailability::closed(closure.notes.clone()));
        }
        let now = Utc::now();
        let state = self.state.read().await;

        let slots: Vec<Slot> = defs
            .iter()
            .map(|def| {
                let key = SlotKey::new(def.slot_id.clone(), date);
                let status = if state.ledger.is_booked(&key) {
                    SlotStatus::Booked
                } else if state.holds.active_hold(&key, now).is_some() {
                    SlotStatus::Held
                } else {
                    SlotStatus::Available
                };
                Slot::from_definition(def, status)
            })
            .collect();

        Ok(DayAvailability::Open(SlotCatalog::group_by_shift(
            slots, &defs,
        )))
    }

    /// Hold a slot for a session. Fails with `SlotUnavailable` when the
    /// slot is booked or held by another session; a re-hold by the owner
    /// refreshes the expiry.
    pub async fn hold_slot(
        &self,
        slot_id: &str,
        date: NaiveDate,
        session_id: &str,
        duration_minutes: Option<i64>,
    ) -> Result<HoldReceipt, StoreError> {
        // Unknown slots and closed days are rejected before touching state.
        self.catalog.definition(slot_id)?;
        if !self.calendar.is_open(date) {
            return Err(StoreError::ClosedDay { date });
        }

        let now = Utc::now();
        let key = SlotKey::new(slot_id, date);
        let mut state = self.state.write().await;

        if state.ledger.is_booked(&key) {
            return Err(HoldError::SlotUnavailable(slot_id.to_string()).into());
        }

        // The requested duration may only shorten the hold. Non-positive or
        // oversized requests fall back to the configured TTL, so no session
        // can park a hold past the anti-starvation window.
        let duration = duration_minutes
            .filter(|&minutes| minutes > 0 && minutes <= self.rules.hold_minutes)
            .map(Duration::minutes);
        let held_until = state.holds.acquire(key, session_id, now, duration)?;
        Ok(HoldReceipt {
            slot_id: slot_id.to_string(),
            held_until,
        })
    }

    /// Release a session's hold. Releasing a slot with no active hold is a
    /// safe no-op; a non-owner release is rejected and the hold kept.
    pub async fn release_slot(
        &self,
        session_id: &str,
        slot_id: &str,
        date: NaiveDate,
    ) -> Result<ReleaseOutcome, StoreError> {
        let now = Utc::now();
        let key = SlotKey::new(slot_id, date);
        let mut state = self.state.write().await;
        let outcome = state.holds.release(&key, session_id, now);
        if let Err(HoldError::NotOwner(_)) = &outcome {
            warn!(%slot_id, %session_id, "release rejected: not the hold owner");
        }
        Ok(outcome?)
    }

    /// Atomically commit a booking. The paid amount is recomputed from the
    /// catalog and the discount table under the same write lock that
    /// validates slot state, so no concurrent mutation can interleave.
    pub async fn create_booking(
        &self,
        req: BookingRequest,
    ) -> Result<(Booking, PricingResult), StoreError> {
        if !self.calendar.is_open(req.date) {
            return Err(StoreError::ClosedDay { date: req.date });
        }
        if !self.catalog.contains_resource(req.resource_id) {
            return Err(CatalogError::UnknownResource(req.resource_id).into());
        }

        let mut defs = Vec::with_capacity(req.slot_ids.len());
        for slot_id in &req.slot_ids {
            let def = self.catalog.definition(slot_id)?;
            // A booking's slot list must belong to the resource it names.
            if def.resource_id != req.resource_id {
                return Err(StoreError::SlotMismatch {
                    slot_id: slot_id.clone(),
                    resource_id: req.resource_id,
                });
            }
            defs.push(def);
        }

        let discount = req
            .discount_code
            .as_deref()
            .and_then(|code| self.discounts.validate(code));
        let prices: Vec<i64> = defs.iter().map(|d| d.price).collect();
        let pricing = compute_pricing(
            &prices,
            discount,
            req.plan,
            self.rules.confirmation_amount,
        );

        let now = Utc::now();
        let commit = CommitRequest {
            resource_id: req.resource_id,
            date: req.date,
            session_id: req.session_id,
            customer: req.customer,
            payment_method: req.payment_method,
            discount_id: discount.map(|d| d.id),
        };

        let mut state = self.state.write().await;
        let ReservationState { holds, ledger } = &mut *state;
        let booking = ledger.commit(holds, &defs, &pricing, commit, now)?;
        Ok((booking, pricing))
    }

    /// Read-only promo code lookup; unknown and inactive codes report the
    /// same "no discount" outcome.
    pub fn validate_discount(&self, code: &str) -> Option<&DiscountCode> {
        self.discounts.validate(code)
    }

    pub async fn find_booking(&self, booking_code: &str) -> Option<Booking> {
        self.state.read().await.ledger.by_code(booking_code).cloned()
    }

    /// Reclaim expired holds. Lazy expiry on reads already hides them;
    /// the sweep keeps the table from accumulating abandoned entries.
    pub async fn sweep_expired_holds(&self) -> usize {
        let now = Utc::now();
        let swept = self.state.write().await.holds.sweep_expired(now);
        if swept > 0 {
            info!(count = swept, "reclaimed expired holds");
        }
        swept
    }
}
