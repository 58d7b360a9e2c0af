use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info};
use turf_catalog::SlotKey;

use crate::models::Hold;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HoldError {
    /// The slot is held by another session or already booked.
    #[error("slot {0} is unavailable")]
    SlotUnavailable(String),

    /// A release was attempted by a session that does not own the hold.
    #[error("session does not own the hold on slot {0}")]
    NotOwner(String),
}

/// Outcome of a release request. Releasing a slot with no active hold is a
/// safe no-op so transport-level retries stay idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    NotHeld,
}

/// Hold table keyed by `(slot_id, date)`, unique per key. Expiry is
/// enforced lazily on every read and mutation; `sweep_expired` exists so a
/// background task can also reclaim abandoned holds. Client timers are
/// advisory only and never consulted here.
#[derive(Debug)]
pub struct HoldManager {
    holds: HashMap<SlotKey, Hold>,
    hold_duration: Duration,
}

impl HoldManager {
    pub fn new(hold_minutes: i64) -> Self {
        Self {
            holds: HashMap::new(),
            hold_duration: Duration::minutes(hold_minutes),
        }
    }

    /// The active (non-expired) hold on a slot, if any.
    pub fn active_hold(&self, key: &SlotKey, now: DateTime<Utc>) -> Option<&Hold> {
        self.holds.get(key).filter(|h| !h.is_expired(now))
    }

    pub fn is_held_by(&self, key: &SlotKey, session_id: &str, now: DateTime<Utc>) -> bool {
        self.active_hold(key, now)
            .map(|h| h.session_id == session_id)
            .unwrap_or(false)
    }

    /// Acquire or refresh a hold. A re-hold by the owning session extends
    /// `expires_at` instead of erroring; an expired hold is replaced
    /// regardless of who owned it. Returns the new expiry.
    pub fn acquire(
        &mut self,
        key: SlotKey,
        session_id: &str,
        now: DateTime<Utc>,
        duration: Option<Duration>,
    ) -> Result<DateTime<Utc>, HoldError> {
        if let Some(existing) = self.active_hold(&key, now) {
            if existing.session_id != session_id {
                return Err(HoldError::SlotUnavailable(key.slot_id));
            }
        }

        let duration = duration.unwrap_or(self.hold_duration);
        let expires_at = now + duration;
        let refreshed = self.is_held_by(&key, session_id, now);
        self.holds.insert(
            key.clone(),
            Hold {
                slot_id: key.slot_id.clone(),
                date: key.date,
                session_id: session_id.to_string(),
                created_at: now,
                expires_at,
            },
        );

        if refreshed {
            debug!(slot_id = %key.slot_id, %session_id, "hold refreshed");
        } else {
            info!(slot_id = %key.slot_id, %session_id, "hold acquired");
        }
        Ok(expires_at)
    }

    /// Release a hold owned by `session_id`.
    pub fn release(
        &mut self,
        key: &SlotKey,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ReleaseOutcome, HoldError> {
        match self.active_hold(key, now) {
            None => {
                // Lapsed or never held; drop any expired leftover record.
                self.holds.remove(key);
                Ok(ReleaseOutcome::NotHeld)
            }
            Some(hold) if hold.session_id != session_id => {
                Err(HoldError::NotOwner(key.slot_id.clone()))
            }
            Some(_) => {
                self.holds.remove(key);
                info!(slot_id = %key.slot_id, %session_id, "hold released");
                Ok(ReleaseOutcome::Released)
            }
        }
    }

    /// Remove a hold without ownership checks. Used by the committer once
    /// a slot's hold has been subsumed by a booking.
    pub fn take(&mut self, key: &SlotKey) -> Option<Hold> {
        self.holds.remove(key)
    }

    /// Drop every expired hold; returns how many were reclaimed.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.holds.len();
        self.holds.retain(|_, hold| !hold.is_expired(now));
        before - self.holds.len()
    }

    pub fn active_count(&self, now: DateTime<Utc>) -> usize {
        self.holds.values().filter(|h| !h.is_expired(now)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(slot_id: &str) -> SlotKey {
        SlotKey::new(slot_id, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn second_session_cannot_hold_a_held_slot() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        manager.acquire(key("S-09"), "session-1", now, None).unwrap();
        let err = manager.acquire(key("S-09"), "session-2", now, None).unwrap_err();
        assert_eq!(err, HoldError::SlotUnavailable("S-09".to_string()));
    }

    #[test]
    fn re_hold_by_owner_extends_expiry_without_a_second_record() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        let first = manager.acquire(key("S-09"), "session-1", now, None).unwrap();
        let later = now + Duration::minutes(5);
        let second = manager.acquire(key("S-09"), "session-1", later, None).unwrap();

        assert!(second > first);
        assert_eq!(manager.active_count(later), 1);
    }

    #[test]
    fn expired_holds_free_the_slot() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        manager.acquire(key("S-09"), "session-1", now, None).unwrap();
        let after_expiry = now + Duration::minutes(11);

        assert!(manager.active_hold(&key("S-09"), after_expiry).is_none());
        manager
            .acquire(key("S-09"), "session-2", after_expiry, None)
            .unwrap();
        assert!(manager.is_held_by(&key("S-09"), "session-2", after_expiry));
    }

    #[test]
    fn release_by_non_owner_fails_and_leaves_the_hold() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        manager.acquire(key("S-09"), "session-1", now, None).unwrap();
        let err = manager.release(&key("S-09"), "session-2", now).unwrap_err();

        assert_eq!(err, HoldError::NotOwner("S-09".to_string()));
        assert!(manager.is_held_by(&key("S-09"), "session-1", now));
    }

    #[test]
    fn releasing_an_unheld_slot_is_a_no_op() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        assert_eq!(
            manager.release(&key("S-09"), "session-1", now).unwrap(),
            ReleaseOutcome::NotHeld
        );
    }

    #[test]
    fn custom_duration_overrides_the_default() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        let expires = manager
            .acquire(key("S-09"), "session-1", now, Some(Duration::minutes(3)))
            .unwrap();
        assert_eq!(expires, now + Duration::minutes(3));
    }

    #[test]
    fn sweep_reclaims_only_expired_holds() {
        let mut manager = HoldManager::new(10);
        let now = Utc::now();

        manager.acquire(key("S-09"), "session-1", now, None).unwrap();
        manager
            .acquire(key("S-10"), "session-2", now, Some(Duration::minutes(2)))
            .unwrap();

        let later = now + Duration::minutes(5);
        assert_eq!(manager.sweep_expired(later), 1);
        assert!(manager.is_held_by(&key("S-09"), "session-1", later));
        assert!(manager.active_hold(&key("S-10"), later).is_none());
    }
}
