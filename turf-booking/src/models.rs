use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A temporary, session-owned reservation of one slot. At most one active
/// hold exists per `(slot_id, date)` across all sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hold {
    pub slot_id: String,
    pub date: NaiveDate,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Hold {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    PartiallyPaid,
    FullyPaid,
}

/// Customer contact fields captured by the personal-information form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub number_of_players: Option<u32>,
    pub notes: Option<String>,
}

/// One committed slot with the price it was sold at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlot {
    pub slot_id: String,
    pub price: i64,
}

/// A finalized booking. Immutable once committed: no update or cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub booking_code: String,
    pub resource_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<BookedSlot>,
    pub customer: CustomerInfo,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub paid_amount: i64,
    pub total_amount: i64,
    pub discount_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Human-shareable code printed on the receipt, e.g. `BK-4F2A91C0`.
pub fn generate_booking_code() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("BK-{}", raw[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn hold_expiry_is_inclusive_of_the_deadline() {
        let now = Utc::now();
        let hold = Hold {
            slot_id: "S-09".to_string(),
            date: "2025-06-01".parse().unwrap(),
            session_id: "session-abc".to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(10),
        };

        assert!(!hold.is_expired(now));
        assert!(!hold.is_expired(now + Duration::minutes(9)));
        assert!(hold.is_expired(now + Duration::minutes(10)));
        assert!(hold.is_expired(now + Duration::minutes(11)));
    }

    #[test]
    fn booking_codes_have_the_expected_shape() {
        let code = generate_booking_code();
        assert!(code.starts_with("BK-"));
        assert_eq!(code.len(), 11);
        assert!(code[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
