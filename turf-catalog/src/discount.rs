use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Discount effect vocabulary. The source data mixed "fixed" and "numeric"
/// spellings; only `{percentage, fixed}` is accepted at the boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// An active promo code. `discount_value` is 0-100 for percentage codes and
/// a currency amount for fixed codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCode {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub active: bool,
}

impl DiscountCode {
    pub fn new(code: impl Into<String>, discount_type: DiscountType, discount_value: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            discount_type,
            discount_value,
            active: true,
        }
    }
}

/// Read-only lookup of promo codes. Unknown and inactive codes are the same
/// observable outcome: no discount. Safe to call on every keystroke.
#[derive(Debug, Default)]
pub struct DiscountResolver {
    codes: HashMap<String, DiscountCode>,
}

impl DiscountResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, code: DiscountCode) {
        self.codes.insert(code.code.to_uppercase(), code);
    }

    /// Case-insensitive lookup, active codes only.
    pub fn validate(&self, code: &str) -> Option<&DiscountCode> {
        self.codes
            .get(&code.trim().to_uppercase())
            .filter(|c| c.active)
    }

    /// Lookup by the id a committed booking recorded.
    pub fn by_id(&self, id: Uuid) -> Option<&DiscountCode> {
        self.codes.values().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DiscountResolver {
        let mut r = DiscountResolver::new();
        r.add(DiscountCode::new("FIRST10", DiscountType::Percentage, 10));
        r.add(DiscountCode::new("FLAT500", DiscountType::Fixed, 500));
        let mut retired = DiscountCode::new("OLD20", DiscountType::Percentage, 20);
        retired.active = false;
        r.add(retired);
        r
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let r = resolver();
        assert!(r.validate("first10").is_some());
        assert!(r.validate("  First10 ").is_some());
    }

    #[test]
    fn unknown_and_inactive_codes_are_equally_invalid() {
        let r = resolver();
        assert!(r.validate("NOPE").is_none());
        assert!(r.validate("OLD20").is_none());
    }

    #[test]
    fn validation_does_not_mutate() {
        let r = resolver();
        let first = r.validate("FLAT500").map(|c| c.id);
        let second = r.validate("FLAT500").map(|c| c.id);
        assert_eq!(first, second);
    }
}
