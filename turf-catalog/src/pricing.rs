use serde::{Deserialize, Serialize};

use crate::discount::{DiscountCode, DiscountType};

/// How much the customer pays up front: a flat confirmation amount to
/// secure the booking, or the full total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPlan {
    Confirmation,
    Full,
}

/// Derived amounts for a selection. Recomputed on every input change,
/// never cached or diffed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingResult {
    pub subtotal: i64,
    pub discount_amount: i64,
    pub total: i64,
    pub payable_now: i64,
    pub due_at_venue: i64,
}

/// Pure pricing function over integer currency units.
///
/// Rules, in order: sum slot prices; apply the discount (percentage of the
/// subtotal, integer division, or the fixed amount); floor the total at
/// zero; the confirmation plan pays the flat amount now, the full plan pays
/// the total; the remainder due at the venue is floored at zero.
pub fn compute_pricing(
    slot_prices: &[i64],
    discount: Option<&DiscountCode>,
    plan: PaymentPlan,
    confirmation_flat_amount: i64,
) -> PricingResult {
    let subtotal: i64 = slot_prices.iter().sum();

    let discount_amount = match discount {
        Some(d) => match d.discount_type {
            DiscountType::Percentage => subtotal * d.discount_value / 100,
            DiscountType::Fixed => d.discount_value,
        },
        None => 0,
    };

    let total = (subtotal - discount_amount).max(0);

    let payable_now = match plan {
        PaymentPlan::Confirmation => confirmation_flat_amount,
        PaymentPlan::Full => total,
    };

    let due_at_venue = (total - payable_now).max(0);

    PricingResult {
        subtotal,
        discount_amount,
        total,
        payable_now,
        due_at_venue,
    }
}
