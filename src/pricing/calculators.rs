//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no state, no I/O.
//! Amounts are whole rupees held in `i64`; fractional intermediates go through
//! `Decimal` and are rounded once, at the field that needs them.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{Amount, Coupon, CouponKind, PaymentSplit};

/// GST applied to the discounted amount.
pub const TAX_RATE: Decimal = dec!(0.18);

/// Share of the total due up front when the customer pays an advance.
pub const ADVANCE_FRACTION: Decimal = dec!(0.3);

/// Round to specified decimal places, halves away from zero.
///
/// All amounts in this crate are non-negative, so this matches the
/// round-half-up behaviour customers see on the booking page.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use turf_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiply a whole amount by a rate and round to a whole amount.
pub fn apply_rate(amount: Amount, rate: Decimal) -> Amount {
    round_money(Decimal::from(amount) * rate, 0)
        .to_i64()
        .unwrap_or(0)
}

/// `(base + addons) * hours`
pub fn subtotal(base_per_hour: Amount, addons_per_hour: Amount, duration_hours: u32) -> Amount {
    (base_per_hour + addons_per_hour) * Amount::from(duration_hours)
}

/// Discount for a coupon, never more than the subtotal.
///
/// Percent coupons are rounded once on the whole subtotal. Flat coupons are a
/// per-hour amount, so they scale with the duration before being capped.
pub fn discount(subtotal: Amount, duration_hours: u32, coupon: Option<&Coupon>) -> Amount {
    let Some(coupon) = coupon else {
        return 0;
    };

    let raw = match coupon.kind {
        CouponKind::Percent => {
            apply_rate(subtotal, Decimal::from(coupon.value) / Decimal::ONE_HUNDRED)
        }
        CouponKind::Flat => coupon.value * Amount::from(duration_hours),
    };

    raw.clamp(0, subtotal.max(0))
}

/// Tax on the amount left after discount.
pub fn tax(taxable_amount: Amount) -> Amount {
    apply_rate(taxable_amount, TAX_RATE)
}

/// Split a total into the part due now and the part due at the venue.
pub fn split_total(total: Amount, pay_in_full: bool) -> PaymentSplit {
    let pay_now = if pay_in_full {
        total
    } else {
        apply_rate(total, ADVANCE_FRACTION)
    };

    PaymentSplit {
        pay_now,
        pay_later: (total - pay_now).max(0),
        pay_in_full,
    }
}
