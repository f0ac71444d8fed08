//! Pricing engine entry points.
//!
//! Both functions are total: any input yields a quote or split, and an
//! unselected booking type yields the all-zero quote.

use tracing::debug;

use super::calculators;
use super::models::{Amount, PaymentSplit, PriceQuote, QuoteInputs};

/// Compute the full price breakdown for the given inputs.
///
/// With no booking type selected nothing has been priced yet, so every
/// field of the breakdown is zero.
pub fn quote(inputs: &QuoteInputs) -> PriceQuote {
    let Some(booking_type) = inputs.booking_type else {
        return PriceQuote::default();
    };

    let base_rate_per_hour = booking_type.base_rate_per_hour();
    let addons_per_hour: Amount = inputs.addons.iter().map(|a| a.price_per_hour).sum();
    let duration_hours = inputs.duration_hours;

    let subtotal = calculators::subtotal(base_rate_per_hour, addons_per_hour, duration_hours);
    let discount = calculators::discount(subtotal, duration_hours, inputs.coupon.as_ref());
    let taxable_amount = (subtotal - discount).max(0);
    let tax = calculators::tax(taxable_amount);
    let total = taxable_amount + tax;

    debug!(
        ?booking_type,
        duration_hours, subtotal, discount, tax, total, "Quote computed"
    );

    PriceQuote {
        base_rate_per_hour,
        addons_per_hour,
        duration_hours,
        subtotal,
        coupon: inputs.coupon.clone(),
        discount,
        taxable_amount,
        tax,
        total,
    }
}

/// Split a total into pay-now and pay-later parts.
pub fn payment_split(total: Amount, pay_in_full: bool) -> PaymentSplit {
    calculators::split_total(total, pay_in_full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::coupons::lookup_coupon;
    use crate::pricing::models::{Addon, BookingType};

    fn inputs(booking_type: BookingType, duration_hours: u32, addons: Vec<Addon>) -> QuoteInputs {
        QuoteInputs {
            booking_type: Some(booking_type),
            duration_hours,
            addons,
            coupon: None,
        }
    }

    #[test]
    fn test_quote_match_with_percent_coupon() {
        let mut inputs = inputs(BookingType::Match, 2, vec![]);
        inputs.coupon = lookup_coupon("SAVE10").unwrap();

        let quote = quote(&inputs);
        assert_eq!(quote.base_rate_per_hour, 3500);
        assert_eq!(quote.subtotal, 7000);
        assert_eq!(quote.discount, 700);
        assert_eq!(quote.taxable_amount, 6300);
        assert_eq!(quote.tax, 1134);
        assert_eq!(quote.total, 7434);
    }

    #[test]
    fn test_quote_nets_with_flat_coupon() {
        let mut inputs = inputs(BookingType::Nets, 1, vec![Addon::new("kit", "Kit", 200)]);
        inputs.coupon = lookup_coupon("FLAT200").unwrap();

        let quote = quote(&inputs);
        assert_eq!(quote.base_rate_per_hour, 800);
        assert_eq!(quote.addons_per_hour, 200);
        assert_eq!(quote.subtotal, 1000);
        assert_eq!(quote.discount, 200);
        assert_eq!(quote.taxable_amount, 800);
        assert_eq!(quote.tax, 144);
        assert_eq!(quote.total, 944);
    }

    #[test]
    fn test_quote_without_type_is_zero() {
        let inputs = QuoteInputs {
            booking_type: None,
            duration_hours: 3,
            addons: vec![Addon::new("umpire", "Umpire", 300)],
            coupon: lookup_coupon("SAVE10").unwrap(),
        };

        assert_eq!(quote(&inputs), PriceQuote::default());
        assert_eq!(quote(&inputs).total, 0);
    }

    #[test]
    fn test_quote_sums_addons() {
        let addons = vec![
            Addon::new("floodlights", "Floodlights", 500),
            Addon::new("umpire", "Umpire", 300),
        ];
        let quote = quote(&inputs(BookingType::Nets, 3, addons));
        assert_eq!(quote.addons_per_hour, 800);
        assert_eq!(quote.subtotal, (800 + 800) * 3);
        assert_eq!(quote.tax, 864);
        assert_eq!(quote.total, 4800 + 864);
    }

    #[test]
    fn test_subtotal_non_decreasing_in_duration() {
        let mut previous = 0;
        for hours in 1..=12 {
            let quote = quote(&inputs(BookingType::Match, hours, vec![]));
            assert!(quote.subtotal >= previous);
            previous = quote.subtotal;
        }
    }

    #[test]
    fn test_quote_invariants_hold_for_all_coupons() {
        for code in ["", "SAVE10", "FLAT200"] {
            for hours in 1..=6 {
                for booking_type in [BookingType::Match, BookingType::Nets] {
                    let mut inputs = inputs(booking_type, hours, vec![]);
                    inputs.coupon = lookup_coupon(code).unwrap();
                    let quote = quote(&inputs);

                    assert!(quote.discount >= 0);
                    assert!(quote.discount <= quote.subtotal);
                    assert!(quote.total >= 0);
                    assert_eq!(
                        quote.total,
                        quote.taxable_amount + calculators::tax(quote.taxable_amount)
                    );
                }
            }
        }
    }

    #[test]
    fn test_payment_split_advance() {
        let split = payment_split(944, false);
        // 944 * 0.3 = 283.2 -> 283
        assert_eq!(split.pay_now, 283);
        assert_eq!(split.pay_later, 661);
        assert!(!split.pay_in_full);
    }
}
