//! Coupon table and code handling.

use tracing::{debug, info};

use crate::error::{BookingError, Result};
use crate::pricing::models::{Amount, Coupon, CouponKind, PriceQuote, QuoteInputs};
use crate::pricing::services::quote;

/// Codes accepted at checkout
const COUPON_TABLE: &[(&str, CouponKind, Amount)] = &[
    ("SAVE10", CouponKind::Percent, 10),
    ("FLAT200", CouponKind::Flat, 200),
];

pub const EMPTY_CODE_MESSAGE: &str = "Enter a coupon code.";

/// Trim and uppercase a code the way customers expect it to match.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Look up a code.
///
/// An empty code is "no coupon" rather than an error; anything else that is
/// not in the table is [`BookingError::InvalidCoupon`].
pub fn lookup_coupon(code: &str) -> Result<Option<Coupon>> {
    let code = normalize_code(code);
    if code.is_empty() {
        return Ok(None);
    }

    COUPON_TABLE
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|&(known, kind, value)| {
            Some(Coupon {
                code: known.to_string(),
                kind,
                value,
            })
        })
        .ok_or(BookingError::InvalidCoupon { code })
}

/// Result of submitting a coupon code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponOutcome {
    /// Coupon now in effect; `None` clears any earlier one
    pub coupon: Option<Coupon>,
    /// Message for the customer
    pub message: String,
    /// Quote recomputed with `coupon`
    pub quote: PriceQuote,
}

/// Apply a code to the current inputs. Never fails: rejections clear the
/// coupon and come back as a message.
pub fn apply_coupon(code: &str, inputs: &QuoteInputs) -> CouponOutcome {
    let (coupon, message) = match lookup_coupon(code) {
        Ok(Some(coupon)) => {
            info!(code = %coupon.code, "Coupon applied");
            let message = format!("Coupon applied: {}", coupon.code);
            (Some(coupon), message)
        }
        Ok(None) => (None, EMPTY_CODE_MESSAGE.to_string()),
        Err(e) => {
            debug!("Coupon rejected: {}", e);
            (None, e.user_message())
        }
    };

    let inputs = QuoteInputs {
        coupon: coupon.clone(),
        ..inputs.clone()
    };

    CouponOutcome {
        coupon,
        message,
        quote: quote(&inputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::BookingType;

    fn match_for_two_hours() -> QuoteInputs {
        QuoteInputs {
            booking_type: Some(BookingType::Match),
            duration_hours: 2,
            ..QuoteInputs::default()
        }
    }

    #[test]
    fn test_lookup_normalizes_code() {
        let coupon = lookup_coupon("  save10 ").unwrap().unwrap();
        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.kind, CouponKind::Percent);
        assert_eq!(coupon.value, 10);

        let coupon = lookup_coupon("Flat200").unwrap().unwrap();
        assert_eq!(coupon.kind, CouponKind::Flat);
        assert_eq!(coupon.value, 200);
    }

    #[test]
    fn test_lookup_empty_is_no_coupon() {
        assert_eq!(lookup_coupon("").unwrap(), None);
        assert_eq!(lookup_coupon("   ").unwrap(), None);
    }

    #[test]
    fn test_lookup_unknown_code() {
        let err = lookup_coupon("xyz").unwrap_err();
        assert!(matches!(err, BookingError::InvalidCoupon { ref code } if code == "XYZ"));
    }

    #[test]
    fn test_apply_valid_coupon() {
        let outcome = apply_coupon("SAVE10", &match_for_two_hours());
        assert_eq!(outcome.message, "Coupon applied: SAVE10");
        assert_eq!(outcome.quote.discount, 700);
        assert_eq!(outcome.quote.total, 7434);
    }

    #[test]
    fn test_apply_invalid_coupon_clears_discount() {
        let mut inputs = match_for_two_hours();
        inputs.coupon = Some(Coupon::percent("SAVE10", 10));

        let outcome = apply_coupon("XYZ", &inputs);
        assert!(outcome.coupon.is_none());
        assert_eq!(outcome.message, "Invalid coupon. Try SAVE10 or FLAT200.");
        assert_eq!(outcome.quote.discount, 0);
    }

    #[test]
    fn test_apply_empty_code() {
        let outcome = apply_coupon("", &match_for_two_hours());
        assert!(outcome.coupon.is_none());
        assert_eq!(outcome.message, EMPTY_CODE_MESSAGE);
    }

    #[test]
    fn test_apply_same_code_twice_is_idempotent() {
        let once = apply_coupon("SAVE10", &match_for_two_hours());
        let inputs = QuoteInputs {
            coupon: once.coupon.clone(),
            ..match_for_two_hours()
        };
        let twice = apply_coupon("SAVE10", &inputs);
        assert_eq!(once, twice);
    }
}
