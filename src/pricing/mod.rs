//! Pricing engine module.
//!
//! Derives the payable amount for a booking from its type, duration,
//! add-ons and coupon, and splits it into pay-now and pay-later parts.

pub mod calculators;
pub mod coupons;
pub mod models;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use coupons::{apply_coupon, lookup_coupon, CouponOutcome};
pub use models::{
    Addon, AddonCatalog, Amount, BookingType, Coupon, CouponKind, PaymentSplit, PriceQuote,
    QuoteInputs,
};
pub use services::{payment_split, quote};
