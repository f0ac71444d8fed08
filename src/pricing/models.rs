//! Pricing models shared by the engine and the booking session.

use serde::{Deserialize, Serialize};

/// Whole rupees. The engine never deals in fractional amounts.
pub type Amount = i64;

/// Kind of facility being booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// Full ground for a match
    Match,
    /// Practice nets
    Nets,
}

impl BookingType {
    /// Hourly rate for the facility
    pub fn base_rate_per_hour(self) -> Amount {
        match self {
            BookingType::Match => 3500,
            BookingType::Nets => 800,
        }
    }
}

/// Optional extra charged per booked hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub label: String,
    pub price_per_hour: Amount,
}

impl Addon {
    pub fn new(id: &str, label: &str, price_per_hour: Amount) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            price_per_hour,
        }
    }
}

/// The add-ons a venue offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonCatalog {
    addons: Vec<Addon>,
}

impl AddonCatalog {
    pub fn new(addons: Vec<Addon>) -> Self {
        Self { addons }
    }

    /// Add-ons offered on the booking page
    pub fn standard() -> Self {
        Self::new(vec![
            Addon::new("floodlights", "Floodlights", 500),
            Addon::new("umpire", "Umpire", 300),
            Addon::new("kit", "Ball & kit rental", 200),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Addon> {
        self.addons.iter().find(|addon| addon.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter()
    }
}

impl Default for AddonCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` percent off the subtotal
    Percent,
    /// `value` rupees off per booked hour
    Flat,
}

/// An accepted coupon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub kind: CouponKind,
    pub value: Amount,
}

impl Coupon {
    pub fn percent(code: &str, value: Amount) -> Self {
        Self {
            code: code.to_string(),
            kind: CouponKind::Percent,
            value,
        }
    }

    pub fn flat(code: &str, value: Amount) -> Self {
        Self {
            code: code.to_string(),
            kind: CouponKind::Flat,
            value,
        }
    }
}

/// Everything a quote depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteInputs {
    pub booking_type: Option<BookingType>,
    pub duration_hours: u32,
    pub addons: Vec<Addon>,
    pub coupon: Option<Coupon>,
}

impl Default for QuoteInputs {
    fn default() -> Self {
        Self {
            booking_type: None,
            duration_hours: 1,
            addons: Vec::new(),
            coupon: None,
        }
    }
}

/// Price breakdown. Always recomputed whole, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub base_rate_per_hour: Amount,
    pub addons_per_hour: Amount,
    pub duration_hours: u32,
    pub subtotal: Amount,
    pub coupon: Option<Coupon>,
    pub discount: Amount,
    pub taxable_amount: Amount,
    pub tax: Amount,
    pub total: Amount,
}

/// How the total is collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentSplit {
    pub pay_now: Amount,
    pub pay_later: Amount,
    pub pay_in_full: bool,
}
