//! Error handling for the booking engine

use chrono::NaiveDate;

use crate::booking::contact::ContactErrors;

pub const INCOMPLETE_SELECTION_MESSAGE: &str =
    "Please select booking type, date and time slot first.";

/// Every way a booking input can be refused.
///
/// None of these end the session; the input is ignored and the customer can
/// correct it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Unknown coupon code: {code}")]
    InvalidCoupon { code: String },

    #[error("Invalid booking date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Slot {slot} is not available")]
    SlotUnavailable { slot: String },

    #[error("Selection incomplete")]
    IncompleteSelection,

    #[error("Invalid contact details: {0}")]
    InvalidContactInfo(ContactErrors),

    #[error("Duration must be at least one hour, got {0}")]
    InvalidDuration(u32),

    #[error("Unknown add-on: {0}")]
    UnknownAddon(String),
}

impl BookingError {
    pub(crate) fn date_in_past(date: NaiveDate, today: NaiveDate) -> Self {
        BookingError::InvalidDate {
            input: date.to_string(),
            reason: format!("must not be before {}", today),
        }
    }

    /// Text shown to the customer
    pub fn user_message(&self) -> String {
        match self {
            BookingError::InvalidCoupon { .. } => {
                "Invalid coupon. Try SAVE10 or FLAT200.".to_string()
            }
            BookingError::InvalidDate { .. } => "Please pick today or a later date.".to_string(),
            BookingError::SlotUnavailable { slot } => {
                format!("{} is already booked. Please pick another slot.", slot)
            }
            BookingError::IncompleteSelection => INCOMPLETE_SELECTION_MESSAGE.to_string(),
            BookingError::InvalidContactInfo(errors) => errors.to_string(),
            BookingError::InvalidDuration(_) => "Duration must be at least one hour.".to_string(),
            BookingError::UnknownAddon(id) => format!("Add-on '{}' is not offered.", id),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
