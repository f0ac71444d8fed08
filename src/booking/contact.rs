//! Contact details asked for before payment.
//!
//! Pure checks on what the customer typed; nothing here reads session state.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Local mobile number: ten digits, leading 6-9
    static ref MOBILE_NUMBER: Regex = Regex::new(r"^[6-9][0-9]{9}$").expect("valid regex");
}

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit mobile number.";

/// Contact details that passed validation, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

/// Per-field problems; a `None` field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

impl fmt::Display for ContactErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.name.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join(" "))
    }
}

pub type ValidationResult = std::result::Result<ContactInfo, ContactErrors>;

/// Check a name and mobile number.
pub fn validate_contact_info(name: &str, phone: &str) -> ValidationResult {
    let name = name.trim();
    let phone = phone.trim();

    let errors = ContactErrors {
        name: name.is_empty().then(|| NAME_REQUIRED.to_string()),
        phone: (!MOBILE_NUMBER.is_match(phone)).then(|| PHONE_INVALID.to_string()),
    };

    if errors.is_empty() {
        Ok(ContactInfo {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    } else {
        Err(errors)
    }
}
