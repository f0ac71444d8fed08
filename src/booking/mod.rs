//! Selection state machine for a booking session.
//!
//! Tracks type, date and slot, feeds the pricing engine, and reports every
//! change to the view through [`BookingObserver`].

pub mod contact;
pub mod players;
pub mod requests;
pub mod responses;
pub mod selection;
pub mod session;

pub use contact::{validate_contact_info, ContactErrors, ContactInfo, ValidationResult};
pub use requests::BookingEvent;
pub use responses::{BookingObserver, BookingSummary, Notification, PaymentReady};
pub use selection::{BookingSelection, SelectionStage};
pub use session::{parse_iso_date, BookingSession};
