//! Booking engine for a turf and practice-net rental page.
//!
//! The [`pricing`] engine turns a booking type, duration, add-ons and coupon
//! into a taxed price and a payment split. The [`booking`] session tracks
//! what the customer has picked and tells the view what changed.

pub mod availability;
pub mod booking;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
pub mod pricing;

pub use availability::{
    generate_schedule, AvailabilitySource, RandomAvailability, SlotSchedule, SlotStatus, SlotTime,
    StaticAvailability,
};
pub use booking::{BookingEvent, BookingObserver, BookingSession, Notification};
pub use error::{BookingError, Result};
