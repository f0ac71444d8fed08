//! What the customer has picked so far.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::SlotTime;
use crate::pricing::BookingType;

/// How far along the customer is.
///
/// The date is filled in with today when the session starts, so it never
/// shows up as a missing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStage {
    Empty,
    TypeChosen,
    SlotChosen,
    Ready,
}

/// The in-progress booking of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSelection {
    pub booking_type: Option<BookingType>,
    pub date: NaiveDate,
    pub slot: Option<SlotTime>,
}

impl BookingSelection {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            booking_type: None,
            date,
            slot: None,
        }
    }

    /// Type, date and slot are all set
    pub fn is_ready(&self) -> bool {
        self.booking_type.is_some() && self.slot.is_some()
    }

    pub fn stage(&self) -> SelectionStage {
        match (self.booking_type.is_some(), self.slot.is_some()) {
            (false, false) => SelectionStage::Empty,
            (true, false) => SelectionStage::TypeChosen,
            (false, true) => SelectionStage::SlotChosen,
            (true, true) => SelectionStage::Ready,
        }
    }

    /// Move to another date. A slot only means something for the date it was
    /// picked on, so it is dropped.
    pub(crate) fn change_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.slot = None;
    }
}
