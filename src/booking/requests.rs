//! Input events delivered by the view.

use serde::Deserialize;

use crate::pricing::BookingType;

/// One customer action on the booking page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BookingEvent {
    ChooseType { booking_type: BookingType },
    /// ISO date, `YYYY-MM-DD`
    ChooseDate { date: String },
    /// Slot label, `HH:00`
    ChooseSlot { slot: String },
    SetDuration { hours: u32 },
    ToggleAddon { id: String, checked: bool },
    SubmitCoupon { code: String },
    SetPayInFull { pay_in_full: bool },
    SetPlayers { players: u32 },
    RequestPayment { name: String, phone: String },
}
