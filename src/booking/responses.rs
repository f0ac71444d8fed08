//! Notifications emitted for the view to render.

use serde::Serialize;
use uuid::Uuid;

use crate::availability::{SlotSchedule, SlotTime};
use crate::booking::contact::ContactErrors;
use crate::pricing::{Amount, BookingType, PaymentSplit, PriceQuote};

/// What the summary card shows once a booking is ready
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub booking_type: BookingType,
    pub type_label: String,
    pub date: String,
    pub slot: SlotTime,
}

/// Payment may go ahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReady {
    pub reference: Uuid,
    pub total: Amount,
    pub total_display: String,
    pub split: PaymentSplit,
    pub customer_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Notification {
    ScheduleChanged(SlotSchedule),
    QuoteChanged(PriceQuote),
    SplitChanged(PaymentSplit),
    ReadinessChanged(bool),
    SummaryChanged(Option<BookingSummary>),
    PlayersChanged {
        players: Option<u32>,
        hint: String,
    },
    CouponResult {
        message: String,
    },
    ValidationFailed {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<ContactErrors>,
    },
    PaymentReady(PaymentReady),
}

/// Receiver of session notifications, usually the view binding
pub trait BookingObserver {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order
impl BookingObserver for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
