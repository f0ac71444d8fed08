//! Session controller for one customer's booking.
//!
//! Owns the selection, the slot schedule and every pricing input. Each input
//! event is handled synchronously: state is updated, the quote and split are
//! recomputed whole, and the changes are pushed to a [`BookingObserver`].

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::availability::{generate_schedule, AvailabilitySource, SlotSchedule, SlotTime};
use crate::booking::contact::validate_contact_info;
use crate::booking::players::{adjust_players, players_hint};
use crate::booking::requests::BookingEvent;
use crate::booking::responses::{BookingObserver, BookingSummary, Notification, PaymentReady};
use crate::booking::selection::BookingSelection;
use crate::display::{booking_type_label, format_summary_date, CurrencyFormatter, RupeeFormatter};
use crate::error::{BookingError, Result};
use crate::pricing::coupons::{apply_coupon, normalize_code};
use crate::pricing::{
    payment_split, quote, AddonCatalog, BookingType, Coupon, PaymentSplit, PriceQuote,
    QuoteInputs,
};

/// Parse an ISO `YYYY-MM-DD` date as typed into the date picker.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| BookingError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub struct BookingSession {
    id: Uuid,
    today: NaiveDate,
    selection: BookingSelection,
    schedule: SlotSchedule,
    duration_hours: u32,
    addons: BTreeSet<String>,
    coupon: Option<Coupon>,
    pay_in_full: bool,
    players: Option<u32>,
    quote: PriceQuote,
    split: PaymentSplit,
    summary: Option<BookingSummary>,
    catalog: AddonCatalog,
    availability: Box<dyn AvailabilitySource>,
    formatter: Box<dyn CurrencyFormatter>,
}

impl BookingSession {
    /// Start a session on `today`, with today's schedule already drawn.
    pub fn new(today: NaiveDate, availability: impl AvailabilitySource + 'static) -> Self {
        let schedule = generate_schedule(today, &availability);
        let pay_in_full = true;

        Self {
            id: Uuid::new_v4(),
            today,
            selection: BookingSelection::new(today),
            schedule,
            duration_hours: 1,
            addons: BTreeSet::new(),
            coupon: None,
            pay_in_full,
            players: None,
            quote: PriceQuote::default(),
            split: payment_split(0, pay_in_full),
            summary: None,
            catalog: AddonCatalog::standard(),
            availability: Box::new(availability),
            formatter: Box::new(RupeeFormatter),
        }
    }

    /// Start a session dated with the local calendar day.
    pub fn starting_today(availability: impl AvailabilitySource + 'static) -> Self {
        Self::new(Local::now().date_naive(), availability)
    }

    pub fn with_catalog(mut self, catalog: AddonCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_formatter(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Send the initial schedule and breakdown so the view can draw itself.
    pub fn start(&mut self, view: &mut dyn BookingObserver) {
        info!(session = %self.id, today = %self.today, "Booking session started");
        view.notify(Notification::ScheduleChanged(self.schedule.clone()));
        view.notify(Notification::QuoteChanged(self.quote.clone()));
        view.notify(Notification::SplitChanged(self.split));
        view.notify(Notification::ReadinessChanged(self.is_ready()));
    }

    // ==================== accessors ====================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn schedule(&self) -> &SlotSchedule {
        &self.schedule
    }

    pub fn quote(&self) -> &PriceQuote {
        &self.quote
    }

    pub fn split(&self) -> PaymentSplit {
        self.split
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    pub fn players(&self) -> Option<u32> {
        self.players
    }

    pub fn pay_in_full(&self) -> bool {
        self.pay_in_full
    }

    pub fn selected_addons(&self) -> impl Iterator<Item = &str> {
        self.addons.iter().map(String::as_str)
    }

    /// Type, date and slot are all chosen
    pub fn is_ready(&self) -> bool {
        self.selection.is_ready()
    }

    /// Current engine inputs
    pub fn quote_inputs(&self) -> QuoteInputs {
        QuoteInputs {
            booking_type: self.selection.booking_type,
            duration_hours: self.duration_hours,
            addons: self
                .addons
                .iter()
                .filter_map(|id| self.catalog.get(id).cloned())
                .collect(),
            coupon: self.coupon.clone(),
        }
    }

    // ==================== input events ====================

    /// Handle one event from the view.
    pub fn apply(&mut self, event: BookingEvent, view: &mut dyn BookingObserver) -> Result<()> {
        match event {
            BookingEvent::ChooseType { booking_type } => self.choose_type(booking_type, view),
            BookingEvent::ChooseDate { date } => {
                let date = parse_iso_date(&date).inspect_err(|e| {
                    warn!(session = %self.id, "Date refused: {}", e);
                })?;
                self.choose_date(date, view)
            }
            BookingEvent::ChooseSlot { slot } => self.choose_slot(&slot, view),
            BookingEvent::SetDuration { hours } => self.set_duration(hours, view),
            BookingEvent::ToggleAddon { id, checked } => self.toggle_addon(&id, checked, view),
            BookingEvent::SubmitCoupon { code } => self.submit_coupon(&code, view),
            BookingEvent::SetPayInFull { pay_in_full } => {
                self.set_pay_in_full(pay_in_full, view);
                Ok(())
            }
            BookingEvent::SetPlayers { players } => {
                self.set_players(players, view);
                Ok(())
            }
            BookingEvent::RequestPayment { name, phone } => {
                self.request_payment(&name, &phone, view).map(|_| ())
            }
        }
    }

    /// Pick match or nets. Picking the current type again changes nothing.
    pub fn choose_type(
        &mut self,
        booking_type: BookingType,
        view: &mut dyn BookingObserver,
    ) -> Result<()> {
        if self.selection.booking_type == Some(booking_type) {
            return Ok(());
        }

        debug!(session = %self.id, ?booking_type, "Booking type chosen");
        self.selection.booking_type = Some(booking_type);
        self.players = adjust_players(booking_type, self.players);
        view.notify(Notification::PlayersChanged {
            players: self.players,
            hint: players_hint(booking_type).to_string(),
        });

        self.recompute(view);
        Ok(())
    }

    /// Move the booking to another date. Dates before today are refused.
    ///
    /// An accepted date always drops the chosen slot and draws a fresh
    /// schedule, even when it is the date already selected.
    pub fn choose_date(&mut self, date: NaiveDate, view: &mut dyn BookingObserver) -> Result<()> {
        if date < self.today {
            let err = BookingError::date_in_past(date, self.today);
            warn!(session = %self.id, "Date refused: {}", err);
            return Err(err);
        }

        debug!(session = %self.id, %date, "Booking date chosen");
        self.selection.change_date(date);
        self.schedule = generate_schedule(date, self.availability.as_ref());
        view.notify(Notification::ScheduleChanged(self.schedule.clone()));

        self.recompute(view);
        Ok(())
    }

    /// Pick a slot from the current schedule. Booked or unknown slots are
    /// refused and the current slot stays.
    pub fn choose_slot(&mut self, label: &str, view: &mut dyn BookingObserver) -> Result<()> {
        let slot = SlotTime::parse(label)
            .ok()
            .filter(|slot| self.schedule.is_available(*slot))
            .ok_or_else(|| BookingError::SlotUnavailable {
                slot: label.trim().to_string(),
            })
            .inspect_err(|e| warn!(session = %self.id, "Slot refused: {}", e))?;

        debug!(session = %self.id, %slot, "Slot chosen");
        self.selection.slot = Some(slot);
        self.recompute(view);
        Ok(())
    }

    pub fn set_duration(&mut self, hours: u32, view: &mut dyn BookingObserver) -> Result<()> {
        if hours == 0 {
            warn!(session = %self.id, "Duration refused: {}", hours);
            return Err(BookingError::InvalidDuration(hours));
        }

        self.duration_hours = hours;
        self.recompute(view);
        Ok(())
    }

    pub fn toggle_addon(
        &mut self,
        id: &str,
        checked: bool,
        view: &mut dyn BookingObserver,
    ) -> Result<()> {
        if self.catalog.get(id).is_none() {
            warn!(session = %self.id, "Unknown add-on: {}", id);
            return Err(BookingError::UnknownAddon(id.to_string()));
        }

        if checked {
            self.addons.insert(id.to_string());
        } else {
            self.addons.remove(id);
        }
        self.recompute(view);
        Ok(())
    }

    /// Submit a coupon code.
    ///
    /// Any earlier coupon is replaced. An unknown code clears the coupon and
    /// still reports the message to the view before returning
    /// [`BookingError::InvalidCoupon`]; an empty code just clears it.
    pub fn submit_coupon(&mut self, code: &str, view: &mut dyn BookingObserver) -> Result<()> {
        let outcome = apply_coupon(code, &self.quote_inputs());
        self.coupon = outcome.coupon;
        view.notify(Notification::CouponResult {
            message: outcome.message,
        });
        self.recompute(view);

        let code = normalize_code(code);
        if self.coupon.is_none() && !code.is_empty() {
            return Err(BookingError::InvalidCoupon { code });
        }
        Ok(())
    }

    pub fn set_pay_in_full(&mut self, pay_in_full: bool, view: &mut dyn BookingObserver) {
        self.pay_in_full = pay_in_full;
        self.split = payment_split(self.quote.total, pay_in_full);
        view.notify(Notification::SplitChanged(self.split));
    }

    pub fn set_players(&mut self, players: u32, view: &mut dyn BookingObserver) {
        self.players = Some(players);
        view.notify(Notification::PlayersChanged {
            players: self.players,
            hint: self
                .selection
                .booking_type
                .map(players_hint)
                .unwrap_or_default()
                .to_string(),
        });
    }

    /// Check the selection and contact details before handing off to payment.
    ///
    /// Failures are reported to the view as well as returned; nothing in the
    /// session changes either way.
    pub fn request_payment(
        &mut self,
        name: &str,
        phone: &str,
        view: &mut dyn BookingObserver,
    ) -> Result<PaymentReady> {
        if !self.is_ready() {
            let err = BookingError::IncompleteSelection;
            view.notify(Notification::ValidationFailed {
                reason: err.user_message(),
                fields: None,
            });
            return Err(err);
        }

        let contact = match validate_contact_info(name, phone) {
            Ok(contact) => contact,
            Err(errors) => {
                view.notify(Notification::ValidationFailed {
                    reason: errors.to_string(),
                    fields: Some(errors.clone()),
                });
                return Err(BookingError::InvalidContactInfo(errors));
            }
        };

        let ready = PaymentReady {
            reference: Uuid::new_v4(),
            total: self.quote.total,
            total_display: self.formatter.format(self.quote.total),
            split: self.split,
            customer_name: contact.name,
            phone: contact.phone,
        };

        info!(
            session = %self.id,
            reference = %ready.reference,
            total = ready.total,
            "Booking ready for payment"
        );
        view.notify(Notification::PaymentReady(ready.clone()));
        Ok(ready)
    }

    // ==================== derived state ====================

    /// Replace the quote and split, and report readiness or summary changes.
    fn recompute(&mut self, view: &mut dyn BookingObserver) {
        let was_ready = self.summary.is_some();

        self.quote = quote(&self.quote_inputs());
        self.split = payment_split(self.quote.total, self.pay_in_full);
        view.notify(Notification::QuoteChanged(self.quote.clone()));
        view.notify(Notification::SplitChanged(self.split));

        let summary = self.build_summary();
        if summary.is_some() != was_ready {
            view.notify(Notification::ReadinessChanged(summary.is_some()));
        }
        if summary != self.summary {
            self.summary = summary;
            view.notify(Notification::SummaryChanged(self.summary.clone()));
        }
    }

    fn build_summary(&self) -> Option<BookingSummary> {
        let booking_type = self.selection.booking_type?;
        let slot = self.selection.slot?;

        Some(BookingSummary {
            booking_type,
            type_label: booking_type_label(booking_type).to_string(),
            date: format_summary_date(self.selection.date),
            slot,
        })
    }
}
