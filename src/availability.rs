//! Daily slot schedule and the availability seam.
//!
//! Whether a slot is taken comes from an [`AvailabilitySource`]. The booking
//! page has no reservation backend, so [`RandomAvailability`] stands in for
//! one; a real store plugs in behind the same trait.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{BookingError, Result};

/// First bookable hour of the day
pub const OPENING_HOUR: u32 = 6;
/// Last bookable hour of the day
pub const LAST_SLOT_HOUR: u32 = 21;

/// Chance that a simulated slot comes up booked
pub const DEFAULT_BOOKED_PROBABILITY: f64 = 0.18;

/// Start time of an hourly slot, always on the daily schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Slot starting at `hour:00`, if that hour is on the schedule.
    pub fn from_hour(hour: u32) -> Option<Self> {
        if !(OPENING_HOUR..=LAST_SLOT_HOUR).contains(&hour) {
            return None;
        }
        NaiveTime::from_hms_opt(hour, 0, 0).map(SlotTime)
    }

    /// Parse a label like `"07:00"`.
    pub fn parse(label: &str) -> Result<Self> {
        let unavailable = || BookingError::SlotUnavailable {
            slot: label.to_string(),
        };

        let time = NaiveTime::parse_from_str(label.trim(), "%H:%M").map_err(|_| unavailable())?;
        if time.minute() != 0 {
            return Err(unavailable());
        }
        Self::from_hour(time.hour()).ok_or_else(unavailable)
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn time(self) -> NaiveTime {
        self.0
    }

    /// Every slot of the day in order, 06:00 through 21:00
    pub fn daily() -> impl Iterator<Item = SlotTime> {
        (OPENING_HOUR..=LAST_SLOT_HOUR).filter_map(SlotTime::from_hour)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub time: SlotTime,
    pub status: SlotStatus,
}

/// The slots of one date with their status, in time order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSchedule {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

impl SlotSchedule {
    /// Status of a slot; `None` if the time is not on the schedule.
    pub fn status_of(&self, time: SlotTime) -> Option<SlotStatus> {
        self.slots
            .iter()
            .find(|slot| slot.time == time)
            .map(|slot| slot.status)
    }

    pub fn is_available(&self, time: SlotTime) -> bool {
        self.status_of(time) == Some(SlotStatus::Available)
    }

    pub fn available(&self) -> impl Iterator<Item = SlotTime> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.status == SlotStatus::Available)
            .map(|slot| slot.time)
    }

    pub fn booked_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.status == SlotStatus::Booked)
            .count()
    }
}

/// Where slot availability comes from
pub trait AvailabilitySource {
    fn is_booked(&self, date: NaiveDate, slot: SlotTime) -> bool;
}

impl<T: AvailabilitySource + ?Sized> AvailabilitySource for Box<T> {
    fn is_booked(&self, date: NaiveDate, slot: SlotTime) -> bool {
        (**self).is_booked(date, slot)
    }
}

/// Build the schedule for a date from an availability source.
pub fn generate_schedule(date: NaiveDate, source: &dyn AvailabilitySource) -> SlotSchedule {
    let slots: Vec<Slot> = SlotTime::daily()
        .map(|time| Slot {
            time,
            status: if source.is_booked(date, time) {
                SlotStatus::Booked
            } else {
                SlotStatus::Available
            },
        })
        .collect();

    let schedule = SlotSchedule { date, slots };
    debug!(%date, booked = schedule.booked_count(), "Schedule generated");
    schedule
}

/// Independent random draw per slot, every time it is asked.
///
/// Asking twice about the same slot can give different answers.
pub struct RandomAvailability {
    probability: f64,
    rng: Mutex<StdRng>,
}

impl RandomAvailability {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: usable_probability(probability),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible draws for a given seed
    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self {
            probability: usable_probability(probability),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

fn usable_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        DEFAULT_BOOKED_PROBABILITY
    } else {
        probability.clamp(0.0, 1.0)
    }
}

impl Default for RandomAvailability {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKED_PROBABILITY)
    }
}

impl AvailabilitySource for RandomAvailability {
    fn is_booked(&self, _date: NaiveDate, _slot: SlotTime) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(self.probability)
    }
}

/// Fixed set of taken slots
#[derive(Debug, Clone, Default)]
pub struct StaticAvailability {
    booked: HashSet<(NaiveDate, SlotTime)>,
}

impl StaticAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_booked(mut self, date: NaiveDate, slot: SlotTime) -> Self {
        self.booked.insert((date, slot));
        self
    }

    pub fn book(&mut self, date: NaiveDate, slot: SlotTime) {
        self.booked.insert((date, slot));
    }
}

impl AvailabilitySource for StaticAvailability {
    fn is_booked(&self, date: NaiveDate, slot: SlotTime) -> bool {
        self.booked.contains(&(date, slot))
    }
}
