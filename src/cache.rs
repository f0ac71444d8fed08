//! In-memory caching using moka
//!
//! Memoizes availability answers per `(date, slot)` so that rebuilding the
//! schedule for the same date shows the same booked slots until the entry
//! expires.

use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;
use serde::Serialize;
use tracing::{debug, info};

use crate::availability::{AvailabilitySource, SlotTime};

/// Default entry lifetime: 15 minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);
/// Default capacity: a couple of months of schedules
pub const DEFAULT_CAPACITY: u64 = 1024;

/// Availability source that remembers what its inner source answered
pub struct CachedAvailability<S> {
    inner: S,
    answers: Cache<(NaiveDate, SlotTime), bool>,
}

impl<S: AvailabilitySource> CachedAvailability<S> {
    /// Create a cache with the default TTL and capacity
    pub fn new(inner: S) -> Self {
        Self::with_limits(inner, DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    pub fn with_limits(inner: S, max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            answers: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        self.answers.run_pending_tasks();
        CacheStats {
            entries: self.answers.entry_count(),
        }
    }

    /// Forget every remembered answer
    pub fn invalidate_all(&self) {
        self.answers.invalidate_all();
        info!("Availability cache invalidated");
    }

    /// Forget the answers for one date
    pub fn invalidate_date(&self, date: NaiveDate) {
        for slot in SlotTime::daily() {
            self.answers.invalidate(&(date, slot));
        }
        debug!(%date, "Availability cache invalidated for date");
    }
}

impl<S: AvailabilitySource> AvailabilitySource for CachedAvailability<S> {
    fn is_booked(&self, date: NaiveDate, slot: SlotTime) -> bool {
        self.answers
            .get_with((date, slot), || self.inner.is_booked(date, slot))
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
}
