//! Calendar events derived from entries.
//!
//! Event construction takes its timestamp and identifiers from injected
//! [`Clock`] and [`IdGenerator`] implementations, so runs with fixed fakes are
//! reproducible. With the production implementations every run yields fresh
//! UIDs while dates, summaries and descriptions stay identical.

use chrono::{DateTime, NaiveDate, Utc};

use crate::anchor::shift;
use crate::entry::Entry;
use crate::error::CalgenResult;

/// A whole-day calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    /// Start and end date (zero duration)
    pub date: NaiveDate,
    /// Creation timestamp (DTSTAMP)
    pub stamp: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    pub status: EventStatus,
    pub transparency: Transparency,
}

/// Generated events are always confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
}

impl EventStatus {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
        }
    }
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Event does not block time (shows as free)
    Transparent,
}

impl Transparency {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Transparency::Transparent => "TRANSPARENT",
        }
    }
}

/// Source of the creation timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of globally unique event identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random (v4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl CalendarEvent {
    pub fn from_entry(
        entry: &Entry,
        anchor: NaiveDate,
        stamp: DateTime<Utc>,
        uid: String,
    ) -> CalgenResult<Self> {
        Ok(CalendarEvent {
            uid,
            date: shift(anchor, entry.offset)?,
            stamp,
            summary: entry.summary.clone(),
            description: format!("{}{}", entry.summary, entry.description_suffix),
            status: EventStatus::Confirmed,
            transparency: Transparency::Transparent,
        })
    }
}

/// Build one event per entry, in order. The clock is read once so every
/// event shares the same creation timestamp.
pub fn build_events(
    entries: &[Entry],
    anchor: NaiveDate,
    clock: &dyn Clock,
    ids: &mut dyn IdGenerator,
) -> CalgenResult<Vec<CalendarEvent>> {
    let stamp = clock.now();
    entries
        .iter()
        .map(|entry| CalendarEvent::from_entry(entry, anchor, stamp, ids.next_id()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::{FixedClock, SequentialIds};
    use super::*;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_events_dates_and_text() {
        let entries = vec![Entry::new(0, "A", "x"), Entry::new(2, "B", "y")];
        let events = build_events(
            &entries,
            date(2024, 1, 10),
            &FixedClock::default(),
            &mut SequentialIds::default(),
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, date(2024, 1, 10));
        assert_eq!(events[1].date, date(2024, 1, 12));
        assert_eq!(events[0].summary, "A");
        assert_eq!(events[0].description, "Ax");
        assert_eq!(events[1].description, "By");
        assert_eq!(events[0].uid, "test-1@calgen");
        assert_eq!(events[1].uid, "test-2@calgen");
    }

    #[test]
    fn test_build_events_fixed_flags() {
        let entries = vec![Entry::new(1, "A", "")];
        let events = build_events(
            &entries,
            date(2024, 1, 10),
            &FixedClock::default(),
            &mut SequentialIds::default(),
        )
        .unwrap();

        assert_eq!(events[0].status, EventStatus::Confirmed);
        assert_eq!(events[0].transparency, Transparency::Transparent);
    }

    #[test]
    fn test_build_events_reads_clock_once() {
        struct CountingClock(Cell<u32>);
        impl Clock for CountingClock {
            fn now(&self) -> DateTime<Utc> {
                self.0.set(self.0.get() + 1);
                FixedClock::default().0
            }
        }

        let clock = CountingClock(Cell::new(0));
        let entries = vec![
            Entry::new(0, "A", ""),
            Entry::new(1, "B", ""),
            Entry::new(2, "C", ""),
        ];
        let events = build_events(
            &entries,
            date(2024, 1, 10),
            &clock,
            &mut SequentialIds::default(),
        )
        .unwrap();

        assert_eq!(clock.0.get(), 1);
        assert!(events.iter().all(|e| e.stamp == events[0].stamp));
    }

    #[test]
    fn test_uuid_generator_is_unique() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
