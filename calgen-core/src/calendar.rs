//! The calendar document written to disk.

use crate::event::CalendarEvent;

/// Product identifier used unless configured otherwise.
pub const DEFAULT_PRODID: &str = "-//calgen//calgen 1.0//EN";

pub const ICALENDAR_VERSION: &str = "2.0";

pub const GREGORIAN: &str = "GREGORIAN";

/// Identifying properties of the VCALENDAR object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    pub prodid: String,
    pub version: String,
    pub calscale: String,
}

impl Default for CalendarMetadata {
    fn default() -> Self {
        CalendarMetadata::with_prodid(DEFAULT_PRODID)
    }
}

impl CalendarMetadata {
    pub fn with_prodid(prodid: impl Into<String>) -> Self {
        CalendarMetadata {
            prodid: prodid.into(),
            version: ICALENDAR_VERSION.to_string(),
            calscale: GREGORIAN.to_string(),
        }
    }
}

/// An ordered collection of events plus calendar metadata.
#[derive(Debug, Clone, Default)]
pub struct CalendarDocument {
    pub metadata: CalendarMetadata,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn new(metadata: CalendarMetadata, events: Vec<CalendarEvent>) -> Self {
        CalendarDocument { metadata, events }
    }

    pub fn push(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
