//! Core of calgen.
//!
//! Converts a list of `offset;summary;description` rows into an iCalendar
//! document anchored at a start date or at the date of the final event:
//! - `input` and `dialect` clean the text and detect the CSV dialect
//! - `entry` and `anchor` validate rows and resolve dates
//! - `event`, `calendar` and `ics` build and render the document

pub mod anchor;
pub mod calendar;
pub mod dialect;
pub mod entry;
pub mod error;
pub mod event;
pub mod ics;
pub mod input;
pub mod pipeline;

pub use anchor::Anchor;
pub use calendar::{CalendarDocument, CalendarMetadata};
pub use dialect::Dialect;
pub use entry::Entry;
pub use error::{CalgenError, CalgenResult};
pub use event::{CalendarEvent, Clock, IdGenerator, SystemClock, UuidGenerator};
pub use pipeline::{Options, generate};
