//! ICS generation.
//!
//! This module renders a [`CalendarDocument`](crate::calendar::CalendarDocument)
//! as an RFC 5545 document.

mod generate;

pub use generate::generate_ics;
