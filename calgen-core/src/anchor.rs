//! Anchor date resolution.

use chrono::{Days, NaiveDate};

use crate::entry::Entry;
use crate::error::{CalgenError, CalgenResult};

/// The date supplied by the user, from which every entry date is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The date of offset zero.
    Start(NaiveDate),
    /// The date of the last entry (highest offset).
    Event(NaiveDate),
}

impl Anchor {
    /// Resolve to the date of offset zero. `entries` must already be sorted.
    pub fn resolve(&self, entries: &[Entry]) -> CalgenResult<NaiveDate> {
        match *self {
            Anchor::Start(date) => Ok(date),
            Anchor::Event(date) => {
                let last = entries.last().ok_or(CalgenError::NoEntries)?;
                shift(date, last.offset.saturating_neg())
            }
        }
    }
}

/// `date` moved by `days` (negative moves backwards).
pub fn shift(date: NaiveDate, days: i64) -> CalgenResult<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| CalgenError::DateOutOfRange(format!("{date} {days:+} days")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entries() -> Vec<Entry> {
        vec![Entry::new(0, "A", "x"), Entry::new(2, "B", "y")]
    }

    #[test]
    fn test_start_anchor_is_used_directly() {
        let anchor = Anchor::Start(date(2024, 1, 10));
        assert_eq!(anchor.resolve(&entries()).unwrap(), date(2024, 1, 10));
    }

    #[test]
    fn test_event_anchor_subtracts_last_offset() {
        let anchor = Anchor::Event(date(2024, 1, 12));
        assert_eq!(anchor.resolve(&entries()).unwrap(), date(2024, 1, 10));
    }

    #[test]
    fn test_event_anchor_with_negative_last_offset() {
        let anchor = Anchor::Event(date(2024, 3, 1));
        let entries = vec![Entry::new(-10, "A", ""), Entry::new(-1, "B", "")];
        assert_eq!(anchor.resolve(&entries).unwrap(), date(2024, 3, 2));
    }

    #[test]
    fn test_event_anchor_crosses_leap_day() {
        let anchor = Anchor::Event(date(2024, 3, 1));
        let entries = vec![Entry::new(2, "A", "")];
        assert_eq!(anchor.resolve(&entries).unwrap(), date(2024, 2, 28));
    }

    #[test]
    fn test_event_anchor_without_entries() {
        let anchor = Anchor::Event(date(2024, 1, 12));
        assert!(matches!(anchor.resolve(&[]), Err(CalgenError::NoEntries)));
    }

    #[test]
    fn test_shift_out_of_range() {
        assert!(matches!(
            shift(NaiveDate::MAX, 1),
            Err(CalgenError::DateOutOfRange(_))
        ));
        assert!(shift(date(2024, 1, 1), i64::MIN).is_err());
    }
}
