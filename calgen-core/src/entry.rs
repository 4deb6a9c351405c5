//! Typed rows of the offset list.

use crate::dialect::Dialect;
use crate::error::{CalgenError, CalgenResult};

/// Number of fields every row must have: offset, summary, description suffix.
pub const FIELDS_PER_ROW: usize = 3;

/// A validated input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Days between the anchor date and this entry's date.
    pub offset: i64,
    pub summary: String,
    /// Appended to the summary to form the event description.
    pub description_suffix: String,
}

impl Entry {
    pub fn new(
        offset: i64,
        summary: impl Into<String>,
        description_suffix: impl Into<String>,
    ) -> Self {
        Entry {
            offset,
            summary: summary.into(),
            description_suffix: description_suffix.into(),
        }
    }

    /// Parse one cleaned line under `dialect`.
    pub fn parse(line: &str, dialect: &Dialect) -> CalgenResult<Self> {
        let fields = dialect.split(line)?;

        let [offset, summary, suffix] = fields.as_slice() else {
            return Err(CalgenError::MalformedRow {
                row: line.to_string(),
                fields: fields.len(),
            });
        };

        let offset = offset
            .trim()
            .parse::<i64>()
            .map_err(|_| CalgenError::InvalidOffset {
                value: offset.to_string(),
                row: line.to_string(),
            })?;

        Ok(Entry::new(offset, summary.as_str(), suffix.as_str()))
    }
}

/// Parse every cleaned line, failing on the first malformed one.
pub fn parse_entries<I, S>(lines: I, dialect: &Dialect) -> CalgenResult<Vec<Entry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| Entry::parse(line.as_ref(), dialect))
        .collect()
}

/// Stable ascending sort by offset; equal offsets keep their input order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.offset);
}
