//! The full offset-list to calendar transformation.

use crate::anchor::Anchor;
use crate::calendar::{CalendarDocument, CalendarMetadata};
use crate::dialect::{DEFAULT_DELIMITERS, DEFAULT_SAMPLE_SIZE, Dialect, build_sample};
use crate::entry::{parse_entries, sort_entries};
use crate::error::{CalgenError, CalgenResult};
use crate::event::{Clock, IdGenerator, build_events};
use crate::input::decomment;

/// Tunables for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Characters to collect before sniffing the dialect.
    pub sample_size: usize,
    /// Delimiters the sniffer may pick.
    pub delimiters: Vec<u8>,
    pub metadata: CalendarMetadata,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            sample_size: DEFAULT_SAMPLE_SIZE,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            metadata: CalendarMetadata::default(),
        }
    }
}

/// Turn the contents of an offset list into a calendar document.
pub fn generate(
    input: &str,
    anchor: Anchor,
    options: &Options,
    clock: &dyn Clock,
    ids: &mut dyn IdGenerator,
) -> CalgenResult<CalendarDocument> {
    let lines: Vec<String> = decomment(input.lines()).collect();

    let sample = build_sample(&lines, options.sample_size);
    if sample.is_empty() {
        return Err(CalgenError::EmptySample);
    }
    tracing::debug!(chars = sample.len(), "built dialect sample");

    let dialect = Dialect::detect(&sample, &options.delimiters);

    let mut entries = parse_entries(&lines, &dialect)?;
    sort_entries(&mut entries);
    tracing::debug!(count = entries.len(), "parsed entries");

    let anchor_date = anchor.resolve(&entries)?;
    tracing::debug!(%anchor_date, ?anchor, "resolved anchor date");

    let events = build_events(&entries, anchor_date, clock, ids)?;

    Ok(CalendarDocument::new(options.metadata.clone(), events))
}
