//! CSV dialect detection.
//!
//! The dialect is sniffed from a sample made of the first cleaned input
//! lines. Only the configured candidate delimiters are considered; when none
//! of them fits the sample, the caller falls back to the comma-separated
//! Excel dialect.

use std::collections::BTreeMap;

use thiserror::Error;

/// Default number of characters to collect before sniffing.
pub const DEFAULT_SAMPLE_SIZE: usize = 1024;

/// Delimiters considered by default when sniffing.
pub const DEFAULT_DELIMITERS: &[u8] = b";";

/// Minimum share of sample lines that must agree on the delimiter count.
const MIN_CONSISTENCY: f64 = 0.9;

const QUOTE_CHARS: [u8; 2] = [b'"', b'\''];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SniffError {
    #[error("empty sample")]
    EmptySample,

    #[error("could not determine delimiter")]
    NoDelimiter,
}

/// Delimiter and quoting conventions used to split rows into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Whitespace right after a delimiter is not part of the next field.
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::excel()
    }
}

impl Dialect {
    /// Comma separated, double-quoted fields.
    pub const fn excel() -> Self {
        Dialect {
            delimiter: b',',
            quote: b'"',
            skip_initial_space: false,
        }
    }

    /// Guess the dialect of `sample`, restricted to `candidates` as delimiters.
    pub fn sniff(sample: &str, candidates: &[u8]) -> Result<Self, SniffError> {
        let lines: Vec<&str> = sample.lines().filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(SniffError::EmptySample);
        }

        // Highest consistency wins; ties keep candidate order.
        let mut best: Option<(Dialect, f64)> = None;
        for &delimiter in candidates {
            let quote = guess_quote(&lines, delimiter);
            let candidate = Dialect {
                delimiter,
                quote,
                skip_initial_space: has_initial_spaces(lines[0], delimiter, quote),
            };
            let Some(consistency) = candidate.field_consistency(&lines) else {
                continue;
            };
            if consistency < MIN_CONSISTENCY {
                continue;
            }
            if best.is_none_or(|(_, c)| consistency > c) {
                best = Some((candidate, consistency));
            }
        }

        best.map(|(dialect, _)| dialect).ok_or(SniffError::NoDelimiter)
    }

    /// Sniff the dialect, falling back to [`Dialect::excel`] with a warning.
    pub fn detect(sample: &str, candidates: &[u8]) -> Self {
        match Self::sniff(sample, candidates) {
            Ok(dialect) => {
                tracing::debug!(
                    delimiter = %char::from(dialect.delimiter),
                    quote = %char::from(dialect.quote),
                    skip_initial_space = dialect.skip_initial_space,
                    "detected CSV dialect"
                );
                dialect
            }
            Err(err) => {
                tracing::warn!(
                    %err,
                    "Unable to determine CSV dialect from input file sample. \
                     Using default dialect Excel."
                );
                Self::excel()
            }
        }
    }

    /// Split one line into its fields.
    pub fn split(&self, line: &str) -> Result<Vec<String>, csv::Error> {
        let line = if self.skip_initial_space {
            self.strip_initial_spaces(line)
        } else {
            line.to_string()
        };

        let mut reader = self.reader_builder().from_reader(line.as_bytes());
        let record = reader.records().next().transpose()?.unwrap_or_default();
        Ok(record.iter().map(str::to_string).collect())
    }

    /// Drop spaces that follow a delimiter outside quotes, so a quote right
    /// after `; ` still opens a quoted field.
    fn strip_initial_spaces(&self, line: &str) -> String {
        let delimiter = char::from(self.delimiter);
        let quote = char::from(self.quote);

        let mut out = String::with_capacity(line.len());
        let mut in_quotes = false;
        let mut after_delimiter = false;
        for c in line.chars() {
            if after_delimiter && c == ' ' {
                continue;
            }
            after_delimiter = false;
            if c == quote {
                in_quotes = !in_quotes;
            } else if c == delimiter && !in_quotes {
                after_delimiter = true;
            }
            out.push(c);
        }
        out
    }

    /// Share of lines whose field count equals the most common count. `None`
    /// when the most common count is a single field (delimiter absent).
    fn field_consistency(&self, lines: &[&str]) -> Option<f64> {
        let mut frequencies: BTreeMap<usize, usize> = BTreeMap::new();
        for line in lines {
            let count = self.split(line).map(|fields| fields.len()).unwrap_or(0);
            *frequencies.entry(count).or_default() += 1;
        }

        // Most common count; ties go to the larger count.
        let (&mode, &lines_with_mode) = frequencies
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))?;

        if mode < 2 {
            return None;
        }

        Some(lines_with_mode as f64 / lines.len() as f64)
    }

    /// A `csv` reader configured for this dialect, without headers.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(true)
            .flexible(true)
            .has_headers(false);
        builder
    }
}

/// Join cleaned lines with newlines until the buffer holds at least `limit`
/// characters or the lines run out. Lines are never cut.
pub fn build_sample<I, S>(lines: I, limit: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sample = String::new();
    for line in lines {
        if sample.chars().count() >= limit {
            break;
        }
        if !sample.is_empty() {
            sample.push('\n');
        }
        sample.push_str(line.as_ref());
    }
    sample
}

/// Whether every delimiter outside quotes on `line` is followed by a space.
fn has_initial_spaces(line: &str, delimiter: u8, quote: u8) -> bool {
    let bytes = line.as_bytes();
    let mut in_quotes = false;
    let mut delimiters = 0;
    let mut spaced = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == quote {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            delimiters += 1;
            if bytes.get(i + 1) == Some(&b' ') {
                spaced += 1;
            }
        }
    }
    delimiters > 0 && delimiters == spaced
}

/// Pick the quote character that opens fields most often, `"` by default.
fn guess_quote(lines: &[&str], delimiter: u8) -> u8 {
    let mut best = (b'"', 0usize);
    for quote in QUOTE_CHARS {
        let opened = lines
            .iter()
            .flat_map(move |line| line.as_bytes().split(move |&b| b == delimiter))
            .filter(|field| field.trim_ascii_start().first() == Some(&quote))
            .count();
        if opened > best.1 {
            best = (quote, opened);
        }
    }
    best.0
}
