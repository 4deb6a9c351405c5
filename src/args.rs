//! Validators for command line arguments.
//!
//! Each validator is a plain function from the raw argument to a typed value
//! or a human-readable error, so clap can use them as value parsers.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(arg: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(arg, DATE_FORMAT)
        .map_err(|_| format!("Given date ({arg}) not valid! Expected format, YYYY-MM-DD!"))
}

/// Path to an existing, readable regular file.
pub fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);

    if !path.is_file() {
        return Err(format!(
            "The file '{arg}' does not exist or is not a readable file."
        ));
    }

    File::open(&path).map_err(|e| format!("The file '{arg}' is not readable: {e}"))?;

    Ok(path)
}

/// Path whose containing directory exists and is writable.
pub fn writable_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);

    if path.is_dir() {
        return Err(format!("The path '{arg}' is a directory."));
    }

    let dir = containing_dir(&path);
    let metadata = std::fs::metadata(dir)
        .map_err(|e| format!("The path '{arg}' seems to be invalid: {e}"))?;

    if !metadata.is_dir() {
        return Err(format!("The path '{arg}' is not writable."));
    }

    // Permission bits alone don't say whether this user may create files here
    tempfile::tempfile_in(dir).map_err(|e| format!("The path '{arg}' is not writable: {e}"))?;

    Ok(path)
}

/// Directory a file path lives in, the current directory for bare names.
pub fn containing_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
