//! Parsers for user-typed dates, indices and ranges.
//!
//! Users count from 1; the store counts from 0. Conversion happens here and
//! nowhere else.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use roomshare_core::IndexRange;

pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parse `dd/mm/yyyy HH:MM` in local time.
pub fn date(text: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{text}': expected dd/mm/yyyy HH:MM"))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("'{text}' does not exist in the local time zone"))
}

/// Parse a 1-based task number into a 0-based index.
pub fn index(text: &str) -> Result<usize, String> {
    let n: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("invalid index '{text}': expected a positive number"))?;
    n.checked_sub(1)
        .ok_or_else(|| format!("invalid index '{text}': numbering starts at 1"))
}

/// Parse `n` or `a-b` (1-based, inclusive) into an [`IndexRange`].
pub fn range(text: &str) -> Result<IndexRange, String> {
    match text.split_once('-') {
        Some((a, b)) => Ok(IndexRange::new(index(a)?, index(b)?)),
        None => Ok(IndexRange::single(index(text)?)),
    }
}
