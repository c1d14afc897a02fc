//! Human-readable audit timestamps.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{ReportError, Result};

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})").expect("valid timestamp regex")
});

/// en-GB medium date with 24-hour time, e.g. `4 May 2023, 13:02:09`.
const DISPLAY_FORMAT: &str = "%-d %b %Y, %H:%M:%S";

/// Parse the leading `YYYY-MM-DDTHH:MM:SS` of `raw` as a naive local
/// date/time. Fractional seconds and any zone suffix are ignored.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let malformed = || ReportError::MalformedTimestamp {
        input: raw.to_string(),
    };

    let caps = TIMESTAMP.captures(raw).ok_or_else(malformed)?;
    let field = |i: usize| -> Result<u32> {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(malformed)
    };

    let year = i32::try_from(field(1)?).map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        .and_then(|date| date.and_hms_opt(field(4).ok()?, field(5).ok()?, field(6).ok()?))
        .ok_or_else(malformed)
}

/// Render an audit timestamp for breadcrumbs and headings.
pub fn format_timestamp(raw: &str) -> Result<String> {
    Ok(parse_timestamp(raw)?.format(DISPLAY_FORMAT).to_string())
}
