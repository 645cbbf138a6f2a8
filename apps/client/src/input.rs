//! Parsing of user-typed instants.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::ClientError;

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accept a full RFC 3339 instant or `YYYY-MM-DD HH:MM` in local time.
pub fn parse_event_time(input: &str) -> Result<DateTime<Utc>, ClientError> {
    parse_event_time_in(input, &Local)
}

/// [`parse_event_time`] against an explicit zone for the wall-clock form.
pub fn parse_event_time_in<Tz: TimeZone>(input: &str, zone: &Tz) -> Result<DateTime<Utc>, ClientError> {
    let input = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, LOCAL_FORMAT).map_err(|_| {
        ClientError::InvalidInput(format!(
            "Expected 'YYYY-MM-DD HH:MM' or an RFC 3339 time, got '{}'",
            input
        ))
    })?;

    // Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ClientError::InvalidInput(format!("'{}' does not exist in the local time zone", input)))
}
