use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use super::error::ExpandError;
use super::expand::DaySpan;

/// First and last second of `year` in UTC, used to bound the provider
/// query.
pub fn year_bounds(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), ExpandError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(ExpandError::YearOutOfRange(year))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .ok_or(ExpandError::YearOutOfRange(year))?;
    Ok((start.and_utc(), end.and_utc()))
}

/// Calendar days of `year`, used to clip expanded events to the query.
pub fn year_days(year: i32) -> Result<DaySpan, ExpandError> {
    let (start, end) = year_bounds(year)?;
    Ok(DaySpan {
        first: start.date_naive(),
        last: end.date_naive(),
    })
}

/// Formats an instant the way the provider expects `timeMin`/`timeMax`.
pub fn to_query_param(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
