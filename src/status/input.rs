//! Parsing and validation of day/time input

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{schedule::CreateOpenTime, schedule::NewOpenTime, Weekday},
};

/// Parse an RFC 3339 instant, keeping its offset
pub fn parse_instant(field: &str, value: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|_| AppError::Validation(format!("Invalid {} (use RFC 3339, e.g. 2024-05-01T08:00:00-04:00)", field)))
}

/// Parse an RFC 3339 instant into UTC for storage
pub fn parse_utc_instant(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    parse_instant(field, value).map(|dt| dt.with_timezone(&Utc))
}

/// Parse a time of day given as HH:MM or HH:MM:SS
pub fn parse_time_of_day(field: &str, value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM or HH:MM:SS)", field)))
}

pub fn parse_weekday(field: &str, value: i16) -> AppResult<Weekday> {
    Weekday::try_from(value).map_err(|e| AppError::Validation(format!("Invalid {}: {}", field, e)))
}

/// Validate an open time request.
///
/// A window opening and closing on the same day with the closing time
/// before the opening time could never be open, so it is refused.
pub fn validate_open_time(data: &CreateOpenTime) -> AppResult<NewOpenTime> {
    let open_time = NewOpenTime {
        start_day: parse_weekday("start_day", data.start_day)?,
        start_time: parse_time_of_day("start_time", &data.start_time)?,
        end_day: parse_weekday("end_day", data.end_day)?,
        end_time: parse_time_of_day("end_time", &data.end_time)?,
    };

    if open_time.start_day == open_time.end_day && open_time.start_time > open_time.end_time {
        return Err(AppError::Validation(format!(
            "Open time closes before it opens on {}; end it on the next day instead",
            open_time.start_day
        )));
    }

    Ok(open_time)
}

/// Validate an optional validity window: both ends or neither, start not
/// after end
pub fn validate_validity(
    valid_start: Option<&str>,
    valid_end: Option<&str>,
) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    match (valid_start, valid_end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = parse_utc_instant("valid_start", start)?;
            let end = parse_utc_instant("valid_end", end)?;
            if start > end {
                return Err(AppError::Validation(
                    "valid_start must not be after valid_end".to_string(),
                ));
            }
            Ok(Some((start, end)))
        }
        _ => Err(AppError::Validation(
            "valid_start and valid_end must be set together".to_string(),
        )),
    }
}
