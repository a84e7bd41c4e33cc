//! Schedule models (schedules and their weekly open times)

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::Weekday;

// ---------------------------------------------------------------------------
// OpenTime
// ---------------------------------------------------------------------------

/// One recurring weekly interval of open hours.
///
/// `start_day`/`start_time` open the interval, `end_day`/`end_time` close
/// it. When `start_day > end_day` the interval runs across the
/// Sunday -> Monday boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OpenTime {
    pub id: i32,
    /// Owning schedule ID
    pub schedule_id: i32,
    /// Day the interval opens (0=Monday, 6=Sunday)
    #[schema(value_type = i16)]
    pub start_day: Weekday,
    /// Opening time of day
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    /// Day the interval closes (0=Monday, 6=Sunday)
    #[schema(value_type = i16)]
    pub end_day: Weekday,
    /// Closing time of day
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl OpenTime {
    /// Build an unsaved open time
    pub fn new(start_day: Weekday, start_time: NaiveTime, end_day: Weekday, end_time: NaiveTime) -> Self {
        Self {
            id: 0,
            schedule_id: 0,
            start_day,
            start_time,
            end_day,
            end_time,
            created: None,
            modified: None,
        }
    }
}

impl std::fmt::Display for OpenTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} to {} {}",
            self.start_day,
            self.start_time.format("%H:%M:%S"),
            self.end_day,
            self.end_time.format("%H:%M:%S")
        )
    }
}

/// Create open time request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOpenTime {
    /// Opening day (0=Monday, 6=Sunday)
    pub start_day: i16,
    /// Opening time (HH:MM or HH:MM:SS)
    pub start_time: String,
    /// Closing day (0=Monday, 6=Sunday)
    pub end_day: i16,
    /// Closing time (HH:MM or HH:MM:SS)
    pub end_time: String,
}

/// Open time fields after parsing and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOpenTime {
    pub start_day: Weekday,
    pub start_time: NaiveTime,
    pub end_day: Weekday,
    pub end_time: NaiveTime,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// A named collection of open times.
///
/// A schedule with both `valid_start` and `valid_end` set is a special
/// schedule, eligible only inside that (inclusive) range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: i32,
    /// Schedule name (not unique)
    pub name: String,
    /// First instant this schedule is in effect (inclusive)
    pub valid_start: Option<DateTime<Utc>>,
    /// Last instant this schedule is in effect (inclusive)
    pub valid_end: Option<DateTime<Utc>>,
    /// Open around the clock, open times are ignored
    pub always_open: bool,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    #[serde(default)]
    pub open_times: Vec<OpenTime>,
}

impl Schedule {
    /// Build an unsaved schedule with the given open times
    pub fn new(name: impl Into<String>, open_times: Vec<OpenTime>) -> Self {
        Self {
            name: name.into(),
            open_times,
            ..Default::default()
        }
    }

    /// An unsaved schedule that is open around the clock
    pub fn always_open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            always_open: true,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn with_validity(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.valid_start = Some(start);
        self.valid_end = Some(end);
        self
    }
}

/// Create schedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    /// Start of the validity window (RFC 3339), special schedules only
    pub valid_start: Option<String>,
    /// End of the validity window (RFC 3339), special schedules only
    pub valid_end: Option<String>,
    pub always_open: Option<bool>,
    /// Open times created together with the schedule
    #[serde(default)]
    pub open_times: Vec<CreateOpenTime>,
}

/// Update schedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub valid_start: Option<String>,
    pub valid_end: Option<String>,
    /// Remove the validity window, turning a special schedule into a regular one
    pub clear_validity: Option<bool>,
    pub always_open: Option<bool>,
}

/// Schedule as returned by the API, evaluated against the reference clock
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Whether the schedule's own hours are open right now
    pub open_now: bool,
}
