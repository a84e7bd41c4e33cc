//! Weekly open time containment

use chrono::{DateTime, NaiveTime, TimeZone};

use crate::models::{OpenTime, Weekday};

/// Whether `(day, time)` falls inside the weekly interval opening on
/// `start_day` at `start_time` and closing on `end_day` at `end_time`.
///
/// Both ends are inclusive. When `start_day > end_day` the interval wraps
/// past Sunday into the following week.
pub fn contains(
    start_day: Weekday,
    start_time: NaiveTime,
    end_day: Weekday,
    end_time: NaiveTime,
    day: Weekday,
    time: NaiveTime,
) -> bool {
    if start_day <= end_day {
        // Not reached yet
        if day < start_day || (day == start_day && time < start_time) {
            return false;
        }
        // Already over
        if day > end_day || (day == end_day && time > end_time) {
            return false;
        }
    } else {
        if day == start_day && time < start_time {
            return false;
        }
        if day == end_day && time > end_time {
            return false;
        }
        // Days between the close and the next opening
        if end_day < day && day < start_day {
            return false;
        }
    }
    true
}

impl OpenTime {
    /// Whether this open time covers `now`, read as weekday and time of
    /// day in `now`'s own zone
    pub fn is_open_now<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        contains(
            self.start_day,
            self.start_time,
            self.end_day,
            self.end_time,
            Weekday::of(now),
            now.time(),
        )
    }

    /// Whether this open time crosses the Sunday -> Monday boundary
    pub fn wraps_week(&self) -> bool {
        self.start_day > self.end_day
    }
}
