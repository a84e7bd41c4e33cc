//! Schedule evaluation

use chrono::{DateTime, TimeZone, Utc};

use crate::models::Schedule;

impl Schedule {
    /// Whether this schedule's hours are open at `now`.
    ///
    /// Always-open schedules skip their open times entirely; otherwise any
    /// single open time covering `now` is enough. No open times means closed.
    pub fn is_open_now<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        if self.always_open {
            return true;
        }
        self.open_times.iter().any(|open_time| open_time.is_open_now(now))
    }

    /// Validity window, only when both ends are set
    pub fn validity(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.valid_start, self.valid_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_special(&self) -> bool {
        self.validity().is_some()
    }

    /// Whether `now` lies inside the validity window, both ends inclusive.
    /// Schedules missing either end are never in effect.
    pub fn is_in_effect<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let now = now.with_timezone(&Utc);
        self.validity()
            .map_or(false, |(start, end)| start <= now && now <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    use crate::models::{OpenTime, Weekday};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_always_open_ignores_open_times() {
        let schedule = Schedule::always_open("24 hours");
        assert!(schedule.open_times.is_empty());
        for hour in 0..24 {
            assert!(schedule.is_open_now(&monday(hour, 30)));
        }

        let mut with_times = Schedule::new(
            "odd",
            vec![OpenTime::new(Weekday::Friday, t(9, 0), Weekday::Friday, t(10, 0))],
        );
        with_times.always_open = true;
        assert!(with_times.is_open_now(&monday(3, 0)));
    }

    #[test]
    fn test_no_open_times_is_closed() {
        let schedule = Schedule::new("closed", vec![]);
        assert!(!schedule.is_open_now(&monday(12, 0)));
    }

    #[test]
    fn test_any_open_time_opens() {
        let schedule = Schedule::new(
            "split shift",
            vec![
                OpenTime::new(Weekday::Monday, t(7, 0), Weekday::Monday, t(11, 0)),
                OpenTime::new(Weekday::Monday, t(17, 0), Weekday::Monday, t(21, 0)),
            ],
        );
        assert!(schedule.is_open_now(&monday(8, 0)));
        assert!(schedule.is_open_now(&monday(20, 0)));
        assert!(!schedule.is_open_now(&monday(14, 0)));
    }

    #[test]
    fn test_validity_is_inclusive() {
        let start = monday(0, 0);
        let end = start + Duration::days(3);
        let schedule = Schedule::always_open("break").with_validity(start, end);

        assert!(schedule.is_special());
        assert!(schedule.is_in_effect(&start));
        assert!(schedule.is_in_effect(&end));
        assert!(!schedule.is_in_effect(&(start - Duration::seconds(1))));
        assert!(!schedule.is_in_effect(&(end + Duration::seconds(1))));
    }

    #[test]
    fn test_half_open_validity_never_in_effect() {
        let mut schedule = Schedule::always_open("broken");
        schedule.valid_start = Some(monday(0, 0));
        assert!(!schedule.is_special());
        assert!(!schedule.is_in_effect(&monday(12, 0)));

        schedule.valid_start = None;
        schedule.valid_end = Some(monday(23, 0));
        assert!(!schedule.is_in_effect(&monday(12, 0)));
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let schedule = Schedule::new(
            "weekdays",
            vec![OpenTime::new(Weekday::Monday, t(9, 0), Weekday::Friday, t(17, 0))],
        );
        let now = monday(10, 0);
        let first = schedule.is_open_now(&now);
        for _ in 0..10 {
            assert_eq!(schedule.is_open_now(&now), first);
        }
    }
}
