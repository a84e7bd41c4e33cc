//! Alert activity

use chrono::{DateTime, TimeZone, Utc};

use crate::models::Alert;

/// Whether `now` lies strictly between `start` and `end`
pub fn is_active_between<Tz: TimeZone>(start: &DateTime<Utc>, end: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let now = now.with_timezone(&Utc);
    *start < now && now < *end
}

impl Alert {
    /// Whether this alert should be served at `now`. Unlike schedule
    /// validity, both ends are exclusive.
    pub fn is_active<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        is_active_between(&self.start_datetime, &self.end_datetime, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    use crate::models::UrgencyTag;

    fn alert(start: DateTime<Utc>, end: DateTime<Utc>) -> Alert {
        Alert {
            id: 1,
            urgency_tag: UrgencyTag::Major,
            subject: "Southside closed".to_string(),
            body: "Closed for a private event".to_string(),
            url: None,
            start_datetime: start,
            end_datetime: end,
            created: None,
            modified: None,
        }
    }

    #[test]
    fn test_ends_are_exclusive() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let t1 = t0 + Duration::hours(4);
        let a = alert(t0, t1);

        assert!(!a.is_active(&t0));
        assert!(!a.is_active(&t1));
        assert!(a.is_active(&(t0 + Duration::seconds(1))));
        assert!(a.is_active(&(t1 - Duration::seconds(1))));
        assert!(!a.is_active(&(t0 - Duration::hours(1))));
        assert!(!a.is_active(&(t1 + Duration::hours(1))));
    }

    #[test]
    fn test_compares_instants_across_zones() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let a = alert(t0, t0 + Duration::hours(1));
        // 03:30 at UTC-05:00 is 08:30 UTC
        let local = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 3, 30, 0)
            .unwrap();
        assert!(a.is_active(&local));
    }

    #[test]
    fn test_empty_interval_never_active() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert!(!is_active_between(&t0, &t0, &t0));
    }
}
