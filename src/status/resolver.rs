//! Facility status resolution: special schedule overrides, main fallback

use std::cmp::Reverse;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{FacilityDetails, Schedule},
};

/// Which schedule decided a facility's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleChoice {
    /// The facility's main schedule
    Main,
    /// A special schedule whose validity window contains the instant
    Special { schedule_id: i32 },
}

/// Outcome of a status resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub choice: ScheduleChoice,
    pub open: bool,
}

/// Pick the special schedule in effect at `now`, if any.
///
/// When several validity windows contain `now`, the narrowest window wins,
/// then the one that started last, then the highest schedule id.
pub fn select_special<'a, Tz: TimeZone>(
    specials: &'a [Schedule],
    now: &DateTime<Tz>,
) -> Option<&'a Schedule> {
    specials
        .iter()
        .filter(|schedule| schedule.is_in_effect(now))
        .filter_map(|schedule| {
            schedule
                .validity()
                .map(|(start, end)| (schedule, end - start, start))
        })
        .min_by_key(|(schedule, width, start)| (*width, Reverse(*start), Reverse(schedule.id)))
        .map(|(schedule, _, _)| schedule)
}

/// Resolve status from a main schedule and a set of special schedules.
///
/// A missing main schedule is reported as a configuration error even when a
/// special schedule would apply.
pub fn resolve_schedules<Tz: TimeZone>(
    main: Option<&Schedule>,
    specials: &[Schedule],
    now: &DateTime<Tz>,
) -> AppResult<Decision> {
    let main = main.ok_or_else(|| AppError::Configuration("No main schedule".to_string()))?;

    if let Some(special) = select_special(specials, now) {
        return Ok(Decision {
            choice: ScheduleChoice::Special {
                schedule_id: special.id,
            },
            open: special.is_open_now(now),
        });
    }

    Ok(Decision {
        choice: ScheduleChoice::Main,
        open: main.is_open_now(now),
    })
}

/// Resolve a facility's status at `now`
pub fn resolve<Tz: TimeZone>(facility: &FacilityDetails, now: &DateTime<Tz>) -> AppResult<Decision> {
    resolve_schedules(
        facility.main_schedule.as_ref(),
        &facility.special_schedules,
        now,
    )
    .map_err(|e| match e {
        AppError::Configuration(_) => AppError::Configuration(format!(
            "Facility '{}' has no main schedule",
            facility.facility.slug
        )),
        other => other,
    })
}

/// Whether a facility is open at `now`
pub fn is_open<Tz: TimeZone>(facility: &FacilityDetails, now: &DateTime<Tz>) -> AppResult<bool> {
    resolve(facility, now).map(|decision| decision.open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, Utc};

    use crate::models::{Facility, OpenTime, Weekday};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Monday 2024-01-01 plus `days`
    fn day(days: i64, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap() + Duration::days(days)
    }

    fn weekdays_nine_to_five() -> Schedule {
        Schedule::new(
            "regular",
            vec![OpenTime::new(Weekday::Monday, t(9, 0), Weekday::Friday, t(17, 0))],
        )
        .with_id(1)
    }

    fn facility(main: Option<Schedule>, specials: Vec<Schedule>) -> FacilityDetails {
        FacilityDetails {
            facility: Facility {
                id: 7,
                name: "Southside".to_string(),
                slug: "southside".to_string(),
                category_id: 1,
                location_id: 1,
                main_schedule_id: 1,
                note: String::new(),
                logo_url: String::new(),
                phone_number: None,
                tapingo_url: None,
                classifier: None,
                created: None,
                modified: None,
            },
            category: None,
            location: None,
            main_schedule: main,
            special_schedules: specials,
        }
    }

    #[test]
    fn test_main_schedule_when_no_specials() {
        let main = weekdays_nine_to_five();
        let decision = resolve_schedules(Some(&main), &[], &day(0, 10)).unwrap();
        assert_eq!(decision, Decision { choice: ScheduleChoice::Main, open: true });

        let decision = resolve_schedules(Some(&main), &[], &day(5, 10)).unwrap();
        assert_eq!(decision, Decision { choice: ScheduleChoice::Main, open: false });
    }

    #[test]
    fn test_special_overrides_main() {
        let main = Schedule::new("always closed", vec![]).with_id(1);
        let t0 = day(2, 0);
        let t1 = day(4, 0);
        let special = Schedule::always_open("finals week").with_id(2).with_validity(t0, t1);
        let details = facility(Some(main), vec![special]);

        for now in [t0, t0 + Duration::hours(30), t1] {
            let decision = resolve(&details, &now).unwrap();
            assert_eq!(decision.choice, ScheduleChoice::Special { schedule_id: 2 });
            assert!(decision.open);
        }

        for now in [t0 - Duration::seconds(1), t1 + Duration::seconds(1)] {
            let decision = resolve(&details, &now).unwrap();
            assert_eq!(decision.choice, ScheduleChoice::Main);
            assert!(!decision.open);
        }
    }

    #[test]
    fn test_special_can_close_facility() {
        let main = Schedule::always_open("24 hours").with_id(1);
        let closed = Schedule::new("snow day", vec![]).with_id(3).with_validity(day(0, 0), day(1, 0));
        let details = facility(Some(main), vec![closed]);

        assert!(!is_open(&details, &day(0, 12)).unwrap());
        assert!(is_open(&details, &day(2, 12)).unwrap());
    }

    #[test]
    fn test_special_without_full_validity_is_ignored() {
        let main = weekdays_nine_to_five();
        let mut half = Schedule::always_open("half").with_id(4);
        half.valid_start = Some(day(0, 0));
        let mut other_half = Schedule::always_open("other half").with_id(5);
        other_half.valid_end = Some(day(30, 0));
        let details = facility(Some(main), vec![half, other_half]);

        for now in [day(0, 3), day(5, 12), day(-3, 12)] {
            let decision = resolve(&details, &now).unwrap();
            assert_eq!(decision.choice, ScheduleChoice::Main);
        }
    }

    #[test]
    fn test_narrowest_special_wins() {
        let main = weekdays_nine_to_five();
        let semester = Schedule::always_open("semester").with_id(10).with_validity(day(0, 0), day(90, 0));
        let holiday = Schedule::new("holiday", vec![]).with_id(11).with_validity(day(3, 0), day(4, 0));
        let details = facility(Some(main), vec![semester.clone(), holiday.clone()]);

        let decision = resolve(&details, &day(3, 12)).unwrap();
        assert_eq!(decision, Decision { choice: ScheduleChoice::Special { schedule_id: 11 }, open: false });

        // Storage order doesn't matter
        let details = facility(Some(weekdays_nine_to_five()), vec![holiday, semester]);
        let decision = resolve(&details, &day(3, 12)).unwrap();
        assert_eq!(decision.choice, ScheduleChoice::Special { schedule_id: 11 });

        let decision = resolve(&details, &day(10, 12)).unwrap();
        assert_eq!(decision, Decision { choice: ScheduleChoice::Special { schedule_id: 10 }, open: true });
    }

    #[test]
    fn test_equal_width_tie_break() {
        let specials = vec![
            Schedule::always_open("early").with_id(20).with_validity(day(0, 0), day(2, 0)),
            Schedule::always_open("late").with_id(21).with_validity(day(1, 0), day(3, 0)),
            Schedule::always_open("late copy").with_id(19).with_validity(day(1, 0), day(3, 0)),
        ];
        let chosen = select_special(&specials, &day(1, 12)).unwrap();
        assert_eq!(chosen.id, 21);
    }

    #[test]
    fn test_missing_main_schedule_is_configuration_error() {
        let special = Schedule::always_open("special").with_id(2).with_validity(day(0, 0), day(9, 0));
        let details = facility(None, vec![special]);
        match resolve(&details, &day(1, 0)) {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("southside")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
