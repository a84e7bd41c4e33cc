//! Open/closed behavior checked through the public library API

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

use whatsopen_server::{
    models::{Alert, Category, Facility, FacilityDetails, OpenTime, Schedule, UrgencyTag, Weekday},
    status::{is_active_between, is_open, resolve, ScheduleChoice},
    AppError,
};

fn hm(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

/// 2024-01-01 is a Monday
fn utc(day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, h, m, s).unwrap()
}

fn weekdays() -> Schedule {
    Schedule::new(
        "Weekdays",
        vec![OpenTime::new(Weekday::Monday, hm(9, 0, 0), Weekday::Friday, hm(17, 0, 0))],
    )
}

fn facility(main: Option<Schedule>, specials: Vec<Schedule>) -> FacilityDetails {
    FacilityDetails {
        facility: Facility {
            id: 1,
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
        category: Some(Category {
            id: 1,
            name: "Dining".to_string(),
            created: None,
            modified: None,
        }),
        location: None,
        main_schedule: main,
        special_schedules: specials,
    }
}

#[test]
fn test_always_open_ignores_windows() {
    let schedule = Schedule::always_open("24/7");
    let mut now = utc(1, 0, 0, 0);
    while now < utc(8, 0, 0, 0) {
        assert!(schedule.is_open_now(&now), "closed at {}", now);
        now += Duration::minutes(37);
    }
}

#[test]
fn test_weekday_window_boundaries() {
    let schedule = weekdays();
    assert!(schedule.is_open_now(&utc(1, 9, 0, 0)));
    assert!(schedule.is_open_now(&utc(5, 17, 0, 0)));
    assert!(!schedule.is_open_now(&utc(1, 8, 59, 59)));
    assert!(!schedule.is_open_now(&utc(5, 17, 0, 1)));
}

#[test]
fn test_days_between_are_open_all_day() {
    let schedule = weekdays();
    assert!(schedule.is_open_now(&utc(3, 0, 0, 0)));
    assert!(schedule.is_open_now(&utc(3, 23, 59, 59)));
}

#[test]
fn test_late_night_window() {
    let schedule = Schedule::new(
        "Late night",
        vec![OpenTime::new(Weekday::Friday, hm(22, 0, 0), Weekday::Saturday, hm(2, 0, 0))],
    );
    assert!(schedule.is_open_now(&utc(6, 1, 0, 0)));
    assert!(schedule.is_open_now(&utc(5, 23, 0, 0)));
    assert!(!schedule.is_open_now(&utc(7, 0, 0, 0)));
    assert!(!schedule.is_open_now(&utc(4, 23, 0, 0)));
}

#[test]
fn test_window_across_sunday_night() {
    let schedule = Schedule::new(
        "Weekend",
        vec![OpenTime::new(Weekday::Saturday, hm(10, 0, 0), Weekday::Monday, hm(6, 0, 0))],
    );
    assert!(schedule.is_open_now(&utc(7, 12, 0, 0)));
    assert!(schedule.is_open_now(&utc(8, 6, 0, 0)));
    assert!(!schedule.is_open_now(&utc(8, 6, 0, 1)));
    assert!(!schedule.is_open_now(&utc(3, 12, 0, 0)));
    assert!(!schedule.is_open_now(&utc(6, 9, 59, 59)));
}

#[test]
fn test_weekday_taken_in_zone_of_now() {
    let schedule = weekdays();
    // Friday 22:00 UTC is Friday 17:00 at -05:00
    let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    let inside = eastern.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap();
    let after = eastern.with_ymd_and_hms(2024, 1, 5, 17, 0, 1).unwrap();
    assert!(schedule.is_open_now(&inside));
    assert!(!schedule.is_open_now(&after));
    assert!(!schedule.is_open_now(&inside.with_timezone(&Utc)));
}

#[test]
fn test_special_schedule_overrides_main() {
    let t0 = utc(2, 0, 0, 0);
    let t1 = utc(4, 0, 0, 0);
    let closed = Schedule::new("Closed", Vec::new()).with_id(1);
    let special = Schedule::always_open("Finals").with_id(2).with_validity(t0, t1);
    let details = facility(Some(closed), vec![special]);

    for now in [t0, t0 + Duration::hours(13), t1] {
        let decision = resolve(&details, &now).unwrap();
        assert!(decision.open);
        assert_eq!(decision.choice, ScheduleChoice::Special { schedule_id: 2 });
    }
    for now in [t0 - Duration::seconds(1), t1 + Duration::seconds(1)] {
        let decision = resolve(&details, &now).unwrap();
        assert!(!decision.open);
        assert_eq!(decision.choice, ScheduleChoice::Main);
    }
}

#[test]
fn test_half_bounded_special_is_never_selected() {
    let mut special = Schedule::always_open("Half").with_id(2);
    special.valid_start = Some(utc(1, 0, 0, 0));
    let details = facility(Some(Schedule::new("Closed", Vec::new()).with_id(1)), vec![special]);

    let mut now = utc(1, 0, 0, 0);
    while now < utc(8, 0, 0, 0) {
        assert!(!is_open(&details, &now).unwrap());
        now += Duration::hours(5);
    }
}

#[test]
fn test_missing_main_schedule_is_configuration_error() {
    let details = facility(None, Vec::new());
    let err = is_open(&details, &utc(1, 12, 0, 0)).unwrap_err();
    assert!(matches!(err, AppError::Configuration(msg) if msg.contains("southside")));
}

#[test]
fn test_alert_strict_interval() {
    let t0 = utc(2, 8, 0, 0);
    let t1 = utc(2, 20, 0, 0);
    let alert = Alert {
        id: 1,
        urgency_tag: UrgencyTag::Minor,
        subject: "Holiday hours".to_string(),
        body: "Closing early".to_string(),
        url: None,
        start_datetime: t0,
        end_datetime: t1,
        created: None,
        modified: None,
    };
    let eps = Duration::milliseconds(1);
    assert!(!alert.is_active(&t0));
    assert!(!alert.is_active(&t1));
    assert!(alert.is_active(&(t0 + eps)));
    assert!(alert.is_active(&(t1 - eps)));
    assert!(!is_active_between(&t1, &t0, &utc(2, 12, 0, 0)));
}

#[test]
fn test_evaluation_is_repeatable() {
    let details = facility(
        Some(weekdays().with_id(1)),
        vec![Schedule::always_open("Break").with_id(3).with_validity(utc(6, 0, 0, 0), utc(7, 0, 0, 0))],
    );
    let now = utc(6, 12, 0, 0);
    let first = resolve(&details, &now).unwrap();
    for _ in 0..10 {
        assert_eq!(resolve(&details, &now).unwrap(), first);
    }
}
