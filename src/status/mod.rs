//! Open/closed evaluation over calendar time.
//!
//! Everything here is a pure function of the stored schedule data and an
//! instant supplied by the caller; nothing reads the clock. Weekday and time
//! of day are taken in the zone of that instant, validity windows and alert
//! intervals are compared as absolute instants.
//!
//! - [`OpenTime::is_open_now`](crate::models::OpenTime::is_open_now): one
//!   weekly interval, possibly wrapping past Sunday
//! - [`Schedule::is_open_now`](crate::models::Schedule::is_open_now): any
//!   open time, or always open
//! - [`resolve`]: special schedule in effect, else main schedule
//! - [`Alert::is_active`](crate::models::Alert::is_active): strict interval
//!   containment

pub mod alert;
pub mod input;
pub mod resolver;
pub mod schedule;
pub mod window;

pub use alert::is_active_between;
pub use resolver::{is_open, resolve, resolve_schedules, select_special, Decision, ScheduleChoice};
