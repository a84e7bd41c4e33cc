//! Data models for What's Open

pub mod alert;
pub mod enums;
pub mod facility;
pub mod schedule;

// Re-export commonly used types
pub use alert::Alert;
pub use enums::{CampusRegion, UrgencyTag, Weekday};
pub use facility::{Category, Facility, FacilityDetails, Location, OpenStatus};
pub use schedule::{OpenTime, Schedule};
