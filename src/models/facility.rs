//! Facility models (facilities, categories, locations)

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use unicode_normalization::UnicodeNormalization;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{enums::CampusRegion, schedule::Schedule};
use crate::status::ScheduleChoice;

/// (###) ###-####, ###-###-####, ###.###.#### or ##########
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-.]?([0-9]{4})$").unwrap());

static TAPINGO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https://www\.tapingo\.com/").unwrap());

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Grouping of facilities that serve a similar purpose (Dining, Gyms, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Create or rename category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Building a facility can be found in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i32,
    pub building: String,
    /// Short building name, e.g. EXPL for Exploratory Hall
    pub friendly_building: String,
    pub address: String,
    pub campus_region: CampusRegion,
    pub on_campus: bool,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(length(min = 1, max = 100))]
    pub building: String,
    #[validate(length(max = 10, message = "Abbreviation must be at most 10 characters"))]
    pub friendly_building: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub address: String,
    pub campus_region: CampusRegion,
    pub on_campus: Option<bool>,
}

/// Update location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    #[validate(length(min = 1, max = 100))]
    pub building: Option<String>,
    #[validate(length(max = 10, message = "Abbreviation must be at most 10 characters"))]
    pub friendly_building: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub address: Option<String>,
    pub campus_region: Option<CampusRegion>,
    pub on_campus: Option<bool>,
}

// ---------------------------------------------------------------------------
// Facility
// ---------------------------------------------------------------------------

/// Facility row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    /// URL identifier derived from the name
    pub slug: String,
    pub category_id: i32,
    pub location_id: i32,
    /// Schedule used whenever no special schedule is in effect
    pub main_schedule_id: i32,
    pub note: String,
    pub logo_url: String,
    pub phone_number: Option<String>,
    pub tapingo_url: Option<String>,
    /// Free classifier tag (e.g. "shopmason")
    pub classifier: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Facility with everything needed to decide whether it is open
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityDetails {
    #[serde(flatten)]
    pub facility: Facility,
    pub category: Option<Category>,
    pub location: Option<Location>,
    /// None only when stored data is broken
    pub main_schedule: Option<Schedule>,
    /// Special schedules in attachment order
    pub special_schedules: Vec<Schedule>,
}

/// Open/closed status as shown to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OpenStatus {
    Open,
    Closed,
    /// The status could not be resolved from the stored schedules
    Unknown,
}

impl From<bool> for OpenStatus {
    fn from(open: bool) -> Self {
        if open {
            OpenStatus::Open
        } else {
            OpenStatus::Closed
        }
    }
}

/// Facility details plus its evaluated status
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityWithStatus {
    #[serde(flatten)]
    pub details: FacilityDetails,
    pub status: OpenStatus,
    /// Schedule that drove the decision, absent when status is unknown
    pub active_schedule: Option<ScheduleChoice>,
}

/// Standalone status answer for one facility
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityStatusResponse {
    pub slug: String,
    pub status: OpenStatus,
    pub active_schedule: Option<ScheduleChoice>,
    /// Instant the status was evaluated at, in the reference clock
    #[schema(value_type = String)]
    pub evaluated_at: DateTime<chrono::FixedOffset>,
}

/// Create facility request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacility {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    pub category_id: i32,
    pub location_id: i32,
    pub main_schedule_id: i32,
    pub note: Option<String>,
    #[validate(url(message = "Invalid logo URL"))]
    pub logo_url: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone_number: Option<String>,
    #[validate(regex(path = *TAPINGO_RE, message = "The link is not a valid tapingo link"))]
    pub tapingo_url: Option<String>,
    #[validate(length(max = 100))]
    pub classifier: Option<String>,
}

/// Update facility request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFacility {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub location_id: Option<i32>,
    pub main_schedule_id: Option<i32>,
    pub note: Option<String>,
    #[validate(url(message = "Invalid logo URL"))]
    pub logo_url: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone_number: Option<String>,
    #[validate(regex(path = *TAPINGO_RE, message = "The link is not a valid tapingo link"))]
    pub tapingo_url: Option<String>,
    #[validate(length(max = 100))]
    pub classifier: Option<String>,
}

/// Query parameters for facility listing
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct FacilityQuery {
    /// Only facilities of this category
    pub category_id: Option<i32>,
    /// Only facilities on (or off) campus
    pub on_campus: Option<bool>,
    /// Only facilities that are currently open (true) or closed (false)
    pub open_now: Option<bool>,
}

/// Query parameters for the status endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StatusQuery {
    /// Evaluate at this instant (RFC 3339) instead of now
    pub at: Option<String>,
}

/// Derive a URL slug from a facility name: ASCII lowercase, accents
/// stripped, runs of other characters collapsed into '-'
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.nfkd().filter(|c| c.is_ascii()) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c != '\'' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "facility".to_string()
    } else {
        slug
    }
}

/// Pick the first free slug among `base`, `base-2`, `base-3`, ...
pub fn unique_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
