//! Shared domain enums

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Day of the week, Monday = 0 ... Sunday = 6.
///
/// Serialized and stored as its integer value; anything outside 0..=6 is
/// rejected rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a date or datetime, in that value's own calendar
    pub fn of<D: Datelike>(date: &D) -> Self {
        date.weekday().into()
    }

    pub fn index(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for Weekday {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Weekday::Monday),
            1 => Ok(Weekday::Tuesday),
            2 => Ok(Weekday::Wednesday),
            3 => Ok(Weekday::Thursday),
            4 => Ok(Weekday::Friday),
            5 => Ok(Weekday::Saturday),
            6 => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday {} (expected 0=Monday ... 6=Sunday)", v)),
        }
    }
}

impl From<Weekday> for i16 {
    fn from(d: Weekday) -> Self {
        d as i16
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(d: chrono::Weekday) -> Self {
        match d {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", label)
    }
}

// SQLx conversion for Weekday (SMALLINT column)
impl sqlx::Type<Postgres> for Weekday {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i16 as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Weekday {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let v: i16 = Decode::<Postgres>::decode(value)?;
        Weekday::try_from(v).map_err(|e| e.into())
    }
}

impl Encode<'_, Postgres> for Weekday {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <i16 as Encode<Postgres>>::encode(self.index(), buf)
    }
}

// ---------------------------------------------------------------------------
// UrgencyTag
// ---------------------------------------------------------------------------

/// How loudly an alert should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTag {
    /// Announcements and advertising
    #[default]
    Info,
    /// Expected hours change (holiday hours)
    Minor,
    /// Small scale unexpected hours change
    Major,
    /// University wide unexpected hours change
    Emergency,
}

impl UrgencyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTag::Info => "info",
            UrgencyTag::Minor => "minor",
            UrgencyTag::Major => "major",
            UrgencyTag::Emergency => "emergency",
        }
    }
}

impl std::str::FromStr for UrgencyTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(UrgencyTag::Info),
            "minor" => Ok(UrgencyTag::Minor),
            "major" => Ok(UrgencyTag::Major),
            "emergency" => Ok(UrgencyTag::Emergency),
            _ => Err(format!("Invalid urgency tag: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for UrgencyTag {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for UrgencyTag {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for UrgencyTag {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

// ---------------------------------------------------------------------------
// CampusRegion
// ---------------------------------------------------------------------------

/// Campus a location belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampusRegion {
    Fairfax,
    Arlington,
    FrontRoyal,
    PrinceWilliam,
}

impl CampusRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampusRegion::Fairfax => "fairfax",
            CampusRegion::Arlington => "arlington",
            CampusRegion::FrontRoyal => "front_royal",
            CampusRegion::PrinceWilliam => "prince_william",
        }
    }
}

impl std::str::FromStr for CampusRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fairfax" => Ok(CampusRegion::Fairfax),
            "arlington" => Ok(CampusRegion::Arlington),
            "front_royal" => Ok(CampusRegion::FrontRoyal),
            "prince_william" => Ok(CampusRegion::PrinceWilliam),
            _ => Err(format!("Invalid campus region: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for CampusRegion {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for CampusRegion {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for CampusRegion {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}
