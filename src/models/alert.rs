//! Alert model (time-bounded notices shown to clients)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::UrgencyTag;

/// Alert record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Alert {
    pub id: i32,
    pub urgency_tag: UrgencyTag,
    pub subject: String,
    pub body: String,
    /// Reference URL
    pub url: Option<String>,
    /// Alert is served strictly after this instant
    pub start_datetime: DateTime<Utc>,
    /// Alert is served strictly before this instant
    pub end_datetime: DateTime<Utc>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Alert with its activity flag, as returned by the listing endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    pub active: bool,
}

/// Create alert request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlert {
    pub urgency_tag: Option<UrgencyTag>,
    #[validate(length(min = 1, max = 130, message = "Subject must be 1 to 130 characters"))]
    pub subject: String,
    pub body: String,
    #[validate(url(message = "Invalid reference URL"))]
    pub url: Option<String>,
    /// Start instant (RFC 3339)
    pub start_datetime: String,
    /// End instant (RFC 3339)
    pub end_datetime: String,
}

/// Update alert request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAlert {
    pub urgency_tag: Option<UrgencyTag>,
    #[validate(length(min = 1, max = 130, message = "Subject must be 1 to 130 characters"))]
    pub subject: Option<String>,
    pub body: Option<String>,
    #[validate(url(message = "Invalid reference URL"))]
    pub url: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
}

/// Query parameters for alert listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AlertQuery {
    /// Include inactive alerts
    pub all: Option<bool>,
}
