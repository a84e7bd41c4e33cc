//! Alerts service

use chrono::{DateTime, FixedOffset, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::alert::{Alert, AlertView, CreateAlert, UpdateAlert},
    repository::{alerts::AlertFields, Repository},
    status::input::parse_utc_instant,
};

/// Check the active interval of an alert is not empty
fn check_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if start >= end {
        return Err(AppError::Validation(
            "start_datetime must be before end_datetime".to_string(),
        ));
    }
    Ok(())
}

fn fields_from_create(data: &CreateAlert) -> AppResult<AlertFields> {
    data.validate()?;
    let start = parse_utc_instant("start_datetime", &data.start_datetime)?;
    let end = parse_utc_instant("end_datetime", &data.end_datetime)?;
    check_interval(start, end)?;

    Ok(AlertFields {
        urgency_tag: data.urgency_tag.unwrap_or_default(),
        subject: data.subject.clone(),
        body: data.body.clone(),
        url: data.url.clone(),
        start_datetime: start,
        end_datetime: end,
    })
}

/// Apply an update on top of the stored alert
fn fields_from_update(current: Alert, data: &UpdateAlert) -> AppResult<AlertFields> {
    data.validate()?;
    let start = match &data.start_datetime {
        Some(s) => parse_utc_instant("start_datetime", s)?,
        None => current.start_datetime,
    };
    let end = match &data.end_datetime {
        Some(s) => parse_utc_instant("end_datetime", s)?,
        None => current.end_datetime,
    };
    check_interval(start, end)?;

    Ok(AlertFields {
        urgency_tag: data.urgency_tag.unwrap_or(current.urgency_tag),
        subject: data.subject.clone().unwrap_or(current.subject),
        body: data.body.clone().unwrap_or(current.body),
        url: data.url.clone().or(current.url),
        start_datetime: start,
        end_datetime: end,
    })
}

#[derive(Clone)]
pub struct AlertsService {
    repository: Repository,
}

impl AlertsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Alerts with their activity at `now`; inactive ones only when `all`
    pub async fn list(&self, all: bool, now: &DateTime<FixedOffset>) -> AppResult<Vec<AlertView>> {
        let alerts = if all {
            self.repository.alerts.list().await?
        } else {
            self.repository.alerts.list_not_ended(now.with_timezone(&Utc)).await?
        };

        Ok(alerts
            .into_iter()
            .map(|alert| {
                let active = alert.is_active(now);
                AlertView { alert, active }
            })
            .filter(|view| all || view.active)
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Alert> {
        self.repository.alerts.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateAlert) -> AppResult<Alert> {
        let fields = fields_from_create(data)?;
        let alert = self.repository.alerts.create(&fields).await?;
        tracing::info!(alert_id = alert.id, urgency = alert.urgency_tag.as_str(), "Created alert");
        Ok(alert)
    }

    pub async fn update(&self, id: i32, data: &UpdateAlert) -> AppResult<Alert> {
        let current = self.repository.alerts.get_by_id(id).await?;
        let fields = fields_from_update(current, data)?;
        self.repository.alerts.update(id, &fields).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.alerts.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::UrgencyTag;

    fn create_request(start: &str, end: &str) -> CreateAlert {
        CreateAlert {
            urgency_tag: None,
            subject: "Snow closure".to_string(),
            body: "All dining closed".to_string(),
            url: Some("https://example.edu/alerts/snow".to_string()),
            start_datetime: start.to_string(),
            end_datetime: end.to_string(),
        }
    }

    #[test]
    fn test_create_defaults_to_info() {
        let fields = fields_from_create(&create_request("2024-02-01T06:00:00Z", "2024-02-01T18:00:00Z")).unwrap();
        assert_eq!(fields.urgency_tag, UrgencyTag::Info);
        assert_eq!(fields.start_datetime, Utc.with_ymd_and_hms(2024, 2, 1, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_create_rejects_empty_interval() {
        let req = create_request("2024-02-01T06:00:00Z", "2024-02-01T06:00:00Z");
        assert!(matches!(fields_from_create(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let req = create_request("tomorrow", "2024-02-01T06:00:00Z");
        assert!(matches!(fields_from_create(&req), Err(AppError::Validation(_))));

        let mut req = create_request("2024-02-01T06:00:00Z", "2024-02-02T06:00:00Z");
        req.url = Some("not a url".to_string());
        assert!(matches!(fields_from_create(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_merges_with_current() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 6, 0, 0).unwrap();
        let current = Alert {
            id: 3,
            urgency_tag: UrgencyTag::Minor,
            subject: "Holiday hours".to_string(),
            body: "Reduced hours".to_string(),
            url: None,
            start_datetime: start,
            end_datetime: Utc.with_ymd_and_hms(2024, 2, 5, 6, 0, 0).unwrap(),
            created: None,
            modified: None,
        };
        let update = UpdateAlert {
            urgency_tag: Some(UrgencyTag::Major),
            subject: None,
            body: None,
            url: None,
            start_datetime: None,
            end_datetime: Some("2024-02-03T00:00:00Z".to_string()),
        };

        let fields = fields_from_update(current.clone(), &update).unwrap();
        assert_eq!(fields.urgency_tag, UrgencyTag::Major);
        assert_eq!(fields.subject, "Holiday hours");
        assert_eq!(fields.start_datetime, start);
        assert_eq!(fields.end_datetime, Utc.with_ymd_and_hms(2024, 2, 3, 0, 0, 0).unwrap());

        let update = UpdateAlert {
            end_datetime: Some("2024-01-01T00:00:00Z".to_string()),
            ..update
        };
        assert!(fields_from_update(current, &update).is_err());
    }
}
