//! Facility status service
//!
//! Samples the reference clock once per request and hands that single
//! instant to every evaluation the request triggers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    error::{AppError, AppResult},
    models::facility::{
        FacilityDetails, FacilityQuery, FacilityStatusResponse, FacilityWithStatus, OpenStatus,
    },
    repository::Repository,
    status,
};

/// Read access to facilities and their schedules
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacilityStore: Send + Sync {
    async fn facility_details(&self, slug: &str) -> AppResult<FacilityDetails>;

    async fn list_facility_details(&self, query: &FacilityQuery) -> AppResult<Vec<FacilityDetails>>;
}

#[async_trait]
impl FacilityStore for Repository {
    async fn facility_details(&self, slug: &str) -> AppResult<FacilityDetails> {
        let facility = self.facilities.get_by_slug(slug).await?;
        self.facilities.details(facility).await
    }

    async fn list_facility_details(&self, query: &FacilityQuery) -> AppResult<Vec<FacilityDetails>> {
        let facilities = self.facilities.list(query).await?;
        let mut details = Vec::with_capacity(facilities.len());
        for facility in facilities {
            details.push(self.facilities.details(facility).await?);
        }
        Ok(details)
    }
}

#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn FacilityStore>,
    offset: FixedOffset,
}

impl StatusService {
    pub fn new(store: Arc<dyn FacilityStore>, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    /// Current instant on the reference clock
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Express an instant on the reference clock
    pub fn on_reference_clock(&self, instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Evaluate one facility. A broken schedule setup yields `Unknown`
    /// instead of an error so listings keep working.
    pub fn evaluate(&self, details: FacilityDetails, now: &DateTime<FixedOffset>) -> FacilityWithStatus {
        match status::resolve(&details, now) {
            Ok(decision) => {
                tracing::debug!(
                    facility = %details.facility.slug,
                    choice = ?decision.choice,
                    open = decision.open,
                    "Resolved facility status"
                );
                FacilityWithStatus {
                    details,
                    status: decision.open.into(),
                    active_schedule: Some(decision.choice),
                }
            }
            Err(e) => {
                tracing::warn!(facility = %details.facility.slug, "Status unknown: {}", e);
                FacilityWithStatus {
                    details,
                    status: OpenStatus::Unknown,
                    active_schedule: None,
                }
            }
        }
    }

    /// List facilities with their status at a single sampled instant
    pub async fn list_facilities(&self, query: &FacilityQuery) -> AppResult<Vec<FacilityWithStatus>> {
        let now = self.now();
        let details = self.store.list_facility_details(query).await?;

        let facilities = details
            .into_iter()
            .map(|d| self.evaluate(d, &now))
            .filter(|f| match query.open_now {
                Some(true) => f.status == OpenStatus::Open,
                Some(false) => f.status == OpenStatus::Closed,
                None => true,
            })
            .collect();
        Ok(facilities)
    }

    pub async fn get_facility(&self, slug: &str) -> AppResult<FacilityWithStatus> {
        let now = self.now();
        let details = self.store.facility_details(slug).await?;
        Ok(self.evaluate(details, &now))
    }

    /// Status of one facility at `at`, or now
    pub async fn facility_status(
        &self,
        slug: &str,
        at: Option<DateTime<FixedOffset>>,
    ) -> AppResult<FacilityStatusResponse> {
        let now = at.map_or_else(|| self.now(), |instant| self.on_reference_clock(instant));
        let details = self.store.facility_details(slug).await?;

        let (status, active_schedule) = match status::resolve(&details, &now) {
            Ok(decision) => (decision.open.into(), Some(decision.choice)),
            Err(AppError::Configuration(msg)) => {
                tracing::warn!(facility = %slug, "Status unknown: {}", msg);
                (OpenStatus::Unknown, None)
            }
            Err(e) => return Err(e),
        };

        Ok(FacilityStatusResponse {
            slug: details.facility.slug,
            status,
            active_schedule,
            evaluated_at: now,
        })
    }
}
