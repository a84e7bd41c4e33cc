//! Business logic services

pub mod alerts;
pub mod facilities;
pub mod schedules;
pub mod status;

use std::sync::Arc;

use chrono::FixedOffset;

use crate::{config::FacilitiesConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub facilities: facilities::FacilitiesService,
    pub schedules: schedules::SchedulesService,
    pub alerts: alerts::AlertsService,
    pub status: status::StatusService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, facilities_config: FacilitiesConfig, clock_offset: FixedOffset) -> Self {
        Self {
            facilities: facilities::FacilitiesService::new(repository.clone(), facilities_config),
            schedules: schedules::SchedulesService::new(repository.clone()),
            alerts: alerts::AlertsService::new(repository.clone()),
            status: status::StatusService::new(Arc::new(repository.clone()), clock_offset),
            repository,
        }
    }
}
