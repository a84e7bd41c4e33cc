//! Facilities service (facilities, categories, locations)

use validator::Validate;

use crate::{
    config::FacilitiesConfig,
    error::AppResult,
    models::facility::{
        slugify, unique_slug, Category, CategoryRequest, CreateFacility, CreateLocation, Facility,
        Location, UpdateFacility, UpdateLocation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct FacilitiesService {
    repository: Repository,
    config: FacilitiesConfig,
}

impl FacilitiesService {
    pub fn new(repository: Repository, config: FacilitiesConfig) -> Self {
        Self { repository, config }
    }

    // ---- Facilities ----
    pub async fn create(&self, data: &CreateFacility) -> AppResult<Facility> {
        data.validate()?;

        let base = slugify(&data.name);
        let taken = self.repository.facilities.slugs_like(&base).await?;
        let slug = unique_slug(&base, &taken);

        let logo_url = data
            .logo_url
            .as_deref()
            .unwrap_or(&self.config.default_logo_url);

        let facility = self.repository.facilities.create(data, &slug, logo_url).await?;
        tracing::info!(facility_id = facility.id, "Created facility '{}'", facility.slug);
        Ok(facility)
    }

    pub async fn update(&self, slug: &str, data: &UpdateFacility) -> AppResult<Facility> {
        data.validate()?;
        let facility = self.repository.facilities.get_by_slug(slug).await?;
        self.repository.facilities.update(facility.id, data).await
    }

    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let facility = self.repository.facilities.get_by_slug(slug).await?;
        self.repository.facilities.delete(facility.id).await
    }

    /// Attach a special schedule to a facility
    pub async fn attach_special(&self, slug: &str, schedule_id: i32) -> AppResult<()> {
        let facility = self.repository.facilities.get_by_slug(slug).await?;
        let schedule = self.repository.schedules.get_by_id(schedule_id).await?;
        if !schedule.is_special() {
            tracing::warn!(
                facility = %slug,
                schedule_id,
                "Attached special schedule has no validity window and will never take effect"
            );
        }
        self.repository.facilities.attach_special(facility.id, schedule.id).await
    }

    pub async fn detach_special(&self, slug: &str, schedule_id: i32) -> AppResult<()> {
        let facility = self.repository.facilities.get_by_slug(slug).await?;
        self.repository.facilities.detach_special(facility.id, schedule_id).await
    }

    // ---- Categories ----
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, data: &CategoryRequest) -> AppResult<Category> {
        data.validate()?;
        self.repository.categories.create(&data.name).await
    }

    pub async fn rename_category(&self, id: i32, data: &CategoryRequest) -> AppResult<Category> {
        data.validate()?;
        self.repository.categories.rename(id, &data.name).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }

    // ---- Locations ----
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list().await
    }

    pub async fn get_location(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    pub async fn create_location(&self, data: &CreateLocation) -> AppResult<Location> {
        data.validate()?;
        self.repository.locations.create(data).await
    }

    pub async fn update_location(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        data.validate()?;
        self.repository.locations.update(id, data).await
    }

    pub async fn delete_location(&self, id: i32) -> AppResult<()> {
        self.repository.locations.delete(id).await
    }
}
