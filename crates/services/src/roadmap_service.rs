use std::sync::Arc;

use roadmap_core::Clock;
use roadmap_core::model::{Roadmap, RoadmapId, Section};

use crate::backend::RoadmapStore;
use crate::error::RoadmapServiceError;

/// Coordinates roadmap reads and regeneration writes over the backend.
pub struct RoadmapService {
    clock: Clock,
    store: Arc<dyn RoadmapStore>,
}

impl RoadmapService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn RoadmapStore>) -> Self {
        Self { clock, store }
    }

    /// Fetch one roadmap; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Backend` on backend failures.
    pub async fn get(&self, id: RoadmapId) -> Result<Option<Roadmap>, RoadmapServiceError> {
        Ok(self.store.get_roadmap(id).await?)
    }

    /// List up to `limit` roadmaps, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Backend` on backend failures.
    pub async fn list(&self, limit: u32) -> Result<Vec<Roadmap>, RoadmapServiceError> {
        Ok(self.store.list_roadmaps(limit).await?)
    }

    /// Save freshly generated sections as a new roadmap record, carrying
    /// over the original's title, description, and resources.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapServiceError::Roadmap` if the carried-over metadata
    /// fails validation, or `Backend` if the record cannot be stored.
    pub async fn save_regenerated(
        &self,
        original: &Roadmap,
        sections: Vec<Section>,
    ) -> Result<Roadmap, RoadmapServiceError> {
        let regenerated = Roadmap::new(
            RoadmapId::generate(),
            original.title(),
            original.description().map(str::to_string),
            sections,
            original.resources().to_vec(),
            self.clock.now(),
        )?;
        self.store.save_roadmap(&regenerated).await?;
        Ok(regenerated)
    }
}
