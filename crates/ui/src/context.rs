use std::sync::Arc;

use roadmap_core::model::RoadmapId;
use services::{AuthService, GeneratorService, ProgressService, RoadmapService};

/// Services the composition root exposes to the UI.
pub trait UiApp: Send + Sync {
    fn roadmaps(&self) -> Arc<RoadmapService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn auth(&self) -> Arc<AuthService>;
    fn generator(&self) -> Arc<GeneratorService>;

    /// Roadmap to highlight on the home screen, when configured.
    fn default_roadmap_id(&self) -> Option<RoadmapId>;
}

#[derive(Clone)]
pub struct AppContext {
    roadmaps: Arc<RoadmapService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    generator: Arc<GeneratorService>,
    default_roadmap_id: Option<RoadmapId>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            roadmaps: app.roadmaps(),
            progress: app.progress(),
            auth: app.auth(),
            generator: app.generator(),
            default_roadmap_id: app.default_roadmap_id(),
        }
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    #[must_use]
    pub fn default_roadmap_id(&self) -> Option<RoadmapId> {
        self.default_roadmap_id
    }
}

// This context is provided by the application composition root (crates/app).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
