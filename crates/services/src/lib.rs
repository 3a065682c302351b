#![forbid(unsafe_code)]

pub mod auth_service;
pub mod backend;
pub mod error;
pub mod generator_service;
pub mod progress_service;
pub mod roadmap_service;

pub use roadmap_core::Clock;

pub use auth_service::{AuthEvent, AuthService, AuthSubscription};
pub use backend::{
    AuthBackend, AuthSession, HttpBackend, MemoryBackend, ProgressStore, RoadmapStore,
};
pub use error::{AuthError, BackendError, GeneratorError, ProgressError, RoadmapServiceError};
pub use generator_service::{GeneratorConfig, GeneratorService};
pub use progress_service::ProgressService;
pub use roadmap_service::RoadmapService;
