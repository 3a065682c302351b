mod credentials;
mod ids;
mod progress;
mod resource;
mod roadmap;

pub use credentials::{Credentials, CredentialsError, MIN_PASSWORD_LEN};
pub use ids::{ParseIdError, RoadmapId};
pub use progress::{LearningPreferences, LearningStyle, SkillLevel, UserProgress};
pub use resource::{Resource, ResourceError};
pub use roadmap::{Roadmap, RoadmapError, Section};
