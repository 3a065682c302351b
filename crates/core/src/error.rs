use thiserror::Error;

use crate::model::{CredentialsError, ResourceError, RoadmapError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}
