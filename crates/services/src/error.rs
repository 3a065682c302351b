//! Shared error types for the services crate.

use thiserror::Error;

use roadmap_core::model::RoadmapError;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Classified authentication failures.
///
/// Categories map one-to-one onto distinct user-facing messages in the UI;
/// anything unrecognized lands in `Unexpected` and falls back to a generic
/// message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("this email is already registered")]
    AlreadyRegistered,

    #[error("malformed authentication request")]
    Malformed,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Unexpected(String),
}

/// Errors emitted by `GeneratorService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("roadmap generation is not configured")]
    Disabled,

    #[error("generator returned an empty response")]
    EmptyResponse,

    #[error("generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("generator returned an unusable payload: {0}")]
    BadPayload(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
}

/// Errors emitted by `RoadmapService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoadmapServiceError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}
