use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("resource title cannot be empty")]
    EmptyTitle,

    #[error("resource rating must be between 0 and 5")]
    InvalidRating,

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}

//
// ─── RESOURCE ──────────────────────────────────────────────────────────────────
//

/// An external learning resource attached to a roadmap (course, article, doc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    title: String,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    url: Url,
}

impl Resource {
    /// Creates a resource, validating title, rating bounds, and URL.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` if the title is blank, the rating falls
    /// outside `0..=5`, or the URL does not parse.
    pub fn new(
        title: impl Into<String>,
        platform: Option<String>,
        rating: Option<f32>,
        url: &str,
    ) -> Result<Self, ResourceError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ResourceError::EmptyTitle);
        }
        if let Some(rating) = rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(ResourceError::InvalidRating);
            }
        }
        let url = Url::parse(url)?;
        Ok(Self {
            title,
            platform,
            rating,
            url,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}
