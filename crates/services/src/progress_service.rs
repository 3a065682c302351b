use std::sync::Arc;

use roadmap_core::Clock;
use roadmap_core::model::{LearningPreferences, UserProgress};

use crate::backend::ProgressStore;
use crate::error::ProgressError;

/// Coordinates completion tracking against the progress backend.
///
/// The backend owns the progress record; this service reads it, applies a
/// change, stamps the clock, and writes back. It does not cache.
pub struct ProgressService {
    clock: Clock,
    store: Arc<dyn ProgressStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn ProgressStore>) -> Self {
        Self { clock, store }
    }

    /// Current progress as the backend knows it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Backend` on backend failures.
    pub async fn snapshot(&self) -> Result<UserProgress, ProgressError> {
        Ok(self.store.load_progress().await?)
    }

    /// Mark a topic complete. Idempotent: an already-completed topic
    /// succeeds without writing to the backend.
    ///
    /// Returns true when the topic was newly completed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Backend` on backend failures.
    pub async fn mark_topic_complete(&self, label: &str) -> Result<bool, ProgressError> {
        let mut progress = self.store.load_progress().await?;
        let newly_completed = progress.mark_complete(label, self.clock.now());
        if newly_completed {
            self.store.store_progress(&progress).await?;
        }
        Ok(newly_completed)
    }

    /// Replace the user's learning preferences.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Backend` on backend failures.
    pub async fn set_preferences(
        &self,
        preferences: LearningPreferences,
    ) -> Result<(), ProgressError> {
        let mut progress = self.store.load_progress().await?;
        progress.set_preferences(preferences, self.clock.now());
        self.store.store_progress(&progress).await?;
        Ok(())
    }
}
