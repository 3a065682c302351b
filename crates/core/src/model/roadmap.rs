use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::RoadmapId;
use crate::model::resource::Resource;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoadmapError {
    #[error("roadmap title cannot be empty")]
    EmptyTitle,

    #[error("section title cannot be empty")]
    EmptySectionTitle,
}

//
// ─── SECTION ───────────────────────────────────────────────────────────────────
//

/// A named group of topics within a roadmap.
///
/// Rendered as one header node plus child topic nodes. Topics may be empty;
/// such a section degrades to a header-only stage in the flowchart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    title: String,
    topics: Vec<String>,
}

impl Section {
    /// Creates a section.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError::EmptySectionTitle` if the title is blank.
    pub fn new(title: impl Into<String>, topics: Vec<String>) -> Result<Self, RoadmapError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RoadmapError::EmptySectionTitle);
        }
        Ok(Self { title, topics })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }
}

//
// ─── ROADMAP ───────────────────────────────────────────────────────────────────
//

/// The top-level learning path: an ordered list of sections plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    id: RoadmapId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    sections: Vec<Section>,
    #[serde(default)]
    resources: Vec<Resource>,
    created_at: DateTime<Utc>,
}

impl Roadmap {
    /// Creates a roadmap.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError::EmptyTitle` if the title is blank.
    pub fn new(
        id: RoadmapId,
        title: impl Into<String>,
        description: Option<String>,
        sections: Vec<Section>,
        resources: Vec<Resource>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RoadmapError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RoadmapError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            description,
            sections,
            resources,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> RoadmapId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total number of topics across all sections.
    #[must_use]
    pub fn total_topics(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.topics().len())
            .sum()
    }

    /// Whether any section contains the given topic label.
    #[must_use]
    pub fn contains_topic(&self, label: &str) -> bool {
        self.sections
            .iter()
            .any(|section| section.topics().iter().any(|topic| topic == label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn build_roadmap() -> Roadmap {
        Roadmap::new(
            RoadmapId::generate(),
            "Frontend",
            Some("From zero to hireable".to_string()),
            vec![
                Section::new("Basics", vec!["HTML".into(), "CSS".into()]).unwrap(),
                Section::new("Advanced", vec!["React".into()]).unwrap(),
            ],
            Vec::new(),
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn roadmap_counts_topics_across_sections() {
        let roadmap = build_roadmap();
        assert_eq!(roadmap.total_topics(), 3);
    }

    #[test]
    fn roadmap_finds_topics_by_label() {
        let roadmap = build_roadmap();
        assert!(roadmap.contains_topic("CSS"));
        assert!(!roadmap.contains_topic("Docker"));
    }

    #[test]
    fn empty_roadmap_title_is_rejected() {
        let result = Roadmap::new(
            RoadmapId::generate(),
            "  ",
            None,
            Vec::new(),
            Vec::new(),
            fixed_now(),
        );
        assert_eq!(result.unwrap_err(), RoadmapError::EmptyTitle);
    }

    #[test]
    fn empty_section_title_is_rejected() {
        let result = Section::new("", vec!["HTML".into()]);
        assert_eq!(result.unwrap_err(), RoadmapError::EmptySectionTitle);
    }

    #[test]
    fn section_with_no_topics_is_allowed() {
        let section = Section::new("Placeholder", Vec::new()).unwrap();
        assert!(section.topics().is_empty());
    }
}
