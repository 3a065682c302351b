use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::roadmap::Roadmap;

//
// ─── SKILL LEVEL ───────────────────────────────────────────────────────────────
//

/// Coarse proficiency bucket derived from completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        };
        write!(f, "{label}")
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown skill level: {other}")),
        }
    }
}

//
// ─── LEARNING STYLE ────────────────────────────────────────────────────────────
//

/// How the user prefers generated content to be framed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    #[default]
    Visual,
    Reading,
    HandsOn,
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Reading => "reading",
            LearningStyle::HandsOn => "hands_on",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPreferences {
    pub learning_style: LearningStyle,
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Per-user learning progress: the set of completed topic labels plus
/// preferences.
///
/// Owned by the backend; this type is the in-memory working copy. The
/// completed set is keyed by topic label, matching how topics are identified
/// in roadmap sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    completed_topics: BTreeSet<String>,
    #[serde(default)]
    preferences: LearningPreferences,
    updated_at: DateTime<Utc>,
}

impl UserProgress {
    /// Creates empty progress stamped at the given time.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            completed_topics: BTreeSet::new(),
            preferences: LearningPreferences::default(),
            updated_at: now,
        }
    }

    #[must_use]
    pub fn completed_topics(&self) -> &BTreeSet<String> {
        &self.completed_topics
    }

    #[must_use]
    pub fn is_completed(&self, label: &str) -> bool {
        self.completed_topics.contains(label)
    }

    #[must_use]
    pub fn preferences(&self) -> LearningPreferences {
        self.preferences
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks a topic complete. Idempotent: re-marking an already-completed
    /// topic is a no-op and leaves `updated_at` untouched.
    ///
    /// Returns true when the topic was newly completed.
    pub fn mark_complete(&mut self, label: &str, now: DateTime<Utc>) -> bool {
        let inserted = self.completed_topics.insert(label.to_string());
        if inserted {
            self.updated_at = now;
        }
        inserted
    }

    pub fn set_preferences(&mut self, preferences: LearningPreferences, now: DateTime<Utc>) {
        self.preferences = preferences;
        self.updated_at = now;
    }

    /// Number of the roadmap's topics present in the completed set.
    #[must_use]
    pub fn completed_within(&self, roadmap: &Roadmap) -> usize {
        roadmap
            .sections()
            .iter()
            .flat_map(|section| section.topics())
            .filter(|topic| self.completed_topics.contains(*topic))
            .count()
    }

    /// Completion percentage for a roadmap, 0 when it has no topics.
    #[must_use]
    pub fn percent_complete(&self, roadmap: &Roadmap) -> u8 {
        let total = roadmap.total_topics();
        if total == 0 {
            return 0;
        }
        let completed = self.completed_within(roadmap);
        let percent = completed * 100 / total;
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    /// Level bucket derived from completion percentage: beginner below 34%,
    /// intermediate below 67%, advanced otherwise.
    #[must_use]
    pub fn derived_level(&self, roadmap: &Roadmap) -> SkillLevel {
        match self.percent_complete(roadmap) {
            0..=33 => SkillLevel::Beginner,
            34..=66 => SkillLevel::Intermediate,
            _ => SkillLevel::Advanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoadmapId, Section};
    use crate::time::fixed_now;
    use chrono::Duration;

    fn build_roadmap() -> Roadmap {
        Roadmap::new(
            RoadmapId::generate(),
            "Frontend",
            None,
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
    fn mark_complete_is_idempotent() {
        let mut progress = UserProgress::new(fixed_now());
        let later = fixed_now() + Duration::hours(1);

        assert!(progress.mark_complete("HTML", fixed_now()));
        assert!(!progress.mark_complete("HTML", later));
        assert_eq!(progress.completed_topics().len(), 1);
        // A repeated mark does not move the timestamp.
        assert_eq!(progress.updated_at(), fixed_now());
    }

    #[test]
    fn percent_counts_only_the_roadmaps_topics() {
        let roadmap = build_roadmap();
        let mut progress = UserProgress::new(fixed_now());
        progress.mark_complete("HTML", fixed_now());
        progress.mark_complete("Unrelated Topic", fixed_now());

        assert_eq!(progress.completed_within(&roadmap), 1);
        assert_eq!(progress.percent_complete(&roadmap), 33);
    }

    #[test]
    fn percent_is_zero_for_topicless_roadmap() {
        let roadmap = Roadmap::new(
            RoadmapId::generate(),
            "Empty",
            None,
            vec![Section::new("Stage", Vec::new()).unwrap()],
            Vec::new(),
            fixed_now(),
        )
        .unwrap();
        let progress = UserProgress::new(fixed_now());
        assert_eq!(progress.percent_complete(&roadmap), 0);
    }

    #[test]
    fn derived_level_steps_through_thirds() {
        let roadmap = build_roadmap();
        let mut progress = UserProgress::new(fixed_now());
        assert_eq!(progress.derived_level(&roadmap), SkillLevel::Beginner);

        progress.mark_complete("HTML", fixed_now());
        progress.mark_complete("CSS", fixed_now());
        assert_eq!(progress.derived_level(&roadmap), SkillLevel::Intermediate);

        progress.mark_complete("React", fixed_now());
        assert_eq!(progress.derived_level(&roadmap), SkillLevel::Advanced);
    }

    #[test]
    fn skill_level_roundtrips_through_display() {
        for level in [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
        ] {
            let parsed: SkillLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }
}
