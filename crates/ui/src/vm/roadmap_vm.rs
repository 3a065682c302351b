use roadmap_core::model::{Roadmap, RoadmapId, UserProgress};

/// UI-ready representation of a roadmap for the home grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadmapCardVm {
    pub id: RoadmapId,
    pub title: String,
    pub summary: String,
    pub created_label: String,
    pub percent: u8,
}

/// UI-ready progress header for a single roadmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub level_label: String,
}

/// Convert domain roadmaps into home-grid cards.
#[must_use]
pub fn map_roadmap_cards(roadmaps: &[Roadmap], progress: &UserProgress) -> Vec<RoadmapCardVm> {
    roadmaps
        .iter()
        .map(|roadmap| RoadmapCardVm {
            id: roadmap.id(),
            title: roadmap.title().to_string(),
            summary: format_summary(roadmap),
            created_label: roadmap.created_at().format("%b %e, %Y").to_string(),
            percent: progress.percent_complete(roadmap),
        })
        .collect()
}

/// Build the progress header for one roadmap.
#[must_use]
pub fn map_progress(roadmap: &Roadmap, progress: &UserProgress) -> ProgressVm {
    ProgressVm {
        completed: progress.completed_within(roadmap),
        total: roadmap.total_topics(),
        percent: progress.percent_complete(roadmap),
        level_label: progress.derived_level(roadmap).to_string(),
    }
}

fn format_summary(roadmap: &Roadmap) -> String {
    let sections = roadmap.sections().len();
    let topics = roadmap.total_topics();
    let section_word = if sections == 1 { "stage" } else { "stages" };
    let topic_word = if topics == 1 { "topic" } else { "topics" };
    format!("{sections} {section_word}, {topics} {topic_word}")
}
