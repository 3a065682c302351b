mod markdown_vm;
mod roadmap_vm;

pub use markdown_vm::markdown_to_html;
pub use roadmap_vm::{ProgressVm, RoadmapCardVm, map_progress, map_roadmap_cards};
