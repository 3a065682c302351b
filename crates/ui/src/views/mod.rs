mod flowchart;
mod home;
mod login;
mod roadmap;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use flowchart::FlowCanvas;
pub use home::HomeView;
pub use login::LoginView;
pub use roadmap::RoadmapView;
pub use state::{ViewError, ViewState, view_state_from_resource};
