use std::sync::Arc;

use roadmap_core::model::{Roadmap, RoadmapId, Section};
use roadmap_core::time::{fixed_clock, fixed_now};
use services::{BackendError, MemoryBackend, RoadmapStore};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_roadmap_store};

fn build_roadmap() -> Roadmap {
    Roadmap::new(
        RoadmapId::generate(),
        "Frontend Developer",
        Some("From markup to **frameworks**.".to_string()),
        vec![
            Section::new("Basics", vec!["HTML".into(), "CSS".into()]).unwrap(),
            Section::new("Frameworks", vec!["React".into()]).unwrap(),
        ],
        Vec::new(),
        fixed_now(),
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_roadmap_cards() {
    let mut harness = setup_view_harness(ViewKind::Home);
    let roadmap = build_roadmap();
    harness
        .backend
        .save_roadmap(&roadmap)
        .await
        .expect("save roadmap");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Frontend Developer"),
        "missing card title in {html}"
    );
    assert!(
        html.contains("2 stages, 3 topics"),
        "missing summary in {html}"
    );
    assert!(html.contains("0% complete"), "missing percent in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("No roadmaps yet"),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_renders_stages_and_topics() {
    let roadmap = build_roadmap();
    let mut harness = setup_view_harness(ViewKind::Roadmap(roadmap.id().to_string()));
    harness
        .backend
        .save_roadmap(&roadmap)
        .await
        .expect("save roadmap");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Stage 1: Basics"),
        "missing section label in {html}"
    );
    assert!(html.contains("HTML"), "missing topic label in {html}");
    assert!(html.contains("<svg"), "missing canvas in {html}");
    assert!(
        html.contains("0 of 3 topics complete"),
        "missing progress caption in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_missing_record_shows_not_found() {
    let mut harness = setup_view_harness(ViewKind::Roadmap(RoadmapId::generate().to_string()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Roadmap not found."),
        "missing not-found copy in {html}"
    );
    assert!(
        html.contains("Return to homepage"),
        "missing homepage link in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_bad_id_shows_not_found() {
    let mut harness = setup_view_harness(ViewKind::Roadmap("not-a-uuid".to_string()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Roadmap not found."),
        "missing not-found copy in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_both_tabs() {
    let mut harness = setup_view_harness(ViewKind::Login);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Welcome to Pathway"), "missing title in {html}");
    assert!(html.contains("Log in"), "missing sign-in tab in {html}");
    assert!(html.contains("Sign up"), "missing sign-up tab in {html}");
}

struct FailingStore;

#[async_trait::async_trait]
impl RoadmapStore for FailingStore {
    async fn get_roadmap(&self, _id: RoadmapId) -> Result<Option<Roadmap>, BackendError> {
        Err(BackendError::Connection("fail".to_string()))
    }

    async fn list_roadmaps(&self, _limit: u32) -> Result<Vec<Roadmap>, BackendError> {
        Err(BackendError::Connection("fail".to_string()))
    }

    async fn save_roadmap(&self, _roadmap: &Roadmap) -> Result<(), BackendError> {
        Err(BackendError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_surfaces_backend_failures() {
    let backend = Arc::new(MemoryBackend::new(fixed_clock()));
    let mut harness = setup_view_harness_with_roadmap_store(
        ViewKind::Home,
        backend,
        Some(Arc::new(FailingStore)),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong."),
        "missing error copy in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}
