use std::sync::Arc;

use roadmap_core::flowchart::build_graph;
use roadmap_core::model::{Credentials, Roadmap, RoadmapId, Section, SkillLevel};
use roadmap_core::time::{fixed_clock, fixed_now};
use services::{
    AuthService, MemoryBackend, ProgressService, RoadmapService, RoadmapStore,
};

fn frontend_roadmap() -> Roadmap {
    Roadmap::new(
        RoadmapId::generate(),
        "Frontend Developer",
        None,
        vec![
            Section::new("Basics", vec!["HTML".into(), "CSS".into()]).unwrap(),
            Section::new("Frameworks", vec!["React".into()]).unwrap(),
        ],
        Vec::new(),
        fixed_now(),
    )
    .unwrap()
}

#[tokio::test]
async fn progress_flow_marks_topics_and_derives_level() {
    let backend = Arc::new(MemoryBackend::new(fixed_clock()));
    let roadmap = frontend_roadmap();
    backend.save_roadmap(&roadmap).await.unwrap();

    let roadmaps = RoadmapService::new(fixed_clock(), Arc::clone(&backend) as _);
    let progress = ProgressService::new(fixed_clock(), Arc::clone(&backend) as _);

    let fetched = roadmaps.get(roadmap.id()).await.unwrap().unwrap();
    assert_eq!(fetched.total_topics(), 3);

    assert!(progress.mark_topic_complete("HTML").await.unwrap());
    assert!(progress.mark_topic_complete("CSS").await.unwrap());
    assert!(!progress.mark_topic_complete("HTML").await.unwrap());

    let snapshot = progress.snapshot().await.unwrap();
    assert_eq!(snapshot.completed_within(&fetched), 2);
    assert_eq!(snapshot.percent_complete(&fetched), 66);
    assert_eq!(snapshot.derived_level(&fetched), SkillLevel::Intermediate);

    // Completion state flows into the rendered graph.
    let graph = build_graph(fetched.sections(), snapshot.completed_topics());
    let html_node = graph
        .nodes
        .iter()
        .find(|node| node.label == "HTML")
        .unwrap();
    assert!(html_node.completed);
    let react_node = graph
        .nodes
        .iter()
        .find(|node| node.label == "React")
        .unwrap();
    assert!(!react_node.completed);
}

#[tokio::test]
async fn regeneration_flow_requires_a_session_and_inserts_a_record() {
    let backend = Arc::new(MemoryBackend::new(fixed_clock()));
    backend.seed_account("ada@example.com", "secret1");
    let roadmap = frontend_roadmap();
    backend.save_roadmap(&roadmap).await.unwrap();

    let roadmaps = RoadmapService::new(fixed_clock(), Arc::clone(&backend) as _);
    let auth = AuthService::new(Arc::clone(&backend) as _);

    assert!(!auth.is_signed_in());
    let credentials = Credentials::new("ada@example.com", "secret1").unwrap();
    auth.sign_in(&credentials).await.unwrap();
    assert!(auth.is_signed_in());

    let sections = vec![
        Section::new("Rebuilt Basics", vec!["Semantic HTML".into()]).unwrap(),
        Section::new("Rebuilt Frameworks", vec!["React".into(), "Signals".into()]).unwrap(),
    ];
    let regenerated = roadmaps.save_regenerated(&roadmap, sections).await.unwrap();

    assert_ne!(regenerated.id(), roadmap.id());
    assert_eq!(regenerated.title(), roadmap.title());

    // Newest first, and the original is still there.
    let listed = roadmaps.list(10).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), regenerated.id());
    assert_eq!(listed[1].id(), roadmap.id());
}
