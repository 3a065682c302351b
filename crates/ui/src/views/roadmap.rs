use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use roadmap_core::flowchart::{FlowNode, build_graph};
use roadmap_core::model::{Roadmap, RoadmapId, UserProgress};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::flowchart::FlowCanvas;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use services::{ProgressError, ProgressService};

use crate::vm::{map_progress, markdown_to_html};

#[derive(Clone, Debug, PartialEq)]
struct RoadmapData {
    roadmap: Roadmap,
    progress: UserProgress,
}

/// Which topic (if any) a node click should complete.
///
/// Section headers are structural and ignore clicks.
fn selection_target(node: &FlowNode) -> Option<String> {
    node.is_topic().then(|| node.label.clone())
}

/// Persist a topic completion and produce the acknowledgment notice.
///
/// The write is idempotent; re-clicking an already-completed topic still
/// acknowledges, it just skips the backend write.
async fn mark_and_acknowledge(
    progress: &ProgressService,
    label: &str,
) -> Result<String, ProgressError> {
    progress.mark_topic_complete(label).await?;
    Ok(format!("Topic completed! Great job finishing \"{label}\"."))
}

#[component]
pub fn RoadmapView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let roadmaps = ctx.roadmaps();
    let progress_service = ctx.progress();
    let auth = ctx.auth();
    let generator = ctx.generator();

    let roadmap_id = id.parse::<RoadmapId>().ok();
    let mut notice = use_signal(|| None::<String>);
    let mut regenerating = use_signal(|| false);

    let roadmaps_for_load = roadmaps.clone();
    let progress_for_load = progress_service.clone();
    let resource = use_resource(move || {
        let roadmaps = roadmaps_for_load.clone();
        let progress = progress_for_load.clone();
        async move {
            let Some(roadmap_id) = roadmap_id else {
                return Err(ViewError::NotFound);
            };
            let roadmap = roadmaps
                .get(roadmap_id)
                .await
                .map_err(|_| ViewError::Unknown)?
                .ok_or(ViewError::NotFound)?;
            let snapshot = progress.snapshot().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(RoadmapData {
                roadmap,
                progress: snapshot,
            })
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page roadmap-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotFound) => rsx! {
                    p { class: "view-error", "Roadmap not found." }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Return to homepage" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "view-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => {
                    let graph = build_graph(data.roadmap.sections(), data.progress.completed_topics());
                    let progress_vm = map_progress(&data.roadmap, &data.progress);
                    let description_html = data
                        .roadmap
                        .description()
                        .map(markdown_to_html)
                        .unwrap_or_default();

                    let progress_for_click = progress_service.clone();
                    let on_node_click = move |node: FlowNode| {
                        let Some(label) = selection_target(&node) else {
                            return;
                        };
                        let progress = Arc::clone(&progress_for_click);
                        let mut resource = resource;
                        spawn(async move {
                            match mark_and_acknowledge(&progress, &label).await {
                                Ok(message) => {
                                    notice.set(Some(message));
                                    resource.restart();
                                }
                                Err(_) => notice.set(Some(
                                    "Could not save your progress. Please try again.".to_string(),
                                )),
                            }
                        });
                    };

                    let roadmap_for_regen = data.roadmap.clone();
                    let progress_snapshot = data.progress.clone();
                    let roadmaps_for_regen = roadmaps.clone();
                    let auth_for_regen = auth.clone();
                    let generator_for_regen = generator.clone();
                    let regenerate = move |_| {
                        if regenerating() {
                            return;
                        }
                        if auth_for_regen.current_session().is_none() {
                            notice.set(Some(
                                "You must be logged in to regenerate roadmaps.".to_string(),
                            ));
                            return;
                        }
                        if !generator_for_regen.enabled() {
                            notice.set(Some(
                                "Roadmap regeneration is not configured on this device.".to_string(),
                            ));
                            return;
                        }
                        let roadmap = roadmap_for_regen.clone();
                        let level = progress_snapshot.derived_level(&roadmap);
                        let style = progress_snapshot.preferences().learning_style;
                        let generator = Arc::clone(&generator_for_regen);
                        let roadmaps = Arc::clone(&roadmaps_for_regen);
                        spawn(async move {
                            regenerating.set(true);
                            let outcome = async {
                                let sections = generator
                                    .generate(level, roadmap.title(), style)
                                    .await
                                    .map_err(|_| ())?;
                                roadmaps
                                    .save_regenerated(&roadmap, sections)
                                    .await
                                    .map_err(|_| ())
                            }
                            .await;
                            regenerating.set(false);
                            match outcome {
                                Ok(regenerated) => {
                                    notice.set(Some(
                                        "Roadmap regenerated! Your learning path has been updated."
                                            .to_string(),
                                    ));
                                    let _ = navigator.push(Route::Roadmap {
                                        id: regenerated.id().to_string(),
                                    });
                                }
                                Err(()) => notice.set(Some(
                                    "Failed to regenerate roadmap. Please try again.".to_string(),
                                )),
                            }
                        });
                    };

                    let resources = data.roadmap.resources().iter().map(|resource| {
                        let platform = resource.platform().map(str::to_string);
                        let rating_label = resource
                            .rating()
                            .map(|rating| format!("{} {rating:.1}", "★".repeat(rating.round() as usize)));
                        rsx! {
                            li { class: "resource-item",
                                key: "{resource.url()}",
                                a {
                                    class: "resource-link",
                                    href: "{resource.url()}",
                                    target: "_blank",
                                    "{resource.title()}"
                                }
                                if let Some(platform) = platform {
                                    span { class: "resource-platform", "{platform}" }
                                }
                                if let Some(rating_label) = rating_label {
                                    span { class: "resource-rating", "{rating_label}" }
                                }
                            }
                        }
                    });
                    let has_resources = !data.roadmap.resources().is_empty();
                    let regen_label = if regenerating() { "Regenerating..." } else { "Regenerate" };

                    rsx! {
                        header { class: "view-header roadmap-header",
                            div {
                                h2 { class: "view-title", "{data.roadmap.title()}" }
                                if !description_html.is_empty() {
                                    div {
                                        class: "roadmap-description",
                                        dangerous_inner_html: "{description_html}",
                                    }
                                }
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: regenerating(),
                                onclick: regenerate,
                                "{regen_label}"
                            }
                        }
                        if let Some(message) = notice() {
                            div { class: "notice",
                                span { "{message}" }
                                button {
                                    class: "notice-dismiss",
                                    r#type: "button",
                                    onclick: move |_| notice.set(None),
                                    "×"
                                }
                            }
                        }
                        section { class: "progress-panel",
                            div { class: "progress-bar",
                                div {
                                    class: "progress-bar-fill",
                                    style: "width: {progress_vm.percent}%",
                                }
                            }
                            p { class: "progress-caption",
                                "{progress_vm.completed} of {progress_vm.total} topics complete ({progress_vm.percent}%) · {progress_vm.level_label}"
                            }
                        }
                        FlowCanvas {
                            nodes: graph.nodes,
                            edges: graph.edges,
                            on_node_click,
                        }
                        if has_resources {
                            section { class: "resource-panel",
                                h3 { class: "resource-title", "Top Courses" }
                                ul { class: "resource-list",
                                    {resources}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
