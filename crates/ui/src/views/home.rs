use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{RoadmapCardVm, map_roadmap_cards};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<RoadmapCardVm>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let roadmaps = ctx.roadmaps();
    let progress = ctx.progress();
    let default_roadmap_id = ctx.default_roadmap_id();

    let resource = use_resource(move || {
        let roadmaps = roadmaps.clone();
        let progress = progress.clone();
        async move {
            let listed = roadmaps.list(64).await.map_err(|_| ViewError::Unknown)?;
            let snapshot = progress.snapshot().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(HomeData {
                cards: map_roadmap_cards(&listed, &snapshot),
            })
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Roadmaps" }
                p { class: "view-subtitle", "Pick a learning path and keep the streak going." }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
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
                    if data.cards.is_empty() {
                        rsx! {
                            p { class: "home-empty",
                                "No roadmaps yet. Sign in and generate one to get started."
                            }
                        }
                    } else {
                        let cards = data.cards.iter().map(|card| {
                            let highlighted = default_roadmap_id == Some(card.id);
                            let class = if highlighted {
                                "roadmap-card roadmap-card--default"
                            } else {
                                "roadmap-card"
                            };
                            let id = card.id.to_string();
                            rsx! {
                                Link {
                                    key: "{card.id}",
                                    class: "{class}",
                                    to: Route::Roadmap { id },
                                    h3 { class: "roadmap-card-title", "{card.title}" }
                                    p { class: "roadmap-card-summary", "{card.summary}" }
                                    div { class: "roadmap-card-footer",
                                        span { class: "roadmap-card-percent", "{card.percent}% complete" }
                                        span { class: "roadmap-card-created", "Created {card.created_label}" }
                                    }
                                }
                            }
                        });
                        rsx! {
                            div { class: "roadmap-grid",
                                {cards}
                            }
                        }
                    }
                }
            }
        }
    }
}
