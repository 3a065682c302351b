use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use roadmap_core::model::RoadmapId;
use roadmap_core::time::fixed_clock;
use services::{
    AuthService, GeneratorService, MemoryBackend, ProgressService, RoadmapService, RoadmapStore,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, LoginView, RoadmapView};

struct TestApp {
    roadmaps: Arc<RoadmapService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    generator: Arc<GeneratorService>,
    default_roadmap_id: Option<RoadmapId>,
}

impl UiApp for TestApp {
    fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    fn default_roadmap_id(&self) -> Option<RoadmapId> {
        self.default_roadmap_id
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Login,
    Roadmap(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Roadmap(id) => rsx! { RoadmapView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<MemoryBackend>,
    pub auth: Arc<AuthService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let backend = Arc::new(MemoryBackend::new(fixed_clock()));
    setup_view_harness_with_roadmap_store(view, backend, None)
}

pub fn setup_view_harness_with_roadmap_store(
    view: ViewKind,
    backend: Arc<MemoryBackend>,
    roadmap_store: Option<Arc<dyn RoadmapStore>>,
) -> ViewHarness {
    let clock = fixed_clock();
    let roadmap_store =
        roadmap_store.unwrap_or_else(|| Arc::clone(&backend) as Arc<dyn RoadmapStore>);
    let roadmaps = Arc::new(RoadmapService::new(clock, roadmap_store));
    let progress = Arc::new(ProgressService::new(clock, Arc::clone(&backend) as _));
    let auth = Arc::new(AuthService::new(Arc::clone(&backend) as _));
    let auth_for_harness = Arc::clone(&auth);
    let generator = Arc::new(GeneratorService::new(None));

    let app = Arc::new(TestApp {
        roadmaps,
        progress,
        auth,
        generator,
        default_roadmap_id: None,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        backend,
        auth: auth_for_harness,
    }
}
