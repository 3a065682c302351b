use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use roadmap_core::model::{Resource, Roadmap, RoadmapId, Section};
use services::{
    AuthBackend, AuthEvent, AuthService, Clock, GeneratorService, HttpBackend, MemoryBackend,
    ProgressService, ProgressStore, RoadmapService, RoadmapStore,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRoadmapId { raw: String },
    InvalidBackendUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRoadmapId { raw } => write!(f, "invalid --roadmap-id value: {raw}"),
            ArgsError::InvalidBackendUrl { raw } => write!(f, "invalid --backend-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--backend-url <url>] [--roadmap-id <uuid>]");
    eprintln!();
    eprintln!("Without --backend-url the app runs against an in-memory backend");
    eprintln!("seeded with a demo roadmap and a demo account (demo@example.com / demo-pass).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PATHWAY_BACKEND_URL, PATHWAY_ROADMAP_ID");
    eprintln!("  PATHWAY_AI_API_KEY, PATHWAY_AI_BASE_URL, PATHWAY_AI_MODEL");
}

struct Args {
    backend_url: Option<String>,
    roadmap_id: Option<RoadmapId>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend_url = std::env::var("PATHWAY_BACKEND_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut roadmap_id = std::env::var("PATHWAY_ROADMAP_ID")
            .ok()
            .and_then(|value| value.parse::<RoadmapId>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend-url" => {
                    let value = require_value(args, "--backend-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBackendUrl { raw: value });
                    }
                    backend_url = Some(value);
                }
                "--roadmap-id" => {
                    let value = require_value(args, "--roadmap-id")?;
                    let parsed = value
                        .parse::<RoadmapId>()
                        .map_err(|_| ArgsError::InvalidRoadmapId { raw: value.clone() })?;
                    roadmap_id = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            backend_url,
            roadmap_id,
        })
    }
}

struct DesktopApp {
    roadmaps: Arc<RoadmapService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    generator: Arc<GeneratorService>,
    default_roadmap_id: Option<RoadmapId>,
}

impl UiApp for DesktopApp {
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

struct Backends {
    roadmaps: Arc<dyn RoadmapStore>,
    progress: Arc<dyn ProgressStore>,
    auth: Arc<dyn AuthBackend>,
    seeded_roadmap_id: Option<RoadmapId>,
}

async fn build_backends(
    backend_url: Option<&str>,
    clock: Clock,
) -> Result<Backends, Box<dyn std::error::Error>> {
    match backend_url {
        Some(url) => {
            let backend = Arc::new(HttpBackend::new(url));
            Ok(Backends {
                roadmaps: Arc::clone(&backend) as _,
                progress: Arc::clone(&backend) as _,
                auth: backend,
                seeded_roadmap_id: None,
            })
        }
        None => {
            let backend = Arc::new(MemoryBackend::new(clock));
            backend.seed_account("demo@example.com", "demo-pass");
            let roadmap = demo_roadmap(clock)?;
            let roadmap_id = roadmap.id();
            let store = Arc::clone(&backend) as Arc<dyn RoadmapStore>;
            store.save_roadmap(&roadmap).await?;
            Ok(Backends {
                roadmaps: store,
                progress: Arc::clone(&backend) as _,
                auth: backend,
                seeded_roadmap_id: Some(roadmap_id),
            })
        }
    }
}

fn demo_roadmap(clock: Clock) -> Result<Roadmap, Box<dyn std::error::Error>> {
    let sections = vec![
        Section::new(
            "Web Fundamentals",
            vec![
                "HTML".to_string(),
                "CSS".to_string(),
                "JavaScript".to_string(),
            ],
        )?,
        Section::new(
            "Frontend Frameworks",
            vec!["React".to_string(), "State Management".to_string()],
        )?,
        Section::new(
            "Professional Skills",
            vec![
                "Testing".to_string(),
                "Accessibility".to_string(),
                "Performance".to_string(),
            ],
        )?,
    ];
    let resources = vec![
        Resource::new(
            "The Odin Project",
            Some("odin".to_string()),
            Some(4.8),
            "https://www.theodinproject.com/",
        )?,
        Resource::new(
            "MDN Web Docs",
            Some("mozilla".to_string()),
            Some(5.0),
            "https://developer.mozilla.org/",
        )?,
    ];
    Ok(Roadmap::new(
        RoadmapId::generate(),
        "Frontend Developer",
        Some("A guided path from **markup basics** to production-grade frontend work.".to_string()),
        sections,
        resources,
        clock.now(),
    )?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = std::env::args().skip(1);
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();
    let backends = build_backends(parsed.backend_url.as_deref(), clock).await?;

    let roadmaps = Arc::new(RoadmapService::new(clock, Arc::clone(&backends.roadmaps)));
    let progress = Arc::new(ProgressService::new(clock, Arc::clone(&backends.progress)));
    let auth = Arc::new(AuthService::new(Arc::clone(&backends.auth)));
    let generator = Arc::new(GeneratorService::from_env());

    if !generator.enabled() {
        eprintln!("roadmap regeneration disabled: PATHWAY_AI_API_KEY is not set");
    }

    // Keep the guard alive for the lifetime of the app; dropping it would
    // silence the log line.
    let auth_log_guard = auth.subscribe(|event| match event {
        AuthEvent::SignedIn(session) => eprintln!("signed in as {}", session.email),
        AuthEvent::SignedOut => eprintln!("signed out"),
    });

    let default_roadmap_id = parsed.roadmap_id.or(backends.seeded_roadmap_id);
    let app = DesktopApp {
        roadmaps,
        progress,
        auth,
        generator,
        default_roadmap_id,
    };

    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev
    // setups. Explicitly disable it so the app doesn't behave like a modal.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Pathway")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    drop(auth_log_guard);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
