use engine::{resolve_app_paths, LoopConfig, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::load_tuning;
use super::gameplay;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Demons & Portals Startup ===");

    let assets_dir = match resolve_app_paths() {
        Ok(paths) => {
            info!(root = %paths.root.display(), "project_root_resolved");
            Some(paths.assets_dir)
        }
        Err(error) => {
            warn!(error = %error, "project_root_unresolved");
            None
        }
    };
    let tuning = load_tuning(assets_dir.as_deref());

    AppWiring {
        config: LoopConfig::default(),
        scene: gameplay::build_scene(tuning),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
