use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use rs_render::RenderPlugin;
use rs_sound::SoundPlugin;
use rs_ui::UiPlugin;
use rs_utils::{SceneConfig, mission_assets_root};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod plugins;
mod sim_systems;
mod timing;

#[derive(Parser, Debug)]
#[command(name = "rs-client", about = "Walk the mission room, take a seat and boot the console")]
struct Args {
    /// Scene config (TOML). The built-in room is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `rs_sim=debug,info`.
    #[arg(long, default_value = "info")]
    log: String,

    /// Draw collider boxes and the player sphere.
    #[arg(long)]
    show_colliders: bool,
}

fn main() {
    let args = Args::parse();

    let (filter, bad_filter) = match EnvFilter::try_new(&args.log) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .compact()
        .init();
    if let Some(err) = bad_filter {
        warn!("ignoring --log {:?}: {}", args.log, err);
    }

    info!("Starting rs-client");
    let config = load_config(args.config.as_deref());
    let assets = mission_assets_root();
    info!("asset root {}", assets.display());

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Mission Room".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: assets.to_string_lossy().into_owned(),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(plugins::ClientCorePlugin::new(config, args.show_colliders))
        .add_plugins((RenderPlugin, SoundPlugin, UiPlugin))
        .add_plugins((plugins::ClientSimPlugin, plugins::ClientTimingPlugin))
        .run();
}

fn load_config(path: Option<&std::path::Path>) -> SceneConfig {
    let Some(path) = path else {
        return SceneConfig::default();
    };
    match SceneConfig::load(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; using the built-in room");
            SceneConfig::default()
        }
    }
}
