mod constants;
mod coord;
mod scene;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_transform_interpolation::prelude::TransformInterpolationPlugin;

use galaxy_shared::catalog::Catalog;
use galaxy_shared::config::{SceneKind, ViewerConfig};
#[cfg(target_arch = "wasm32")]
use galaxy_shared::config::scene_from_query;

use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use scene::{
    BackgroundPlugin, BodyPickingPlugin, CameraRigPlugin, CorePlugin, GalaxyPlugin, HudPlugin,
    InputPlugin, MaterialsPlugin, SolarSystemPlugin, StartupNotes,
};

fn main() {
    let mut notes = StartupNotes::default();
    let config = load_config(&mut notes);
    let scene = config.scene;
    let catalog = match scene {
        SceneKind::Galaxy => Some(load_catalog(&mut notes)),
        SceneKind::SolarSystem => None,
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: window_title(scene).to_string(),
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    present_mode: PresentMode::AutoVsync,
                    resizable: true,
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            }),
    )
    .add_plugins(TransformInterpolationPlugin::default())
    .add_plugins(CorePlugin { config, notes })
    .add_plugins(MaterialsPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(BodyPickingPlugin)
    .add_plugins(CameraRigPlugin)
    .add_plugins(BackgroundPlugin)
    .add_plugins(HudPlugin);

    match catalog {
        Some(catalog) => app.add_plugins(GalaxyPlugin { catalog }),
        None => app.add_plugins(SolarSystemPlugin),
    };

    app.run();
}

fn window_title(scene: SceneKind) -> &'static str {
    match scene {
        SceneKind::Galaxy => "Project Galaxy",
        SceneKind::SolarSystem => "Solar System",
    }
}

/// A config file wins over the scene preset; a bad file falls back to the preset.
fn load_config(notes: &mut StartupNotes) -> ViewerConfig {
    let scene = scene_hint(notes);

    let mut config = match config_path() {
        Some(path) => match ViewerConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                notes.0.push(format!("Ignoring config {path}: {err}"));
                ViewerConfig::for_scene(scene)
            }
        },
        None => ViewerConfig::for_scene(scene),
    };

    if let Some(texture) = background_override() {
        config.background.texture = Some(texture);
    }
    config
}

fn load_catalog(notes: &mut StartupNotes) -> Catalog {
    if let Some(path) = catalog_path() {
        match Catalog::load(&path) {
            Ok(catalog) => return catalog,
            Err(err) => notes
                .0
                .push(format!("Ignoring catalog {path}: {err}; using bundled stars")),
        }
    }
    bundled_catalog(notes)
}

fn bundled_catalog(notes: &mut StartupNotes) -> Catalog {
    Catalog::bundled().unwrap_or_else(|err| {
        notes.0.push(format!("Bundled catalog is broken: {err}; the sky will be empty"));
        Catalog { stars: Vec::new() }
    })
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn parse_scene(raw: Option<String>, notes: &mut StartupNotes) -> SceneKind {
    let Some(raw) = raw else {
        return SceneKind::default();
    };
    raw.parse().unwrap_or_else(|err: String| {
        notes.0.push(format!("{err}; falling back to galaxy"));
        SceneKind::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn scene_hint(notes: &mut StartupNotes) -> SceneKind {
    parse_scene(std::env::var("GALAXY_SCENE").ok(), notes)
}

#[cfg(target_arch = "wasm32")]
fn scene_hint(notes: &mut StartupNotes) -> SceneKind {
    let query = web_sys::window().and_then(|w| w.location().search().ok());
    match query.as_deref().and_then(scene_from_query) {
        Some(scene) => scene,
        None => {
            if query.is_some_and(|q| q.contains("scene=")) {
                notes.0.push("Unknown ?scene= value; falling back to galaxy".to_string());
            }
            SceneKind::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> Option<String> {
    std::env::var("GALAXY_CONFIG").ok().filter(|s| !s.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn config_path() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn catalog_path() -> Option<String> {
    std::env::var("GALAXY_CATALOG").ok().filter(|s| !s.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn catalog_path() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn background_override() -> Option<String> {
    std::env::var("GALAXY_BACKGROUND").ok().filter(|s| !s.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn background_override() -> Option<String> {
    None
}
