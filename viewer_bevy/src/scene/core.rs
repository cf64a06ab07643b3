use std::ops::Deref;

use bevy::prelude::*;
use bevy::window::WindowResized;

use galaxy_shared::config::ViewerConfig;
use galaxy_shared::orbit_rig::OrbitRig;

use crate::constants::{
    color_from_hex, Colors, AMBIENT_BRIGHTNESS_SCALE, AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY,
    DIRECTIONAL_LUX_SCALE, FIXED_HZ,
};
use crate::coord::to_shared;

use super::camera::OrbitController;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Pick,
    Camera,
    Visuals,
    Hud,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Orbit,
}

/// Problems found while loading configuration before logging was up.
#[derive(Resource, Default, Clone)]
pub struct StartupNotes(pub Vec<String>);

#[derive(Resource, Clone)]
pub(crate) struct ViewerSettings(pub(crate) ViewerConfig);

impl Deref for ViewerSettings {
    type Target = ViewerConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct CorePlugin {
    pub config: ViewerConfig,
    pub notes: StartupNotes,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let clear = if self.config.background.texture.is_some() {
            Colors::SPACE
        } else {
            self.config.background.fallback_color
        };

        app.insert_resource(ViewerSettings(self.config.clone()))
            .insert_resource(self.notes.clone())
            .insert_resource(ClearColor(color_from_hex(clear)))
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::Pick,
                    UpdateSet::Camera,
                    UpdateSet::Visuals,
                    UpdateSet::Hud,
                )
                    .chain(),
            )
            .configure_sets(FixedUpdate, FixedSet::Orbit)
            .add_systems(Startup, (log_startup_notes, setup_camera, setup_lights).chain())
            .add_systems(Update, fit_camera_to_window.in_set(UpdateSet::Input));
    }
}

fn log_startup_notes(notes: Res<StartupNotes>, settings: Res<ViewerSettings>) {
    for note in &notes.0 {
        warn!("{note}");
    }
    info!("Starting {} scene", settings.scene);
}

fn setup_camera(mut commands: Commands, settings: Res<ViewerSettings>) {
    let cam = &settings.camera;
    let eye = Vec3::from_array(cam.position);
    let target = Vec3::from_array(cam.look_at);

    // WebGL2 MSAA is expensive (often CPU fallback).
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            ..default()
        }),
        Transform::from_translation(eye).looking_at(target, Vec3::Y),
        AmbientLight {
            color: color_from_hex(Colors::LIGHT),
            brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_SCALE,
            ..default()
        },
        msaa,
        MainCamera,
        OrbitController::new(OrbitRig::looking_at(
            to_shared(eye),
            to_shared(target),
            settings.controls,
        )),
    ));
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: color_from_hex(Colors::LIGHT),
            illuminance: DIRECTIONAL_INTENSITY * DIRECTIONAL_LUX_SCALE,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keep the projection aspect in step with the window.
fn fit_camera_to_window(
    mut resized: MessageReader<WindowResized>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };

    if last.width <= 0.0 || last.height <= 0.0 {
        return;
    }

    for mut projection in &mut q_projection {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = aspect_ratio(last.width, last.height);
        }
    }
    debug!("Window resized to {}x{}", last.width, last.height);
}

pub(crate) fn aspect_ratio(width: f32, height: f32) -> f32 {
    width / height.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_follows_window() {
        assert!((aspect_ratio(1280.0, 720.0) - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(aspect_ratio(800.0, 800.0), 1.0);
    }

    #[test]
    fn aspect_ratio_guards_collapsed_height() {
        assert_eq!(aspect_ratio(300.0, 0.0), 300.0);
    }

    #[test]
    fn resize_message_updates_camera_aspect() {
        let mut app = App::new();
        app.add_message::<WindowResized>()
            .add_systems(Update, fit_camera_to_window);

        let camera = app
            .world_mut()
            .spawn((
                Projection::Perspective(PerspectiveProjection::default()),
                MainCamera,
            ))
            .id();
        let window = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(WindowResized {
            window,
            width: 1000.0,
            height: 500.0,
        });
        app.update();

        let projection = app.world().get::<Projection>(camera).unwrap();
        match projection {
            Projection::Perspective(p) => assert!((p.aspect_ratio - 2.0).abs() < 1e-6),
            _ => panic!("expected perspective projection"),
        }
    }
}
