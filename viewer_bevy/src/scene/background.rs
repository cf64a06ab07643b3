use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::constants::{color_from_hex, PLANET_SEGMENTS, SKY_FAR_FRACTION};

use super::core::MainCamera;
use super::{UpdateSet, ViewerSettings};

/// Optional textured sky sphere centred on the camera.
pub struct BackgroundPlugin;

#[derive(Resource)]
struct SkyTexture {
    image: Handle<Image>,
    sky: Entity,
    path: String,
}

#[derive(Component)]
struct SkySphere;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_sky)
            .add_systems(
                Update,
                (watch_sky_texture.run_if(resource_exists::<SkyTexture>), follow_camera)
                    .in_set(UpdateSet::Visuals),
            );
    }
}

pub(crate) fn sky_radius(far: f32) -> f32 {
    far * SKY_FAR_FRACTION
}

fn spawn_sky(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(path) = settings.background.texture.clone() else {
        return;
    };

    let image: Handle<Image> = asset_server.load(path.clone());
    let mesh = meshes.add(
        Sphere::new(sky_radius(settings.camera.far))
            .mesh()
            .uv(PLANET_SEGMENTS * 2, PLANET_SEGMENTS),
    );
    // Seen from inside: cull the outward faces.
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(image.clone()),
        unlit: true,
        cull_mode: Some(Face::Front),
        ..default()
    });

    let sky = commands
        .spawn((
            Name::new("Sky"),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            SkySphere,
        ))
        .id();

    info!("Loading background {path}");
    commands.insert_resource(SkyTexture { image, sky, path });
}

/// Drop the sky and fall back to a flat clear color if the texture cannot load.
fn watch_sky_texture(
    mut commands: Commands,
    sky: Res<SkyTexture>,
    settings: Res<ViewerSettings>,
    asset_server: Res<AssetServer>,
) {
    match asset_server.load_state(sky.image.id()) {
        LoadState::Loaded => {
            debug!("Background {} loaded", sky.path);
            commands.remove_resource::<SkyTexture>();
        }
        LoadState::Failed(err) => {
            warn!("Failed to load background {}: {err}", sky.path);
            commands.entity(sky.sky).despawn();
            commands.insert_resource(ClearColor(color_from_hex(
                settings.background.fallback_color,
            )));
            commands.remove_resource::<SkyTexture>();
        }
        LoadState::NotLoaded | LoadState::Loading => {}
    }
}

fn follow_camera(
    q_camera: Query<&Transform, (With<MainCamera>, Without<SkySphere>)>,
    mut q_sky: Query<&mut Transform, With<SkySphere>>,
) {
    let Ok(camera) = q_camera.single() else {
        return;
    };
    for mut sky in &mut q_sky {
        if sky.translation != camera.translation {
            sky.translation = camera.translation;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use galaxy_shared::config::ViewerConfig;

    use super::*;

    #[test]
    fn sky_stays_inside_far_plane() {
        for far in [1000.0, 10_000.0] {
            let r = sky_radius(far);
            assert!(r < far);
            assert!(r > far * 0.5);
        }
    }

    #[test]
    fn sky_tracks_camera() {
        let mut app = App::new();
        app.add_systems(Update, follow_camera);
        app.world_mut()
            .spawn((Transform::from_xyz(3.0, 4.0, 5.0), MainCamera));
        let sky = app
            .world_mut()
            .spawn((Transform::default(), SkySphere))
            .id();

        app.update();

        assert_eq!(
            app.world().get::<Transform>(sky).unwrap().translation,
            Vec3::new(3.0, 4.0, 5.0)
        );
    }

    #[test]
    fn missing_texture_drops_sky_and_uses_fallback_color() {
        const MISSING: &str = "missing/sky.png";
        let mut config = ViewerConfig::galaxy();
        config.background.texture = Some(MISSING.to_string());
        let fallback = color_from_hex(config.background.fallback_color);

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .insert_resource(ViewerSettings(config))
            .add_systems(
                Update,
                watch_sky_texture.run_if(resource_exists::<SkyTexture>),
            );

        let image = app.world().resource::<AssetServer>().load::<Image>(MISSING);
        let sky = app.world_mut().spawn((Transform::default(), SkySphere)).id();
        app.insert_resource(SkyTexture {
            image,
            sky,
            path: MISSING.to_string(),
        });

        // Loading runs on the IO task pool.
        for _ in 0..400 {
            app.update();
            if !app.world().contains_resource::<SkyTexture>() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        let world = app.world();
        assert!(!world.contains_resource::<SkyTexture>());
        assert!(world.get_entity(sky).is_err());
        assert_eq!(world.resource::<ClearColor>().0, fallback);
    }
}
