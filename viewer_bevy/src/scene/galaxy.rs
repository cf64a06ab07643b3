use bevy::prelude::*;

use galaxy_shared::catalog::Catalog;
use galaxy_shared::highlight::{
    glow_intensity, highlight_for, HighlightState, SHADER_TIME_RATE,
};

use crate::constants::{GLOW_RADIUS, GLOW_SEGMENTS, STAR_RADIUS, STAR_SEGMENTS};
use crate::coord::to_bevy;

use super::body::{BodyInfo, HoveredBody, Selectable};
use super::camera::{FlyToArrived, FlyToCancelled, FlyToStarted};
use super::materials::{GlowMaterial, PlasmaMaterial};
use super::{UpdateSet, ViewerSettings};

/// Project stars with plasma surfaces and hover halos.
pub struct GalaxyPlugin {
    pub catalog: Catalog,
}

#[derive(Resource, Clone)]
struct GalaxyCatalog(Catalog);

/// Root of one star. Each star owns its materials so highlighting one leaves the rest alone.
#[derive(Component)]
struct StarBody {
    plasma: Handle<PlasmaMaterial>,
    glow: Handle<GlowMaterial>,
    state: HighlightState,
}

/// Counts down to returning a star's swirl to idle once the camera is done with it.
#[derive(Component)]
struct SwirlReset(Timer);

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyCatalog(self.catalog.clone()))
            .add_systems(Startup, spawn_stars)
            .add_systems(
                Update,
                (
                    advance_shader_time,
                    apply_highlight,
                    swirl_on_fly_to,
                    tick_swirl_reset,
                )
                    .in_set(UpdateSet::Visuals),
            );
    }
}

fn spawn_stars(
    mut commands: Commands,
    catalog: Res<GalaxyCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut plasma_materials: ResMut<Assets<PlasmaMaterial>>,
    mut glow_materials: ResMut<Assets<GlowMaterial>>,
) {
    let core_mesh = meshes.add(Sphere::new(STAR_RADIUS).mesh().uv(STAR_SEGMENTS, STAR_SEGMENTS));
    let glow_mesh = meshes.add(Sphere::new(GLOW_RADIUS).mesh().uv(GLOW_SEGMENTS, GLOW_SEGMENTS));

    for star in &catalog.0.stars {
        let plasma = plasma_materials.add(PlasmaMaterial::default());
        let glow = glow_materials.add(GlowMaterial::default());

        let root = commands
            .spawn((
                Name::new(star.name.clone()),
                Transform::from_translation(to_bevy(star.position()))
                    .with_scale(Vec3::splat(star.scale)),
                Visibility::default(),
                BodyInfo::Project(star.clone()),
                StarBody {
                    plasma: plasma.clone(),
                    glow: glow.clone(),
                    state: HighlightState::Idle,
                },
            ))
            .id();

        commands.entity(root).with_children(|parent| {
            parent.spawn((
                Mesh3d(core_mesh.clone()),
                MeshMaterial3d(plasma),
                Selectable {
                    radius: STAR_RADIUS * star.scale,
                    root,
                },
            ));
            parent.spawn((Mesh3d(glow_mesh.clone()), MeshMaterial3d(glow)));
        });
    }

    info!("Spawned {} stars", catalog.0.stars.len());
}

fn advance_shader_time(
    time: Res<Time>,
    q_stars: Query<&StarBody>,
    mut plasma_materials: ResMut<Assets<PlasmaMaterial>>,
    mut glow_materials: ResMut<Assets<GlowMaterial>>,
) {
    let t = time.elapsed_secs() * SHADER_TIME_RATE;
    for star in &q_stars {
        if let Some(m) = plasma_materials.get_mut(&star.plasma) {
            m.params.time = t;
        }
        if let Some(m) = glow_materials.get_mut(&star.glow) {
            m.params.time = t;
        }
    }
}

fn apply_highlight(
    hovered: Res<HoveredBody>,
    mut q_stars: Query<(Entity, &mut StarBody)>,
    mut plasma_materials: ResMut<Assets<PlasmaMaterial>>,
    mut glow_materials: ResMut<Assets<GlowMaterial>>,
) {
    for (entity, mut star) in &mut q_stars {
        let state = highlight_for(entity, hovered.root);
        if state == star.state {
            continue;
        }
        if let Some(m) = plasma_materials.get_mut(&star.plasma) {
            m.set_highlight(state);
        }
        if let Some(m) = glow_materials.get_mut(&star.glow) {
            m.params.intensity = glow_intensity(state);
        }
        star.state = state;
    }
}

fn swirl_on_fly_to(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    mut started: MessageReader<FlyToStarted>,
    mut arrived: MessageReader<FlyToArrived>,
    mut cancelled: MessageReader<FlyToCancelled>,
    q_stars: Query<&StarBody>,
    mut plasma_materials: ResMut<Assets<PlasmaMaterial>>,
) {
    let reset_secs = settings.fly_to.swirl_reset_secs;
    let reset = || SwirlReset(Timer::from_seconds(reset_secs, TimerMode::Once));

    // An abandoned flight winds down like an arrival.
    let finished = arrived
        .read()
        .map(|m| m.root)
        .chain(cancelled.read().map(|m| m.root));
    for root in finished {
        if q_stars.contains(root) {
            commands.entity(root).insert(reset());
        }
    }

    for msg in started.read() {
        let Ok(star) = q_stars.get(msg.root) else {
            continue;
        };
        if let Some(m) = plasma_materials.get_mut(&star.plasma) {
            m.params.zoom_swirl = settings.fly_to.zoom_swirl;
        }
        commands.entity(msg.root).remove::<SwirlReset>();
    }
}

fn tick_swirl_reset(
    mut commands: Commands,
    time: Res<Time>,
    mut q_resets: Query<(Entity, &StarBody, &mut SwirlReset)>,
    mut plasma_materials: ResMut<Assets<PlasmaMaterial>>,
) {
    for (entity, star, mut reset) in &mut q_resets {
        if !reset.0.tick(time.delta()).just_finished() {
            continue;
        }
        if let Some(m) = plasma_materials.get_mut(&star.plasma) {
            m.reset_swirl();
        }
        commands.entity(entity).remove::<SwirlReset>();
    }
}

#[cfg(test)]
mod tests {
    use galaxy_shared::highlight::{HOVER_CORE_COLOR, ZOOM_SWIRL_IDLE};

    use crate::constants::linear_from_hex;

    use super::*;

    fn galaxy_app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<PlasmaMaterial>>()
            .init_resource::<Assets<GlowMaterial>>()
            .insert_resource(GalaxyCatalog(Catalog::bundled().unwrap()))
            .add_systems(Startup, spawn_stars);
        app.update();
        app
    }

    fn stars(app: &mut App) -> Vec<(Entity, Handle<PlasmaMaterial>, Handle<GlowMaterial>)> {
        app.world_mut()
            .query::<(Entity, &StarBody)>()
            .iter(app.world())
            .map(|(e, s)| (e, s.plasma.clone(), s.glow.clone()))
            .collect()
    }

    #[test]
    fn one_selectable_star_per_catalog_entry() {
        let mut app = galaxy_app();
        let expected = Catalog::bundled().unwrap().stars.len();

        assert_eq!(stars(&mut app).len(), expected);
        let selectables: Vec<Selectable> = app
            .world_mut()
            .query::<&Selectable>()
            .iter(app.world())
            .copied()
            .collect();
        assert_eq!(selectables.len(), expected);
        assert!(selectables.iter().all(|s| s.radius > 0.0));
    }

    #[test]
    fn stars_do_not_share_materials() {
        let mut app = galaxy_app();
        let stars = stars(&mut app);
        for (i, a) in stars.iter().enumerate() {
            for b in &stars[i + 1..] {
                assert_ne!(a.1.id(), b.1.id());
                assert_ne!(a.2.id(), b.2.id());
            }
        }
    }

    #[test]
    fn hover_lights_only_the_hovered_star() {
        let mut app = galaxy_app();
        let stars = stars(&mut app);
        let (hovered, _, _) = stars[0].clone();

        app.insert_resource(HoveredBody {
            root: Some(hovered),
        })
        .add_systems(Update, apply_highlight);
        app.update();

        let plasma = app.world().resource::<Assets<PlasmaMaterial>>();
        let glow = app.world().resource::<Assets<GlowMaterial>>();
        for (entity, p, g) in &stars {
            let p = plasma.get(p).unwrap();
            let g = glow.get(g).unwrap();
            if *entity == hovered {
                assert_eq!(p.params.core_color, linear_from_hex(HOVER_CORE_COLOR));
                assert!(g.params.intensity > 0.0);
            } else {
                assert_eq!(p.params.zoom_swirl, ZOOM_SWIRL_IDLE);
                assert_ne!(p.params.core_color, linear_from_hex(HOVER_CORE_COLOR));
                assert_eq!(g.params.intensity, 0.0);
            }
        }
    }

    #[test]
    fn switching_stars_mid_flight_resets_both_swirls() {
        use std::time::Duration;

        use bevy::time::{TimePlugin, TimeUpdateStrategy};
        use galaxy_shared::config::ViewerConfig;
        use galaxy_shared::orbit_rig::OrbitRig;

        use crate::coord::to_shared;
        use crate::scene::body::BodySelected;
        use crate::scene::camera::{CameraRigPlugin, OrbitController};
        use crate::scene::core::MainCamera;
        use crate::scene::input::PointerState;

        let config = ViewerConfig::galaxy();
        let eye = Vec3::from_array(config.camera.position);
        let mut app = galaxy_app();
        app.add_plugins(TimePlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .insert_resource(ViewerSettings(config.clone()))
            .init_resource::<PointerState>()
            .add_message::<BodySelected>()
            .configure_sets(Update, (UpdateSet::Camera, UpdateSet::Visuals).chain())
            .add_plugins(CameraRigPlugin)
            .add_systems(
                Update,
                (swirl_on_fly_to, tick_swirl_reset).in_set(UpdateSet::Visuals),
            );
        app.world_mut().spawn((
            Transform::from_translation(eye),
            MainCamera,
            OrbitController::new(OrbitRig::looking_at(
                to_shared(eye),
                to_shared(Vec3::ZERO),
                config.controls,
            )),
        ));

        let stars = stars(&mut app);
        let (a, plasma_a, _) = stars[0].clone();
        let (b, plasma_b, _) = stars[1].clone();
        let swirl = |app: &App, h: &Handle<PlasmaMaterial>| {
            app.world()
                .resource::<Assets<PlasmaMaterial>>()
                .get(h)
                .unwrap()
                .params
                .zoom_swirl
        };

        app.world_mut().write_message(BodySelected { root: a });
        app.update();
        assert_eq!(swirl(&app, &plasma_a), config.fly_to.zoom_swirl);

        app.world_mut().write_message(BodySelected { root: b });
        app.update();
        assert_eq!(swirl(&app, &plasma_a), config.fly_to.zoom_swirl);
        assert_eq!(swirl(&app, &plasma_b), config.fly_to.zoom_swirl);

        let secs = config.fly_to.duration_secs + config.fly_to.swirl_reset_secs;
        for _ in 0..((secs / 0.25).ceil() as usize + 8) {
            app.update();
        }

        assert_eq!(swirl(&app, &plasma_a), ZOOM_SWIRL_IDLE);
        assert_eq!(swirl(&app, &plasma_b), ZOOM_SWIRL_IDLE);
    }
}
