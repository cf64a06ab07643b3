use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_transform_interpolation::prelude::TransformInterpolation;

use galaxy_shared::highlight::{highlight_for, HighlightState};
use galaxy_shared::solar::{layout, BodyKind, BodyLayout, OrbitAngles};

use crate::constants::{color_from_hex, Colors, PLANET_SEGMENTS};
use crate::coord::to_bevy;

use super::body::{BodyInfo, HoveredBody, Selectable};
use super::{FixedSet, UpdateSet, ViewerSettings};

/// Sun, planets and moon on revolving pivots.
pub struct SolarSystemPlugin;

/// Emissive boost for the Sun so it reads as a light source under PBR.
const SUN_EMISSIVE_SCALE: f32 = 2.0;
const HOVER_EMISSIVE_SCALE: f32 = 0.6;

#[derive(Resource)]
struct SolarState {
    bodies: Vec<BodyLayout>,
    angles: OrbitAngles,
    /// Revolves with the body's orbit
    pivots: Vec<Entity>,
    /// Spins on its own axis; carries `BodyInfo`
    meshes: Vec<Entity>,
}

#[derive(Component)]
struct PlanetBody {
    material: Handle<StandardMaterial>,
    base_emissive: LinearRgba,
    state: HighlightState,
}

impl Plugin for SolarSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_solar_system)
            .add_systems(
                FixedUpdate,
                advance_orbits
                    .in_set(FixedSet::Orbit)
                    .run_if(resource_exists::<SolarState>),
            )
            .add_systems(
                Update,
                (highlight_hovered_planet, draw_orbit_rings)
                    .in_set(UpdateSet::Visuals)
                    .run_if(resource_exists::<SolarState>),
            );
    }
}

fn spawn_solar_system(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let bodies = layout(&settings.solar);
    if !settings.solar.has_moon() {
        warn!(
            "Moon host '{}' is not an orbiting planet; spawning without a moon",
            settings.solar.moon_host
        );
    }
    // Unit sphere scaled per body.
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(PLANET_SEGMENTS, PLANET_SEGMENTS));

    let mut pivots = Vec::with_capacity(bodies.len());
    let mut body_meshes = Vec::with_capacity(bodies.len());

    for body in &bodies {
        let pivot = match body.host {
            None => commands
                .spawn((
                    Name::new(format!("{} pivot", body.name)),
                    Transform::default(),
                    Visibility::default(),
                    TransformInterpolation,
                ))
                .id(),
            Some(host) => commands
                .spawn((
                    Name::new(format!("{} pivot", body.name)),
                    Transform::from_translation(to_bevy(bodies[host].offset)),
                    Visibility::default(),
                    TransformInterpolation,
                    ChildOf(pivots[host]),
                ))
                .id(),
        };

        let base_emissive = match body.kind {
            BodyKind::Star => color_from_hex(body.color).to_linear() * SUN_EMISSIVE_SCALE,
            _ => LinearRgba::BLACK,
        };
        let material = materials.add(StandardMaterial {
            base_color: color_from_hex(body.color),
            emissive: base_emissive,
            ..default()
        });

        let host_name = body.host.map(|h| bodies[h].name.clone());
        let mesh = commands
            .spawn((
                Name::new(body.name.clone()),
                Mesh3d(sphere.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(to_bevy(body.offset))
                    .with_scale(Vec3::splat(body.scale)),
                TransformInterpolation,
                BodyInfo::Planet {
                    layout: body.clone(),
                    host_name,
                },
                PlanetBody {
                    material,
                    base_emissive,
                    state: HighlightState::Idle,
                },
                ChildOf(pivot),
            ))
            .id();
        commands.entity(mesh).insert(Selectable {
            radius: body.scale,
            root: mesh,
        });

        pivots.push(pivot);
        body_meshes.push(mesh);
    }

    info!("Spawned solar system with {} bodies", bodies.len());
    commands.insert_resource(SolarState {
        angles: OrbitAngles::new(&bodies),
        bodies,
        pivots,
        meshes: body_meshes,
    });
}

fn advance_orbits(
    settings: Res<ViewerSettings>,
    mut state: ResMut<SolarState>,
    mut q_transforms: Query<&mut Transform>,
) {
    let state = &mut *state;
    state.angles.step(&state.bodies, &settings.solar);

    for i in 0..state.bodies.len() {
        if let Ok(mut tf) = q_transforms.get_mut(state.pivots[i]) {
            tf.rotation = Quat::from_rotation_y(state.angles.revolve[i]);
        }
        if let Ok(mut tf) = q_transforms.get_mut(state.meshes[i]) {
            tf.rotation = Quat::from_rotation_y(state.angles.rotate[i]);
        }
    }
}

fn highlight_hovered_planet(
    hovered: Res<HoveredBody>,
    mut q_planets: Query<(Entity, &mut PlanetBody)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let glow = color_from_hex(Colors::UI_ACCENT).to_linear() * HOVER_EMISSIVE_SCALE;
    for (entity, mut planet) in &mut q_planets {
        let state = highlight_for(entity, hovered.root);
        if state == planet.state {
            continue;
        }
        if let Some(m) = materials.get_mut(&planet.material) {
            m.emissive = match state {
                HighlightState::Hovered => planet.base_emissive + glow,
                HighlightState::Idle => planet.base_emissive,
            };
        }
        planet.state = state;
    }
}

fn draw_orbit_rings(
    settings: Res<ViewerSettings>,
    state: Res<SolarState>,
    q_global: Query<&GlobalTransform>,
    mut gizmos: Gizmos,
) {
    if !settings.show_orbits {
        return;
    }

    let color = color_from_hex(Colors::ORBIT_RING);
    let flat = Quat::from_rotation_x(FRAC_PI_2);
    for body in &state.bodies {
        if body.orbit_radius <= 0.0 {
            continue;
        }
        let centre = match body.host {
            None => Vec3::ZERO,
            Some(host) => match q_global.get(state.meshes[host]) {
                Ok(tf) => tf.translation(),
                Err(_) => continue,
            },
        };
        gizmos.circle(Isometry3d::new(centre, flat), body.orbit_radius, color);
    }
}
