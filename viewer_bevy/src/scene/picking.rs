use bevy::prelude::*;

use galaxy_shared::picking::{pick_nearest, Ray, Sphere};

use crate::coord::{ray_to_shared, to_shared};

use super::body::{BodySelected, HoveredBody, Selectable};
use super::core::MainCamera;
use super::input::PointerState;
use super::UpdateSet;

pub struct BodyPickingPlugin;

impl Plugin for BodyPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>()
            .add_message::<BodySelected>()
            .add_systems(Update, pick_bodies.in_set(UpdateSet::Pick));
    }
}

fn pick_bodies(
    pointer: Res<PointerState>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    q_bodies: Query<(&Selectable, &GlobalTransform)>,
    mut hovered: ResMut<HoveredBody>,
    mut selected: MessageWriter<BodySelected>,
) {
    let Ok((camera, camera_tf)) = q_camera.single() else {
        return;
    };

    let bodies: Vec<(Entity, Sphere)> = q_bodies
        .iter()
        .map(|(selectable, tf)| {
            (
                selectable.root,
                Sphere {
                    center: to_shared(tf.translation()),
                    radius: selectable.radius,
                },
            )
        })
        .collect();

    let ray_at = |cursor: Vec2| {
        let ray = camera.viewport_to_world(camera_tf, cursor).ok()?;
        Some(ray_to_shared(ray))
    };
    let (hover, clicked) = resolve_pointer(&pointer, ray_at, &bodies);

    if hovered.root != hover {
        hovered.root = hover;
    }
    if let Some(root) = clicked {
        selected.write(BodySelected { root });
    }
}

/// Body under the cursor and body clicked this frame. The HUD blocks hovering.
fn resolve_pointer(
    pointer: &PointerState,
    ray_at: impl Fn(Vec2) -> Option<Ray>,
    bodies: &[(Entity, Sphere)],
) -> (Option<Entity>, Option<Entity>) {
    let pick = |cursor: Vec2| {
        let ray = ray_at(cursor)?;
        let hit = pick_nearest(&ray, bodies.iter().map(|(_, sphere)| *sphere))?;
        Some(bodies[hit.index].0)
    };

    let hover = pointer.position.filter(|_| !pointer.over_ui).and_then(pick);
    let clicked = pointer.clicked.and_then(pick);
    (hover, clicked)
}
