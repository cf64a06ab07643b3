use bevy::prelude::*;

use galaxy_shared::fly_to::fly_to_eye;
use galaxy_shared::orbit_rig::OrbitRig;
use galaxy_shared::tween::Tween;

use crate::coord::{to_bevy, to_shared};

use super::body::BodySelected;
use super::core::MainCamera;
use super::input::PointerState;
use super::{UpdateSet, ViewerSettings};

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FlyToStarted>()
            .add_message::<FlyToArrived>()
            .add_message::<FlyToCancelled>()
            .add_message::<DetailsClosed>()
            .add_systems(
                Update,
                (start_fly_to, drive_fly_to, release_follow, drive_orbit_controls)
                    .chain()
                    .in_set(UpdateSet::Camera),
            );
    }
}

/// User-driven orbit camera. While `follow` is set the rig target tracks that body.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct OrbitController {
    pub(crate) rig: OrbitRig,
    pub(crate) follow: Option<Entity>,
}

impl OrbitController {
    pub(crate) fn new(rig: OrbitRig) -> Self {
        Self { rig, follow: None }
    }
}

/// In-flight camera move towards a body. Orbit input is ignored meanwhile.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct FlyTo {
    pub(crate) root: Entity,
    tween: Tween,
    from_eye: Vec3,
    from_target: Vec3,
    /// Final eye relative to the body, fixed at the start
    offset: Vec3,
    /// Where the camera looked on the last frame
    look: Vec3,
}

#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct FlyToStarted {
    pub(crate) root: Entity,
}

#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct FlyToArrived {
    pub(crate) root: Entity,
}

/// A flight replaced by a new selection before it arrived.
#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct FlyToCancelled {
    pub(crate) root: Entity,
}

/// Details overlay dismissed; the camera stops following its body.
#[derive(Message, Clone, Copy, Debug, Default)]
pub(crate) struct DetailsClosed;

type FlightCameraQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Transform, &'static OrbitController, Option<&'static FlyTo>),
    With<MainCamera>,
>;

fn start_fly_to(
    mut commands: Commands,
    mut selected: MessageReader<BodySelected>,
    mut started: MessageWriter<FlyToStarted>,
    mut cancelled: MessageWriter<FlyToCancelled>,
    settings: Res<ViewerSettings>,
    q_camera: FlightCameraQuery,
    q_bodies: Query<&GlobalTransform>,
) {
    let Some(selection) = selected.read().last().copied() else {
        return;
    };
    let Ok((camera, transform, controller, current)) = q_camera.single() else {
        return;
    };
    let Ok(body) = q_bodies.get(selection.root) else {
        warn!("Selected body {:?} has no transform", selection.root);
        return;
    };

    // Pick up the look point mid-flight so the view does not snap back.
    let from_target = match current {
        Some(previous) => {
            if previous.root != selection.root {
                cancelled.write(FlyToCancelled {
                    root: previous.root,
                });
            }
            previous.look
        }
        None => to_bevy(controller.rig.target),
    };

    let target = body.translation();
    let fly = &settings.fly_to;
    let end = to_bevy(fly_to_eye(
        to_shared(transform.translation),
        to_shared(target),
        fly.desired_distance,
    ));

    commands.entity(camera).insert(FlyTo {
        root: selection.root,
        tween: Tween::new(fly.duration_secs, fly.easing),
        from_eye: transform.translation,
        from_target,
        offset: end - target,
        look: from_target,
    });
    started.write(FlyToStarted {
        root: selection.root,
    });
    debug!("Flying to {:?}", selection.root);
}

fn drive_fly_to(
    mut commands: Commands,
    time: Res<Time>,
    mut arrived: MessageWriter<FlyToArrived>,
    mut q_camera: Query<
        (Entity, &mut Transform, &mut OrbitController, &mut FlyTo),
        With<MainCamera>,
    >,
    q_bodies: Query<&GlobalTransform>,
) {
    let Ok((camera, mut transform, mut controller, mut fly)) = q_camera.single_mut() else {
        return;
    };

    // Body gone mid-flight: hand control back where we are.
    let Ok(body) = q_bodies.get(fly.root) else {
        commands.entity(camera).remove::<FlyTo>();
        let target = to_bevy(controller.rig.target);
        controller.rig.set_from_eye(to_shared(transform.translation), to_shared(target));
        return;
    };

    let target = body.translation();
    let step = fly.tween.step(time.delta_secs());
    let (eye, look) = fly_pose(&fly, target, step.progress);
    *transform = Transform::from_translation(eye).looking_at(look, Vec3::Y);
    fly.look = look;

    if step.just_finished {
        controller.rig.set_from_eye(to_shared(eye), to_shared(target));
        controller.follow = Some(fly.root);
        commands.entity(camera).remove::<FlyTo>();
        arrived.write(FlyToArrived { root: fly.root });
    }
}

/// Eye and look-at point `progress` of the way along a flight whose end moves with the body.
fn fly_pose(fly: &FlyTo, target: Vec3, progress: f32) -> (Vec3, Vec3) {
    let eye = fly.from_eye.lerp(target + fly.offset, progress);
    let look = fly.from_target.lerp(target, progress);
    (eye, look)
}

fn release_follow(
    mut closed: MessageReader<DetailsClosed>,
    mut q_controller: Query<&mut OrbitController>,
) {
    if closed.read().count() == 0 {
        return;
    }
    for mut controller in &mut q_controller {
        controller.follow = None;
    }
}

fn drive_orbit_controls(
    time: Res<Time>,
    pointer: Res<PointerState>,
    mut q_camera: Query<
        (&mut Transform, &mut OrbitController),
        (With<MainCamera>, Without<FlyTo>),
    >,
    q_bodies: Query<&GlobalTransform>,
) {
    let Ok((mut transform, mut controller)) = q_camera.single_mut() else {
        return;
    };

    if let Some(follow) = controller.follow {
        match q_bodies.get(follow) {
            Ok(body) => controller.rig.target = to_shared(body.translation()),
            Err(_) => controller.follow = None,
        }
    }

    let rig = &mut controller.rig;
    if pointer.drag_delta != Vec2::ZERO {
        rig.rotate(pointer.drag_delta.x, pointer.drag_delta.y);
    }
    if pointer.scroll != 0.0 {
        rig.zoom(pointer.scroll);
    }
    rig.step(time.delta_secs());

    let eye = to_bevy(rig.eye());
    let target = to_bevy(rig.target);
    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
