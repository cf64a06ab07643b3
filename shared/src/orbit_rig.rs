use std::f32::consts::FRAC_PI_2;

use crate::config::ControlsConfig;
use crate::vec3::{add, length, sub, Vec3};

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
/// Damping factors are tuned per 60 Hz frame.
const DAMPING_REFERENCE_HZ: f32 = 60.0;

/// Orbit-camera state: the eye sits on a sphere around `target`.
/// Input moves the goal angles; `step` eases the current angles towards them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    pub controls: ControlsConfig,
}

impl OrbitRig {
    pub fn looking_at(eye: Vec3, target: Vec3, controls: ControlsConfig) -> Self {
        let mut rig = Self {
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: controls.min_distance,
            goal_yaw: 0.0,
            goal_pitch: 0.0,
            goal_distance: controls.min_distance,
            controls,
        };
        rig.set_from_eye(eye, target);
        rig
    }

    /// Snap the rig to an externally placed eye, e.g. after a fly-to.
    /// Distance is clamped like any other input.
    pub fn set_from_eye(&mut self, eye: Vec3, target: Vec3) {
        let offset = sub(eye, target);
        let len = length(offset);
        self.target = target;
        if len > 1e-6 {
            self.pitch = (offset.y / len).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
            self.yaw = offset.x.atan2(offset.z);
        }
        self.distance = self.clamp_distance(len);
        self.goal_yaw = self.yaw;
        self.goal_pitch = self.pitch;
        self.goal_distance = self.distance;
    }

    /// Drag in pixels; positive dx orbits right, positive dy orbits up.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.goal_yaw -= dx * self.controls.rotate_speed;
        self.goal_pitch =
            (self.goal_pitch + dy * self.controls.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive scroll zooms in.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - self.controls.zoom_speed).powf(scroll);
        self.goal_distance = self.clamp_distance(self.goal_distance * factor);
    }

    pub fn step(&mut self, dt: f32) {
        let damping = self.controls.damping_factor.clamp(0.0, 1.0);
        let blend = if damping >= 1.0 {
            1.0
        } else {
            1.0 - (1.0 - damping).powf(dt.max(0.0) * DAMPING_REFERENCE_HZ)
        };
        self.yaw += (self.goal_yaw - self.yaw) * blend;
        self.pitch += (self.goal_pitch - self.pitch) * blend;
        self.distance += (self.goal_distance - self.distance) * blend;
        self.distance = self.clamp_distance(self.distance);
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        add(
            self.target,
            Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            ),
        )
    }

    fn clamp_distance(&self, d: f32) -> f32 {
        d.clamp(self.controls.min_distance, self.controls.max_distance)
    }
}
