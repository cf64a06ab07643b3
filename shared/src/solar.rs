use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::vec3::{add, rotate_around_axis, Vec3};

pub const SUN: &str = "Sun";

pub const SUN_COLOR: u32 = 0xffcc00;
pub const PLANET_COLOR: u32 = 0x88ccff;
pub const MOON_COLOR: u32 = 0xffffff;

/// Tunables for the solar-system scene. Every body (Sun included) shares
/// `planet_scale`; orbits are `planet_spacing` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolarSystemConfig {
    pub planet_names: Vec<String>,
    pub planet_scale: f32,
    pub planet_spacing: f32,
    /// Radians per tick around the Sun
    pub revolve_speed: f32,
    /// Radians per tick around the body's own axis
    pub rotate_speed: f32,
    pub moon_name: String,
    /// Planet the moon orbits; no moon if absent from `planet_names`
    pub moon_host: String,
    pub moon_scale: f32,
    pub moon_spacing: f32,
    pub moon_revolve_speed: f32,
    pub moon_rotate_speed: f32,
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            planet_names: [
                SUN, "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            planet_scale: 5.0,
            planet_spacing: 50.0,
            revolve_speed: 0.02,
            rotate_speed: 0.02,
            moon_name: "Moon".to_string(),
            moon_host: "Earth".to_string(),
            moon_scale: 3.0,
            moon_spacing: 10.0,
            moon_revolve_speed: 0.05,
            moon_rotate_speed: 0.03,
        }
    }
}

impl SolarSystemConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.planet_names.is_empty() {
            return Err("planet_names must not be empty".to_string());
        }
        for (i, name) in self.planet_names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err("planet names must not be empty".to_string());
            }
            if self.planet_names[..i].contains(name) {
                return Err(format!("duplicate planet name '{name}'"));
            }
        }
        if self.planet_names.contains(&self.moon_name) {
            return Err(format!("moon name '{}' collides with a planet", self.moon_name));
        }
        for (label, value) in [
            ("planet_scale", self.planet_scale),
            ("planet_spacing", self.planet_spacing),
            ("moon_scale", self.moon_scale),
            ("moon_spacing", self.moon_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{label} must be finite and > 0"));
            }
        }
        for (label, value) in [
            ("revolve_speed", self.revolve_speed),
            ("rotate_speed", self.rotate_speed),
            ("moon_revolve_speed", self.moon_revolve_speed),
            ("moon_rotate_speed", self.moon_rotate_speed),
        ] {
            if !value.is_finite() {
                return Err(format!("{label} must be finite"));
            }
        }
        Ok(())
    }

    pub fn has_moon(&self) -> bool {
        self.host_index().is_some()
    }

    fn host_index(&self) -> Option<usize> {
        self.planet_names
            .iter()
            .position(|n| n == &self.moon_host)
            .filter(|&i| i > 0)
    }

    /// Orbit radius of the body at `index`; the body at index 0 is the centre.
    pub fn orbit_radius(&self, index: usize) -> f32 {
        index as f32 * self.planet_spacing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyLayout {
    pub name: String,
    pub kind: BodyKind,
    /// Position relative to the parent pivot at zero angles
    pub offset: Vec3,
    pub orbit_radius: f32,
    pub scale: f32,
    pub color: u32,
    /// For moons: index of the host body in the layout
    pub host: Option<usize>,
}

pub fn layout(config: &SolarSystemConfig) -> Vec<BodyLayout> {
    let mut bodies = Vec::with_capacity(config.planet_names.len() + 1);
    for (i, name) in config.planet_names.iter().enumerate() {
        let radius = config.orbit_radius(i);
        let (kind, color) = if i == 0 {
            (BodyKind::Star, SUN_COLOR)
        } else {
            (BodyKind::Planet, PLANET_COLOR)
        };
        bodies.push(BodyLayout {
            name: name.clone(),
            kind,
            offset: Vec3::new(radius, 0.0, 0.0),
            orbit_radius: radius,
            scale: config.planet_scale,
            color,
            host: None,
        });
    }

    if let Some(host) = config.host_index() {
        bodies.push(BodyLayout {
            name: config.moon_name.clone(),
            kind: BodyKind::Moon,
            offset: Vec3::new(config.moon_spacing, 0.0, 0.0),
            orbit_radius: config.moon_spacing,
            scale: config.moon_scale,
            color: MOON_COLOR,
            host: Some(host),
        });
    }
    bodies
}

/// Revolution and spin angles for every body in `layout` order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitAngles {
    pub revolve: Vec<f32>,
    pub rotate: Vec<f32>,
}

impl OrbitAngles {
    pub fn new(bodies: &[BodyLayout]) -> Self {
        Self {
            revolve: vec![0.0; bodies.len()],
            rotate: vec![0.0; bodies.len()],
        }
    }

    /// Advance all angles by one tick. The central star spins but never revolves.
    pub fn step(&mut self, bodies: &[BodyLayout], config: &SolarSystemConfig) {
        for (i, body) in bodies.iter().enumerate() {
            let (revolve, rotate) = match body.kind {
                BodyKind::Star => (0.0, config.rotate_speed),
                BodyKind::Planet => (config.revolve_speed, config.rotate_speed),
                BodyKind::Moon => (config.moon_revolve_speed, config.moon_rotate_speed),
            };
            self.revolve[i] = wrap_angle(self.revolve[i] + revolve);
            self.rotate[i] = wrap_angle(self.rotate[i] + rotate);
        }
    }
}

pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// World position of body `index` for the given angles, following the pivot
/// hierarchy: planet pivots at the origin, moon pivot at the host's offset
/// inside the host's pivot.
pub fn world_position(bodies: &[BodyLayout], angles: &OrbitAngles, index: usize) -> Vec3 {
    let body = &bodies[index];
    match body.host {
        None => rotate_around_axis(body.offset, Vec3::Y, angles.revolve[index]),
        Some(host) => {
            let host_body = &bodies[host];
            let local = add(
                host_body.offset,
                rotate_around_axis(body.offset, Vec3::Y, angles.revolve[index]),
            );
            rotate_around_axis(local, Vec3::Y, angles.revolve[host])
        }
    }
}
