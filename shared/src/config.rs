use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::solar::SolarSystemConfig;
use crate::tween::Easing;

pub const DEFAULT_FALLBACK_COLOR: u32 = 0x000010;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    #[default]
    Galaxy,
    SolarSystem,
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "galaxy" => Ok(SceneKind::Galaxy),
            "solar" | "solar_system" | "solar-system" => Ok(SceneKind::SolarSystem),
            other => Err(format!("unknown scene '{other}'")),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Galaxy => write!(f, "galaxy"),
            SceneKind::SolarSystem => write!(f, "solar_system"),
        }
    }
}

/// Read `scene=` from a URL query string such as `?scene=solar&debug=1`.
pub fn scene_from_query(query: &str) -> Option<SceneKind> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "scene")
        .and_then(|(_, value)| value.parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

/// Orbit-control tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsConfig {
    /// Fraction of the remaining motion applied per 60 Hz frame
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per dragged pixel
    pub rotate_speed: f32,
    /// Fractional distance change per scroll line
    pub zoom_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyToConfig {
    pub duration_secs: f32,
    pub desired_distance: f32,
    pub easing: Easing,
    /// Swirl multiplier applied to the target while flying
    pub zoom_swirl: f32,
    /// Seconds after arrival before the swirl returns to normal
    pub swirl_reset_secs: f32,
}

impl Default for FlyToConfig {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            desired_distance: 2.0,
            easing: Easing::QuadraticOut,
            zoom_swirl: 4.0,
            swirl_reset_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundConfig {
    /// Asset path of an equirectangular sky texture
    pub texture: Option<String>,
    pub fallback_color: u32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            texture: None,
            fallback_color: DEFAULT_FALLBACK_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub scene: SceneKind,
    /// Height of a page header overlapping the canvas, in logical pixels
    #[serde(default)]
    pub header_offset_px: f32,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    #[serde(default)]
    pub fly_to: FlyToConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub solar: SolarSystemConfig,
    #[serde(default = "default_true")]
    pub show_orbits: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::galaxy()
    }
}

impl ViewerConfig {
    pub fn galaxy() -> Self {
        Self {
            scene: SceneKind::Galaxy,
            header_offset_px: 0.0,
            camera: CameraConfig {
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
                position: [0.0, 2.0, 18.0],
                look_at: [0.0, 0.0, 0.0],
            },
            controls: ControlsConfig {
                damping_factor: 0.05,
                min_distance: 1.0,
                max_distance: 200.0,
                rotate_speed: 0.005,
                zoom_speed: 0.1,
            },
            fly_to: FlyToConfig::default(),
            background: BackgroundConfig::default(),
            solar: SolarSystemConfig::default(),
            show_orbits: false,
        }
    }

    pub fn solar_system() -> Self {
        Self {
            scene: SceneKind::SolarSystem,
            header_offset_px: 0.0,
            camera: CameraConfig {
                fov_degrees: 75.0,
                near: 0.1,
                far: 10_000.0,
                position: [0.0, 100.0, 300.0],
                look_at: [0.0, 0.0, 0.0],
            },
            controls: ControlsConfig {
                damping_factor: 0.05,
                min_distance: 50.0,
                max_distance: 5000.0,
                rotate_speed: 0.005,
                zoom_speed: 0.1,
            },
            // Orbit controls would clamp anything closer than min_distance.
            fly_to: FlyToConfig {
                desired_distance: 60.0,
                ..FlyToConfig::default()
            },
            background: BackgroundConfig::default(),
            solar: SolarSystemConfig::default(),
            show_orbits: true,
        }
    }

    pub fn for_scene(scene: SceneKind) -> Self {
        match scene {
            SceneKind::Galaxy => Self::galaxy(),
            SceneKind::SolarSystem => Self::solar_system(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: ViewerConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid config json: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), String> {
        let cam = &self.camera;
        if !cam.fov_degrees.is_finite() || cam.fov_degrees <= 0.0 || cam.fov_degrees >= 180.0 {
            return Err("camera.fov_degrees must be in (0, 180)".to_string());
        }
        if !cam.near.is_finite() || cam.near <= 0.0 {
            return Err("camera.near must be finite and > 0".to_string());
        }
        if !cam.far.is_finite() || cam.far <= cam.near {
            return Err("camera.far must be finite and > near".to_string());
        }
        if cam.position.iter().chain(cam.look_at.iter()).any(|v| !v.is_finite()) {
            return Err("camera position and look_at must be finite".to_string());
        }

        let ctl = &self.controls;
        if !ctl.damping_factor.is_finite() || ctl.damping_factor <= 0.0 || ctl.damping_factor > 1.0
        {
            return Err("controls.damping_factor must be in (0, 1]".to_string());
        }
        if !ctl.min_distance.is_finite() || ctl.min_distance <= 0.0 {
            return Err("controls.min_distance must be finite and > 0".to_string());
        }
        if !ctl.max_distance.is_finite() || ctl.max_distance < ctl.min_distance {
            return Err("controls.max_distance must be finite and >= min_distance".to_string());
        }
        if !ctl.zoom_speed.is_finite() || ctl.zoom_speed <= 0.0 || ctl.zoom_speed >= 1.0 {
            return Err("controls.zoom_speed must be in (0, 1)".to_string());
        }
        if !ctl.rotate_speed.is_finite() {
            return Err("controls.rotate_speed must be finite".to_string());
        }

        let fly = &self.fly_to;
        if !fly.duration_secs.is_finite() || fly.duration_secs < 0.0 {
            return Err("fly_to.duration_secs must be finite and >= 0".to_string());
        }
        if !fly.desired_distance.is_finite() || fly.desired_distance <= 0.0 {
            return Err("fly_to.desired_distance must be finite and > 0".to_string());
        }
        if fly.desired_distance < ctl.min_distance {
            return Err("fly_to.desired_distance must be >= controls.min_distance".to_string());
        }
        if !fly.swirl_reset_secs.is_finite() || fly.swirl_reset_secs < 0.0 {
            return Err("fly_to.swirl_reset_secs must be finite and >= 0".to_string());
        }
        if !self.header_offset_px.is_finite() || self.header_offset_px < 0.0 {
            return Err("header_offset_px must be finite and >= 0".to_string());
        }

        self.solar.validate()
    }
}
