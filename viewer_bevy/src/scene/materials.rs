use bevy::asset::{embedded_asset, embedded_path, AssetPath};
use bevy::pbr::{Material, MaterialPlugin};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use galaxy_shared::highlight::{
    glow_intensity, HighlightState, PlasmaParams, GLOW_COLOR, ZOOM_SWIRL_IDLE,
};

use crate::constants::linear_from_hex;

pub struct MaterialsPlugin;

impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/plasma.wgsl");
        embedded_asset!(app, "shaders/glow.wgsl");

        app.add_plugins((
            MaterialPlugin::<PlasmaMaterial>::default(),
            MaterialPlugin::<GlowMaterial>::default(),
        ));
    }
}

#[derive(Clone, Copy, Debug, ShaderType)]
pub(crate) struct PlasmaUniform {
    pub(crate) core_color: Vec4,
    pub(crate) outer_color: Vec4,
    pub(crate) time: f32,
    pub(crate) noise_strength: f32,
    pub(crate) swirl_intensity: f32,
    pub(crate) zoom_swirl: f32,
}

impl From<PlasmaParams> for PlasmaUniform {
    fn from(p: PlasmaParams) -> Self {
        Self {
            core_color: linear_from_hex(p.core_color),
            outer_color: linear_from_hex(p.outer_color),
            time: 0.0,
            noise_strength: p.noise_strength,
            swirl_intensity: p.swirl_intensity,
            zoom_swirl: p.zoom_swirl,
        }
    }
}

/// Swirling plasma surface of a star.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub(crate) struct PlasmaMaterial {
    #[uniform(0)]
    pub(crate) params: PlasmaUniform,
}

impl Default for PlasmaMaterial {
    fn default() -> Self {
        Self {
            params: PlasmaParams::default().into(),
        }
    }
}

impl PlasmaMaterial {
    pub(crate) fn set_highlight(&mut self, state: HighlightState) {
        let p = PlasmaParams::default().with_highlight(state);
        self.params.core_color = linear_from_hex(p.core_color);
        self.params.outer_color = linear_from_hex(p.outer_color);
    }

    pub(crate) fn reset_swirl(&mut self) {
        self.params.zoom_swirl = ZOOM_SWIRL_IDLE;
    }
}

impl Material for PlasmaMaterial {
    fn fragment_shader() -> ShaderRef {
        embedded_shader(embedded_path!("shaders/plasma.wgsl"))
    }
}

#[derive(Clone, Copy, Debug, ShaderType)]
pub(crate) struct GlowUniform {
    pub(crate) glow_color: Vec4,
    pub(crate) time: f32,
    pub(crate) intensity: f32,
}

/// Additive halo around a star; invisible at zero intensity.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub(crate) struct GlowMaterial {
    #[uniform(0)]
    pub(crate) params: GlowUniform,
}

impl Default for GlowMaterial {
    fn default() -> Self {
        Self {
            params: GlowUniform {
                glow_color: linear_from_hex(GLOW_COLOR),
                time: 0.0,
                intensity: glow_intensity(HighlightState::Idle),
            },
        }
    }
}

impl Material for GlowMaterial {
    fn fragment_shader() -> ShaderRef {
        embedded_shader(embedded_path!("shaders/glow.wgsl"))
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

fn embedded_shader(path: std::path::PathBuf) -> ShaderRef {
    ShaderRef::from(AssetPath::from_path_buf(path).with_source("embedded"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_shared::highlight::{HOVER_CORE_COLOR, NOISE_STRENGTH};

    #[test]
    fn plasma_defaults_match_idle_params() {
        let m = PlasmaMaterial::default();
        assert_eq!(m.params.noise_strength, NOISE_STRENGTH);
        assert_eq!(m.params.zoom_swirl, ZOOM_SWIRL_IDLE);
        assert_eq!(m.params.time, 0.0);
    }

    #[test]
    fn highlight_recolors_without_touching_swirl() {
        let mut m = PlasmaMaterial::default();
        m.params.zoom_swirl = 4.0;
        m.set_highlight(HighlightState::Hovered);
        assert_eq!(m.params.core_color, linear_from_hex(HOVER_CORE_COLOR));
        assert_eq!(m.params.zoom_swirl, 4.0);
        m.reset_swirl();
        assert_eq!(m.params.zoom_swirl, ZOOM_SWIRL_IDLE);
    }

    #[test]
    fn glow_starts_invisible() {
        assert_eq!(GlowMaterial::default().params.intensity, 0.0);
    }
}
