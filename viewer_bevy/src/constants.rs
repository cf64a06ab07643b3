use bevy::prelude::{Color, Vec4};

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Orbit angles advance once per fixed tick; speeds are tuned for 60 Hz.
pub const FIXED_HZ: f64 = 60.0;

pub const STAR_RADIUS: f32 = 0.5;
pub const STAR_SEGMENTS: u32 = 64;
pub const GLOW_RADIUS: f32 = 0.8;
pub const GLOW_SEGMENTS: u32 = 32;
pub const PLANET_SEGMENTS: u32 = 32;

/// Sky sphere radius as a fraction of the camera far plane.
pub const SKY_FAR_FRACTION: f32 = 0.9;

/// Pointer travel (logical px) before a press counts as a drag instead of a click.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;
/// Pixel-unit scroll deltas per "line" of zoom.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

pub const AMBIENT_INTENSITY: f32 = 0.7;
pub const DIRECTIONAL_INTENSITY: f32 = 0.6;
/// Scales the unitless intensities above into Bevy's physical light units.
pub const AMBIENT_BRIGHTNESS_SCALE: f32 = 500.0;
pub const DIRECTIONAL_LUX_SCALE: f32 = 10_000.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const SPACE: u32 = 0x000000;
    pub const LIGHT: u32 = 0xffffff;
    pub const ORBIT_RING: u32 = 0x335577;
    pub const UI_TEXT: u32 = 0xe8ecff;
    pub const UI_ACCENT: u32 = 0xffaa00;
}

pub fn color_from_hex(rgb: u32) -> Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    Color::srgb(r, g, b)
}

/// Linear-space RGBA for shader uniforms.
pub fn linear_from_hex(rgb: u32) -> Vec4 {
    color_from_hex(rgb).to_linear().to_vec4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        if let Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn linear_from_hex_is_opaque_and_darker_midtones() {
        let v = linear_from_hex(0x808080);
        assert!((v.w - 1.0).abs() < 1e-6);
        // sRGB 0.5 is roughly 0.21 in linear space
        assert!(v.x > 0.2 && v.x < 0.23);
        let white = linear_from_hex(0xffffff);
        assert!((white - Vec4::ONE).abs().max_element() < 1e-5);
    }
}
