//! Plasma/glow shader parameters and how hover and fly-to change them.

pub const CORE_COLOR: u32 = 0xffaa00;
pub const OUTER_COLOR: u32 = 0xffff00;
pub const HOVER_CORE_COLOR: u32 = 0xff3300;
pub const HOVER_OUTER_COLOR: u32 = 0xffdd00;
pub const GLOW_COLOR: u32 = 0xff5500;

pub const GLOW_INTENSITY_HOVERED: f32 = 1.2;
pub const NOISE_STRENGTH: f32 = 5.0;
pub const SWIRL_INTENSITY: f32 = 1.0;
pub const ZOOM_SWIRL_IDLE: f32 = 1.0;

/// Shader clock advance per second (0.02 per frame at 60 fps).
pub const SHADER_TIME_RATE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Idle,
    Hovered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlasmaParams {
    pub core_color: u32,
    pub outer_color: u32,
    pub noise_strength: f32,
    pub swirl_intensity: f32,
    pub zoom_swirl: f32,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            core_color: CORE_COLOR,
            outer_color: OUTER_COLOR,
            noise_strength: NOISE_STRENGTH,
            swirl_intensity: SWIRL_INTENSITY,
            zoom_swirl: ZOOM_SWIRL_IDLE,
        }
    }
}

impl PlasmaParams {
    pub fn with_highlight(mut self, state: HighlightState) -> Self {
        let (core, outer) = highlight_colors(state);
        self.core_color = core;
        self.outer_color = outer;
        self
    }
}

pub fn highlight_colors(state: HighlightState) -> (u32, u32) {
    match state {
        HighlightState::Idle => (CORE_COLOR, OUTER_COLOR),
        HighlightState::Hovered => (HOVER_CORE_COLOR, HOVER_OUTER_COLOR),
    }
}

/// Glow layer intensity; the halo is invisible unless hovered.
pub fn glow_intensity(state: HighlightState) -> f32 {
    match state {
        HighlightState::Idle => 0.0,
        HighlightState::Hovered => GLOW_INTENSITY_HOVERED,
    }
}

/// Highlight state of `body` when `hovered` is the body under the pointer.
/// At most one body is ever hovered.
pub fn highlight_for<T: PartialEq>(body: T, hovered: Option<T>) -> HighlightState {
    if hovered.is_some_and(|h| h == body) {
        HighlightState::Hovered
    } else {
        HighlightState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_glow_and_base_colors() {
        assert_eq!(glow_intensity(HighlightState::Idle), 0.0);
        assert_eq!(highlight_colors(HighlightState::Idle), (0xffaa00, 0xffff00));
    }

    #[test]
    fn hovered_is_brighter_with_glow() {
        assert_eq!(glow_intensity(HighlightState::Hovered), 1.2);
        assert_eq!(
            highlight_colors(HighlightState::Hovered),
            (0xff3300, 0xffdd00)
        );
        let p = PlasmaParams::default().with_highlight(HighlightState::Hovered);
        assert_eq!(p.core_color, HOVER_CORE_COLOR);
        assert_eq!(p.zoom_swirl, ZOOM_SWIRL_IDLE);
    }

    #[test]
    fn only_the_hovered_body_lights_up() {
        let states: Vec<_> = (0..4).map(|i| highlight_for(i, Some(2))).collect();
        assert_eq!(
            states
                .iter()
                .filter(|s| **s == HighlightState::Hovered)
                .count(),
            1
        );
        assert_eq!(states[2], HighlightState::Hovered);
        assert!((0..3).all(|i| highlight_for(i, None) == HighlightState::Idle));
        assert!((0..2).all(|i| highlight_for(i, Some(7)) == HighlightState::Idle));
    }
}
