use bevy::prelude::*;

pub(super) const TOOLTIP_OFFSET: f32 = 12.0;

pub(super) const DETAILS_LEFT: f32 = 20.0;
/// Gap between the page header and the details panel.
pub(super) const DETAILS_TOP_GAP: f32 = 20.0;
pub(super) const DETAILS_WIDTH: f32 = 300.0;
pub(super) const DETAILS_MIN_WIDTH: f32 = 160.0;
pub(super) const CLOSE_BUTTON_SIZE: f32 = 22.0;

pub(super) const FADE_SECS: f32 = 0.4;

pub(super) const UI_DIM: u32 = 0x9aa4c8;

/// What the details overlay shows and how far it has faded in.
#[derive(Resource, Default)]
pub(crate) struct DetailsPanelState {
    pub(crate) body: Option<Entity>,
    pub(crate) url: Option<String>,
    pub(crate) opacity: f32,
}

impl DetailsPanelState {
    pub(crate) fn is_open(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Component)]
pub(super) struct HudTooltip;

#[derive(Component)]
pub(super) struct HudDetailsPanel;

#[derive(Component)]
pub(super) struct HudDetailsTitle;

#[derive(Component)]
pub(super) struct HudDetailsBody;

#[derive(Component)]
pub(super) struct HudLinkButton;

#[derive(Component)]
pub(super) struct HudCloseButton;

/// Text that fades with the details panel; holds its fully opaque color.
#[derive(Component)]
pub(super) struct HudFadeText(pub(super) Color);

pub(super) fn panel_bg(alpha: f32) -> Color {
    Color::srgba(5.0 / 255.0, 5.0 / 255.0, 16.0 / 255.0, alpha)
}

pub(super) fn panel_border(alpha: f32) -> Color {
    Color::srgba(255.0 / 255.0, 170.0 / 255.0, 0.0, alpha)
}

pub(super) fn details_top(header_offset_px: f32) -> f32 {
    header_offset_px + DETAILS_TOP_GAP
}

/// Panel width for a window, keeping the side margin on narrow screens.
pub(super) fn details_width(window_width: f32) -> f32 {
    (window_width - 2.0 * DETAILS_LEFT).clamp(DETAILS_MIN_WIDTH, DETAILS_WIDTH)
}

/// Move `opacity` towards 1 (open) or 0 (closed) at a rate of one full fade per `FADE_SECS`.
pub(super) fn fade_step(opacity: f32, open: bool, dt: f32) -> f32 {
    let delta = dt.max(0.0) / FADE_SECS;
    if open {
        (opacity + delta).min(1.0)
    } else {
        (opacity - delta).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_below_header() {
        assert_eq!(details_top(0.0), 20.0);
        assert_eq!(details_top(64.0), 84.0);
    }

    #[test]
    fn panel_width_shrinks_on_narrow_windows() {
        assert_eq!(details_width(1280.0), DETAILS_WIDTH);
        assert_eq!(details_width(240.0), 200.0);
        assert_eq!(details_width(100.0), DETAILS_MIN_WIDTH);
    }

    #[test]
    fn fade_saturates_both_ways() {
        assert_eq!(fade_step(0.0, true, FADE_SECS * 0.5), 0.5);
        assert_eq!(fade_step(0.9, true, FADE_SECS), 1.0);
        assert_eq!(fade_step(0.2, false, FADE_SECS), 0.0);
        assert_eq!(fade_step(0.5, true, -1.0), 0.5);
    }
}
