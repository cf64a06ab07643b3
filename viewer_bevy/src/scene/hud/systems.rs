use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::scene::body::{BodyInfo, HoveredBody};
use crate::scene::camera::{DetailsClosed, FlyToArrived, FlyToStarted};
use crate::scene::input::PointerState;
use crate::scene::ViewerSettings;

use super::types::{
    details_top, details_width, fade_step, panel_bg, panel_border, DetailsPanelState,
    HudCloseButton, HudDetailsBody, HudDetailsPanel, HudDetailsTitle, HudFadeText, HudLinkButton,
    HudTooltip, TOOLTIP_OFFSET,
};

type ButtonInteractionQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Interaction,
        Option<&'static HudLinkButton>,
        Option<&'static HudCloseButton>,
    ),
    (Changed<Interaction>, With<Button>),
>;

type DetailsTitleQuery<'w, 's> = Query<'w, 's, &'static mut Text, With<HudDetailsTitle>>;
type DetailsBodyQuery<'w, 's> = Query<'w, 's, &'static mut Text, With<HudDetailsBody>>;
type DetailsTextSet<'w, 's> =
    ParamSet<'w, 's, (DetailsTitleQuery<'w, 's>, DetailsBodyQuery<'w, 's>)>;

type PanelQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Visibility,
        &'static mut BackgroundColor,
        &'static mut BorderColor,
    ),
    With<HudDetailsPanel>,
>;

#[derive(SystemParam)]
pub(super) struct ButtonQueries<'w, 's> {
    query: ButtonInteractionQuery<'w, 's>,
}

#[derive(SystemParam)]
pub(super) struct DetailsTextQueries<'w, 's> {
    texts: DetailsTextSet<'w, 's>,
    link: Query<'w, 's, &'static mut Visibility, With<HudLinkButton>>,
}

#[derive(SystemParam)]
pub(super) struct FadeQueries<'w, 's> {
    panel: PanelQuery<'w, 's>,
    texts: Query<'w, 's, (&'static HudFadeText, &'static mut TextColor)>,
}

pub(super) fn handle_button_interactions(
    mut buttons: ButtonQueries,
    pointer: Res<PointerState>,
    mut panel: ResMut<DetailsPanelState>,
    mut closed: MessageWriter<DetailsClosed>,
) {
    let mut close = pointer.dismiss && panel.is_open();

    for (interaction, link_button, close_button) in &mut buttons.query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        if link_button.is_some() {
            if let Some(url) = &panel.url {
                open_url(url);
            }
        }
        if close_button.is_some() && panel.is_open() {
            close = true;
        }
    }

    if close {
        panel.body = None;
        panel.url = None;
        closed.write(DetailsClosed);
    }
}

/// Fill the details panel for the body the camera just reached.
pub(super) fn show_details_on_arrival(
    mut started: MessageReader<FlyToStarted>,
    mut arrived: MessageReader<FlyToArrived>,
    q_info: Query<&BodyInfo>,
    mut panel: ResMut<DetailsPanelState>,
    mut queries: DetailsTextQueries,
) {
    // A new flight hides the previous body's details until it lands.
    if started.read().count() > 0 {
        panel.body = None;
        panel.url = None;
    }

    let Some(msg) = arrived.read().last().copied() else {
        return;
    };
    let Ok(info) = q_info.get(msg.root) else {
        return;
    };

    let details = info.details();
    if let Ok(mut text) = queries.texts.p0().single_mut() {
        text.0 = details.title().to_string();
    }
    if let Ok(mut text) = queries.texts.p1().single_mut() {
        text.0 = details.body();
    }

    let link = details.link().map(|(_, url)| url.to_string());
    if let Ok(mut visibility) = queries.link.single_mut() {
        *visibility = if link.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    info!("Showing details for {}", details.title());
    panel.body = Some(msg.root);
    panel.url = link;
    panel.opacity = 0.0;
}

pub(super) fn update_tooltip(
    pointer: Res<PointerState>,
    hovered: Res<HoveredBody>,
    q_info: Query<&BodyInfo>,
    mut q_tooltip: Query<(&mut Node, &mut Visibility, &mut Text), With<HudTooltip>>,
) {
    let Ok((mut node, mut visibility, mut text)) = q_tooltip.single_mut() else {
        return;
    };

    let shown = hovered
        .root
        .and_then(|root| q_info.get(root).ok())
        .zip(pointer.screen_position);

    match shown {
        Some((info, cursor)) => {
            let name = info.tooltip();
            if text.0 != name {
                text.0 = name;
            }
            node.left = Val::Px(cursor.x + TOOLTIP_OFFSET);
            node.top = Val::Px(cursor.y + TOOLTIP_OFFSET);
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

pub(super) fn fade_details_panel(
    time: Res<Time>,
    mut panel: ResMut<DetailsPanelState>,
    mut queries: FadeQueries,
) {
    let open = panel.is_open();
    let opacity = fade_step(panel.opacity, open, time.delta_secs());
    if opacity != panel.opacity {
        panel.opacity = opacity;
    }

    let Ok((mut visibility, mut bg, mut border)) = queries.panel.single_mut() else {
        return;
    };
    let target = if open || opacity > 0.0 {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    if *visibility != target {
        *visibility = target;
    }
    if target == Visibility::Hidden {
        return;
    }

    bg.0 = panel_bg(0.92 * opacity);
    *border = BorderColor::all(panel_border(0.4 * opacity));
    for (base, mut color) in &mut queries.texts {
        color.0 = base.0.with_alpha(base.0.alpha() * opacity);
    }
}

/// Re-anchor the panel under the header and fit it to the window.
pub(super) fn layout_details_panel(
    settings: Res<ViewerSettings>,
    mut resized: MessageReader<WindowResized>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_panel: Query<&mut Node, With<HudDetailsPanel>>,
    mut laid_out: Local<bool>,
) {
    let latest = resized.read().last().map(|r| r.width);
    if latest.is_none() && *laid_out {
        return;
    }
    let Some(width) = latest.or_else(|| q_window.single().ok().map(Window::width)) else {
        return;
    };
    *laid_out = true;

    for mut node in &mut q_panel {
        node.top = Val::Px(details_top(settings.header_offset_px));
        node.width = Val::Px(details_width(width));
    }
}

#[cfg(target_arch = "wasm32")]
fn open_url(url: &str) {
    let opened = web_sys::window().and_then(|w| w.open_with_url_and_target(url, "_blank").ok());
    if opened.is_none() {
        warn!("Could not open {url}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_url(url: &str) {
    info!("Project link: {url}");
}
