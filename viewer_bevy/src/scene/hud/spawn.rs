use bevy::prelude::*;

use galaxy_shared::details::VIEW_PROJECT_LABEL;

use crate::constants::{color_from_hex, Colors};
use crate::scene::ViewerSettings;

use super::types::{
    details_top, panel_bg, panel_border, HudCloseButton, HudDetailsBody, HudDetailsPanel,
    HudDetailsTitle, HudFadeText, HudLinkButton, HudTooltip, CLOSE_BUTTON_SIZE, DETAILS_LEFT,
    DETAILS_WIDTH, UI_DIM,
};

pub(super) fn spawn_hud(mut commands: Commands, settings: Res<ViewerSettings>) {
    let small = TextFont::from_font_size(13.0);
    let title = TextFont::from_font_size(20.0);
    let text_color = color_from_hex(Colors::UI_TEXT);
    let accent = color_from_hex(Colors::UI_ACCENT);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        Text::new(""),
        small.clone(),
        TextColor(text_color),
        BackgroundColor(panel_bg(0.85)),
        BorderColor::all(panel_border(0.35)),
        BorderRadius::all(Val::Px(4.0)),
        Visibility::Hidden,
        GlobalZIndex(2),
        HudTooltip,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(DETAILS_LEFT),
                top: Val::Px(details_top(settings.header_offset_px)),
                width: Val::Px(DETAILS_WIDTH),
                flex_direction: FlexDirection::Column,
                border: UiRect::all(Val::Px(1.0)),
                padding: UiRect {
                    left: Val::Px(14.0),
                    right: Val::Px(14.0),
                    top: Val::Px(10.0),
                    bottom: Val::Px(12.0),
                },
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(panel_bg(0.0)),
            BorderColor::all(panel_border(0.0)),
            BorderRadius::all(Val::Px(8.0)),
            // Keeps clicks on the panel away from the scene.
            Interaction::default(),
            Visibility::Hidden,
            GlobalZIndex(1),
            HudDetailsPanel,
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new(""),
                        title,
                        TextColor(text_color.with_alpha(0.0)),
                        HudFadeText(text_color),
                        HudDetailsTitle,
                    ));
                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(CLOSE_BUTTON_SIZE),
                            height: Val::Px(CLOSE_BUTTON_SIZE),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderRadius::MAX,
                        HudCloseButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new("x"),
                            TextFont::from_font_size(15.0),
                            TextColor(color_from_hex(UI_DIM).with_alpha(0.0)),
                            HudFadeText(color_from_hex(UI_DIM)),
                        ));
                    });
                });

            parent.spawn((
                Text::new(""),
                small.clone(),
                TextColor(text_color.with_alpha(0.0)),
                HudFadeText(text_color),
                HudDetailsBody,
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        align_self: AlignSelf::FlexStart,
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BorderColor::all(accent.with_alpha(0.6)),
                    BorderRadius::all(Val::Px(4.0)),
                    Visibility::Inherited,
                    HudLinkButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(VIEW_PROJECT_LABEL),
                        small,
                        TextColor(accent.with_alpha(0.0)),
                        HudFadeText(accent),
                    ));
                });
        });
}
