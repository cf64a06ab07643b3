use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use galaxy_shared::picking::adjust_for_header;

use crate::constants::{DRAG_THRESHOLD_PX, PIXELS_PER_SCROLL_LINE};

use super::{UpdateSet, ViewerSettings};

pub struct InputPlugin;

/// Per-frame pointer summary shared by picking, camera and HUD systems.
#[derive(Resource, Default)]
pub(crate) struct PointerState {
    /// Cursor in window coordinates, corrected for the page header
    pub(crate) position: Option<Vec2>,
    /// Cursor exactly as reported, for placing UI next to it
    pub(crate) screen_position: Option<Vec2>,
    /// Click or tap released this frame, header-corrected
    pub(crate) clicked: Option<Vec2>,
    pub(crate) drag_delta: Vec2,
    /// Positive zooms in, in scroll lines
    pub(crate) scroll: f32,
    pub(crate) over_ui: bool,
    pub(crate) dismiss: bool,
    press_origin: Option<Vec2>,
    dragging: bool,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_systems(Update, input_system.in_set(UpdateSet::Input));
    }
}

/// Mouse readings for one frame, cursor in window coordinates.
#[derive(Debug, Default, Clone, Copy)]
struct MouseFrame {
    cursor: Option<Vec2>,
    just_pressed: bool,
    pressed: bool,
    just_released: bool,
    motion: Vec2,
}

impl PointerState {
    fn begin_frame(&mut self, dismiss: bool, over_ui: bool) {
        self.clicked = None;
        self.drag_delta = Vec2::ZERO;
        self.dismiss = dismiss;
        self.over_ui = over_ui;
    }

    fn point_at(&mut self, at: Vec2, header: f32) -> Vec2 {
        let corrected = Vec2::new(at.x, adjust_for_header(at.y, header));
        self.screen_position = Some(at);
        self.position = Some(corrected);
        corrected
    }

    /// Press and release within the drag threshold is a click; anything further orbits.
    fn apply_mouse(&mut self, mouse: MouseFrame, header: f32) {
        match mouse.cursor {
            Some(at) => {
                self.point_at(at, header);
            }
            None => {
                self.screen_position = None;
                self.position = None;
            }
        }

        if mouse.just_pressed {
            self.press_origin = mouse.cursor;
            self.dragging = false;
        }

        if mouse.pressed {
            if let (Some(origin), Some(now)) = (self.press_origin, mouse.cursor) {
                if origin.distance(now) > DRAG_THRESHOLD_PX {
                    self.dragging = true;
                }
            }
            if self.dragging && !self.over_ui {
                self.drag_delta += mouse.motion;
            }
        }

        if mouse.just_released {
            if !self.dragging && !self.over_ui {
                self.clicked = self.position;
            }
            self.press_origin = None;
            self.dragging = false;
        }
    }

    fn touch_down(&mut self, at: Vec2, header: f32) {
        self.point_at(at, header);
    }

    /// One finger on screen; `travel` is measured from where it went down.
    fn touch_moved(&mut self, travel: Vec2, delta: Vec2) {
        if travel.length() > DRAG_THRESHOLD_PX && !self.over_ui {
            self.drag_delta += delta;
        }
    }

    /// A lifted finger selects unless it dragged.
    fn touch_up(&mut self, at: Vec2, travel: Vec2, header: f32) {
        let at = self.point_at(at, header);
        if travel.length() <= DRAG_THRESHOLD_PX && !self.over_ui {
            self.clicked = Some(at);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn input_system(
    mut pointer: ResMut<PointerState>,
    settings: Res<ViewerSettings>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    touches: Res<Touches>,
    q_ui: Query<&Interaction>,
) {
    let header = settings.header_offset_px;
    pointer.begin_frame(
        keys.just_pressed(KeyCode::Escape),
        q_ui.iter().any(|i| *i != Interaction::None),
    );

    pointer.apply_mouse(
        MouseFrame {
            cursor: q_window.single().ok().and_then(Window::cursor_position),
            just_pressed: buttons.just_pressed(MouseButton::Left),
            pressed: buttons.pressed(MouseButton::Left),
            just_released: buttons.just_released(MouseButton::Left),
            motion: motion.delta,
        },
        header,
    );

    for touch in touches.iter_just_pressed() {
        pointer.touch_down(touch.position(), header);
    }
    let mut fingers = touches.iter();
    if let (Some(touch), None) = (fingers.next(), fingers.next()) {
        pointer.touch_moved(touch.distance(), touch.delta());
    }
    // Lifting one finger of a pinch is not a tap.
    if touches.iter().next().is_none() {
        for touch in touches.iter_just_released() {
            pointer.touch_up(touch.position(), touch.distance(), header);
        }
    }

    pointer.scroll = if pointer.over_ui {
        0.0
    } else {
        scroll_lines(scroll.delta.y, scroll.unit)
    };
}

fn scroll_lines(delta_y: f32, unit: MouseScrollUnit) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / PIXELS_PER_SCROLL_LINE,
    }
}

#[cfg(test)]
mod tests {
    use galaxy_shared::config::ViewerConfig;

    use super::*;

    const HEADER: f32 = 60.0;

    fn click_at(pointer: &mut PointerState, from: Vec2, to: Vec2) {
        pointer.begin_frame(false, pointer.over_ui);
        pointer.apply_mouse(
            MouseFrame {
                cursor: Some(from),
                just_pressed: true,
                pressed: true,
                ..default()
            },
            HEADER,
        );
        pointer.begin_frame(false, pointer.over_ui);
        pointer.apply_mouse(
            MouseFrame {
                cursor: Some(to),
                just_released: true,
                motion: to - from,
                ..default()
            },
            HEADER,
        );
    }

    #[test]
    fn pixel_scroll_converts_to_lines() {
        assert_eq!(scroll_lines(200.0, MouseScrollUnit::Pixel), 2.0);
        assert_eq!(scroll_lines(-1.0, MouseScrollUnit::Line), -1.0);
    }

    #[test]
    fn short_press_is_a_header_corrected_click() {
        let mut pointer = PointerState::default();
        click_at(&mut pointer, Vec2::new(100.0, 200.0), Vec2::new(102.0, 201.0));

        let expected = Vec2::new(102.0, adjust_for_header(201.0, HEADER));
        assert_eq!(pointer.clicked, Some(expected));
        assert_eq!(pointer.position, Some(expected));
        assert_eq!(pointer.screen_position, Some(Vec2::new(102.0, 201.0)));
    }

    #[test]
    fn drag_past_threshold_orbits_instead_of_clicking() {
        let mut pointer = PointerState::default();
        let origin = Vec2::new(100.0, 100.0);
        pointer.apply_mouse(
            MouseFrame {
                cursor: Some(origin),
                just_pressed: true,
                pressed: true,
                ..default()
            },
            HEADER,
        );

        pointer.begin_frame(false, false);
        pointer.apply_mouse(
            MouseFrame {
                cursor: Some(origin + Vec2::new(DRAG_THRESHOLD_PX + 6.0, 0.0)),
                pressed: true,
                motion: Vec2::new(10.0, 0.0),
                ..default()
            },
            HEADER,
        );
        assert_eq!(pointer.drag_delta, Vec2::new(10.0, 0.0));

        pointer.begin_frame(false, false);
        pointer.apply_mouse(
            MouseFrame {
                cursor: Some(origin),
                just_released: true,
                ..default()
            },
            HEADER,
        );
        assert_eq!(pointer.clicked, None);
    }

    #[test]
    fn no_click_over_hud() {
        let mut pointer = PointerState {
            over_ui: true,
            ..default()
        };
        click_at(&mut pointer, Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert_eq!(pointer.clicked, None);
    }

    #[test]
    fn tap_selects_on_lift() {
        let mut pointer = PointerState::default();
        pointer.touch_down(Vec2::new(50.0, 80.0), HEADER);
        assert_eq!(pointer.clicked, None);

        pointer.begin_frame(false, false);
        pointer.touch_up(Vec2::new(51.0, 80.0), Vec2::new(1.0, 0.0), HEADER);
        assert_eq!(
            pointer.clicked,
            Some(Vec2::new(51.0, adjust_for_header(80.0, HEADER)))
        );
    }

    #[test]
    fn finger_drag_orbits_without_selecting() {
        let mut pointer = PointerState::default();
        pointer.touch_down(Vec2::new(50.0, 80.0), HEADER);
        pointer.begin_frame(false, false);
        pointer.touch_moved(Vec2::new(30.0, 0.0), Vec2::new(8.0, 0.0));
        assert_eq!(pointer.drag_delta, Vec2::new(8.0, 0.0));

        pointer.begin_frame(false, false);
        pointer.touch_up(Vec2::new(80.0, 80.0), Vec2::new(30.0, 0.0), HEADER);
        assert_eq!(pointer.clicked, None);
    }

    #[test]
    fn finger_over_hud_neither_orbits_nor_selects() {
        let mut pointer = PointerState::default();
        pointer.begin_frame(false, true);
        pointer.touch_moved(Vec2::new(30.0, 0.0), Vec2::new(8.0, 0.0));
        pointer.touch_up(Vec2::new(5.0, 5.0), Vec2::ZERO, HEADER);
        assert_eq!(pointer.drag_delta, Vec2::ZERO);
        assert_eq!(pointer.clicked, None);
    }

    fn input_app() -> (App, Entity) {
        let mut config = ViewerConfig::galaxy();
        config.header_offset_px = HEADER;
        let mut app = App::new();
        app.insert_resource(ViewerSettings(config))
            .init_resource::<PointerState>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<AccumulatedMouseMotion>()
            .init_resource::<AccumulatedMouseScroll>()
            .init_resource::<Touches>()
            .add_systems(Update, input_system);
        let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();
        (app, window)
    }

    fn move_cursor(app: &mut App, window: Entity, at: Vec2) {
        app.world_mut()
            .get_mut::<Window>(window)
            .unwrap()
            .set_cursor_position(Some(at));
    }

    fn next_frame(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
        app.world_mut()
            .resource_mut::<AccumulatedMouseMotion>()
            .delta = Vec2::ZERO;
    }

    #[test]
    fn system_reports_click_and_drag_from_mouse_resources() {
        let (mut app, window) = input_app();

        move_cursor(&mut app, window, Vec2::new(300.0, 200.0));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        next_frame(&mut app);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert_eq!(
            app.world().resource::<PointerState>().clicked,
            Some(Vec2::new(300.0, adjust_for_header(200.0, HEADER)))
        );
        next_frame(&mut app);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        next_frame(&mut app);

        move_cursor(&mut app, window, Vec2::new(340.0, 200.0));
        app.world_mut()
            .resource_mut::<AccumulatedMouseMotion>()
            .delta = Vec2::new(40.0, 0.0);
        app.update();
        assert_eq!(
            app.world().resource::<PointerState>().drag_delta,
            Vec2::new(40.0, 0.0)
        );
        next_frame(&mut app);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert_eq!(app.world().resource::<PointerState>().clicked, None);
    }

    #[test]
    fn system_ignores_clicks_while_hud_is_hovered() {
        let (mut app, window) = input_app();
        app.world_mut().spawn(Interaction::Hovered);

        move_cursor(&mut app, window, Vec2::new(300.0, 200.0));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        next_frame(&mut app);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();

        let pointer = app.world().resource::<PointerState>();
        assert!(pointer.over_ui);
        assert_eq!(pointer.clicked, None);
    }
}
