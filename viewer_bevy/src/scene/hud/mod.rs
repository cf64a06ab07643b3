mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::UpdateSet;

/// Hover tooltip and the details overlay shown when the camera reaches a body.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<types::DetailsPanelState>()
            .add_systems(Startup, spawn::spawn_hud)
            .add_systems(
                Update,
                (
                    systems::handle_button_interactions,
                    systems::show_details_on_arrival,
                    systems::update_tooltip,
                    systems::fade_details_panel,
                    systems::layout_details_panel,
                )
                    .chain()
                    .in_set(UpdateSet::Hud),
            );
    }
}
