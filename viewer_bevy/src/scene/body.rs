use bevy::prelude::*;

use galaxy_shared::catalog::StarData;
use galaxy_shared::details::{tooltip_text, Details, PlanetDetails, ProjectDetails};
use galaxy_shared::solar::BodyLayout;

/// Metadata carried by the root entity of every selectable body.
#[derive(Component, Debug, Clone)]
pub(crate) enum BodyInfo {
    Project(StarData),
    Planet {
        layout: BodyLayout,
        host_name: Option<String>,
    },
}

impl BodyInfo {
    pub(crate) fn name(&self) -> &str {
        match self {
            BodyInfo::Project(star) => &star.name,
            BodyInfo::Planet { layout, .. } => &layout.name,
        }
    }

    pub(crate) fn tooltip(&self) -> String {
        tooltip_text(self.name())
    }

    pub(crate) fn details(&self) -> Details {
        match self {
            BodyInfo::Project(star) => Details::Project(ProjectDetails::from_star(star)),
            BodyInfo::Planet { layout, host_name } => {
                Details::Planet(PlanetDetails::from_body(layout, host_name.as_deref()))
            }
        }
    }
}

/// A pickable sphere. Lives on the visible mesh; `root` holds the `BodyInfo`.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct Selectable {
    /// World-space radius
    pub(crate) radius: f32,
    pub(crate) root: Entity,
}

#[derive(Resource, Default, Debug)]
pub(crate) struct HoveredBody {
    pub(crate) root: Option<Entity>,
}

#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct BodySelected {
    pub(crate) root: Entity,
}
