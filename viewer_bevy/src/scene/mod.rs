mod background;
mod body;
mod camera;
mod core;
mod galaxy;
mod hud;
mod input;
mod materials;
mod picking;
mod solar_system;

pub use background::BackgroundPlugin;
pub use camera::CameraRigPlugin;
pub use core::{CorePlugin, StartupNotes};
pub(crate) use core::{FixedSet, UpdateSet, ViewerSettings};
pub use galaxy::GalaxyPlugin;
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use materials::MaterialsPlugin;
pub use picking::BodyPickingPlugin;
pub use solar_system::SolarSystemPlugin;
