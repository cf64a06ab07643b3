//! Engine-independent pieces of the galaxy viewer: catalog data, configuration,
//! orbital layout and the math behind picking, tweening and the orbit camera.

pub mod catalog;
pub mod config;
pub mod details;
pub mod fly_to;
pub mod highlight;
pub mod orbit_rig;
pub mod picking;
pub mod solar;
pub mod tween;
pub mod vec3;
