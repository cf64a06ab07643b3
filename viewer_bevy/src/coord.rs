use bevy::math::Ray3d;
use bevy::prelude::Vec3;

use galaxy_shared::picking::Ray;
use galaxy_shared::vec3::Vec3 as SharedVec3;

/// Convert a shared scene vector into a Bevy vector.
pub fn to_bevy(v: SharedVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a Bevy vector into the shared scene vector.
pub fn to_shared(v: Vec3) -> SharedVec3 {
    SharedVec3::new(v.x, v.y, v.z)
}

pub fn ray_to_shared(ray: Ray3d) -> Ray {
    Ray::new(to_shared(ray.origin), to_shared(*ray.direction))
}
