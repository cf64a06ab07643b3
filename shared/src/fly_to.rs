use crate::vec3::{length, normalize, scale, sub, Vec3};

/// Camera eye that ends `desired_distance` short of `target`, approaching
/// along the current view line. A camera already at the target backs off on +Z.
pub fn fly_to_eye(camera: Vec3, target: Vec3, desired_distance: f32) -> Vec3 {
    let to_target = sub(target, camera);
    let dir = if length(to_target) < 1e-6 {
        Vec3::new(0.0, 0.0, -1.0)
    } else {
        normalize(to_target)
    };
    sub(target, scale(dir, desired_distance))
}
