use crate::vec3::{dot, normalize, sub, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: normalize(dir),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub distance: f32,
}

/// Distance along `ray` to the nearest intersection with the sphere, if any.
/// A ray starting inside the sphere hits at the exit point.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = sub(ray.origin, sphere.center);
    let b = dot(oc, ray.dir);
    let c = dot(oc, oc) - sphere.radius * sphere.radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

/// First sphere hit along the ray. Ties keep the earlier index.
pub fn pick_nearest<I>(ray: &Ray, spheres: I) -> Option<Hit>
where
    I: IntoIterator<Item = Sphere>,
{
    spheres
        .into_iter()
        .enumerate()
        .filter_map(|(index, s)| ray_sphere(ray, &s).map(|distance| Hit { index, distance }))
        .fold(None, |best: Option<Hit>, hit| match best {
            Some(b) if b.distance <= hit.distance => Some(b),
            _ => Some(hit),
        })
}

/// Pointer Y corrected for a fixed page header. Only half the header height is
/// removed, matching how the canvas sits under a partially overlapping header.
pub fn adjust_for_header(pointer_y: f32, header_offset: f32) -> f32 {
    pointer_y - header_offset * 0.5
}
