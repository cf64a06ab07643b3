/// 3D vector utilities for scene placement, picking and camera math.
/// Kept engine-independent so the viewer and the tests share one definition.

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Shorthand constructor
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Dot product
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Cross product
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3 {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

/// Vector length
pub fn length(v: Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Normalize vector to unit length. Degenerate input maps to +Z.
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    if len < 1e-6 {
        return Vec3::Z;
    }
    Vec3::new(v.x / len, v.y / len, v.z / len)
}

/// Scale vector by scalar
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    Vec3::new(v.x * s, v.y * s, v.z * s)
}

/// Add two vectors
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

/// Subtract vectors (a - b)
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Linear interpolation, t=0 returns a, t=1 returns b.
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    add(a, scale(sub(b, a), t))
}

pub fn distance(a: Vec3, b: Vec3) -> f32 {
    length(sub(a, b))
}

/// Rotate vector around a unit axis by angle (Rodrigues' rotation formula).
pub fn rotate_around_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let one_minus_cos = 1.0 - cos_a;

    let cross_av = cross(axis, v);
    let dot_av = dot(axis, v);

    Vec3 {
        x: v.x * cos_a + cross_av.x * sin_a + axis.x * dot_av * one_minus_cos,
        y: v.y * cos_a + cross_av.y * sin_a + axis.y * dot_av * one_minus_cos,
        z: v.z * cos_a + cross_av.z * sin_a + axis.z * dot_av * one_minus_cos,
    }
}
