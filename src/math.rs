use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// RGB triple; components are conventionally in [0,1] but nothing enforces it
pub type Colour = Vec3;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn splat(v: f64) -> Vec3 {
        Vec3 { x: v, y: v, z: v }
    }

    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len_sq(&self) -> f64 {
        self.dot(*self)
    }

    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: every component of the result is NaN,
    /// and that NaN propagates through any shading it feeds. Only degenerate
    /// scenes (e.g. a sphere centred on the camera) can produce one.
    pub fn normalise(&self) -> Vec3 {
        *self * (1.0 / self.len())
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Vec3 {
        Vec3 { x: f(self.x), y: f(self.y), z: f(self.z) }
    }

    /// Componentwise clamp into `[lo, hi]`
    pub fn clip(&self, lo: f64, hi: f64) -> Vec3 {
        self.map(|c| c.max(lo).min(hi))
    }
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(b)
}

/// Mirror `v` about the unit normal `n`
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, scale: f64) -> Vec3 {
        Vec3 { x: self.x * scale, y: self.y * scale, z: self.z * scale }
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

// Componentwise, used for colour modulation
impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3 { x: self.x * other.x, y: self.y * other.y, z: self.z * other.z }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, scale: f64) {
        self.x *= scale;
        self.y *= scale;
        self.z *= scale;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn at_t(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
