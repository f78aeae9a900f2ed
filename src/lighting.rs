//! Local shading and the hard shadow test.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, HitResult};
use crate::math::*;
use crate::scene::{Light, Scene, Sphere};

/// Offset along the normal that lifts secondary rays off the surface they leave
pub const SHADOW_BIAS: f64 = 1e-5;

/// What a shadowed bounce does to the rest of the reflection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ShadowPolicy {
    /// Stop tracing the pixel; earlier bounces keep their contribution
    Terminate,
    /// Add nothing for this bounce but keep reflecting
    SkipBounce,
}

impl Default for ShadowPolicy {
    fn default() -> ShadowPolicy {
        ShadowPolicy::Terminate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct RenderOptions {
    pub shadow: ShadowPolicy,
    /// Clamp `L·N` at zero. Off by default, so a light behind the surface
    /// subtracts diffuse light.
    pub clamp_diffuse: bool,
}

/// Geometry of one ray/surface hit, shared by the shadow test and shading
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    pub point: Vec3,
    pub normal: Vec3,
    /// `point` nudged off the surface by `SHADOW_BIAS`
    pub biased: Vec3,
}

impl SurfacePoint {
    pub fn new(sphere: &Sphere, point: Vec3) -> SurfacePoint {
        let normal = sphere.normal_at(point);
        SurfacePoint { point, normal, biased: point + normal * SHADOW_BIAS }
    }
}

/// Whether anything sits between the surface and the light.
///
/// The shadow ray leaves from the biased point, but the occluder has to be
/// closer than the light measured from the unbiased point.
pub fn is_shadowed(scene: &Scene, surface: &SurfacePoint) -> bool {
    let to_light = (scene.light.position - surface.biased).normalise();
    let shadow_ray = Ray::new(surface.biased, to_light);
    let light_distance = (scene.light.position - surface.point).len();
    match geometry::hit(&shadow_ray, &scene.spheres) {
        HitResult::Hit(record) => record.t < light_distance,
        HitResult::Miss => false,
    }
}

/// Ambient + diffuse + Blinn specular for an unshadowed surface point.
///
/// The view direction always points back at the camera, even on reflected
/// bounces, and the specular exponent is a quarter of the sphere's shininess.
pub fn local_colour(sphere: &Sphere, light: &Light, camera: Vec3, surface: &SurfacePoint, options: &RenderOptions) -> Colour {
    let to_light = (light.position - surface.biased).normalise();
    let to_camera = (camera - surface.point).normalise();

    let ambient = sphere.ambient * light.ambient;

    let mut incidence = dot(to_light, surface.normal);
    if options.clamp_diffuse {
        incidence = incidence.max(0.0);
    }
    let diffuse = sphere.diffuse * light.diffuse * incidence;

    // N·H is not clamped: a negative base gives a negative highlight for whole
    // exponents and NaN for fractional ones, which pixel clipping turns into 0
    let half = (to_light + to_camera).normalise();
    let highlight = dot(surface.normal, half).powf(sphere.shininess / 4.0);
    let specular = sphere.specular * light.specular * highlight;

    ambient + diffuse + specular
}
