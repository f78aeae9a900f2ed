use crate::math::*;
use crate::scene::Sphere;

/// The nearest sphere along a ray and how far along the ray it was hit
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    pub t: f64,
    pub sphere: &'a Sphere,
}

#[derive(Debug, Clone, Copy)]
pub enum HitResult<'a> {
    Miss,
    Hit(HitRecord<'a>),
}

impl<'a> HitResult<'a> {
    pub fn is_none(&self) -> bool {
        match self {
            HitResult::Miss => true,
            HitResult::Hit(_) => false,
        }
    }
}

/// Distance along a unit-direction ray to the near side of a sphere.
///
/// Both roots of the quadratic must be strictly positive, so a ray starting
/// inside the sphere, or past it, never hits it. A grazing ray (zero
/// discriminant) misses as well.
pub fn sphere_ray_intersect(ray: &Ray, centre: Vec3, radius: f64) -> Option<f64> {
    let oc = ray.origin - centre;
    let b = 2.0 * dot(ray.direction, oc);
    let c = oc.len_sq() - radius * radius;
    let discriminant = b * b - 4.0 * c;
    if discriminant <= 0.0 {
        return None;
    }

    let d_sqrt = discriminant.sqrt();
    let t1 = (-b + d_sqrt) / 2.0;
    let t2 = (-b - d_sqrt) / 2.0;
    if t1 > 0.0 && t2 > 0.0 {
        Some(t1.min(t2))
    } else {
        None
    }
}

impl Sphere {
    pub fn hit(&self, ray: &Ray) -> HitResult {
        match sphere_ray_intersect(ray, self.centre, self.radius) {
            Some(t) => HitResult::Hit(HitRecord { t, sphere: self }),
            None => HitResult::Miss,
        }
    }

    /// Outward unit normal at a point on the surface
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        (p - self.centre).normalise()
    }
}

/// Nearest sphere along the ray, scanning in scene order.
/// A later sphere only replaces the current best if it is strictly closer,
/// so exact ties go to whichever sphere comes first.
pub fn hit<'a>(ray: &Ray, spheres: &'a [Sphere]) -> HitResult<'a> {
    let mut result = HitResult::Miss;
    let mut closest_so_far = f64::INFINITY;
    for sphere in spheres {
        if let HitResult::Hit(record) = sphere.hit(ray) {
            if record.t < closest_so_far {
                closest_so_far = record.t;
                result = HitResult::Hit(record);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::HitResult::*;
    use super::*;

    fn sphere(name: &str, centre: Vec3, radius: f64) -> Sphere {
        Sphere { name: name.to_owned(), centre, radius, ..Sphere::default() }
    }

    #[test]
    fn hit_sphere_works() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let left = Vec3::new(-1.0, 0.0, 0.0);
        let down_y = Ray { origin, direction: Vec3::new(0.0, -1.0, 0.0) };
        let down_y_parallel = Ray { origin: 2.0 * left, direction: Vec3::new(0.0, -1.0, 0.0) };
        // Expected hit: ray along y axis and sphere 2 units down y axis
        let sphere = sphere("s", Vec3::new(0.0, -2.0, 0.0), 1.0);
        match sphere.hit(&down_y) {
            Miss => panic!("This ray and sphere were supposed to hit"),
            Hit(record) => assert_eq!(record.t, 1.0),
        };
        // Expected miss: ray parallel to y axis and sphere 2 units down y axis
        match sphere.hit(&down_y_parallel) {
            Miss => (),
            Hit(_) => panic!("This ray and sphere were supposed to miss"),
        };
    }

    #[test]
    fn origin_inside_or_past_sphere_misses() {
        let inside = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let past = Ray::new(Vec3::new(0.0, -4.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let centre = Vec3::new(0.0, -2.0, 0.0);
        assert_eq!(sphere_ray_intersect(&inside, centre, 1.0), None);
        assert_eq!(sphere_ray_intersect(&past, centre, 1.0), None);
    }

    #[test]
    fn grazing_ray_misses() {
        // Tangent to the unit sphere at (1, 0, -3): discriminant is exactly zero
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(sphere_ray_intersect(&ray, Vec3::new(0.0, 0.0, -3.0), 1.0), None);
    }

    #[test]
    fn nearest_of_several() {
        let spheres = vec![
            sphere("far", Vec3::new(0.0, 0.0, -10.0), 1.0),
            sphere("near", Vec3::new(0.0, 0.0, -4.0), 1.0),
            sphere("aside", Vec3::new(5.0, 0.0, -2.0), 1.0),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        match hit(&ray, &spheres) {
            Miss => panic!("This ray was supposed to hit the near sphere"),
            Hit(record) => {
                assert_eq!(record.sphere.name, "near");
                assert_eq!(record.t, 3.0);
            }
        };
    }

    #[test]
    fn empty_scene_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(hit(&ray, &[]).is_none());
    }

    #[test]
    fn tie_goes_to_first_in_order() {
        let spheres = vec![
            sphere("first", Vec3::new(0.0, 0.0, -3.0), 1.0),
            sphere("second", Vec3::new(0.0, 0.0, -3.0), 1.0),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        match hit(&ray, &spheres) {
            Miss => panic!("This ray was supposed to hit both spheres"),
            Hit(record) => assert_eq!(record.sphere.name, "first"),
        };
    }

    #[test]
    fn normal_points_outward() {
        let s = sphere("s", Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert_eq!(s.normal_at(Vec3::ZERO), Vec3::new(0.0, 0.0, 1.0));
    }
}
