use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::RenderError;
use crate::geometry::{self, HitResult};
use crate::image::Image;
use crate::lighting::{self, RenderOptions, ShadowPolicy, SurfacePoint};
use crate::math::*;
use crate::scene::Scene;

/// Reported to the progress hook after each finished row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowProgress {
    pub row: usize,
    pub rows_done: usize,
    pub total_rows: usize,
}

/// Returned by the progress hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancel,
}

/// `i`-th of `n` evenly spaced samples from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n <= 1 {
        return start;
    }
    start + (end - start) * (i as f64 / (n - 1) as f64)
}

/// Ray from the camera through `(x, y, 0)` on the screen plane
pub fn primary_ray(scene: &Scene, x: f64, y: f64) -> Ray {
    let direction = (Vec3::new(x, y, 0.0) - scene.camera).normalise();
    Ray::new(scene.camera, direction)
}

/// Colour seen along `ray`, following mirror reflections up to the scene's
/// depth limit. The result is not clipped.
pub fn trace(scene: &Scene, options: &RenderOptions, ray: Ray) -> Colour {
    let mut colour = Vec3::ZERO;
    let mut reflection = 1.0;
    let mut ray = ray;

    for _bounce in 0..scene.max_depth {
        let record = match geometry::hit(&ray, &scene.spheres) {
            HitResult::Hit(record) => record,
            HitResult::Miss => break,
        };
        let sphere = record.sphere;
        let surface = SurfacePoint::new(sphere, ray.at_t(record.t));

        if lighting::is_shadowed(scene, &surface) {
            match options.shadow {
                ShadowPolicy::Terminate => break,
                ShadowPolicy::SkipBounce => (),
            }
        } else {
            let local = lighting::local_colour(sphere, &scene.light, scene.camera, &surface, options);
            colour += reflection * local;
        }

        reflection *= sphere.reflectivity;
        ray = Ray::new(surface.biased, reflect(ray.direction, surface.normal));
    }

    colour
}

/// Render with the reference shading rules and no progress reporting
pub fn render(scene: &Scene, width: usize, height: usize) -> Image {
    match render_with(scene, width, height, &RenderOptions::default(), |_| Flow::Continue) {
        Ok(image) => image,
        Err(RenderError::Cancelled { .. }) => unreachable!("render without a hook cannot be cancelled"),
    }
}

/// Render row by row from the top, calling `progress` after each row.
/// Returning `Flow::Cancel` from the hook abandons the image at that row.
pub fn render_with<F>(scene: &Scene, width: usize, height: usize, options: &RenderOptions, mut progress: F) -> Result<Image, RenderError>
where
    F: FnMut(RowProgress) -> Flow,
{
    let start = Instant::now();
    info!(width, height, spheres = scene.spheres.len(), max_depth = scene.max_depth, "rendering");

    let screen = &scene.screen;
    let mut image = Image::new(width, height);
    for row in 0..height {
        let y = linspace(screen.top, screen.bottom, height, row);
        for col in 0..width {
            let x = linspace(screen.left, screen.right, width, col);
            let colour = trace(scene, options, primary_ray(scene, x, y));
            image.set_pixel(row, col, colour);
        }

        debug!(row, "row complete");
        let rows_done = row + 1;
        if progress(RowProgress { row, rows_done, total_rows: height }) == Flow::Cancel {
            warn!(rows_done, "render cancelled");
            return Err(RenderError::Cancelled { rows_done });
        }
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "render finished");
    Ok(image)
}
