use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SceneError;
use crate::math::{Colour, Vec3};

/// A shaded sphere. The name only matters to whoever edits the scene.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sphere {
    pub name: String,
    pub centre: Vec3,
    pub radius: f64,
    pub ambient: Colour,
    pub diffuse: Colour,
    pub specular: Colour,
    pub shininess: f64,
    pub reflectivity: f64,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere {
            name: "Object".to_owned(),
            centre: Vec3::ZERO,
            radius: 1.0,
            ambient: Vec3::splat(1.0),
            diffuse: Vec3::splat(1.0),
            specular: Vec3::splat(1.0),
            shininess: 50.0,
            reflectivity: 0.5,
        }
    }
}

impl Sphere {
    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |reason: &str| -> Result<(), SceneError> {
            Err(SceneError::InvalidSphere { name: self.name.clone(), reason: reason.to_owned() })
        };
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return invalid("radius must be positive");
        }
        if !(self.shininess.is_finite() && self.shininess > 0.0) {
            return invalid("shininess must be positive");
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return invalid("reflectivity must lie in [0, 1]");
        }
        Ok(())
    }
}

/// The single point light
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Colour,
    pub diffuse: Colour,
    pub specular: Colour,
}

impl Default for Light {
    fn default() -> Light {
        Light {
            position: Vec3::new(5.0, 5.0, 5.0),
            ambient: Vec3::splat(1.0),
            diffuse: Vec3::splat(1.0),
            specular: Vec3::splat(1.0),
        }
    }
}

/// Projection plane bounds, at z = 0
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Screen {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Screen {
    /// Unit half-width, with the height following the image aspect ratio
    pub fn for_aspect(width: usize, height: usize) -> Screen {
        let ratio = width as f64 / height as f64;
        Screen { left: -1.0, top: 1.0 / ratio, right: 1.0, bottom: -1.0 / ratio }
    }
}

fn default_camera() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

fn default_max_depth() -> usize {
    3
}

/// Everything a render needs. Sphere order is insertion order and decides
/// which sphere wins an exact distance tie.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scene {
    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub light: Light,
    #[serde(default = "default_camera")]
    pub camera: Vec3,
    pub screen: Screen,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for Scene {
    fn default() -> Scene {
        let white = Vec3::splat(1.0);
        let sphere = |name: &str, centre: Vec3, radius: f64, ambient: Colour, diffuse: Colour| Sphere {
            name: name.to_owned(),
            centre,
            radius,
            ambient,
            diffuse,
            specular: white,
            shininess: 100.0,
            reflectivity: 0.5,
        };
        Scene {
            spheres: vec![
                sphere("red sphere", Vec3::new(-0.2, 0.0, -1.0), 0.7, Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.7, 0.0, 0.0)),
                sphere("violet sphere", Vec3::new(0.1, -0.3, 0.0), 0.1, Vec3::new(0.1, 0.0, 0.1), Vec3::new(0.7, 0.0, 0.7)),
                sphere("green sphere", Vec3::new(-0.3, 0.0, 0.0), 0.15, Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.0, 0.6, 0.0)),
            ],
            light: Light::default(),
            camera: default_camera(),
            screen: Screen::for_aspect(800, 600),
            max_depth: default_max_depth(),
        }
    }
}

impl Scene {
    /// An empty scene with the default light and camera
    pub fn empty(screen: Screen) -> Scene {
        Scene { spheres: Vec::new(), light: Light::default(), camera: default_camera(), screen, max_depth: default_max_depth() }
    }

    /// Checks everything the renderer takes for granted
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        for sphere in &self.spheres {
            sphere.validate()?;
            if !seen.insert(sphere.name.as_str()) {
                return Err(SceneError::DuplicateName(sphere.name.clone()));
            }
        }
        Ok(())
    }

    pub fn sphere(&self, name: &str) -> Option<&Sphere> {
        self.spheres.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.spheres.iter().map(|s| s.name.as_str())
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> Result<(), SceneError> {
        sphere.validate()?;
        if self.sphere(&sphere.name).is_some() {
            return Err(SceneError::DuplicateName(sphere.name));
        }
        debug!(name = %sphere.name, "adding sphere");
        self.spheres.push(sphere);
        Ok(())
    }

    /// Replaces the sphere called `name`, keeping its position in the scene.
    /// The replacement may carry a new name as long as no other sphere has it.
    pub fn update_sphere(&mut self, name: &str, sphere: Sphere) -> Result<(), SceneError> {
        sphere.validate()?;
        let index = self.index_of(name)?;
        if sphere.name != name && self.sphere(&sphere.name).is_some() {
            return Err(SceneError::DuplicateName(sphere.name));
        }
        debug!(name, new_name = %sphere.name, "updating sphere");
        self.spheres[index] = sphere;
        Ok(())
    }

    pub fn remove_sphere(&mut self, name: &str) -> Result<Sphere, SceneError> {
        let index = self.index_of(name)?;
        debug!(name, "removing sphere");
        Ok(self.spheres.remove(index))
    }

    fn index_of(&self, name: &str) -> Result<usize, SceneError> {
        self.spheres
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SceneError::UnknownSphere(name.to_owned()))
    }
}

/// Read a scene from JSON and check it is fit to render
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let scene: Scene = serde_json::from_reader(reader)?;
    scene.validate()?;

    info!(path = %path.display(), spheres = scene.spheres.len(), "loaded scene");
    Ok(scene)
}

pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), scene)?;
    Ok(())
}

/// A field of `count` random spheres scattered in front of the default camera
pub fn gen_sphere_field(count: usize, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rand = || rng.gen::<f64>();

    let mut scene = Scene::empty(Screen::for_aspect(800, 600));
    for i in 0..count {
        let centre = Vec3::new(2.0 * rand() - 1.0, 1.2 * rand() - 0.6, -1.0 - 2.0 * rand());
        let radius = 0.05 + 0.2 * rand();
        let base = Vec3::new(rand(), rand(), rand());
        scene.spheres.push(Sphere {
            name: format!("sphere {}", i),
            centre,
            radius,
            ambient: base * 0.1,
            diffuse: base * 0.7,
            specular: Vec3::splat(1.0),
            shininess: 10.0 + 190.0 * rand(),
            reflectivity: rand(),
        });
    }
    scene
}
