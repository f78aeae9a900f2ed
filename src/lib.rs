#![deny(bare_trait_objects)]

//! A small Whitted-style ray tracer: spheres, one point light, hard shadows
//! and mirror reflection.

pub mod error;
pub mod geometry;
pub mod image;
pub mod lighting;
pub mod math;
pub mod ppm;
pub mod render;
pub mod scene;

pub use crate::error::{RenderError, SceneError};
pub use crate::image::Image;
pub use crate::lighting::{RenderOptions, ShadowPolicy};
pub use crate::render::{render, render_with, Flow, RowProgress};
pub use crate::scene::{Light, Scene, Screen, Sphere};
