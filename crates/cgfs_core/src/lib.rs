//! cgfs core - shared types for the ray tracer and the rasterizer.
//!
//! This crate provides:
//!
//! - **Color model**: `Color` with intensity scaling and blending
//! - **Pixel sinks**: the `PixelSink` trait and an in-memory `FrameBuffer`
//! - **Lights**: ambient/point/directional `Light`s and a normalizing `LightSet`
//! - **Sphere scene**: `Sphere` and `StaticScene` for the ray tracer
//!
//! # Example
//!
//! ```
//! use cgfs_core::{Color, Light, Sphere, StaticScene};
//! use cgfs_math::Vec3;
//!
//! let mut scene = StaticScene::new();
//! scene.add_sphere(Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::RED).unwrap());
//! scene.add_lights([Light::ambient(0.2), Light::point(Vec3::new(2.0, 1.0, 0.0), 0.6)]);
//! assert!((scene.lights.total_intensity() - 1.0).abs() < 1e-5);
//! ```

pub mod canvas;
pub mod color;
pub mod light;
pub mod scene;

// Re-export commonly used types
pub use canvas::{CanvasError, CanvasResult, FrameBuffer, PixelSink};
pub use color::Color;
pub use light::{Light, LightSet};
pub use scene::{SceneError, SceneResult, Sphere, StaticScene};
