//! cgfs rasterizer - scanline rendering of triangle-mesh scenes.
//!
//! This crate provides:
//!
//! - **Models**: indexed triangle meshes with bounding spheres, looked up by name
//! - **Scenes**: instances placed by scale/rotation/translation, a camera, lights
//! - **Drawing**: gap-free lines, flat and Gouraud-shaded scanline triangles
//! - **Clipping**: plane clipping of triangles and bounding-sphere culling of instances
//! - **Rendering**: `render_scene` in wireframe, filled or shaded mode

mod clip;
mod draw;
mod error;
mod model;
mod project;
mod renderer;
mod scene;

pub use clip::{clip_instance, clip_triangle, ClippedMesh};
pub use draw::{draw_filled_triangle, draw_line, draw_shaded_triangle, draw_wireframe_triangle};
pub use error::{RasterError, RasterResult};
pub use model::{ModelTable, RasterModel, Triangle};
pub use project::Viewport;
pub use renderer::{render_scene, FrameStats, RasterConfig, RenderMode};
pub use scene::{RasterScene, SceneInstance, Transform};
