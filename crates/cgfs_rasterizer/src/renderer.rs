//! Scene rendering: transform, clip, project and draw every instance.

use std::time::Instant;

use cgfs_core::{Color, Light, PixelSink};
use cgfs_math::{IVec2, Mat4, Mat4Ext, Vec3};
use serde::{Deserialize, Serialize};

use crate::clip::{clip_instance, ClippedMesh};
use crate::draw::{draw_filled_triangle, draw_shaded_triangle, draw_wireframe_triangle};
use crate::model::Triangle;
use crate::{RasterResult, RasterScene, Viewport};

/// How triangles are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Outline every triangle, back faces included
    #[default]
    Wireframe,
    /// Solid triangle color, back faces skipped
    Filled,
    /// Gouraud shading from the scene lights, back faces skipped
    Shaded,
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub mode: RenderMode,
    pub viewport: Viewport,
    /// Color written to every pixel before drawing; `None` keeps the sink's contents
    pub background: Option<Color>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            viewport: Viewport::default(),
            background: Some(Color::WHITE),
        }
    }
}

impl RasterConfig {
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }
}

/// Counters from one [`render_scene`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub instances_drawn: usize,
    pub instances_culled: usize,
    pub triangles_drawn: usize,
    pub back_faces_skipped: usize,
    /// Triangles with a vertex at or behind the camera plane, which cannot be projected
    pub triangles_behind_camera: usize,
    pub vertices_added: usize,
}

/// Render every instance of `scene` into `sink`, then present the frame.
///
/// Per instance: model to camera space with `view * model`, clip against
/// `scene.clip` if set, project with the configured viewport, draw.
/// Triangles still touching the camera plane after clipping (always the case
/// without a clip volume) are skipped rather than projected.
pub fn render_scene(
    scene: &RasterScene,
    config: &RasterConfig,
    sink: &mut dyn PixelSink,
) -> RasterResult<FrameStats> {
    let start = Instant::now();
    let (width, height) = (sink.width(), sink.height());

    if let Some(background) = config.background {
        sink.clear(background);
    }

    let camera_matrix = scene.camera.view_matrix();
    let lights: Vec<Light> = scene
        .lights
        .iter()
        .map(|light| light_to_camera_space(light, &camera_matrix))
        .collect();

    let mut stats = FrameStats::default();

    for instance in &scene.instances {
        let model = scene.models.get(&instance.model)?;
        let transform = camera_matrix * instance.transform_matrix();

        let vertices: Vec<Vec3> = model
            .vertices
            .iter()
            .map(|v| transform.transform_homogeneous(*v).truncate())
            .collect();
        let center = transform.transform_homogeneous(model.center).truncate();
        let radius = model.radius * instance.transform.scale.abs();

        let mesh = match &scene.clip {
            Some(clip) => clip_instance(vertices, model.triangles.clone(), center, radius, clip.planes()),
            None => Some(ClippedMesh {
                vertices,
                triangles: model.triangles.clone(),
                added_vertices: 0,
            }),
        };

        let Some(mesh) = mesh else {
            log::debug!("Culled instance of '{}' by bounding sphere", instance.model);
            stats.instances_culled += 1;
            continue;
        };

        let projected: Vec<IVec2> = mesh
            .vertices
            .iter()
            .map(|v| config.viewport.project_vertex(*v, width, height))
            .collect();

        for triangle in &mesh.triangles {
            if triangle.indices().iter().any(|&i| !is_projectable(mesh.vertices[i])) {
                stats.triangles_behind_camera += 1;
                continue;
            }
            if config.mode != RenderMode::Wireframe && is_back_facing(&mesh.vertices, triangle) {
                stats.back_faces_skipped += 1;
                continue;
            }
            draw_triangle(sink, config.mode, triangle, &mesh.vertices, &projected, &lights);
            stats.triangles_drawn += 1;
        }

        stats.instances_drawn += 1;
        stats.vertices_added += mesh.added_vertices;
    }

    log::debug!(
        "Rasterized {} instances ({} culled), {} triangles in {:.2?}",
        stats.instances_drawn,
        stats.instances_culled,
        stats.triangles_drawn,
        start.elapsed()
    );
    sink.present()?;
    Ok(stats)
}

fn draw_triangle(
    sink: &mut dyn PixelSink,
    mode: RenderMode,
    triangle: &Triangle,
    vertices: &[Vec3],
    projected: &[IVec2],
    lights: &[Light],
) {
    let points = triangle.indices().map(|i| projected[i]);

    match mode {
        RenderMode::Wireframe => {
            draw_wireframe_triangle(sink, points[0], points[1], points[2], triangle.color)
        }
        RenderMode::Filled => {
            draw_filled_triangle(sink, points[0], points[1], points[2], triangle.color)
        }
        RenderMode::Shaded => {
            let normal = face_normal(vertices, triangle);
            let intensities = triangle
                .indices()
                .map(|i| vertex_intensity(lights, vertices[i], normal));
            draw_shaded_triangle(sink, points, intensities, triangle.color);
        }
    }
}

/// True if the camera-space vertex lies strictly in front of the camera.
fn is_projectable(vertex: Vec3) -> bool {
    vertex.is_finite() && vertex.z > 0.0
}

/// Unnormalized face normal from the triangle winding.
fn face_normal(vertices: &[Vec3], triangle: &Triangle) -> Vec3 {
    let [a, b, c] = triangle.indices().map(|i| vertices[i]);
    (b - a).cross(c - a)
}

/// True if the triangle faces away from a camera at the camera-space origin.
fn is_back_facing(vertices: &[Vec3], triangle: &Triangle) -> bool {
    let to_camera = -vertices[triangle.a];
    face_normal(vertices, triangle).dot(to_camera) <= 0.0
}

fn vertex_intensity(lights: &[Light], vertex: Vec3, normal: Vec3) -> f32 {
    lights
        .iter()
        .map(|light| light.calculate_intensity(vertex, normal, -vertex, None))
        .sum()
}

fn light_to_camera_space(light: &Light, camera_matrix: &Mat4) -> Light {
    match *light {
        Light::Ambient { .. } => *light,
        Light::Point {
            intensity,
            position,
        } => Light::Point {
            intensity,
            position: camera_matrix.transform_point3(position),
        },
        Light::Directional {
            intensity,
            direction,
        } => Light::Directional {
            intensity,
            direction: camera_matrix.transform_vector3(direction),
        },
    }
}
