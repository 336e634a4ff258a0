//! Triangle meshes and the named model table.
//!
//! Models are shared by reference between instances; clipping always works
//! on a per-instance copy of the vertices and never touches the model.

use std::collections::HashMap;
use std::sync::Arc;

use cgfs_core::Color;
use cgfs_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{RasterError, RasterResult};

/// A triangle as three indices into its owner's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub color: Color,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize, color: Color) -> Self {
        Self { a, b, c, color }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// Indexed triangle mesh with a bounding sphere in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterModel {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    pub center: Vec3,
    pub radius: f32,
}

impl RasterModel {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<Triangle>, center: Vec3, radius: f32) -> Self {
        Self {
            vertices,
            triangles,
            center,
            radius,
        }
    }

    /// Cube spanning `[-1, 1]` on every axis, two triangles per face and a
    /// different color on each face.
    ///
    /// Triangles wind so that `(b - a) x (c - a)` points out of the cube.
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        ];

        let triangles = vec![
            Triangle::new(0, 1, 2, Color::RED),
            Triangle::new(0, 2, 3, Color::RED),
            Triangle::new(4, 0, 3, Color::GREEN),
            Triangle::new(4, 3, 7, Color::GREEN),
            Triangle::new(5, 4, 7, Color::BLUE),
            Triangle::new(5, 7, 6, Color::BLUE),
            Triangle::new(1, 5, 6, Color::YELLOW),
            Triangle::new(1, 6, 2, Color::YELLOW),
            Triangle::new(4, 5, 1, Color::PURPLE),
            Triangle::new(4, 1, 0, Color::PURPLE),
            Triangle::new(2, 6, 7, Color::CYAN),
            Triangle::new(2, 7, 3, Color::CYAN),
        ];

        Self::new(vertices, triangles, Vec3::ZERO, 3.0f32.sqrt())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Models looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ModelTable {
    models: HashMap<String, Arc<RasterModel>>,
}

impl ModelTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in models (`"cube"`).
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("cube", RasterModel::cube());
        table
    }

    /// Add or replace a model.
    pub fn insert(&mut self, name: impl Into<String>, model: RasterModel) {
        self.models.insert(name.into(), Arc::new(model));
    }

    /// Look up a model by name.
    pub fn get(&self, name: &str) -> RasterResult<Arc<RasterModel>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| RasterError::UnknownModel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Model names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = RasterModel::cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.center, Vec3::ZERO);
        assert!((cube.radius - 3.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_cube_bounding_sphere_contains_vertices() {
        let cube = RasterModel::cube();
        for v in &cube.vertices {
            assert!((*v - cube.center).length() <= cube.radius + 1e-5);
        }
    }

    #[test]
    fn test_cube_normals_point_outwards() {
        let cube = RasterModel::cube();
        for t in &cube.triangles {
            let [a, b, c] = t.indices().map(|i| cube.vertices[i]);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - cube.center) > 0.0, "inward triangle {:?}", t);
        }
    }

    #[test]
    fn test_cube_face_colors() {
        let cube = RasterModel::cube();
        for pair in cube.triangles.chunks(2) {
            assert_eq!(pair[0].color, pair[1].color);
        }
        let mut colors: Vec<[u8; 4]> = cube.triangles.iter().map(|t| t.color.to_rgba8()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn test_model_table_lookup() {
        let table = ModelTable::builtin();
        assert!(table.contains("cube"));
        assert_eq!(table.get("cube").unwrap().triangle_count(), 12);
        assert_eq!(table.names(), vec!["cube"]);
    }

    #[test]
    fn test_model_table_unknown_name() {
        let table = ModelTable::builtin();
        match table.get("teapot") {
            Err(RasterError::UnknownModel(name)) => assert_eq!(name, "teapot"),
            other => panic!("expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn test_model_table_insert_replaces() {
        let mut table = ModelTable::new();
        assert!(table.is_empty());

        table.insert("shape", RasterModel::cube());
        let single = RasterModel::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Triangle::new(0, 1, 2, Color::RED)],
            Vec3::ZERO,
            1.0,
        );
        table.insert("shape", single);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("shape").unwrap().triangle_count(), 1);
    }
}
