//! Clipping triangles and whole instances against planes.
//!
//! Geometry on the positive side of a plane is kept. Clipping never edits an
//! existing vertex: intersection points are appended to the vertex list and
//! only the new triangles refer to them.

use cgfs_math::{Line3, Plane, Vec3};

use crate::model::Triangle;

/// Camera-space geometry of one instance after clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    /// Vertices appended by clipping
    pub added_vertices: usize,
}

/// Clip one triangle against `plane`.
///
/// - all three vertices in front: the triangle itself
/// - all three behind: nothing
/// - one behind: the remaining quad as two triangles
/// - two behind: the remaining corner as one triangle
///
/// New vertices are pushed onto `vertices`; winding is preserved.
pub fn clip_triangle(triangle: &Triangle, plane: &Plane, vertices: &mut Vec<Vec3>) -> Vec<Triangle> {
    let indices = triangle.indices();
    let behind = indices.map(|i| plane.signed_distance(vertices[i]) < 0.0);

    match behind.iter().filter(|&&b| b).count() {
        0 => vec![*triangle],
        3 => Vec::new(),
        1 => {
            // Rotate so the vertex behind the plane comes last
            let k = position(&behind, true);
            let [p0, p1, n] = rotate(indices, (k + 1) % 3);
            let q0 = push_intersection(vertices, plane, p0, n);
            let q1 = push_intersection(vertices, plane, p1, n);
            vec![
                Triangle::new(p0, p1, q1, triangle.color),
                Triangle::new(p0, q1, q0, triangle.color),
            ]
        }
        _ => {
            // Rotate so the vertex in front comes first
            let k = position(&behind, false);
            let [p, n0, n1] = rotate(indices, k);
            let q0 = push_intersection(vertices, plane, p, n0);
            let q1 = push_intersection(vertices, plane, p, n1);
            vec![Triangle::new(p, q0, q1, triangle.color)]
        }
    }
}

/// Clip an instance's camera-space mesh against every plane in turn.
///
/// The bounding sphere (`center`, `radius`, already in camera space) is
/// tested first: fully in front of a plane skips that plane, fully behind any
/// plane culls the instance and returns `None`. Only straddling planes clip
/// triangle by triangle.
pub fn clip_instance(
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    center: Vec3,
    radius: f32,
    planes: &[Plane],
) -> Option<ClippedMesh> {
    let original_count = vertices.len();
    let mut mesh = ClippedMesh {
        vertices,
        triangles,
        added_vertices: 0,
    };

    for plane in planes {
        let distance = plane.signed_distance(center);
        if distance > radius {
            continue;
        }
        if distance < -radius {
            return None;
        }

        let mut clipped = Vec::with_capacity(mesh.triangles.len());
        for triangle in &mesh.triangles {
            clipped.extend(clip_triangle(triangle, plane, &mut mesh.vertices));
        }
        mesh.triangles = clipped;
    }

    mesh.added_vertices = mesh.vertices.len() - original_count;
    Some(mesh)
}

fn position(flags: &[bool; 3], value: bool) -> usize {
    flags.iter().position(|&f| f == value).unwrap_or(0)
}

fn rotate(indices: [usize; 3], start: usize) -> [usize; 3] {
    [
        indices[start % 3],
        indices[(start + 1) % 3],
        indices[(start + 2) % 3],
    ]
}

fn push_intersection(vertices: &mut Vec<Vec3>, plane: &Plane, from: usize, to: usize) -> usize {
    let point = plane.intersect_segment(&Line3::new(vertices[from], vertices[to]));
    vertices.push(point);
    vertices.len() - 1
}
