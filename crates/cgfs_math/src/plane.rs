use crate::Vec3;
use serde::{Deserialize, Serialize};

/// A plane `normal · p + distance = 0`.
///
/// Points with a positive signed distance are on the kept side when clipping.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

/// A line segment, used as input to plane intersection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line3 {
    pub start: Vec3,
    pub end: Vec3,
}

impl Line3 {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from the plane: `normal · point + distance`.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Point where the line through `line` crosses this plane.
    ///
    /// A segment parallel to the plane divides by zero and yields a
    /// non-finite point; callers only intersect edges whose endpoints lie on
    /// opposite sides.
    pub fn intersect_segment(&self, line: &Line3) -> Vec3 {
        let direction = line.end - line.start;
        let t = -self.signed_distance(line.start) / self.normal.dot(direction);
        line.start + t * direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance_sign() {
        let near = Plane::new(Vec3::Z, -1.0);
        assert_eq!(near.signed_distance(Vec3::new(0.0, 0.0, 3.0)), 2.0);
        assert_eq!(near.signed_distance(Vec3::new(5.0, 5.0, 1.0)), 0.0);
        assert!(near.signed_distance(Vec3::ZERO) < 0.0);
    }

    #[test]
    fn test_intersect_segment() {
        let near = Plane::new(Vec3::Z, -1.0);
        let line = Line3::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 2.0, -1.0));
        let hit = near.intersect_segment(&line);

        assert!((hit - Vec3::new(0.0, 1.0, 1.0)).length() < 0.0001);
        assert!(near.signed_distance(hit).abs() < 0.0001);
    }

    #[test]
    fn test_intersect_parallel_segment_is_not_finite() {
        let near = Plane::new(Vec3::Z, -1.0);
        let line = Line3::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 3.0));
        let hit = near.intersect_segment(&line);
        assert!(!hit.is_finite());
    }
}
