//! cgfs ray tracer - recursive Phong ray tracing of sphere scenes.
//!
//! One primary ray per pixel; hits are lit by ambient, point and directional
//! lights with shadow rays, and reflective spheres recurse up to a fixed depth.
//! Frames can be traced on one thread or split into rayon buckets.

mod bucket;
mod camera;
mod intersection;
mod lighting;
mod renderer;
mod tracer;

pub use bucket::{
    buffer_to_canvas, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::ViewportCamera;
pub use intersection::{closest_intersection, intersect_ray_sphere, is_occluded, ClosestIntersection};
pub use lighting::{compute_lighting, SHADOW_EPSILON};
pub use renderer::{render, render_parallel, render_parallel_with_buckets, render_pixel, PRIMARY_T_MIN};
pub use tracer::{trace_ray, TraceConfig};

/// Re-export common math types from cgfs_math
pub use cgfs_math::{Interval, Ray, Vec3};
