//! Frame rendering for sphere scenes.
//!
//! Both entry points shoot one primary ray per canvas pixel, starting at
//! `t = 1` so nothing between the eye and the viewport is visible.

use std::time::Instant;

use cgfs_core::{CanvasResult, Color, PixelSink, StaticScene};
use cgfs_math::Interval;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{trace_ray, TraceConfig, ViewportCamera};

/// Minimum parameter for primary rays: the projection plane.
pub const PRIMARY_T_MIN: f32 = 1.0;

/// Trace the primary ray through canvas pixel `(x, y)`.
pub fn render_pixel(
    scene: &StaticScene,
    camera: &ViewportCamera,
    config: &TraceConfig,
    x: i32,
    y: i32,
    image_width: u32,
    image_height: u32,
) -> Color {
    let ray = camera.ray_through(x, y, image_width, image_height);
    trace_ray(&ray, Interval::from_min(PRIMARY_T_MIN), scene, config, 0)
}

/// Render a full frame into `sink` on the calling thread, then present it.
pub fn render(
    scene: &StaticScene,
    camera: &ViewportCamera,
    config: &TraceConfig,
    sink: &mut dyn PixelSink,
) -> CanvasResult<()> {
    let (width, height) = (sink.width(), sink.height());
    let start = Instant::now();

    for x in sink.x_range() {
        for y in sink.y_range() {
            let color = render_pixel(scene, camera, config, x, y, width, height);
            sink.put_pixel(x, y, color);
        }
    }

    log::debug!(
        "Traced {}x{} frame ({} spheres) in {:.2?}",
        width,
        height,
        scene.sphere_count(),
        start.elapsed()
    );
    sink.present()
}

/// Render a full frame with rayon, one task per bucket.
///
/// Buckets only read the scene; their pixels are written into `sink` on the
/// calling thread once every bucket is done. The result is identical to
/// [`render`].
pub fn render_parallel(
    scene: &StaticScene,
    camera: &ViewportCamera,
    config: &TraceConfig,
    sink: &mut dyn PixelSink,
) -> CanvasResult<()> {
    render_parallel_with_buckets(scene, camera, config, sink, DEFAULT_BUCKET_SIZE)
}

/// [`render_parallel`] with an explicit bucket size.
pub fn render_parallel_with_buckets(
    scene: &StaticScene,
    camera: &ViewportCamera,
    config: &TraceConfig,
    sink: &mut dyn PixelSink,
    bucket_size: u32,
) -> CanvasResult<()> {
    let (width, height) = (sink.width(), sink.height());
    let start = Instant::now();

    let buckets = generate_buckets(width, height, bucket_size);
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, scene, camera, config, width, height);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    for result in &results {
        for (x, y, color) in result.canvas_pixels(width, height) {
            sink.put_pixel(x, y, color);
        }
    }

    log::debug!(
        "Traced {}x{} frame in {} buckets on {} threads in {:.2?}",
        width,
        height,
        results.len(),
        rayon::current_num_threads(),
        start.elapsed()
    );
    sink.present()
}
