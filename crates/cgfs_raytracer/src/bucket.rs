//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be traced independently
//! and in parallel using rayon. Buckets are laid out in buffer space
//! (column, row from the top-left); pixels are traced in canvas space.

use cgfs_core::{Color, StaticScene};

use crate::renderer::render_pixel;
use crate::{TraceConfig, ViewportCamera};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's top-left corner
    pub x: u32,
    /// Row of the bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering a `width` x `height` image, nearest the centre first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Convert a buffer `(column, row)` to origin-centred, y-up canvas coordinates.
#[inline]
pub fn buffer_to_canvas(column: u32, row: u32, width: u32, height: u32) -> (i32, i32) {
    let x = column as i32 - (width / 2) as i32;
    let y = (height / 2) as i32 - row as i32 - 1;
    (x, y)
}

/// Trace every pixel in a bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &StaticScene,
    camera: &ViewportCamera,
    config: &TraceConfig,
    image_width: u32,
    image_height: u32,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let (x, y) = buffer_to_canvas(
                bucket.x + local_x,
                bucket.y + local_y,
                image_width,
                image_height,
            );
            pixels.push(render_pixel(scene, camera, config, x, y, image_width, image_height));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Canvas coordinates and color of every pixel in the bucket.
    pub fn canvas_pixels(
        &self,
        image_width: u32,
        image_height: u32,
    ) -> impl Iterator<Item = (i32, i32, Color)> + '_ {
        let bucket = self.bucket;
        self.pixels.iter().enumerate().map(move |(i, &color)| {
            let column = bucket.x + i as u32 % bucket.width;
            let row = bucket.y + i as u32 / bucket.width;
            let (x, y) = buffer_to_canvas(column, row, image_width, image_height);
            (x, y, color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgfs_core::canvas::canvas_to_buffer;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 75, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 75);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_buffer_to_canvas_inverts_canvas_to_buffer() {
        for (w, h) in [(4, 4), (5, 3), (1, 1)] {
            for row in 0..h {
                for column in 0..w {
                    let (x, y) = buffer_to_canvas(column, row, w, h);
                    assert_eq!(canvas_to_buffer(x, y, w, h), Some((column, row)));
                }
            }
        }
    }

    #[test]
    fn test_canvas_pixels_layout() {
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let colors = vec![Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let result = BucketResult::new(bucket, colors);

        let pixels: Vec<_> = result.canvas_pixels(4, 4).collect();
        assert_eq!(pixels[0], (0, 0, Color::RED));
        assert_eq!(pixels[1], (1, 0, Color::GREEN));
        assert_eq!(pixels[2], (0, -1, Color::BLUE));
        assert_eq!(pixels[3], (1, -1, Color::WHITE));
    }
}
