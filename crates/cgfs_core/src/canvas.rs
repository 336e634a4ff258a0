//! Pixel sinks and the in-memory frame buffer.
//!
//! Both renderers address pixels in canvas coordinates: the origin sits at
//! the centre of the canvas, x grows to the right and y grows upwards. The
//! sink maps that onto its own row/column layout and silently drops writes
//! that fall outside it.

use thiserror::Error;

use crate::Color;

/// Errors raised by pixel sinks.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Rendering surface has no pixels ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to present frame: {0}")]
    Present(String),
}

pub type CanvasResult<T> = Result<T, CanvasError>;

/// Destination for rendered pixels.
///
/// Not safe for concurrent writers; parallel renderers compute disjoint
/// regions first and write them in on one thread.
pub trait PixelSink {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Write a pixel at origin-centred, y-up canvas coordinates.
    /// Out-of-bounds writes are no-ops.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Flush a completed frame to wherever it is displayed.
    fn present(&mut self) -> CanvasResult<()>;

    /// Inclusive-exclusive canvas range along x: `-width/2 .. width/2`.
    fn x_range(&self) -> std::ops::Range<i32> {
        let half = (self.width() / 2) as i32;
        -half..(self.width() as i32 - half)
    }

    /// Inclusive-exclusive canvas range along y: `height/2 - height .. height/2`.
    fn y_range(&self) -> std::ops::Range<i32> {
        let half = (self.height() / 2) as i32;
        (half - self.height() as i32)..half
    }

    /// Write `color` to every pixel of the canvas.
    fn clear(&mut self, color: Color) {
        for x in self.x_range() {
            for y in self.y_range() {
                self.put_pixel(x, y, color);
            }
        }
    }
}

/// Map canvas coordinates to a `(column, row)` in a `width` x `height` buffer.
///
/// Returns `None` when the point falls outside the buffer.
pub fn canvas_to_buffer(x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32)> {
    let column = (width / 2) as i64 + x as i64;
    let row = (height / 2) as i64 - y as i64 - 1;

    if column < 0 || column >= width as i64 || row < 0 || row >= height as i64 {
        return None;
    }
    Some((column as u32, row as u32))
}

/// RGBA8 frame buffer, row-major from the top-left corner.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    frames_presented: u64,
}

impl FrameBuffer {
    /// Create a frame buffer filled with opaque black.
    ///
    /// Fails if either dimension is zero: there is no surface to draw on.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![Color::BLACK.to_rgba8(); (width as usize) * (height as usize)],
            frames_presented: 0,
        })
    }

    /// Get the pixel at canvas coordinates, if inside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        canvas_to_buffer(x, y, self.width, self.height)
            .map(|(column, row)| Color::from_rgba8(self.pixels[self.offset(column, row)]))
    }

    /// Get the raw pixel at a buffer `(column, row)`.
    pub fn get_raw(&self, column: u32, row: u32) -> [u8; 4] {
        self.pixels[self.offset(column, row)]
    }

    /// The whole buffer as tightly packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of `present()` calls so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Count pixels that differ from `color`.
    pub fn count_not(&self, color: Color) -> usize {
        let rgba = color.to_rgba8();
        self.pixels.iter().filter(|p| **p != rgba).count()
    }

    #[inline]
    fn offset(&self, column: u32, row: u32) -> usize {
        row as usize * self.width as usize + column as usize
    }
}

impl PixelSink for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((column, row)) = canvas_to_buffer(x, y, self.width, self.height) {
            let offset = self.offset(column, row);
            self.pixels[offset] = color.to_rgba8();
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
    }

    fn present(&mut self) -> CanvasResult<()> {
        self.frames_presented += 1;
        log::debug!(
            "Presented frame {} ({}x{})",
            self.frames_presented,
            self.width,
            self.height
        );
        Ok(())
    }
}
