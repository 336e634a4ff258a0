//! PNG-backed pixel sink.

use std::path::{Path, PathBuf};

use cgfs_core::{CanvasError, CanvasResult, Color, FrameBuffer, PixelSink};

/// Frame buffer that writes itself to a PNG file on every `present()`.
pub struct PngSink {
    buffer: FrameBuffer,
    path: PathBuf,
}

impl PngSink {
    pub fn new(width: u32, height: u32, path: impl Into<PathBuf>) -> CanvasResult<Self> {
        Ok(Self {
            buffer: FrameBuffer::new(width, height)?,
            path: path.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PixelSink for PngSink {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.buffer.put_pixel(x, y, color);
    }

    fn clear(&mut self, color: Color) {
        self.buffer.clear(color);
    }

    fn present(&mut self) -> CanvasResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        image::save_buffer(
            &self.path,
            self.buffer.as_bytes(),
            self.buffer.width(),
            self.buffer.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| CanvasError::Present(format!("{}: {}", self.path.display(), e)))?;

        self.buffer.present()?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_writes_png() {
        let path = std::env::temp_dir()
            .join(format!("cgfs_viewer_test_{}", std::process::id()))
            .join("frame.png");

        let mut sink = PngSink::new(4, 2, &path).unwrap();
        sink.put_pixel(-2, 0, Color::RED);
        sink.put_pixel(1, -1, Color::BLUE);
        sink.present().unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(3, 1).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_zero_size_is_error() {
        assert!(matches!(
            PngSink::new(0, 4, "unused.png"),
            Err(CanvasError::EmptySurface { .. })
        ));
    }
}
