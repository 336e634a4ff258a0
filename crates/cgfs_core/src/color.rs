//! Additive RGBA color with channels in nominal `[0, 255]`.

use cgfs_math::clamp;
use serde::{Deserialize, Serialize};

/// Largest channel value.
pub const CHANNEL_MAX: f32 = 255.0;

/// An RGBA color.
///
/// Channels are stored as `f32` so shading and blending can produce
/// fractional values; they are quantized only when written to a frame buffer.
/// Alpha defaults to fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    #[serde(default = "opaque")]
    pub alpha: f32,
}

fn opaque() -> f32 {
    CHANNEL_MAX
}

impl Color {
    pub const RED: Color = Color::rgb(255.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 255.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 255.0);
    pub const YELLOW: Color = Color::rgb(255.0, 255.0, 0.0);
    pub const PURPLE: Color = Color::rgb(255.0, 0.0, 255.0);
    pub const CYAN: Color = Color::rgb(0.0, 255.0, 255.0);
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Opaque color.
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, CHANNEL_MAX)
    }

    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Scale red/green/blue by `intensity` and clamp each to `[0, 255]`.
    /// Alpha is left unchanged.
    pub fn adjust_intensity(self, intensity: f32) -> Self {
        let scale = |channel: f32| clamp(channel * intensity, 0.0, CHANNEL_MAX);
        Self {
            red: scale(self.red),
            green: scale(self.green),
            blue: scale(self.blue),
            alpha: self.alpha,
        }
    }

    /// Per-channel blend `self * (1 - k) + other * k`, alpha included.
    pub fn lerp(self, other: Color, k: f32) -> Self {
        let mix = |a: f32, b: f32| a * (1.0 - k) + b * k;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |channel: f32| clamp(channel, 0.0, CHANNEL_MAX) as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }

    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0] as f32, rgba[1] as f32, rgba[2] as f32, rgba[3] as f32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
