use crate::foundation::error::{PresentationError, PresentationResult};

pub use kurbo::Affine;

/// Pixel dimensions of a slide canvas.
///
/// Both axes must be in `1..=65535`; the rasterizer addresses pixels with `u16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Reference canvas every layout constant is tuned for.
    pub const REFERENCE: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Validate and build a canvas size.
    pub fn new(width: u32, height: u32) -> PresentationResult<Self> {
        let size = Self { width, height };
        size.to_u16()?;
        Ok(size)
    }

    pub(crate) fn to_u16(self) -> PresentationResult<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return Err(PresentationError::surface_creation(format!(
                "canvas {}x{} must have non-zero dimensions",
                self.width, self.height
            )));
        }
        let w: u16 = self.width.try_into().map_err(|_| {
            PresentationError::surface_creation(format!("canvas width {} exceeds u16", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            PresentationError::surface_creation(format!(
                "canvas height {} exceeds u16",
                self.height
            ))
        })?;
        Ok((w, h))
    }

    pub fn center(self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Opaque color with unit-float channels (`0.0..=1.0`).
///
/// Out-of-range channels are clamped when converted to 8-bit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Pale lavender slide background.
    pub const BACKGROUND: Self = Self::new(1.0, 0.9, 1.0);
    /// Dark navy used for slide text.
    pub const NAVY: Self = Self::new(0.0, 0.0, 0.3);
    /// Default paint color of a fresh canvas.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a color from unit-float channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Quantize to opaque RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn channel(c: f64) -> u8 {
            if c.is_nan() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

/// Position of a slide in the exported file sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct OutputIndex(pub u32);

impl OutputIndex {
    /// File name for this index: at least three zero-padded digits plus `.png`.
    pub fn file_name(self) -> String {
        format!("{:03}.png", self.0)
    }

    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for OutputIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
