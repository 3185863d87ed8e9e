//! Transform operations applied to a working image, in order.
//!
//! Recipes are plain data so callers can keep them in JSON or TOML:
//!
//! ```
//! use box51_image::Operation;
//!
//! let ops: Vec<Operation> = serde_json::from_str(r#"[
//!     {"op": "crop", "top": 0.1, "right": 0.9, "bottom": 0.9, "left": 0.1},
//!     {"op": "fit", "max_width": 200, "max_height": 200},
//!     {"op": "rotate", "degrees": 90},
//!     {"op": "output", "format": "webp"}
//! ]"#).unwrap();
//! assert_eq!(ops.len(), 4);
//! ```

use crate::OutputFormat;
use box51_error::{ImageError, ImageErrorKind};
use serde::{Deserialize, Serialize};

/// One step of a variation recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Cut a fractional box out of the current image
    Crop(Crop),
    /// Scale down to fit a bounding box
    Fit(Fit),
    /// Rotate clockwise by a right angle
    Rotate(Rotate),
    /// Select the final encoding
    Output(Output),
}

/// Crop box as fractions (0..=1) of the current width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Top edge as a fraction of the height
    pub top: f64,
    /// Right edge as a fraction of the width
    pub right: f64,
    /// Bottom edge as a fraction of the height
    pub bottom: f64,
    /// Left edge as a fraction of the width
    pub left: f64,
}

/// Absolute pixel bounds of a crop, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropBox {
    /// Left edge in pixels
    pub left: u32,
    /// Top edge in pixels
    pub top: u32,
    /// Right edge in pixels
    pub right: u32,
    /// Bottom edge in pixels
    pub bottom: u32,
}

impl CropBox {
    /// Width of the box.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

impl Crop {
    /// Create a crop from edge fractions.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Map the fractions onto an image of `width` x `height`.
    ///
    /// Pixel bounds are truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if a fraction is outside `0..=1`, the edges
    /// are inverted, or the resulting box has no pixels.
    pub fn to_box(&self, width: u32, height: u32) -> Result<CropBox, ImageError> {
        let edges = [self.top, self.right, self.bottom, self.left];
        if edges.iter().any(|f| !f.is_finite() || !(0.0..=1.0).contains(f)) {
            return Err(invalid(format!(
                "crop fractions must lie within 0..=1, got {:?}",
                self
            )));
        }
        if self.left >= self.right || self.top >= self.bottom {
            return Err(invalid(format!("crop edges are inverted: {:?}", self)));
        }

        let crop_box = CropBox {
            left: (self.left * f64::from(width)) as u32,
            top: (self.top * f64::from(height)) as u32,
            right: (self.right * f64::from(width)) as u32,
            bottom: (self.bottom * f64::from(height)) as u32,
        };

        if crop_box.width() == 0 || crop_box.height() == 0 {
            return Err(invalid(format!(
                "crop {:?} of a {}x{} image is empty",
                self, width, height
            )));
        }
        Ok(crop_box)
    }
}

/// Bounding box for a downscale that keeps the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fit {
    /// Maximum width in pixels
    pub max_width: u32,
    /// Maximum height in pixels
    pub max_height: u32,
}

impl Fit {
    /// Create a fit bounding box.
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Target dimensions for an image of `width` x `height`.
    ///
    /// Never upscales: an image already inside the box keeps its size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a zero-sized bounding box.
    pub fn dimensions(&self, width: u32, height: u32) -> Result<(u32, u32), ImageError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(invalid(format!("fit bounds must be non-zero: {:?}", self)));
        }
        if width <= self.max_width && height <= self.max_height {
            return Ok((width, height));
        }

        let scale = f64::min(
            f64::from(self.max_width) / f64::from(width),
            f64::from(self.max_height) / f64::from(height),
        );
        let scaled = |side: u32, max: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);

        Ok((
            scaled(width, self.max_width),
            scaled(height, self.max_height),
        ))
    }
}

/// Clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotate {
    /// Right angle to rotate by
    pub degrees: Rotation,
}

impl Rotate {
    /// Create a clockwise rotation.
    pub fn new(degrees: Rotation) -> Self {
        Self { degrees }
    }
}

/// Right angles a rotation accepts, written as integer degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    /// 90 degrees clockwise
    Deg90,
    /// 180 degrees
    Deg180,
    /// 270 degrees clockwise
    Deg270,
}

impl TryFrom<u16> for Rotation {
    type Error = ImageError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(invalid(format!(
                "rotation must be 90, 180 or 270 degrees, got {}",
                other
            ))),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// Terminal encoding selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Encoding of the variation
    pub format: OutputFormat,
    /// JPEG quality (1-100); other formats ignore it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

impl Output {
    /// Output in `format` with the encoder's default quality.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quality: None,
        }
    }

    /// Set the JPEG quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ImageError> {
        match self.quality {
            Some(q) if !(1..=100).contains(&q) => {
                Err(invalid(format!("quality must be 1..=100, got {}", q)))
            }
            _ => Ok(()),
        }
    }
}

#[track_caller]
fn invalid(message: String) -> ImageError {
    ImageError::new(ImageErrorKind::InvalidOperation(message))
}
