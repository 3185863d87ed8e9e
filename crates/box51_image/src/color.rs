//! Color modes and reported image properties.

use image::{ColorType, DynamicImage};
use serde::{Deserialize, Serialize};

/// Pixel layout of an image as reported in asset metadata.
///
/// `Indexed` never comes out of a decoder: it is reported for GIF data,
/// whose encoder quantizes to a palette.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 8-bit palette
    #[display("indexed")]
    Indexed,
    /// 8-bit grayscale
    #[display("l")]
    L,
    /// 8-bit grayscale with alpha
    #[display("la")]
    La,
    /// 8-bit RGB
    #[display("rgb")]
    Rgb,
    /// 8-bit RGB with alpha
    #[display("rgba")]
    Rgba,
    /// 16-bit grayscale
    #[display("l16")]
    L16,
    /// 16-bit grayscale with alpha
    #[display("la16")]
    La16,
    /// 16-bit RGB
    #[display("rgb16")]
    Rgb16,
    /// 16-bit RGB with alpha
    #[display("rgba16")]
    Rgba16,
    /// 32-bit float RGB
    #[display("rgb32f")]
    Rgb32F,
    /// 32-bit float RGB with alpha
    #[display("rgba32f")]
    Rgba32F,
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 => ColorMode::L,
            ColorType::La8 => ColorMode::La,
            ColorType::Rgb8 => ColorMode::Rgb,
            ColorType::Rgba8 => ColorMode::Rgba,
            ColorType::L16 => ColorMode::L16,
            ColorType::La16 => ColorMode::La16,
            ColorType::Rgb16 => ColorMode::Rgb16,
            ColorType::Rgba16 => ColorMode::Rgba16,
            ColorType::Rgb32F => ColorMode::Rgb32F,
            ColorType::Rgba32F => ColorMode::Rgba32F,
            // ColorType is non-exhaustive; anything newer is widened to RGBA on coercion.
            _ => ColorMode::Rgba,
        }
    }
}

impl ColorMode {
    /// Mode of a decoded image.
    pub fn of(image: &DynamicImage) -> Self {
        image.color().into()
    }
}

/// Base properties reported for a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Pixel layout
    pub mode: ColorMode,
    /// `(width, height)` in pixels
    pub size: (u32, u32),
}

impl ImageInfo {
    /// Info for a decoded image, with an explicit mode.
    pub fn new(mode: ColorMode, image: &DynamicImage) -> Self {
        Self {
            mode,
            size: (image.width(), image.height()),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.0
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.1
    }
}
