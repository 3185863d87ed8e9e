//! Supported formats and the output encoding policy table.
//!
//! Each output format maps to one [`FormatPolicy`] record. The record is the
//! single source for color-mode coercion and encoder options, so adding a
//! format means adding a row rather than another branch in the pipeline.

use crate::ColorMode;
use box51_error::{ImageError, ImageErrorKind};
use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Extensions accepted as image input. Anything else is stored as a plain file.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] =
    &["bmp", "gif", "jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// Whether an extension (case-insensitive) names a supported input image.
pub fn is_supported_input(extension: &str) -> bool {
    SUPPORTED_INPUT_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Encodings a variation can be written in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum OutputFormat {
    /// JPEG, the default when no `output` operation is given
    #[default]
    #[serde(alias = "jpg")]
    #[display("jpeg")]
    Jpeg,
    /// PNG
    #[display("png")]
    Png,
    /// GIF
    #[display("gif")]
    Gif,
    /// WebP (lossless)
    #[display("webp")]
    Webp,
}

/// Encoding capabilities and color rules for one output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPolicy {
    /// Extension used in store keys
    pub extension: &'static str,
    /// Codec used to write the format
    pub image_format: ImageFormat,
    /// Modes the encoder takes as-is
    pub accepted_modes: &'static [ColorMode],
    /// Mode anything else is converted to
    pub default_mode: ColorMode,
    /// Write through the animation encoder ("save all frames")
    pub multi_frame: bool,
    /// Use the strongest compression the encoder offers
    pub optimize: bool,
}

static JPEG: FormatPolicy = FormatPolicy {
    extension: "jpg",
    image_format: ImageFormat::Jpeg,
    accepted_modes: &[ColorMode::Rgb],
    default_mode: ColorMode::Rgb,
    multi_frame: false,
    optimize: true,
};

static PNG: FormatPolicy = FormatPolicy {
    extension: "png",
    image_format: ImageFormat::Png,
    accepted_modes: &[ColorMode::Indexed, ColorMode::Rgb, ColorMode::Rgba],
    default_mode: ColorMode::Rgb,
    multi_frame: false,
    optimize: true,
};

static GIF: FormatPolicy = FormatPolicy {
    extension: "gif",
    image_format: ImageFormat::Gif,
    accepted_modes: &[ColorMode::Indexed],
    default_mode: ColorMode::Indexed,
    multi_frame: true,
    optimize: true,
};

static WEBP: FormatPolicy = FormatPolicy {
    extension: "webp",
    image_format: ImageFormat::WebP,
    accepted_modes: &[ColorMode::Rgba],
    default_mode: ColorMode::Rgba,
    multi_frame: true,
    optimize: true,
};

impl OutputFormat {
    /// Look up the policy record for this format.
    pub fn policy(self) -> &'static FormatPolicy {
        match self {
            OutputFormat::Jpeg => &JPEG,
            OutputFormat::Png => &PNG,
            OutputFormat::Gif => &GIF,
            OutputFormat::Webp => &WEBP,
        }
    }

    /// Extension used in store keys (`jpg` for JPEG).
    pub fn extension(self) -> &'static str {
        self.policy().extension
    }

    /// Parse an output format name or extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for anything outside {jpg, jpeg, png, gif, webp}.
    pub fn from_extension(name: &str) -> Result<Self, ImageError> {
        match name.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            "webp" => Ok(OutputFormat::Webp),
            other => Err(ImageError::new(ImageErrorKind::UnsupportedFormat(
                other.to_string(),
            ))),
        }
    }
}

impl FormatPolicy {
    /// The mode an image in `mode` must be converted to before encoding.
    pub fn coerce(&self, mode: ColorMode) -> ColorMode {
        if self.accepted_modes.contains(&mode) {
            mode
        } else {
            self.default_mode
        }
    }
}
