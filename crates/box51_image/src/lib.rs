//! Image policy layer for Box51.
//!
//! Pixel work (decode, encode, crop, resize, rotate) is delegated to the
//! `image` crate. This crate decides *what* to do with it:
//!
//! - **Normalization**: on ingestion an image is made upright from its EXIF
//!   orientation and re-encoded without metadata ([`normalize`]).
//! - **Operations**: variation recipes are a closed sum type ([`Operation`])
//!   folded over a working copy of the source ([`apply_operations`]).
//! - **Format policy**: every output format has one [`FormatPolicy`] row
//!   driving color-mode coercion and encoder options.
//! - **Animation pass-through**: animated GIFs skip both normalization and
//!   transforms so no frames are lost.
//!
//! # Example
//!
//! ```no_run
//! use box51_image::{Fit, Operation, Output, OutputFormat, Source, DEFAULT_JPEG_QUALITY};
//!
//! # fn example(upload: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let normalized = box51_image::normalize(&upload)?;
//! let source = Source::decode(normalized.data)?;
//!
//! let thumb = source.render(
//!     &[
//!         Operation::from(Fit::new(200, 200)),
//!         Operation::from(Output::new(OutputFormat::Webp)),
//!     ],
//!     DEFAULT_JPEG_QUALITY,
//! )?;
//! assert_eq!(thumb.extension, "webp");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod format;
mod normalize;
mod operation;
mod render;
mod sniff;

pub use color::{ColorMode, ImageInfo};
pub use format::{FormatPolicy, OutputFormat, SUPPORTED_INPUT_EXTENSIONS, is_supported_input};
pub use normalize::{Normalized, normalize, orient};
pub use operation::{Crop, CropBox, Fit, Operation, Output, Rotate, Rotation};
pub use render::{DEFAULT_JPEG_QUALITY, Rendered, Source, apply_operations, encode};
pub use sniff::{is_animated_gif, sniff_extension};

pub use image::metadata::Orientation;
