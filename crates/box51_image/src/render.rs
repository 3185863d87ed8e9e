//! Variation rendering: operations fold, color coercion, encoding.

use crate::{ColorMode, ImageInfo, Operation, Output, OutputFormat, Rotation, is_animated_gif};
use box51_error::{ImageError, ImageErrorKind};
use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Frame, ImageEncoder, ImageReader};
use std::io::Cursor;

/// Default JPEG quality when neither the recipe nor the caller sets one.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// One encoded variation.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Encoded bytes
    pub data: Vec<u8>,
    /// Extension for the store key
    pub extension: &'static str,
    /// Mode and size of the encoded image
    pub info: ImageInfo,
}

/// A decoded source image that variations are rendered from.
#[derive(Debug, Clone)]
pub struct Source {
    data: Vec<u8>,
    kind: SourceKind,
}

#[derive(Debug, Clone)]
enum SourceKind {
    /// Rendered by copying the bytes verbatim
    Animated(ImageInfo),
    Still(DynamicImage),
}

impl Source {
    /// Decode the source once for any number of variations.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the bytes are not a readable image.
    pub fn decode(data: Vec<u8>) -> Result<Self, ImageError> {
        let kind = if is_animated_gif(&data) {
            let size = ImageReader::new(Cursor::new(&data))
                .with_guessed_format()
                .map_err(|e| decode_error(e.to_string()))?
                .into_dimensions()
                .map_err(|e| decode_error(e.to_string()))?;
            SourceKind::Animated(ImageInfo {
                mode: ColorMode::Indexed,
                size,
            })
        } else {
            let image =
                image::load_from_memory(&data).map_err(|e| decode_error(e.to_string()))?;
            SourceKind::Still(image)
        };
        Ok(Self { data, kind })
    }

    /// Whether variations bypass the transform pipeline.
    pub fn is_animated(&self) -> bool {
        matches!(self.kind, SourceKind::Animated(_))
    }

    /// Render one variation from a working copy of the source.
    ///
    /// Animated sources ignore `operations` and come back byte-identical as GIF.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for out-of-range operation arguments and
    /// `Encode` if the encoder rejects the result.
    pub fn render(
        &self,
        operations: &[Operation],
        default_quality: u8,
    ) -> Result<Rendered, ImageError> {
        match &self.kind {
            SourceKind::Animated(info) => {
                tracing::debug!(
                    skipped = operations.len(),
                    "Animated source, copying bytes verbatim"
                );
                Ok(Rendered {
                    data: self.data.clone(),
                    extension: OutputFormat::Gif.extension(),
                    info: *info,
                })
            }
            SourceKind::Still(image) => {
                let (image, output) = apply_operations(image.clone(), operations)?;
                encode(image, &output, default_quality)
            }
        }
    }
}

/// Apply operations left to right, tracking the last `output` seen.
///
/// # Errors
///
/// Returns `InvalidOperation` for out-of-range arguments.
pub fn apply_operations(
    image: DynamicImage,
    operations: &[Operation],
) -> Result<(DynamicImage, Output), ImageError> {
    operations
        .iter()
        .try_fold((image, Output::default()), |(image, output), op| {
            let next = match op {
                Operation::Crop(crop) => {
                    let bounds = crop.to_box(image.width(), image.height())?;
                    let image =
                        image.crop_imm(bounds.left, bounds.top, bounds.width(), bounds.height());
                    (image, output)
                }
                Operation::Fit(fit) => {
                    let (width, height) = fit.dimensions(image.width(), image.height())?;
                    if (width, height) == (image.width(), image.height()) {
                        (image, output)
                    } else {
                        (image.resize_exact(width, height, FilterType::Lanczos3), output)
                    }
                }
                Operation::Rotate(rotate) => {
                    let image = match rotate.degrees {
                        Rotation::Deg90 => image.rotate90(),
                        Rotation::Deg180 => image.rotate180(),
                        Rotation::Deg270 => image.rotate270(),
                    };
                    (image, output)
                }
                Operation::Output(selected) => {
                    selected.validate()?;
                    (image, *selected)
                }
            };
            Ok(next)
        })
}

/// Coerce the color mode for `output.format` and encode.
///
/// # Errors
///
/// Returns `Encode` if the encoder rejects the image.
pub fn encode(
    image: DynamicImage,
    output: &Output,
    default_quality: u8,
) -> Result<Rendered, ImageError> {
    let policy = output.format.policy();
    let mode = policy.coerce(ColorMode::of(&image));
    let image = convert(image, mode);
    let (width, height) = (image.width(), image.height());

    let mut data = Vec::new();
    match output.format {
        OutputFormat::Jpeg => {
            let quality = output.quality.unwrap_or(default_quality);
            JpegEncoder::new_with_quality(&mut data, quality)
                .write_image(image.as_bytes(), width, height, image.color().into())
                .map_err(|e| encode_error(e.to_string()))?;
        }
        OutputFormat::Png => {
            let compression = if policy.optimize {
                CompressionType::Best
            } else {
                CompressionType::Default
            };
            PngEncoder::new_with_quality(&mut data, compression, PngFilter::Adaptive)
                .write_image(image.as_bytes(), width, height, image.color().into())
                .map_err(|e| encode_error(e.to_string()))?;
        }
        OutputFormat::Gif => {
            let speed = if policy.optimize { 1 } else { 10 };
            let mut encoder = GifEncoder::new_with_speed(&mut data, speed);
            if policy.multi_frame {
                encoder
                    .set_repeat(Repeat::Infinite)
                    .map_err(|e| encode_error(e.to_string()))?;
            }
            encoder
                .encode_frame(Frame::new(image.to_rgba8()))
                .map_err(|e| encode_error(e.to_string()))?;
        }
        OutputFormat::Webp => {
            WebPEncoder::new_lossless(&mut data)
                .write_image(image.as_bytes(), width, height, image.color().into())
                .map_err(|e| encode_error(e.to_string()))?;
        }
    }

    tracing::debug!(
        format = %output.format,
        %mode,
        width,
        height,
        size = data.len(),
        "Encoded variation"
    );

    Ok(Rendered {
        data,
        extension: policy.extension,
        info: ImageInfo {
            mode,
            size: (width, height),
        },
    })
}

fn convert(image: DynamicImage, mode: ColorMode) -> DynamicImage {
    match mode {
        ColorMode::Rgb => DynamicImage::ImageRgb8(image.into_rgb8()),
        // Palette quantization happens inside the GIF encoder.
        ColorMode::Rgba | ColorMode::Indexed => DynamicImage::ImageRgba8(image.into_rgba8()),
        _ => image,
    }
}

#[track_caller]
fn decode_error(message: String) -> ImageError {
    ImageError::new(ImageErrorKind::Decode(message))
}

#[track_caller]
fn encode_error(message: String) -> ImageError {
    ImageError::new(ImageErrorKind::Encode(message))
}
