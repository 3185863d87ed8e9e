//! Ingestion-time normalization: upright pixels, no metadata.

use crate::{ColorMode, ImageInfo, is_animated_gif};
use box51_error::{ImageError, ImageErrorKind};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;

/// Result of normalizing an uploaded image.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Re-encoded bytes, free of metadata (or the original bytes for animated GIFs)
    pub data: Vec<u8>,
    /// Format the image was decoded from and re-encoded in
    pub format: ImageFormat,
    /// Orientation that was applied to the pixels
    pub orientation: Orientation,
    /// Mode and size of the normalized image
    pub info: ImageInfo,
}

/// Decode an image, make it upright and re-encode it without metadata.
///
/// Animated GIFs are returned unchanged because re-encoding through a single
/// decoded frame would drop the rest of the animation.
///
/// # Errors
///
/// Returns `Decode` if the bytes are not a readable image and `Encode` if the
/// source format cannot be written back.
#[tracing::instrument(skip(data), fields(size = data.len()))]
pub fn normalize(data: &[u8]) -> Result<Normalized, ImageError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| decode_error("unrecognised image signature".to_string()))?;

    if format == ImageFormat::Gif && is_animated_gif(data) {
        let size = reader
            .into_dimensions()
            .map_err(|e| decode_error(e.to_string()))?;
        tracing::debug!(?size, "Animated GIF passed through untouched");
        return Ok(Normalized {
            data: data.to_vec(),
            format,
            orientation: Orientation::NoTransforms,
            info: ImageInfo {
                mode: ColorMode::Indexed,
                size,
            },
        });
    }

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| decode_error(e.to_string()))?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unreadable orientation metadata, assuming upright");
        Orientation::NoTransforms
    });
    let image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(e.to_string()))?;
    let image = orient(image, orientation);

    let mut stripped = Cursor::new(Vec::new());
    image
        .write_to(&mut stripped, format)
        .map_err(|e| ImageError::new(ImageErrorKind::Encode(e.to_string())))?;

    let mode = if format == ImageFormat::Gif {
        ColorMode::Indexed
    } else {
        ColorMode::of(&image)
    };
    let info = ImageInfo::new(mode, &image);

    tracing::debug!(
        ?format,
        ?orientation,
        mode = %info.mode,
        width = info.width(),
        height = info.height(),
        "Normalized image"
    );

    Ok(Normalized {
        data: stripped.into_inner(),
        format,
        orientation,
        info,
    })
}

/// Apply an EXIF orientation to pixel data.
///
/// | EXIF | Orientation | Transform |
/// |---|---|---|
/// | 2 | `FlipHorizontal` | horizontal flip |
/// | 3 | `Rotate180` | 180 rotate |
/// | 4 | `FlipVertical` | vertical flip |
/// | 5 | `Rotate90FlipH` | horizontal flip, then 90 counter-clockwise |
/// | 6 | `Rotate90` | 90 clockwise |
/// | 7 | `Rotate270FlipH` | vertical flip, then 90 counter-clockwise |
/// | 8 | `Rotate270` | 90 counter-clockwise |
pub fn orient(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::NoTransforms => image,
        Orientation::FlipHorizontal => image.fliph(),
        Orientation::Rotate180 => image.rotate180(),
        Orientation::FlipVertical => image.flipv(),
        Orientation::Rotate90FlipH => image.fliph().rotate270(),
        Orientation::Rotate90 => image.rotate90(),
        Orientation::Rotate270FlipH => image.flipv().rotate270(),
        Orientation::Rotate270 => image.rotate270(),
    }
}

#[track_caller]
fn decode_error(message: String) -> ImageError {
    ImageError::new(ImageErrorKind::Decode(message))
}
