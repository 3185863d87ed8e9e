//! Content sniffing for uploads without a usable extension.

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat};
use std::io::Cursor;

/// Guess a file extension from the leading magic bytes.
///
/// Recognises every format the `image` crate can detect by signature.
/// Returns `None` for content it does not recognise.
pub fn sniff_extension(data: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(data).ok()?;
    let extension = format.extensions_str().first().copied();
    tracing::debug!(?format, ?extension, "Sniffed content format");
    extension
}

/// Whether the bytes are a GIF with more than one frame.
pub fn is_animated_gif(data: &[u8]) -> bool {
    if !matches!(image::guess_format(data), Ok(ImageFormat::Gif)) {
        return false;
    }

    match GifDecoder::new(Cursor::new(data)) {
        Ok(decoder) => decoder
            .into_frames()
            .take(2)
            .filter(|frame| frame.is_ok())
            .count()
            > 1,
        Err(e) => {
            tracing::debug!(error = %e, "GIF header unreadable, treating as static");
            false
        }
    }
}
