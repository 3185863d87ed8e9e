//! Image pipeline error types.

/// Specific image pipeline error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageErrorKind {
    /// Source bytes are not a decodable image
    #[display("Failed to decode image: {}", _0)]
    Decode(String),
    /// Encoder rejected the image
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
    /// Format is not in the supported input or output set
    #[display("Unsupported image format: {}", _0)]
    UnsupportedFormat(String),
    /// Transform operation arguments are out of range
    #[display("Invalid operation: {}", _0)]
    InvalidOperation(String),
    /// Blocking image worker failed to complete
    #[display("Image worker failed: {}", _0)]
    Worker(String),
}

/// Image pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use box51_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::Decode("truncated PNG".to_string()));
/// assert!(format!("{}", err).contains("decode"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new image error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ImageErrorKind {
        &self.kind
    }
}
