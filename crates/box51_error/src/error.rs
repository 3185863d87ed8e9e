//! Top-level error wrapper types.

use crate::{ConfigError, ImageError, StorageError, StorageErrorKind};

/// Every error a Box51 operation can surface.
///
/// # Examples
///
/// ```
/// use box51_error::{Box51Error, ConfigError};
///
/// let config_err = ConfigError::new("missing asset_root");
/// let err: Box51Error = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum Box51ErrorKind {
    /// Filesystem, key or lookup error
    #[from(StorageError)]
    Storage(StorageError),
    /// Decode, encode or transform error
    #[from(ImageError)]
    Image(ImageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Box51 error with kind discrimination.
///
/// # Examples
///
/// ```
/// use box51_error::{Box51Result, ConfigError};
///
/// fn might_fail() -> Box51Result<()> {
///     Err(ConfigError::new("key_length must be positive"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Box51 Error: {}", _0)]
pub struct Box51Error(Box<Box51ErrorKind>);

impl Box51Error {
    /// Create a new error from a kind.
    pub fn new(kind: Box51ErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &Box51ErrorKind {
        &self.0
    }

    /// The storage error kind, if this is a storage error.
    pub fn storage_kind(&self) -> Option<&StorageErrorKind> {
        match self.kind() {
            Box51ErrorKind::Storage(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Whether the requested asset was absent from both namespaces.
    pub fn is_not_found(&self) -> bool {
        matches!(self.storage_kind(), Some(StorageErrorKind::NotFound(_)))
    }
}

// Generic From implementation for any type that converts to Box51ErrorKind
impl<T> From<T> for Box51Error
where
    T: Into<Box51ErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Box51 operations.
pub type Box51Result<T> = std::result::Result<T, Box51Error>;
