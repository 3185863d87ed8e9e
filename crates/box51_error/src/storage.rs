//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to list a storage directory
    #[display("Failed to list storage directory: {}", _0)]
    DirectoryList(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Failed to move a file between namespaces
    #[display("Failed to rename file: {}", _0)]
    FileRename(String),
    /// Failed to delete file
    #[display("Failed to delete file: {}", _0)]
    FileDelete(String),
    /// Asset not found in either namespace
    #[display("Asset not found: {}", _0)]
    NotFound(String),
    /// Store key is malformed or escapes the asset root
    #[display("Invalid store key: {}", _0)]
    InvalidKey(String),
    /// Key allocation gave up after the configured number of attempts
    #[display("Key space exhausted after {} attempts", attempts)]
    KeySpaceExhausted {
        /// Number of candidate keys tried
        attempts: u32,
    },
}

impl StorageErrorKind {
    /// Whether this kind represents a filesystem I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StorageErrorKind::DirectoryCreation(_)
                | StorageErrorKind::DirectoryList(_)
                | StorageErrorKind::FileWrite(_)
                | StorageErrorKind::FileRead(_)
                | StorageErrorKind::FileRename(_)
                | StorageErrorKind::FileDelete(_)
        )
    }
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use box51_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("photo.abc123.jpg".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
