//! Incoming upload payloads.

use box51_error::{Box51Result, StorageError, StorageErrorKind};
use std::path::Path;

/// Bytes handed to [`AssetStore::store`](crate::AssetStore::store) with the
/// filename they arrived under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Originating filename, used for the name and extension
    pub filename: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl Upload {
    /// Wrap in-memory bytes.
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Read a local file, keeping only its file name.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` if the file cannot be read.
    #[tracing::instrument(fields(path = %path.as_ref().display()), skip(path))]
    pub async fn from_path(path: impl AsRef<Path>) -> Box51Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(filename = %filename, size = data.len(), "Read upload from disk");
        Ok(Self { filename, data })
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
