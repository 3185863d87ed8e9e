//! Existence checks across the permanent and temporary namespaces.

use box51_error::{Box51Result, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Namespace an object lives in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Location {
    /// `<asset_root>/<store_key>`
    #[display("permanent")]
    Permanent,
    /// `<asset_root>/<tmp_dir>/<store_key>`
    #[display("temporary")]
    Temporary,
}

impl Location {
    /// The namespace selected by a `temporary` flag.
    pub fn from_temporary(temporary: bool) -> Self {
        if temporary {
            Location::Temporary
        } else {
            Location::Permanent
        }
    }

    /// Whether this is the temporary namespace.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Location::Temporary)
    }
}

/// A found object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Located {
    /// Absolute path of the object
    pub path: PathBuf,
    /// Namespace holding it
    pub location: Location,
}

/// Answers "does this key exist, and where".
///
/// This is the only definition of existence used for collision checks and
/// retrieval.
#[async_trait::async_trait]
pub trait Locator: Send + Sync {
    /// Find `store_key`, checking permanent storage before temporary.
    ///
    /// Returns `None` if neither namespace holds it.
    async fn locate(&self, store_key: &str) -> Box51Result<Option<Located>>;
}

/// Locator over the on-disk layout.
#[derive(Debug, Clone)]
pub struct FileSystemLocator {
    permanent: PathBuf,
    temporary: PathBuf,
}

impl FileSystemLocator {
    /// Locator over a permanent and a temporary directory.
    pub fn new(permanent: impl Into<PathBuf>, temporary: impl Into<PathBuf>) -> Self {
        Self {
            permanent: permanent.into(),
            temporary: temporary.into(),
        }
    }

    /// Directory backing a namespace.
    pub fn dir(&self, location: Location) -> &Path {
        match location {
            Location::Permanent => &self.permanent,
            Location::Temporary => &self.temporary,
        }
    }

    /// Path `store_key` has (or would have) in a namespace.
    pub fn path(&self, location: Location, store_key: &str) -> PathBuf {
        self.dir(location).join(store_key)
    }

    /// Whether `store_key` is a file in exactly this namespace.
    pub async fn exists_in(&self, location: Location, store_key: &str) -> Box51Result<bool> {
        let path = self.path(location, store_key);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}

#[async_trait::async_trait]
impl Locator for FileSystemLocator {
    async fn locate(&self, store_key: &str) -> Box51Result<Option<Located>> {
        for location in [Location::Permanent, Location::Temporary] {
            if self.exists_in(location, store_key).await? {
                return Ok(Some(Located {
                    path: self.path(location, store_key),
                    location,
                }));
            }
        }
        Ok(None)
    }
}
