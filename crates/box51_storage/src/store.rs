//! The asset store: ingestion, retrieval, promotion and removal.

use crate::{
    AssetDescriptor, AssetMeta, AssetType, FALLBACK_NAME, FileSystemLocator, KeyGenerator,
    KeyTemplate, Location, Locator, RandomKeyGenerator, StoreConfig, Upload, allocate_key,
    group_prefix, slugify, split_filename, validate_key,
};
use box51_error::{Box51Result, ImageError, ImageErrorKind, StorageError, StorageErrorKind};
use box51_image::{normalize, sniff_extension};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Filesystem-backed asset store.
///
/// Layout under the configured root:
///
/// ```text
/// <asset_root>/<store_key>           permanent objects
/// <asset_root>/<tmp_dir>/<store_key> temporary objects
/// ```
///
/// Keys are claimed by existence checks alone. Two writers racing for the
/// same unique id is possible but astronomically unlikely with the default
/// 36^6 id space; nothing here takes a lock.
#[derive(Clone)]
pub struct AssetStore {
    config: StoreConfig,
    locator: FileSystemLocator,
    keys: Arc<dyn KeyGenerator>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore")
            .field("config", &self.config)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl AssetStore {
    /// Create a store over `config.asset_root`.
    ///
    /// Directories are created lazily on first write.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is invalid.
    #[instrument(skip(config), fields(asset_root = %config.asset_root().display()))]
    pub fn new(config: StoreConfig) -> Box51Result<Self> {
        config.validate()?;
        let locator = FileSystemLocator::new(config.asset_root().clone(), config.tmp_root());
        debug!("Created asset store");
        Ok(Self {
            config,
            locator,
            keys: Arc::new(RandomKeyGenerator),
        })
    }

    /// Replace the unique-id source.
    pub fn with_key_generator(mut self, generator: impl KeyGenerator + 'static) -> Self {
        self.keys = Arc::new(generator);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Locator over this store's namespaces.
    pub fn locator(&self) -> &FileSystemLocator {
        &self.locator
    }

    /// Persist an upload under a fresh key.
    ///
    /// The name comes from `name` if given, else the upload's file stem. The
    /// extension comes from the filename, or from content sniffing when the
    /// filename has none. Images are normalized before writing, and
    /// `meta.length_bytes` reflects the normalized size.
    ///
    /// # Errors
    ///
    /// - `Decode` if an image-typed upload cannot be decoded
    /// - `KeySpaceExhausted` if no free key is found
    /// - `DirectoryCreation` / `FileWrite` if the bytes cannot be written
    #[instrument(
        skip(self, upload, name),
        fields(filename = %upload.filename, size = upload.len())
    )]
    pub async fn store(
        &self,
        upload: Upload,
        name: Option<&str>,
        temporary: bool,
    ) -> Box51Result<AssetDescriptor> {
        let Upload { filename, data } = upload;

        let (stem, mut ext) = split_filename(&filename);
        if ext.is_empty() {
            if let Some(sniffed) = sniff_extension(&data) {
                debug!(extension = sniffed, "Extension inferred from content");
                ext = sniffed.to_string();
            }
        }

        let mut slug = slugify(name.unwrap_or(&stem), *self.config.max_name_length());
        if slug.is_empty() {
            slug = FALLBACK_NAME.to_string();
        }

        let asset_type = AssetType::from_extension(&ext);
        let (data, image) = if asset_type.is_image() {
            let normalized = run_blocking(move || normalize(&data)).await?;
            (normalized.data, Some(normalized.info))
        } else {
            (data, None)
        };

        let location = Location::from_temporary(temporary);
        self.ensure_dir(location).await?;
        let store_key = self.allocate(&KeyTemplate::asset(&slug, &ext)).await?;
        self.write_atomic(location, &store_key, &data).await?;

        info!(
            store_key = %store_key,
            asset_type = %asset_type,
            location = %location,
            size = data.len(),
            "Stored asset"
        );

        Ok(AssetDescriptor {
            name: slug,
            ext,
            store_key,
            asset_type,
            temporary,
            meta: AssetMeta {
                filename,
                length_bytes: data.len() as u64,
                image,
            },
            variations: Vec::new(),
        })
    }

    /// Read an asset from whichever namespace holds it.
    ///
    /// Returns `None` if neither does, including when the object is removed
    /// between lookup and read.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for malformed keys and `FileRead` for I/O failures.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, store_key: &str) -> Box51Result<Option<Vec<u8>>> {
        validate_key(store_key)?;

        let Some(located) = self.locator.locate(store_key).await? else {
            debug!("Asset not found");
            return Ok(None);
        };

        match tokio::fs::read(&located.path).await {
            Ok(data) => {
                debug!(location = %located.location, size = data.len(), "Retrieved asset");
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Asset removed before it could be read");
                Ok(None)
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                located.path.display(),
                e
            )))
            .into()),
        }
    }

    /// Move a temporary asset and every file of its group to permanent storage.
    ///
    /// Returns `None` without touching anything if the key is already
    /// permanent. Otherwise returns a map from each moved file's former path
    /// relative to the asset root (`tmp/photo.abc123.jpg`) to its new
    /// filename. Files whose name is already taken in permanent storage are
    /// left where they are.
    ///
    /// Each rename is atomic; the group as a whole is not.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is in neither namespace, and
    /// `DirectoryList` / `FileRename` for I/O failures.
    #[instrument(skip(self))]
    pub async fn make_permanent(
        &self,
        store_key: &str,
    ) -> Box51Result<Option<BTreeMap<String, String>>> {
        let prefix = group_prefix(store_key)?;

        if self.locator.exists_in(Location::Permanent, store_key).await? {
            debug!("Asset already permanent");
            return Ok(None);
        }
        if !self.locator.exists_in(Location::Temporary, store_key).await? {
            return Err(StorageError::new(StorageErrorKind::NotFound(store_key.to_string())).into());
        }

        self.ensure_dir(Location::Permanent).await?;

        let mut moved = BTreeMap::new();
        for filename in self.list_group(Location::Temporary, &prefix).await? {
            if self.locator.exists_in(Location::Permanent, &filename).await? {
                warn!(filename = %filename, "Already permanent, skipping");
                continue;
            }

            let from = self.locator.path(Location::Temporary, &filename);
            let to = self.locator.path(Location::Permanent, &filename);
            tokio::fs::rename(&from, &to).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRename(format!(
                    "{} to {}: {}",
                    from.display(),
                    to.display(),
                    e
                )))
            })?;

            debug!(filename = %filename, "Promoted file");
            moved.insert(format!("{}/{}", self.config.tmp_dir(), filename), filename);
        }

        info!(count = moved.len(), "Promoted asset group");
        Ok(Some(moved))
    }

    /// Delete an asset and every file of its group from both namespaces.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for malformed keys and `DirectoryList` /
    /// `FileDelete` for I/O failures.
    #[instrument(skip(self))]
    pub async fn remove(&self, store_key: &str) -> Box51Result<()> {
        let prefix = group_prefix(store_key)?;

        if self.locator.locate(store_key).await?.is_none() {
            debug!("Asset not found, nothing to remove");
            return Ok(());
        }

        let mut removed = 0usize;
        for location in [Location::Permanent, Location::Temporary] {
            for filename in self.list_group(location, &prefix).await? {
                let path = self.locator.path(location, &filename);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        debug!(filename = %filename, location = %location, "Removed file");
                        removed += 1;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        debug!(filename = %filename, "File already gone");
                    }
                    Err(e) => {
                        return Err(StorageError::new(StorageErrorKind::FileDelete(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                        .into());
                    }
                }
            }
        }

        info!(removed, "Removed asset group");
        Ok(())
    }

    pub(crate) async fn allocate(&self, template: &KeyTemplate) -> Box51Result<String> {
        allocate_key(
            self.keys.as_ref(),
            &self.locator,
            template,
            *self.config.key_length(),
            *self.config.max_key_attempts(),
        )
        .await
    }

    pub(crate) async fn ensure_dir(&self, location: Location) -> Box51Result<()> {
        let dir = self.locator.dir(location);
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(())
    }

    /// Write to a hidden partial file, then rename into place.
    pub(crate) async fn write_atomic(
        &self,
        location: Location,
        store_key: &str,
        data: &[u8],
    ) -> Box51Result<PathBuf> {
        let path = self.locator.path(location, store_key);
        let partial = self
            .locator
            .dir(location)
            .join(format!(".{}.partial", store_key));

        if let Err(e) = tokio::fs::write(&partial, data).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                partial.display(),
                e
            )))
            .into());
        }

        if let Err(e) = tokio::fs::rename(&partial, &path).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                partial.display(),
                path.display(),
                e
            )))
            .into());
        }

        Ok(path)
    }

    /// Visible files in a namespace whose name starts with `prefix`, sorted.
    async fn list_group(&self, location: Location, prefix: &str) -> Box51Result<Vec<String>> {
        let dir = self.locator.dir(location);
        let list_error = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::DirectoryList(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        };

        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(list_error(e).into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !name.starts_with(prefix) {
                continue;
            }
            if entry.file_type().await.map_err(list_error)?.is_file() {
                names.push(name);
            }
        }

        names.sort();
        debug!(location = %location, prefix, matched = names.len(), "Scanned group");
        Ok(names)
    }
}

/// Run image work on the blocking pool.
pub(crate) async fn run_blocking<T, F>(task: F) -> Box51Result<T>
where
    F: FnOnce() -> Result<T, ImageError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ImageError::new(ImageErrorKind::Worker(e.to_string())))?;
    Ok(result?)
}
