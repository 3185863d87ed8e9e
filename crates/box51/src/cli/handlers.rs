//! Command handlers.

use crate::cli::Commands;
use box51_error::{Box51Result, ImageError, ImageErrorKind, StorageError, StorageErrorKind};
use box51_image::Operation;
use box51_storage::{AssetDescriptor, AssetStore, StoreConfig, Upload, VariationDescriptor};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Result of one command, printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    /// Descriptor of a newly stored asset
    Stored(AssetDescriptor),
    /// Where a retrieved asset was written
    Retrieved {
        /// Key that was read
        store_key: String,
        /// Destination file
        path: PathBuf,
        /// Bytes written
        length_bytes: u64,
    },
    /// Rename map of a promotion, `None` if the asset was already permanent
    Promoted {
        /// Key that was promoted
        store_key: String,
        /// Former temporary path to new filename
        moved: Option<BTreeMap<String, String>>,
    },
    /// Confirmation of a removal
    Removed {
        /// Key that was removed
        store_key: String,
    },
    /// Newly generated variations by name
    Varied(BTreeMap<String, VariationDescriptor>),
}

/// Resolve the store configuration for a CLI invocation.
///
/// An explicit file is loaded alone, otherwise the layered defaults are used.
/// `asset_root` replaces whatever root the configuration names; with no file
/// given it skips loading altogether.
///
/// # Errors
///
/// Returns a `ConfigError` if loading or validation fails.
pub fn load_config(config: Option<&Path>, asset_root: Option<&Path>) -> Box51Result<StoreConfig> {
    let config = match (config, asset_root) {
        (Some(path), Some(root)) => StoreConfig::from_file_with_root(path, root)?,
        (Some(path), None) => StoreConfig::from_file(path)?,
        (None, Some(root)) => StoreConfig::new(root),
        (None, None) => StoreConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Parse a JSON recipe file: `{"thumb": [{"op": "fit", ...}, ...], ...}`.
///
/// # Errors
///
/// Returns `FileRead` if the file cannot be read and `InvalidOperation` if it
/// is not a valid recipe.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn read_recipes(path: &Path) -> Box51Result<BTreeMap<String, Vec<Operation>>> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;

    let recipes: BTreeMap<String, Vec<Operation>> = serde_json::from_slice(&data)
        .map_err(|e| {
            ImageError::new(ImageErrorKind::InvalidOperation(format!(
                "recipe {}: {}",
                path.display(),
                e
            )))
        })?;

    debug!(variations = recipes.len(), "Loaded recipe");
    Ok(recipes)
}

/// Run one command against a store.
///
/// # Errors
///
/// Propagates the store's errors. `retrieve` of an absent key is `NotFound`.
#[instrument(skip(store))]
pub async fn execute(store: &AssetStore, command: Commands) -> Box51Result<CommandOutput> {
    match command {
        Commands::Store {
            path,
            name,
            temporary,
        } => {
            let upload = Upload::from_path(&path).await?;
            let asset = store.store(upload, name.as_deref(), temporary).await?;
            Ok(CommandOutput::Stored(asset))
        }

        Commands::Retrieve { key, out } => {
            let data = store
                .retrieve(&key)
                .await?
                .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(key.clone())))?;

            tokio::fs::write(&out, &data).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    out.display(),
                    e
                )))
            })?;

            Ok(CommandOutput::Retrieved {
                store_key: key,
                path: out,
                length_bytes: data.len() as u64,
            })
        }

        Commands::Promote { key } => {
            let moved = store.make_permanent(&key).await?;
            Ok(CommandOutput::Promoted {
                store_key: key,
                moved,
            })
        }

        Commands::Remove { key } => {
            store.remove(&key).await?;
            Ok(CommandOutput::Removed { store_key: key })
        }

        Commands::Vary { key, recipe } => {
            let recipes = read_recipes(&recipe).await?;
            let variations = store.generate_variations(&key, &recipes).await?;
            Ok(CommandOutput::Varied(variations))
        }
    }
}
