//! Store configuration.
//!
//! Configuration is TOML-based and layered:
//! - Bundled defaults (include_str! from box51.toml)
//! - User overrides (~/.config/box51/box51.toml, then ./box51.toml)
//! - `BOX51_*` environment variables
//!
//! Later sources override earlier ones.

use box51_error::{Box51Error, Box51Result, ConfigError};
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Configuration for an [`AssetStore`](crate::AssetStore).
///
/// # Example
///
/// ```toml
/// asset_root = "/var/lib/box51/assets"
/// tmp_dir = "tmp"
/// key_length = 6
/// max_key_attempts = 50
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct StoreConfig {
    /// Directory holding permanent objects
    #[setters(into)]
    asset_root: PathBuf,

    /// Sub-directory of `asset_root` holding temporary objects
    #[serde(default = "default_tmp_dir")]
    #[setters(into)]
    tmp_dir: String,

    /// Length of the unique id in store keys
    #[serde(default = "default_key_length")]
    key_length: usize,

    /// Candidate keys tried before failing with `KeySpaceExhausted`
    #[serde(default = "default_max_key_attempts")]
    max_key_attempts: u32,

    /// Cap on the normalized asset name
    #[serde(default = "default_max_name_length")]
    max_name_length: usize,

    /// JPEG quality when a recipe sets none
    #[serde(default = "default_jpeg_quality")]
    jpeg_quality: u8,
}

fn default_tmp_dir() -> String {
    "tmp".to_string()
}

fn default_key_length() -> usize {
    6
}

fn default_max_key_attempts() -> u32 {
    50
}

fn default_max_name_length() -> usize {
    200
}

fn default_jpeg_quality() -> u8 {
    box51_image::DEFAULT_JPEG_QUALITY
}

impl StoreConfig {
    /// Configuration rooted at `asset_root` with every other field defaulted.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            tmp_dir: default_tmp_dir(),
            key_length: default_key_length(),
            max_key_attempts: default_max_key_attempts(),
            max_name_length: default_max_name_length(),
            jpeg_quality: default_jpeg_quality(),
        }
    }

    /// Directory holding temporary objects.
    pub fn tmp_root(&self) -> PathBuf {
        self.asset_root.join(&self.tmp_dir)
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid field.
    pub fn validate(&self) -> Box51Result<()> {
        if self.asset_root.as_os_str().is_empty() {
            return Err(ConfigError::invalid_field("asset_root", "must not be empty").into());
        }
        if self.tmp_dir.is_empty()
            || self.tmp_dir.starts_with('.')
            || self.tmp_dir.contains(['/', '\\'])
        {
            return Err(ConfigError::invalid_field(
                "tmp_dir",
                format!("must be a plain directory name, got {:?}", self.tmp_dir),
            )
            .into());
        }
        if self.key_length == 0 {
            return Err(ConfigError::invalid_field("key_length", "must be at least 1").into());
        }
        if self.max_key_attempts == 0 {
            return Err(ConfigError::invalid_field("max_key_attempts", "must be at least 1").into());
        }
        if self.max_name_length == 0 {
            return Err(ConfigError::invalid_field("max_name_length", "must be at least 1").into());
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::invalid_field(
                "jpeg_quality",
                format!("must be 1..=100, got {}", self.jpeg_quality),
            )
            .into());
        }
        Ok(())
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Box51Result<Self> {
        debug!("Loading configuration from file");
        Self::from_sources(path.as_ref(), None)
    }

    /// Load configuration from a file, with `asset_root` taken from the caller.
    ///
    /// The file need not set `asset_root`; if it does, `asset_root` wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    #[instrument(
        skip(path, asset_root),
        fields(path = %path.as_ref().display(), asset_root = %asset_root.as_ref().display())
    )]
    pub fn from_file_with_root(
        path: impl AsRef<Path>,
        asset_root: impl AsRef<Path>,
    ) -> Box51Result<Self> {
        debug!("Loading configuration from file with root override");
        Self::from_sources(path.as_ref(), Some(asset_root.as_ref()))
    }

    fn from_sources(path: &Path, asset_root: Option<&Path>) -> Box51Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path));

        if let Some(root) = asset_root {
            builder = builder
                .set_override("asset_root", root.to_string_lossy().into_owned())
                .map_err(|e| {
                    Box51Error::from(ConfigError::invalid_field("asset_root", e.to_string()))
                })?;
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                Box51Error::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                Box51Error::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use box51_storage::StoreConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StoreConfig::load()?;
    /// println!("Assets live in {}", config.asset_root().display());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> Box51Result<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/box51/box51.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("box51").required(false))
            .add_source(Environment::with_prefix("BOX51").try_parsing(true));

        let config: Self = builder
            .build()
            .map_err(|e| {
                Box51Error::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                Box51Error::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}

const DEFAULT_CONFIG: &str = include_str!("../box51.toml");
