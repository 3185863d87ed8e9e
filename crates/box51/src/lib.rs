//! Box51 - collision-safe asset storage with image variations.
//!
//! Box51 stores uploaded files under generated keys, keeps freshly uploaded
//! assets in a temporary namespace until their owner is saved, and derives
//! resized, cropped, rotated or re-encoded variations from stored images.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use box51::{AssetStore, Fit, Operation, Output, OutputFormat, StoreConfig, Upload};
//! use std::collections::BTreeMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = AssetStore::new(StoreConfig::new("/var/lib/box51"))?;
//!
//!     let mut asset = store
//!         .store(Upload::from_path("holiday.jpg").await?, None, false)
//!         .await?;
//!
//!     let recipes = BTreeMap::from([(
//!         "thumb".to_string(),
//!         vec![
//!             Operation::from(Fit::new(200, 200)),
//!             Operation::from(Output::new(OutputFormat::Webp)),
//!         ],
//!     )]);
//!     let variations = store.generate_variations(&asset.store_key, &recipes).await?;
//!     asset.merge_variations(variations);
//!
//!     println!("{}", serde_json::to_string_pretty(&asset)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `box51_error` - Error types
//! - `box51_image` - Normalization, operations, format policy and rendering
//! - `box51_storage` - Keys, locator, asset store and configuration
//!
//! This crate re-exports everything and provides the `box51` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
mod telemetry;

pub use telemetry::{LoggingConfig, init_logging};

pub use box51_error::{
    Box51Error, Box51ErrorKind, Box51Result, ConfigError, ImageError, ImageErrorKind,
    StorageError, StorageErrorKind,
};
pub use box51_image::{
    ColorMode, Crop, CropBox, DEFAULT_JPEG_QUALITY, Fit, FormatPolicy, ImageInfo, Normalized,
    Operation, Orientation, Output, OutputFormat, Rendered, Rotate, Rotation, Source,
    SUPPORTED_INPUT_EXTENSIONS, apply_operations, encode, is_animated_gif, is_supported_input,
    normalize, orient, sniff_extension,
};
pub use box51_storage::{
    AssetDescriptor, AssetMeta, AssetStore, AssetType, FALLBACK_NAME, FileSystemLocator,
    KEY_ALPHABET, KeyGenerator, KeyTemplate, Located, Location, Locator, RandomKeyGenerator,
    StoreConfig, Upload, VariationDescriptor, VariationMeta, allocate_key, base_name,
    generate_key, group_prefix, slugify, split_filename, validate_key,
};
