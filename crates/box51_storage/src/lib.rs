//! Collision-safe asset storage for Box51.
//!
//! Assets live under generated store keys in one of two namespaces:
//!
//! - **permanent**: `<asset_root>/<store_key>`
//! - **temporary**: `<asset_root>/tmp/<store_key>`
//!
//! A store key is `{name}.{uid}.{ext}`; variations insert their name as
//! `{name}.{variation}.{uid}.{ext}`. Everything sharing the `{name}.` prefix
//! forms one group that is promoted and removed together.
//!
//! # Example
//!
//! ```no_run
//! use box51_storage::{AssetStore, StoreConfig, Upload};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = AssetStore::new(StoreConfig::new("/var/lib/box51"))?;
//!
//! let upload = Upload::from_path("holiday.jpg").await?;
//! let asset = store.store(upload, None, true).await?;
//!
//! // Later, once the owning record is saved
//! if let Some(moved) = store.make_permanent(&asset.store_key).await? {
//!     for (old, new) in moved {
//!         println!("{old} -> {new}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod descriptor;
mod key;
mod locator;
mod name;
mod store;
mod upload;
mod variations;

pub use config::StoreConfig;
pub use descriptor::{AssetDescriptor, AssetMeta, AssetType, VariationDescriptor, VariationMeta};
pub use key::{
    KEY_ALPHABET, KeyGenerator, KeyTemplate, RandomKeyGenerator, allocate_key, generate_key,
};
pub use locator::{FileSystemLocator, Located, Location, Locator};
pub use name::{FALLBACK_NAME, base_name, group_prefix, slugify, split_filename, validate_key};
pub use store::AssetStore;
pub use upload::Upload;
