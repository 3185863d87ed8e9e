//! Descriptor records returned to callers.
//!
//! Descriptors are plain data: the store never persists them. Callers keep
//! them in whatever record store they use and merge variation results back
//! with [`AssetDescriptor::merge_variations`].

use box51_image::{ImageInfo, is_supported_input};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a stored asset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Normalized on ingestion, eligible for variations
    #[display("image")]
    Image,
    /// Stored byte-for-byte
    #[display("file")]
    File,
}

impl AssetType {
    /// Classify by extension against the supported image input set.
    pub fn from_extension(extension: &str) -> Self {
        if is_supported_input(extension) {
            AssetType::Image
        } else {
            AssetType::File
        }
    }

    /// Whether this is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, AssetType::Image)
    }
}

/// Metadata recorded for a stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMeta {
    /// Filename the upload arrived with
    pub filename: String,
    /// Size of the stored bytes, after normalization
    pub length_bytes: u64,
    /// Mode and size, for images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
}

/// Metadata recorded for a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationMeta {
    /// Size of the encoded variation
    pub length_bytes: u64,
    /// Mode and size of the encoded variation
    pub image: ImageInfo,
}

/// One derived image of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationDescriptor {
    /// Variation name as requested
    pub name: String,
    /// `{base-name}.{variant}.{uid}.{ext}`
    pub store_key: String,
    /// Extension of the output format
    pub ext: String,
    /// Size and image properties
    pub meta: VariationMeta,
}

/// Record of a stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Normalized name, the first segment of the store key
    pub name: String,
    /// Lower-cased extension, empty if none could be determined
    pub ext: String,
    /// Key the bytes are stored under
    pub store_key: String,
    /// Image or plain file
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Whether the asset was stored in the temporary namespace
    pub temporary: bool,
    /// Filename, size and image properties
    pub meta: AssetMeta,
    /// Variations merged in by the caller
    #[serde(default)]
    pub variations: Vec<VariationDescriptor>,
}

impl AssetDescriptor {
    /// Merge freshly generated variations, replacing any with the same name.
    ///
    /// Existing variations keep their position; new names are appended in
    /// map order.
    pub fn merge_variations(&mut self, generated: BTreeMap<String, VariationDescriptor>) {
        for (name, variation) in generated {
            match self.variations.iter_mut().find(|v| v.name == name) {
                Some(existing) => *existing = variation,
                None => self.variations.push(variation),
            }
        }
    }

    /// Look up a merged variation by name.
    pub fn variation(&self, name: &str) -> Option<&VariationDescriptor> {
        self.variations.iter().find(|v| v.name == name)
    }
}
