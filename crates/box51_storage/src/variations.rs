//! Variation generation for stored images.

use crate::store::run_blocking;
use crate::{
    AssetStore, KeyTemplate, Locator, VariationDescriptor, VariationMeta, base_name, slugify,
};
use box51_error::{Box51Result, StorageError, StorageErrorKind};
use box51_image::{Operation, Rendered, Source};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

impl AssetStore {
    /// Render and store one variation per recipe.
    ///
    /// Each recipe is an ordered operation list applied to a fresh copy of the
    /// source. Variations are written to the source's namespace under
    /// `{base-name}.{variation}.{uid}.{ext}`. Animated GIF sources are copied
    /// verbatim for every recipe.
    ///
    /// All variations are rendered before any is written, so a decode,
    /// validation or encode failure leaves no files behind. The returned map
    /// is not merged into any descriptor; see
    /// [`AssetDescriptor::merge_variations`](crate::AssetDescriptor::merge_variations).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the source key is in neither namespace
    /// - `InvalidKey` if a variation name normalizes to nothing
    /// - `Decode` / `InvalidOperation` / `Encode` from the image pipeline
    /// - `KeySpaceExhausted` / `FileWrite` while storing results
    #[instrument(skip(self, recipes), fields(variations = recipes.len()))]
    pub async fn generate_variations(
        &self,
        store_key: &str,
        recipes: &BTreeMap<String, Vec<Operation>>,
    ) -> Box51Result<BTreeMap<String, VariationDescriptor>> {
        let base = base_name(store_key)?.to_string();

        let located = self
            .locator()
            .locate(store_key)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(store_key.to_string())))?;

        let max_name_length = *self.config().max_name_length();
        let mut variants = Vec::with_capacity(recipes.len());
        for name in recipes.keys() {
            let variant = slugify(name, max_name_length);
            if variant.is_empty() {
                return Err(StorageError::new(StorageErrorKind::InvalidKey(format!(
                    "variation name {:?}",
                    name
                )))
                .into());
            }
            variants.push(variant);
        }

        let data = tokio::fs::read(&located.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                located.path.display(),
                e
            )))
        })?;
        debug!(size = data.len(), location = %located.location, "Loaded variation source");

        let quality = *self.config().jpeg_quality();
        let owned = recipes.clone();
        let rendered: Vec<(String, Rendered)> = run_blocking(move || {
            let source = Source::decode(data)?;
            owned
                .into_iter()
                .map(|(name, operations)| {
                    source
                        .render(&operations, quality)
                        .map(|rendered| (name, rendered))
                })
                .collect()
        })
        .await?;

        self.ensure_dir(located.location).await?;

        let mut generated = BTreeMap::new();
        for ((name, rendered), variant) in rendered.into_iter().zip(variants) {
            let template = KeyTemplate::variation(&base, &variant, rendered.extension);
            let key = self.allocate(&template).await?;
            self.write_atomic(located.location, &key, &rendered.data).await?;

            info!(
                variation = %name,
                store_key = %key,
                size = rendered.data.len(),
                "Stored variation"
            );

            generated.insert(
                name.clone(),
                VariationDescriptor {
                    name,
                    store_key: key,
                    ext: rendered.extension.to_string(),
                    meta: VariationMeta {
                        length_bytes: rendered.data.len() as u64,
                        image: rendered.info,
                    },
                },
            );
        }

        Ok(generated)
    }
}
