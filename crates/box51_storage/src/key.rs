//! Unique ids and collision-free store key allocation.

use crate::Locator;
use box51_error::{Box51Result, StorageError, StorageErrorKind};
use rand::Rng;

/// Symbols a unique id is drawn from.
pub const KEY_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Source of unique-id candidates.
///
/// Uniqueness is not this trait's job: [`allocate_key`] retries until a
/// candidate is free.
pub trait KeyGenerator: Send + Sync {
    /// Produce a candidate id of exactly `length` symbols.
    fn generate(&self, length: usize) -> String;
}

/// Thread-local RNG over [`KEY_ALPHABET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyGenerator;

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
            .collect()
    }
}

/// Random lowercase alphanumeric id of `length` symbols.
pub fn generate_key(length: usize) -> String {
    RandomKeyGenerator.generate(length)
}

/// Everything in a store key except its unique id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTemplate {
    prefix: String,
    extension: String,
}

impl KeyTemplate {
    /// `{name}.{uid}.{ext}`
    pub fn asset(name: &str, extension: &str) -> Self {
        Self {
            prefix: name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// `{name}.{variant}.{uid}.{ext}`
    pub fn variation(name: &str, variant: &str, extension: &str) -> Self {
        Self {
            prefix: format!("{}.{}", name, variant),
            extension: extension.to_string(),
        }
    }

    /// Compose the full key for one unique id.
    ///
    /// An empty extension leaves the key as `{prefix}.{uid}`.
    pub fn compose(&self, uid: &str) -> String {
        if self.extension.is_empty() {
            format!("{}.{}", self.prefix, uid)
        } else {
            format!("{}.{}.{}", self.prefix, uid, self.extension)
        }
    }
}

/// Find a key that neither namespace holds yet.
///
/// Each attempt draws a fresh id from `generator`, composes it with
/// `template` and asks `locator` whether the key is taken.
///
/// # Errors
///
/// Returns `KeySpaceExhausted` after `max_attempts` taken candidates, or
/// any error the locator raises.
#[tracing::instrument(skip(generator, locator, template), fields(template = ?template))]
pub async fn allocate_key<L>(
    generator: &dyn KeyGenerator,
    locator: &L,
    template: &KeyTemplate,
    key_length: usize,
    max_attempts: u32,
) -> Box51Result<String>
where
    L: Locator + ?Sized,
{
    for attempt in 1..=max_attempts {
        let candidate = template.compose(&generator.generate(key_length));

        if locator.locate(&candidate).await?.is_none() {
            tracing::debug!(attempt, key = %candidate, "Allocated store key");
            return Ok(candidate);
        }

        tracing::debug!(attempt, key = %candidate, "Store key taken, retrying");
    }

    tracing::error!(max_attempts, "No free store key found");
    Err(StorageError::new(StorageErrorKind::KeySpaceExhausted {
        attempts: max_attempts,
    })
    .into())
}
