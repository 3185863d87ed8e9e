//! Name normalization and store key parsing.

use box51_error::{Box51Result, StorageError, StorageErrorKind};
use std::path::Path;

/// Name used when normalization leaves nothing behind.
pub const FALLBACK_NAME: &str = "asset";

/// Lower-case `input`, collapse every run of non-alphanumeric characters
/// into one `-`, and cap the result at `max_length` characters.
///
/// Non-ASCII text is transliterated first (`Café` becomes `cafe`), then only
/// ASCII letters and digits survive. Leading and trailing separators are
/// dropped.
pub fn slugify(input: &str, max_length: usize) -> String {
    let mut slug = String::with_capacity(input.len().min(max_length));
    let mut separator_pending = false;

    for c in deunicode::deunicode(input).chars() {
        if c.is_ascii_alphanumeric() {
            if separator_pending && !slug.is_empty() {
                slug.push('-');
            }
            separator_pending = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            separator_pending = true;
        }
    }

    slug.truncate(max_length);
    let trimmed = slug.trim_end_matches('-').len();
    slug.truncate(trimmed);
    slug
}

/// Split an upload filename into its stem and lower-cased extension.
///
/// Directory components are ignored; a leading-dot name such as `.profile`
/// has no extension.
pub fn split_filename(filename: &str) -> (String, String) {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    (stem, extension)
}

/// Reject keys that are not a single visible path component.
///
/// # Errors
///
/// Returns `InvalidKey` for empty keys, hidden names and anything with a
/// path separator or NUL.
pub fn validate_key(store_key: &str) -> Box51Result<()> {
    let invalid = store_key.is_empty()
        || store_key.starts_with('.')
        || store_key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(store_key.to_string())).into());
    }
    Ok(())
}

/// Base name of a key: everything before the first `.`.
///
/// # Errors
///
/// Returns `InvalidKey` if the key is invalid or has no `.` separator.
pub fn base_name(store_key: &str) -> Box51Result<&str> {
    validate_key(store_key)?;
    match store_key.split_once('.') {
        Some((base, _)) => Ok(base),
        None => Err(StorageError::new(StorageErrorKind::InvalidKey(store_key.to_string())).into()),
    }
}

/// Filename prefix shared by an asset and all of its variations: `{base-name}.`
///
/// # Errors
///
/// Returns `InvalidKey` if the key has no base name.
pub fn group_prefix(store_key: &str) -> Box51Result<String> {
    Ok(format!("{}.", base_name(store_key)?))
}
