//! Tests for id generation and bounded key allocation.

mod test_utils;

use box51_error::StorageErrorKind;
use box51_storage::{
    KEY_ALPHABET, KeyTemplate, RandomKeyGenerator, Upload, allocate_key, generate_key,
};
use std::collections::HashSet;
use test_utils::{MemoryLocator, ScriptedKeys, list_dir, temp_store};

#[test]
fn test_generate_key_length_and_alphabet() {
    for length in [1, 6, 32] {
        let key = generate_key(length);
        assert_eq!(key.len(), length);
        assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)), "{key}");
    }
}

#[test]
fn test_generate_key_varies() {
    let keys: HashSet<String> = (0..64).map(|_| generate_key(6)).collect();
    assert!(keys.len() > 60);
}

#[test]
fn test_key_templates() {
    assert_eq!(KeyTemplate::asset("photo", "jpg").compose("abc123"), "photo.abc123.jpg");
    assert_eq!(
        KeyTemplate::variation("photo", "thumb", "webp").compose("def456"),
        "photo.thumb.def456.webp"
    );
    assert_eq!(KeyTemplate::asset("readme", "").compose("abc123"), "readme.abc123");
}

#[tokio::test]
async fn test_allocate_retries_past_collisions() {
    let locator = MemoryLocator::with_keys(&["photo.aaaaaa.jpg"], &["photo.bbbbbb.jpg"]);
    let keys = ScriptedKeys::new(&["aaaaaa", "bbbbbb", "aaaaaa", "cccccc"]);

    let key = allocate_key(&keys, &locator, &KeyTemplate::asset("photo", "jpg"), 6, 50)
        .await
        .unwrap();

    assert_eq!(key, "photo.cccccc.jpg");
    assert_eq!(keys.calls(), 4);
}

#[tokio::test]
async fn test_allocate_first_candidate_free() {
    let locator = MemoryLocator::default();
    let key = allocate_key(
        &RandomKeyGenerator,
        &locator,
        &KeyTemplate::asset("doc", "pdf"),
        8,
        1,
    )
    .await
    .unwrap();

    assert!(key.starts_with("doc."));
    assert!(key.ends_with(".pdf"));
    assert_eq!(key.len(), "doc.".len() + 8 + ".pdf".len());
}

#[tokio::test]
async fn test_allocate_exhaustion_is_bounded() {
    let locator = MemoryLocator::with_keys(&[], &["photo.aaaaaa.jpg"]);
    let keys = ScriptedKeys::new(&["aaaaaa"]);

    let err = allocate_key(&keys, &locator, &KeyTemplate::asset("photo", "jpg"), 6, 5)
        .await
        .unwrap_err();

    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::KeySpaceExhausted { attempts: 5 })
    );
    assert_eq!(keys.calls(), 5);
}

#[tokio::test]
async fn test_store_never_reuses_a_key() {
    let (dir, store) = temp_store();
    let store = store.with_key_generator(ScriptedKeys::new(&[
        "dup000", "dup000", "dup000", "new001", "dup000", "new001", "new002",
    ]));

    let mut stored = Vec::new();
    for _ in 0..3 {
        let asset = store
            .store(Upload::new("notes.txt", b"plain text".to_vec()), None, false)
            .await
            .unwrap();
        stored.push(asset.store_key);
    }

    assert_eq!(
        stored,
        vec!["notes.dup000.txt", "notes.new001.txt", "notes.new002.txt"]
    );
    assert_eq!(list_dir(dir.path()), stored);
}

#[tokio::test]
async fn test_store_exhaustion_writes_nothing() {
    let (dir, store) = temp_store();
    let store = store.with_key_generator(ScriptedKeys::new(&["same00"]));

    store
        .store(Upload::new("a.txt", b"one".to_vec()), None, false)
        .await
        .unwrap();
    let err = store
        .store(Upload::new("a.txt", b"two".to_vec()), None, false)
        .await
        .unwrap_err();

    assert_eq!(
        err.storage_kind(),
        Some(&StorageErrorKind::KeySpaceExhausted { attempts: 50 })
    );
    assert_eq!(list_dir(dir.path()), vec!["a.same00.txt"]);
}
