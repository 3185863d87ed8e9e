//! Tests for error construction, location tracking and conversion.

use box51_error::{
    Box51Error, Box51ErrorKind, ConfigError, ImageError, ImageErrorKind, StorageError,
    StorageErrorKind,
};

#[test]
fn test_image_error_exposes_fields_like_storage_error() {
    let image = ImageError::new(ImageErrorKind::Decode("truncated".to_string()));
    let storage = StorageError::new(StorageErrorKind::FileRead("a.txt".to_string()));

    assert_eq!(image.kind, ImageErrorKind::Decode("truncated".to_string()));
    assert_eq!(&image.kind, image.kind());
    assert!(image.file.ends_with("error_test.rs"));
    assert!(image.line > 0);

    assert_eq!(storage.file, image.file);
    assert_eq!(storage.line, image.line + 1);
}

#[test]
fn test_display_includes_location() {
    let err = ImageError::new(ImageErrorKind::Encode("quality".to_string()));
    let message = err.to_string();

    assert!(message.starts_with("Image Error: Failed to encode image: quality"));
    assert!(message.contains(&format!("at line {}", err.line)));
}

#[test]
fn test_config_error_field() {
    let plain = ConfigError::new("box51.toml: unexpected end of input");
    assert_eq!(plain.field(), None);
    assert!(plain.to_string().starts_with("Configuration Error: box51.toml"));

    let field = ConfigError::invalid_field("key_length", "must be at least 1");
    assert_eq!(field.field(), Some("key_length"));
    assert_eq!(field.message, "must be at least 1");
    assert!(
        field
            .to_string()
            .starts_with("Configuration Error: `key_length` must be at least 1 at line")
    );
    assert!(field.file.ends_with("error_test.rs"));
}

#[test]
fn test_conversion_into_box51_error() {
    let missing = StorageErrorKind::NotFound("x.abc123.txt".into());
    let err: Box51Error = StorageError::new(missing).into();
    assert!(err.is_not_found());
    assert!(matches!(err.kind(), Box51ErrorKind::Storage(_)));

    let err: Box51Error = ImageError::new(ImageErrorKind::Worker("cancelled".into())).into();
    assert!(!err.is_not_found());
    assert!(err.storage_kind().is_none());
    let Box51ErrorKind::Image(image) = err.kind() else {
        panic!("expected an image error, got {err}");
    };
    assert_eq!(image.kind, ImageErrorKind::Worker("cancelled".into()));

    let err: Box51Error = ConfigError::invalid_field("tmp_dir", "must not be empty").into();
    assert!(err.to_string().starts_with("Box51 Error: Configuration Error: `tmp_dir`"));
}

#[test]
fn test_io_kinds() {
    assert!(StorageErrorKind::FileWrite(String::new()).is_io());
    assert!(StorageErrorKind::DirectoryList(String::new()).is_io());
    assert!(!StorageErrorKind::NotFound(String::new()).is_io());
    assert!(!StorageErrorKind::KeySpaceExhausted { attempts: 3 }.is_io());
}
