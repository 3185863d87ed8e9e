//! Tests for ingestion-time normalization and content sniffing.

mod test_utils;

use box51_error::ImageErrorKind;
use box51_image::{ColorMode, Orientation, is_animated_gif, normalize, orient, sniff_extension};
use image::{ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use test_utils::*;

fn orientation_of(data: &[u8]) -> Orientation {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .unwrap()
        .into_decoder()
        .unwrap()
        .orientation()
        .unwrap()
}

#[test]
fn exif_orientation_six_is_turned_upright() {
    let jpeg = encode(&quadrants(64, 32), ImageFormat::Jpeg);
    let tagged = with_exif_orientation(&jpeg, 6);
    assert_eq!(orientation_of(&tagged), Orientation::Rotate90);

    let normalized = normalize(&tagged).unwrap();
    assert_eq!(normalized.format, ImageFormat::Jpeg);
    assert_eq!(normalized.orientation, Orientation::Rotate90);
    assert_eq!(normalized.info.size, (32, 64));
    assert_eq!(normalized.info.mode, ColorMode::Rgb);

    // A clockwise quarter turn moves bottom-left to top-left.
    let upright = image::load_from_memory(&normalized.data).unwrap();
    assert!(close_to(rgb_at(&upright, 8, 16), BLUE));
    assert!(close_to(rgb_at(&upright, 24, 16), RED));
    assert!(close_to(rgb_at(&upright, 24, 48), GREEN));
    assert!(close_to(rgb_at(&upright, 8, 48), WHITE));
}

#[test]
fn normalized_output_carries_no_orientation_tag() {
    let jpeg = encode(&quadrants(64, 32), ImageFormat::Jpeg);
    let normalized = normalize(&with_exif_orientation(&jpeg, 6)).unwrap();

    assert_eq!(orientation_of(&normalized.data), Orientation::NoTransforms);
    assert!(!normalized.data.windows(6).any(|w| w == b"Exif\x00\x00"));
}

#[test]
fn untagged_image_keeps_its_geometry() {
    let png = encode(&quadrants(40, 20), ImageFormat::Png);
    let normalized = normalize(&png).unwrap();

    assert_eq!(normalized.format, ImageFormat::Png);
    assert_eq!(normalized.orientation, Orientation::NoTransforms);
    assert_eq!(normalized.info.size, (40, 20));
    assert_eq!(normalized.info.mode, ColorMode::Rgb);

    let decoded = image::load_from_memory(&normalized.data).unwrap();
    assert_eq!(rgb_at(&decoded, 0, 0), RED);
    assert_eq!(rgb_at(&decoded, 39, 19), WHITE);
}

#[test]
fn orientation_table_matches_exif_semantics() {
    let source = quadrants(4, 2);

    let mirrored = orient(source.clone(), Orientation::FlipHorizontal);
    assert_eq!(rgb_at(&mirrored, 0, 0), GREEN);

    let flipped = orient(source.clone(), Orientation::FlipVertical);
    assert_eq!(rgb_at(&flipped, 0, 0), BLUE);

    let half = orient(source.clone(), Orientation::Rotate180);
    assert_eq!(rgb_at(&half, 0, 0), WHITE);

    let transposed = orient(source.clone(), Orientation::Rotate90FlipH);
    assert_eq!((transposed.width(), transposed.height()), (2, 4));
    assert_eq!(rgb_at(&transposed, 0, 0), RED);
    assert_eq!(rgb_at(&transposed, 1, 0), BLUE);

    let transversed = orient(source.clone(), Orientation::Rotate270FlipH);
    assert_eq!(rgb_at(&transversed, 0, 0), WHITE);

    let counter = orient(source, Orientation::Rotate270);
    assert_eq!(rgb_at(&counter, 0, 0), GREEN);
}

#[test]
fn animated_gif_passes_through_untouched() {
    let gif = animated_gif(6, 4);
    assert!(is_animated_gif(&gif));

    let normalized = normalize(&gif).unwrap();
    assert_eq!(normalized.data, gif);
    assert_eq!(normalized.format, ImageFormat::Gif);
    assert_eq!(normalized.info.mode, ColorMode::Indexed);
    assert_eq!(normalized.info.size, (6, 4));
}

#[test]
fn static_gif_is_reencoded() {
    let gif = encode(&solid_rgba(5, 5, [0, 0, 0, 255]), ImageFormat::Gif);
    assert!(!is_animated_gif(&gif));

    let normalized = normalize(&gif).unwrap();
    assert_eq!(normalized.format, ImageFormat::Gif);
    assert_eq!(normalized.info.mode, ColorMode::Indexed);
    assert_eq!(normalized.info.size, (5, 5));
}

#[test]
fn garbage_is_a_decode_error() {
    let err = normalize(b"not an image at all").unwrap_err();
    assert!(matches!(err.kind(), ImageErrorKind::Decode(_)));
}

#[test]
fn sniffing_recognises_signatures() {
    let png = encode(&quadrants(4, 4), ImageFormat::Png);
    let jpeg = encode(&quadrants(4, 4), ImageFormat::Jpeg);
    let gif = animated_gif(2, 2);

    assert_eq!(sniff_extension(&png), Some("png"));
    assert_eq!(sniff_extension(&jpeg), Some("jpg"));
    assert_eq!(sniff_extension(&gif), Some("gif"));
    assert_eq!(sniff_extension(b"%PDF-1.7 plain document"), None);
    assert!(!is_animated_gif(&png));
}
