//! Shared fixtures for storage tests.

#![allow(dead_code)]

use box51_error::Box51Result;
use box51_storage::{AssetStore, KeyGenerator, Located, Location, Locator, StoreConfig};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{DynamicImage, Frame, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::collections::{HashSet, VecDeque};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Store rooted in a fresh temporary directory.
pub fn temp_store() -> (TempDir, AssetStore) {
    let dir = TempDir::new().unwrap();
    let store = AssetStore::new(StoreConfig::new(dir.path())).unwrap();
    (dir, store)
}

/// Files in a directory, sorted, hidden ones included.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn tmp_path(dir: &TempDir) -> PathBuf {
    dir.path().join("tmp")
}

/// Hands out ids from a fixed script, repeating the last one forever.
pub struct ScriptedKeys {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    pub calls: Mutex<usize>,
}

impl ScriptedKeys {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            script: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
            last: Mutex::new(ids.last().map(|s| s.to_string()).unwrap_or_default()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl KeyGenerator for ScriptedKeys {
    fn generate(&self, _length: usize) -> String {
        *self.calls.lock().unwrap() += 1;
        match self.script.lock().unwrap().pop_front() {
            Some(id) => {
                *self.last.lock().unwrap() = id.clone();
                id
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Locator over an in-memory set of permanent and temporary keys.
#[derive(Default)]
pub struct MemoryLocator {
    pub permanent: Mutex<HashSet<String>>,
    pub temporary: Mutex<HashSet<String>>,
}

impl MemoryLocator {
    pub fn with_keys(permanent: &[&str], temporary: &[&str]) -> Self {
        Self {
            permanent: Mutex::new(permanent.iter().map(|s| s.to_string()).collect()),
            temporary: Mutex::new(temporary.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[async_trait::async_trait]
impl Locator for MemoryLocator {
    async fn locate(&self, store_key: &str) -> Box51Result<Option<Located>> {
        if self.permanent.lock().unwrap().contains(store_key) {
            return Ok(Some(Located {
                path: PathBuf::from(store_key),
                location: Location::Permanent,
            }));
        }
        if self.temporary.lock().unwrap().contains(store_key) {
            return Ok(Some(Located {
                path: PathBuf::from("tmp").join(store_key),
                location: Location::Temporary,
            }));
        }
        Ok(None)
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    encode(&DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// Two-frame looping GIF.
pub fn animated_gif(width: u32, height: u32) -> Vec<u8> {
    let frames = vec![
        Frame::new(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))),
        Frame::new(RgbaImage::from_pixel(width, height, Rgba([0, 255, 0, 255]))),
    ];
    let mut data = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut data);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        encoder.encode_frames(frames).unwrap();
    }
    data
}
