//! Error types for the Box51 library.
//!
//! This crate provides the error types shared by every Box51 crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use box51_error::{Box51Result, StorageError, StorageErrorKind};
//!
//! fn read_asset() -> Box51Result<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound("photo.abc123.jpg".to_string())))?
//! }
//!
//! match read_asset() {
//!     Ok(data) => println!("Got {} bytes", data.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod image;
mod storage;

pub use config::ConfigError;
pub use error::{Box51Error, Box51ErrorKind, Box51Result};
pub use image::{ImageError, ImageErrorKind};
pub use storage::{StorageError, StorageErrorKind};
