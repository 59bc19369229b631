//! Image download engine.
//!
//! This module fetches full-resolution assets and persists them:
//! - [`ImageDownloader`] - streaming HTTP fetch of an asset URL
//! - [`ImageSaver`] / [`FileSaver`] - pluggable byte sink, file-backed by default
//! - [`DownloadError`] - structured download failures with a fixed
//!   user-facing message

mod error;
mod fetch;
mod saver;

pub use error::{DOWNLOAD_FAILED_MESSAGE, DownloadError};
pub use fetch::ImageDownloader;
pub use saver::{DEFAULT_IMAGE_FILENAME, FileSaver, ImageSaver};
