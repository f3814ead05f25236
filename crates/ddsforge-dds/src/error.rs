//! Error types for DDS encoding.

use std::path::PathBuf;

use thiserror::Error;

use crate::PixelFormat;

/// Errors that can occur when encoding or inspecting DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// The pixel format has no DDS catalog entry.
    #[error("pixel format {0} cannot be stored in a DDS file")]
    UnsupportedFormat(PixelFormat),

    /// A mip level's data length disagrees with its dimensions.
    #[error("image data size mismatch for mipmap level {level}: expected {expected} bytes, got {actual}")]
    MipSizeMismatch {
        level: u32,
        expected: usize,
        actual: usize,
    },

    /// The image reports more mip levels than it can provide.
    #[error("mipmap level {level} is missing (image reports {count} levels)")]
    MissingMipLevel { level: u32, count: u32 },

    /// Sizes derived from the dimensions do not fit the header or memory.
    #[error("dimensions too large to encode: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// More mip levels requested than the chain down to 1x1 holds.
    #[error("{count} mipmap levels requested, but the chain ends after {max}")]
    TooManyMipLevels { count: u32, max: u32 },

    /// A packed mip chain has the wrong total length.
    #[error("packed image data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// Destination file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ddsforge_common::Error),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
