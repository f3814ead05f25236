//! ddsforge - DDS texture encoding library.
//!
//! This crate provides a unified interface to the ddsforge crates and adds
//! conversion from ordinary image files.
//!
//! # Crates
//!
//! - [`ddsforge_common`] - Little-endian binary reading and writing
//! - [`ddsforge_dds`] - Format catalog, header construction and DDS encoding
//! - [`convert`] - Image file loading, mipmap generation and pixel packing
//!
//! # Example
//!
//! ```no_run
//! use ddsforge::prelude::*;
//!
//! let source = load_image("albedo.png")?;
//! let image = convert_image(&source, &EncodeOptions::new(PixelFormat::Rgba8))?;
//! save_dds("albedo.dds", &image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use ddsforge_common as common;
pub use ddsforge_dds as dds;

pub mod convert;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convert::{
        convert_file, convert_image, generate_mipmaps, load_image, ConvertError, EncodeOptions,
    };
    pub use ddsforge_dds::{
        encode, save_dds, to_dds_format, to_fourcc, DdsFormat, DdsHeader, Image, PixelFormat,
        TextureSource,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
