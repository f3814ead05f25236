//! DDS (DirectDraw Surface) texture encoding.
//!
//! This crate turns a mip-mapped image into a byte-exact DDS file:
//!
//! - [`format`] - Static catalog of DDS storage formats (block size, bytes per unit)
//! - [`to_dds_format`] / [`to_fourcc`] - Map a [`PixelFormat`] to header fields
//! - [`encode`] - Build the 128-byte header and append every mip level
//! - [`save_dds`] / [`write_dds`] - Write the encoded file
//!
//! Only the legacy header is produced; the DX10 extension is never written.
//!
//! # Example
//!
//! ```no_run
//! use ddsforge_dds::{save_dds, Image, PixelFormat};
//!
//! let base = vec![0u8; 8 * 8 * 4];
//! let image = Image::new(8, 8, PixelFormat::Rgba8, base);
//! save_dds("texture.dds", &image)?;
//! # Ok::<(), ddsforge_dds::Error>(())
//! ```

mod encode;
mod error;
mod image;
mod mapping;
mod pixel;
mod write;

pub mod format;
pub mod header;

pub use encode::encode;
pub use error::{Error, Result};
pub use format::{DdsFormat, FormatInfo};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};
pub use image::{full_chain_len, mip_dimensions, Image, TextureSource};
pub use mapping::{mapping_mismatch, to_dds_format, to_fourcc, MappingMismatch};
pub use pixel::{PixelFormat, UnknownPixelFormat};
pub use write::{save_dds, write_dds};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
