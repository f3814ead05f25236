//! Conversion from decoded image files to encodable [`Image`]s.
//!
//! Decoded files arrive as 8-bit, 16-bit or float pixels. They are packed
//! into one of the uncompressed DDS layouts, and a mip chain can be built
//! down to 1x1. Block-compressed formats are not produced here; wrap
//! pre-compressed data with [`Image::from_contiguous`] instead.

use std::path::Path;

use half::f16;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use ddsforge_dds::{full_chain_len, mip_dimensions, save_dds, Image, PixelFormat};

/// Errors from loading and converting images.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Image decoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// DDS encoding failed.
    #[error("{0}")]
    Dds(#[from] ddsforge_dds::Error),

    /// Decoded pixels cannot be packed into this format.
    #[error("cannot convert decoded images to {0}")]
    UnsupportedTarget(PixelFormat),
}

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Pixel formats [`pixel_bytes`] can produce.
pub const CONVERTIBLE_FORMATS: [PixelFormat; 11] = [
    PixelFormat::L8,
    PixelFormat::La8,
    PixelFormat::Rgb8,
    PixelFormat::Rgba8,
    PixelFormat::Rf,
    PixelFormat::Rgf,
    PixelFormat::Rgbf,
    PixelFormat::Rgbaf,
    PixelFormat::Rh,
    PixelFormat::Rgh,
    PixelFormat::Rgbah,
];

/// How to turn a decoded image into a DDS image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Target pixel layout.
    pub format: PixelFormat,
    /// Whether to generate a mip chain.
    pub mipmaps: bool,
    /// Upper bound on generated levels below the base.
    pub max_levels: Option<u32>,
}

impl EncodeOptions {
    /// Options for `format` with a full mip chain.
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            mipmaps: true,
            max_levels: None,
        }
    }

    /// Disable mipmap generation.
    pub fn without_mipmaps(mut self) -> Self {
        self.mipmaps = false;
        self
    }

    /// Limit the number of generated levels below the base.
    pub fn with_max_levels(mut self, levels: u32) -> Self {
        self.mipmaps = true;
        self.max_levels = Some(levels);
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(PixelFormat::Rgba8)
    }
}

/// Decode an image file (PNG, JPEG or BMP).
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Build the levels below the base, largest first.
///
/// Level `i` measures `max(1, width >> i) x max(1, height >> i)`. Each level
/// is filtered from the one above it.
pub fn generate_mipmaps(base: &DynamicImage, max_levels: Option<u32>) -> Vec<DynamicImage> {
    let (width, height) = (base.width(), base.height());
    let count = full_chain_len(width, height).min(max_levels.unwrap_or(u32::MAX));

    let mut chain: Vec<DynamicImage> = Vec::with_capacity(count as usize);
    for level in 1..=count {
        let (w, h) = mip_dimensions(width, height, level);
        let source = chain.last().unwrap_or(base);
        chain.push(source.resize_exact(w, h, FilterType::Triangle));
    }

    debug!(width, height, levels = chain.len(), "generated mipmaps");
    chain
}

/// Pack decoded pixels tightly in `format`, little-endian.
pub fn pixel_bytes(image: &DynamicImage, format: PixelFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        PixelFormat::L8 => image.to_luma8().into_raw(),
        PixelFormat::La8 => image.to_luma_alpha8().into_raw(),
        PixelFormat::Rgb8 => image.to_rgb8().into_raw(),
        PixelFormat::Rgba8 => image.to_rgba8().into_raw(),
        PixelFormat::Rf => f32_bytes(float_channels(image, 1)),
        PixelFormat::Rgf => f32_bytes(float_channels(image, 2)),
        PixelFormat::Rgbf => f32_bytes(float_channels(image, 3)),
        PixelFormat::Rgbaf => f32_bytes(float_channels(image, 4)),
        PixelFormat::Rh => f16_bytes(float_channels(image, 1)),
        PixelFormat::Rgh => f16_bytes(float_channels(image, 2)),
        PixelFormat::Rgbah => f16_bytes(float_channels(image, 4)),
        other => return Err(ConvertError::UnsupportedTarget(other)),
    };
    Ok(bytes)
}

/// The first `channels` float channels of every pixel, row-major.
fn float_channels(image: &DynamicImage, channels: usize) -> Vec<f32> {
    let rgba = image.to_rgba32f();
    rgba.as_raw()
        .chunks_exact(4)
        .flat_map(|pixel| pixel[..channels].iter().copied())
        .collect()
}

fn f32_bytes(values: Vec<f32>) -> Vec<u8> {
    values.into_iter().flat_map(f32::to_le_bytes).collect()
}

fn f16_bytes(values: Vec<f32>) -> Vec<u8> {
    values
        .into_iter()
        .flat_map(|v| f16::from_f32(v).to_le_bytes())
        .collect()
}

/// Convert a decoded image into an encodable [`Image`].
pub fn convert_image(source: &DynamicImage, options: &EncodeOptions) -> Result<Image> {
    if !CONVERTIBLE_FORMATS.contains(&options.format) {
        return Err(ConvertError::UnsupportedTarget(options.format));
    }

    let mut levels = vec![pixel_bytes(source, options.format)?];
    if options.mipmaps {
        for mip in generate_mipmaps(source, options.max_levels) {
            levels.push(pixel_bytes(&mip, options.format)?);
        }
    }

    Ok(Image::with_mipmaps(
        source.width(),
        source.height(),
        options.format,
        levels,
    ))
}

/// Load `input`, convert it and write a DDS file to `output`.
///
/// Returns the converted image for reporting.
pub fn convert_file<P, Q>(input: P, output: Q, options: &EncodeOptions) -> Result<Image>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = load_image(input.as_ref())?;
    let image = convert_image(&source, options)?;
    save_dds(output, &image)?;
    Ok(image)
}
