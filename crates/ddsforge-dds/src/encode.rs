//! DDS encoding.

use ddsforge_common::BinaryWriter;
use tracing::{debug, trace};

use crate::header::{DdsHeader, DDS_MAGIC_U32};
use crate::image::{mip_dimensions, TextureSource};
use crate::mapping::{mapping_mismatch, to_dds_format, to_fourcc};
use crate::{Error, Result};

/// Encode an image into a complete DDS file.
///
/// The output is the magic, the 124-byte header and every mip level's data,
/// base level first. Each level must be exactly as large as its dimensions
/// and format require; otherwise nothing is returned.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] if the pixel format has no DDS entry.
/// - [`Error::MissingMipLevel`] if the image cannot supply a level.
/// - [`Error::MipSizeMismatch`] if a level has the wrong length.
/// - [`Error::DimensionsTooLarge`] if sizes overflow the header or memory.
///
/// # Example
///
/// ```
/// use ddsforge_dds::{encode, Image, PixelFormat};
///
/// let image = Image::new(4, 4, PixelFormat::Rgba8, vec![0xFF; 64]);
/// let dds = encode(&image)?;
///
/// assert_eq!(dds.len(), 128 + 64);
/// assert_eq!(&dds[..4], b"DDS ");
/// # Ok::<(), ddsforge_dds::Error>(())
/// ```
pub fn encode<T: TextureSource + ?Sized>(image: &T) -> Result<Vec<u8>> {
    let format = image.format();
    let dds_format = to_dds_format(format).ok_or(Error::UnsupportedFormat(format))?;
    let info = dds_format.info();
    let four_cc = to_fourcc(format);

    if let Some(mismatch) = mapping_mismatch(format) {
        debug!(%mismatch, "format tables disagree");
    }

    let width = image.width();
    let height = image.height();
    let too_large = || Error::DimensionsTooLarge { width, height };

    let pitch = info.pitch(width, height).ok_or_else(too_large)?;
    let mip_levels = image.mip_levels();

    debug!(
        %format,
        dds_format = info.name,
        width,
        height,
        mip_levels,
        "encoding DDS"
    );

    // Validate every level before writing anything.
    let mut payloads = Vec::new();
    let mut payload_size = 0usize;
    for level in 0..mip_levels {
        let data = image.mip_data(level).ok_or(Error::MissingMipLevel {
            level,
            count: mip_levels,
        })?;

        let (mip_width, mip_height) = mip_dimensions(width, height, level);
        let expected = info
            .level_size(mip_width, mip_height)
            .and_then(|size| usize::try_from(size).ok())
            .ok_or_else(too_large)?;

        if data.len() != expected {
            return Err(Error::MipSizeMismatch {
                level,
                expected,
                actual: data.len(),
            });
        }

        trace!(level, mip_width, mip_height, size = expected, "mip level ok");
        payload_size = payload_size.checked_add(expected).ok_or_else(too_large)?;
        payloads.push(data);
    }

    let total = DdsHeader::ENCODED_LEN
        .checked_add(payload_size)
        .ok_or_else(too_large)?;

    let mipmap_count = image.has_mipmaps().then_some(mip_levels);
    let header = DdsHeader::for_texture(width, height, pitch, mipmap_count, info, four_cc);

    let mut writer = BinaryWriter::with_capacity(total);
    writer.write_u32(DDS_MAGIC_U32);
    header.write_to(&mut writer);
    for data in payloads {
        writer.write_bytes(data);
    }
    let buffer = writer.into_inner();
    debug_assert_eq!(buffer.len(), total);

    Ok(buffer)
}
