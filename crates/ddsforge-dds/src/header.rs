//! DDS header structures.

use ddsforge_common::{BinaryReader, BinaryWriter};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::format::FormatInfo;
use crate::{Error, Result, DDS_MAGIC};

/// `"DDS "` as a little-endian word.
pub const DDS_MAGIC_U32: u32 = 0x2053_4444;

// Header flags
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PITCH: u32 = 0x8;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x2_0000;
pub const DDSD_LINEARSIZE: u32 = 0x8_0000;

// Pixel format flags
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;

// Channel masks for 8-bit-per-channel RGBA, written for every format.
pub const RED_MASK: u32 = 0x00FF_0000;
pub const GREEN_MASK: u32 = 0x0000_FF00;
pub const BLUE_MASK: u32 = 0x0000_00FF;
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Magic plus header, i.e. the offset of the first mip level.
    pub const ENCODED_LEN: usize = 4 + Self::SIZE as usize;

    /// Build the header for a 2D texture.
    ///
    /// `mipmap_count` is `None` for images without mipmaps, otherwise the
    /// total number of levels including the base.
    pub fn for_texture(
        width: u32,
        height: u32,
        pitch: u32,
        mipmap_count: Option<u32>,
        info: &FormatInfo,
        four_cc: FourCC,
    ) -> Self {
        let mut flags = DDSD_CAPS
            | DDSD_HEIGHT
            | DDSD_WIDTH
            | DDSD_PIXELFORMAT
            | DDSD_PITCH
            | DDSD_LINEARSIZE;
        if mipmap_count.is_some() {
            flags |= DDSD_MIPMAPCOUNT;
        }

        Self {
            size: Self::SIZE,
            flags,
            height,
            width,
            pitch_or_linear_size: pitch,
            depth: 1,
            mipmap_count: mipmap_count.unwrap_or(1),
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat {
                size: DdsPixelFormat::SIZE,
                flags: if info.compressed { DDPF_FOURCC } else { DDPF_RGB },
                four_cc,
                rgb_bit_count: 32,
                r_bit_mask: RED_MASK,
                g_bit_mask: GREEN_MASK,
                b_bit_mask: BLUE_MASK,
                a_bit_mask: ALPHA_MASK,
            },
            // The caps word reuses the linear-size bit value.
            caps: DDSD_LINEARSIZE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Parse the magic and header at the start of a DDS file.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(DDS_MAGIC)?;
        let header: DdsHeader = reader.read_struct()?;

        let size = header.size;
        if size != Self::SIZE {
            return Err(Error::InvalidHeader(format!(
                "header size is {size}, expected {}",
                Self::SIZE
            )));
        }
        let pf_size = header.pixel_format.size;
        if pf_size != DdsPixelFormat::SIZE {
            return Err(Error::InvalidHeader(format!(
                "pixel format size is {pf_size}, expected {}",
                DdsPixelFormat::SIZE
            )));
        }

        Ok(header)
    }

    /// Append the header (without magic) as little-endian words.
    pub fn write_to(&self, writer: &mut BinaryWriter) {
        let reserved1 = self.reserved1;
        writer.write_u32_slice(&[
            self.size,
            self.flags,
            self.height,
            self.width,
            self.pitch_or_linear_size,
            self.depth,
            self.mipmap_count,
        ]);
        writer.write_u32_slice(&reserved1);
        self.pixel_format.write_to(writer);
        writer.write_u32_slice(&[self.caps, self.caps2, self.caps3, self.caps4, self.reserved2]);
    }

    /// Check if the mipmap count field is flagged as valid.
    pub fn has_mipmap_count(&self) -> bool {
        self.flags & DDSD_MIPMAPCOUNT != 0
    }

    /// Check if the pixel format is identified by a FourCC.
    pub fn is_compressed(&self) -> bool {
        self.pixel_format.flags & DDPF_FOURCC != 0
    }

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;

    fn write_to(&self, writer: &mut BinaryWriter) {
        let four_cc = self.four_cc;
        writer.write_u32_slice(&[self.size, self.flags, four_cc.as_u32(), self.rgb_bit_count]);
        writer.write_u32_slice(&[
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        ]);
    }
}

/// Four-character code for compression type.
///
/// Besides real character codes, legacy Direct3D format numbers (111..=124)
/// are stored in this slot for float and packed formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No code.
    pub const NONE: Self = Self([0; 4]);
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// BC4 compression.
    pub const ATI1: Self = Self(*b"ATI1");
    /// BC5 compression.
    pub const ATI2: Self = Self(*b"ATI2");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");

    pub const R16F: Self = Self::from_u32(111);
    pub const RG16F: Self = Self::from_u32(112);
    pub const RGBA16F: Self = Self::from_u32(113);
    pub const R32F: Self = Self::from_u32(114);
    pub const RG32F: Self = Self::from_u32(115);
    pub const RGBA32F: Self = Self::from_u32(116);
    pub const R9G9B9E5: Self = Self::from_u32(117);
    pub const R8G8B8A8_UNORM: Self = Self::from_u32(118);
    pub const B8G8R8A8_UNORM: Self = Self::from_u32(119);
    pub const B5G5R5A1_UNORM: Self = Self::from_u32(120);
    pub const B5G6R5_UNORM: Self = Self::from_u32(121);
    pub const B4G4R4A4_UNORM: Self = Self::from_u32(122);
    pub const A8_UNORM: Self = Self::from_u32(123);
    pub const R8G8_UNORM: Self = Self::from_u32(124);

    /// Build a code from its little-endian word value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    /// The little-endian word stored in the header.
    pub const fn as_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Check if this is the zero code.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl std::fmt::Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_alphanumeric()) {
            self.0.iter().try_for_each(|&b| write!(f, "{}", b as char))
        } else {
            write!(f, "{}", self.as_u32())
        }
    }
}
