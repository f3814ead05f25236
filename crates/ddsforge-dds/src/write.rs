//! Writing encoded DDS files.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::encode::encode;
use crate::image::TextureSource;
use crate::{Error, Result};

/// Encode an image and write it to `path`.
///
/// The image is fully encoded before the file is created, so encoding
/// errors never leave a file behind.
pub fn save_dds<P, T>(path: P, image: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: TextureSource + ?Sized,
{
    let path = path.as_ref();
    let buffer = encode(image)?;

    let mut file = File::create(path).map_err(|source| Error::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&buffer)?;

    debug!(path = %path.display(), bytes = buffer.len(), "wrote DDS file");
    Ok(())
}

/// Encode an image and write it to an arbitrary sink.
pub fn write_dds<W, T>(out: &mut W, image: &T) -> Result<()>
where
    W: Write + ?Sized,
    T: TextureSource + ?Sized,
{
    let buffer = encode(image)?;
    out.write_all(&buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Image, PixelFormat};

    #[test]
    fn test_save_dds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.dds");
        let image = Image::new(2, 2, PixelFormat::Rgba8, vec![0xFF; 16]);

        save_dds(&path, &image).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, encode(&image).unwrap());
    }

    #[test]
    fn test_save_dds_encode_error_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dds");
        let image = Image::new(2, 2, PixelFormat::Rgba8, vec![0xFF; 15]);

        assert!(matches!(
            save_dds(&path, &image),
            Err(Error::MipSizeMismatch { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_dds_create_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dds");
        let image = Image::new(1, 1, PixelFormat::L8, vec![0]);

        match save_dds(&path, &image) {
            Err(Error::Create { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected create error, got {other:?}"),
        }
    }

    #[test]
    fn test_write_dds_to_vec() {
        let image = Image::new(1, 1, PixelFormat::Rf, 1.5f32.to_le_bytes().to_vec());
        let mut out = Vec::new();

        write_dds(&mut out, &image).unwrap();

        assert_eq!(out.len(), 128 + 4);
        assert_eq!(&out[128..], 1.5f32.to_le_bytes());
    }
}
