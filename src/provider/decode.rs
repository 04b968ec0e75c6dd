//! Raster header decoding.

use super::ProviderFailure;

/// Width and height of a decoded image, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

impl ImageDims {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Reads the image size from encoded bytes (PNG, JPEG, BMP, GIF, WebP, ...).
///
/// Only the header is parsed. Bytes that are not a recognised raster format,
/// are truncated, or describe a zero-sized image fail with
/// [`ProviderFailure::Decoding`].
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDims, ProviderFailure> {
    let size = imagesize::blob_size(bytes)
        .map_err(|source| ProviderFailure::Decoding(source.to_string()))?;

    let width: u32 = size.width.try_into().map_err(|_| {
        ProviderFailure::Decoding(format!("image width {} does not fit in u32", size.width))
    })?;
    let height: u32 = size.height.try_into().map_err(|_| {
        ProviderFailure::Decoding(format!("image height {} does not fit in u32", size.height))
    })?;

    if width == 0 || height == 0 {
        return Err(ProviderFailure::Decoding(format!(
            "invalid image dimensions {}x{}",
            width, height
        )));
    }

    Ok(ImageDims { width, height })
}
