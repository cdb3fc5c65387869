//! Signature image decoding.
//!
//! Captured signatures arrive as PNG blobs. Compositing needs the color and
//! alpha planes separated, since the PDF image XObject carries opacity as a
//! soft mask stream.

use std::io::Cursor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("signature image data is empty")]
    Empty,

    #[error("failed to decode signature PNG: {0}")]
    Decode(String),

    #[error("unsupported signature image format: {0}")]
    Unsupported(String),
}

/// A decoded signature raster: 8-bit RGB plane plus an 8-bit alpha plane.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Vec<u8>,
}

impl SignatureImage {
    /// Decode a PNG blob into separate RGB and alpha planes.
    ///
    /// Grayscale and palette images are normalized to 8-bit color first;
    /// images without an alpha channel get a fully opaque mask.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }

        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let pixels = &buf[..info.buffer_size()];

        let (width, height) = (info.width, info.height);
        let count = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(count * 3);
        let mut alpha = Vec::with_capacity(count);

        match info.color_type {
            png::ColorType::Rgba => {
                for px in pixels.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                    alpha.push(px[3]);
                }
            }
            png::ColorType::Rgb => {
                rgb.extend_from_slice(pixels);
                alpha.resize(count, 0xFF);
            }
            png::ColorType::GrayscaleAlpha => {
                for px in pixels.chunks_exact(2) {
                    rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                    alpha.push(px[1]);
                }
            }
            png::ColorType::Grayscale => {
                for &g in pixels {
                    rgb.extend_from_slice(&[g, g, g]);
                }
                alpha.resize(count, 0xFF);
            }
            other => {
                return Err(ImageError::Unsupported(format!("{other:?}")));
            }
        }

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }
}
