//! Logo image loading for the first-page header
//!
//! JPEG data is embedded unchanged (DCTDecode). PNG data is decoded to 8-bit
//! samples and re-compressed with Flate; an alpha channel becomes a soft mask.

use crate::error::LogoError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// PDF filter applied to the image samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    DctDecode,
    FlateDecode,
}

impl ImageFilter {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::DctDecode => "DCTDecode",
            ImageFilter::FlateDecode => "FlateDecode",
        }
    }
}

/// Image ready to be embedded as an XObject.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub filter: ImageFilter,
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha samples
    pub soft_mask: Option<Vec<u8>>,
}

impl LogoImage {
    /// Load from raw bytes, detecting JPEG or PNG by signature.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LogoError> {
        if data.starts_with(&[0xFF, 0xD8]) {
            return Self::from_jpeg(data.to_vec());
        }
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Self::from_png(data);
        }
        Err(LogoError::UnsupportedFormat)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LogoError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, LogoError> {
        let (width, height, components) = jpeg_dimensions(&data)?;
        let color_space = match components {
            1 => "DeviceGray",
            4 => "DeviceCMYK",
            _ => "DeviceRGB",
        };
        Ok(Self {
            width,
            height,
            color_space,
            filter: ImageFilter::DctDecode,
            data,
            soft_mask: None,
        })
    }

    pub fn from_png(data: &[u8]) -> Result<Self, LogoError> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| LogoError::DecodeError(e.to_string()))?;

        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .map_err(|e| LogoError::DecodeError(e.to_string()))?;
        buffer.truncate(info.buffer_size());

        let (color_space, samples, alpha) = match info.color_type {
            png::ColorType::Grayscale => ("DeviceGray", buffer, None),
            png::ColorType::Rgb => ("DeviceRGB", buffer, None),
            png::ColorType::GrayscaleAlpha => {
                let (gray, alpha) = split_alpha(&buffer, 1);
                ("DeviceGray", gray, Some(alpha))
            }
            png::ColorType::Rgba => {
                let (rgb, alpha) = split_alpha(&buffer, 3);
                ("DeviceRGB", rgb, Some(alpha))
            }
            png::ColorType::Indexed => {
                return Err(LogoError::DecodeError("palette was not expanded".into()));
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space,
            filter: ImageFilter::FlateDecode,
            data: compress(&samples)?,
            soft_mask: alpha.map(|a| compress(&a)).transpose()?,
        })
    }
}

/// Load the logo, logging and swallowing any failure.
pub fn load_logo(path: &Path) -> Option<LogoImage> {
    match LogoImage::from_file(path) {
        Ok(logo) => {
            debug!(path = %path.display(), width = logo.width, height = logo.height, "logo loaded");
            Some(logo)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo unavailable, rendering without it");
            None
        }
    }
}

fn split_alpha(samples: &[u8], color_channels: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = color_channels + 1;
    let pixels = samples.len() / stride;
    let mut color = Vec::with_capacity(pixels * color_channels);
    let mut alpha = Vec::with_capacity(pixels);
    for pixel in samples.chunks_exact(stride) {
        color.extend_from_slice(&pixel[..color_channels]);
        alpha.push(pixel[color_channels]);
    }
    (color, alpha)
}

fn compress(data: &[u8]) -> Result<Vec<u8>, LogoError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| LogoError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| LogoError::CompressionError(e.to_string()))
}

/// Read width, height and component count from the first SOF marker.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), LogoError> {
    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        pos += 2;

        if marker == 0xFF || marker == 0x00 || (0xD0..=0xD9).contains(&marker) {
            continue;
        }

        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            let header = data
                .get(pos..pos + 8)
                .ok_or_else(|| LogoError::DecodeError("truncated JPEG frame header".into()))?;
            let height = u16::from_be_bytes([header[3], header[4]]) as u32;
            let width = u16::from_be_bytes([header[5], header[6]]) as u32;
            return Ok((width, height, header[7]));
        }

        let length = data
            .get(pos..pos + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]) as usize)
            .ok_or_else(|| LogoError::DecodeError("truncated JPEG segment".into()))?;
        pos += length;
    }
    Err(LogoError::DecodeError("no JPEG frame header found".into()))
}
