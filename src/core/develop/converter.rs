//! Conversion of intermediate images into the derived display format.

use crate::error::DevelopError;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a display-ready file from intermediate image bytes
pub trait FormatConverter: Send + Sync {
    /// Extension of the files this converter produces, without the dot
    fn extension(&self) -> &str;

    /// Convert `intermediate` and write the result to `destination`
    fn convert(&self, intermediate: &[u8], destination: &Path) -> Result<(), DevelopError>;
}

/// Decodes any format the `image` crate understands and re-encodes as JPEG
#[derive(Debug, Clone, Copy)]
pub struct JpegConverter {
    quality: u8,
}

impl JpegConverter {
    /// Quality is clamped to 1..=100
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegConverter {
    fn default() -> Self {
        Self::new(90)
    }
}

impl FormatConverter for JpegConverter {
    fn extension(&self) -> &str {
        "jpg"
    }

    fn convert(&self, intermediate: &[u8], destination: &Path) -> Result<(), DevelopError> {
        let conversion_error = |reason: String| DevelopError::ConversionFailed {
            path: destination.to_path_buf(),
            reason,
        };
        let io_error = |source| DevelopError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let decoded = image::load_from_memory(intermediate)
            .map_err(|e| conversion_error(format!("could not decode intermediate image: {}", e)))?;
        // JPEG has no alpha channel
        let rgb = decoded.to_rgb8();

        let file = File::create(destination).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, self.quality)
            .encode_image(&rgb)
            .map_err(|e| conversion_error(format!("could not encode JPEG: {}", e)))?;
        writer.flush().map_err(io_error)?;

        Ok(())
    }
}
