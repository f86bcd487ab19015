//! PNG export

use crate::{ExportError, ExportResult};
use capture::CapturedImage;
use image::ImageFormat;
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// PNG exporter
pub struct PngExporter;

impl PngExporter {
    /// Encode an image to PNG bytes
    pub fn encode(image: &CapturedImage) -> ExportResult<Vec<u8>> {
        if image.is_empty() {
            return Err(ExportError::EmptyImage);
        }

        let rgba = image
            .to_rgba_image()
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        let mut png_bytes = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        Ok(png_bytes)
    }

    /// Encode `image` and write it to `path`
    pub fn export(image: &CapturedImage, path: &Path) -> ExportResult<()> {
        let png_bytes = Self::encode(image)?;

        fs::write(path, &png_bytes).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", png_bytes.len(), path.display());
        Ok(())
    }

    /// Append `.png` unless the path already carries it
    pub fn normalize_path(path: PathBuf) -> PathBuf {
        let is_png = path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("png"));

        if is_png {
            path
        } else {
            let mut name = path.into_os_string();
            name.push(".png");
            PathBuf::from(name)
        }
    }
}
