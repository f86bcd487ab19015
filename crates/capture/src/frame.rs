//! Captured bitmaps

use crate::{CaptureError, CaptureResult, PixelFormat};
use image::{ImageBuffer, RgbaImage};

/// In-memory bitmap delivered by a capture
#[derive(Debug, Clone)]
pub struct CapturedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl CapturedImage {
    /// Wrap a tightly packed pixel buffer
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(CaptureError::InvalidFrame {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: image.into_raw(),
            width,
            height,
            format: PixelFormat::Rgba8,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA bytes, swapping channels for BGRA buffers
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut rgba_data = self.data.clone();

        if self.format == PixelFormat::Bgra8 {
            for chunk in rgba_data.chunks_exact_mut(4) {
                chunk.swap(0, 2);
            }
        }

        rgba_data
    }

    /// Convert to an RGBA image
    pub fn to_rgba_image(&self) -> CaptureResult<RgbaImage> {
        let expected = self.width as usize * self.height as usize * 4;
        ImageBuffer::from_raw(self.width, self.height, self.to_rgba_bytes()).ok_or(
            CaptureError::InvalidFrame {
                expected,
                actual: self.data.len(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rejects_mismatched_buffer() {
        let result = CapturedImage::new(2, 2, PixelFormat::Bgra8, vec![0; 15]);
        assert!(matches!(
            result,
            Err(CaptureError::InvalidFrame { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn bgra_is_swapped_to_rgba() {
        let image = CapturedImage::new(1, 1, PixelFormat::Bgra8, vec![10, 20, 30, 255]).unwrap();
        let rgba = image.to_rgba_image().unwrap();
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([30, 20, 10, 255]));
    }

    #[test]
    fn rgba_passes_through() {
        let mut source = RgbaImage::new(3, 2);
        source.put_pixel(2, 1, Rgba([1, 2, 3, 4]));

        let image = CapturedImage::from_rgba_image(source.clone());
        assert_eq!(image.size(), (3, 2));
        assert_eq!(image.format(), PixelFormat::Rgba8);
        assert_eq!(image.to_rgba_image().unwrap(), source);
    }

    #[test]
    fn zero_area_image_is_empty() {
        let image = CapturedImage::new(0, 5, PixelFormat::Bgra8, Vec::new()).unwrap();
        assert!(image.is_empty());
    }
}
