//! Displays, content filters and stream configuration

use crate::Rect;

/// Opaque platform window identifier
pub type WindowId = u32;

/// Pixel layout of a captured buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit BGRA, the native stream format
    Bgra8,
    /// 32-bit RGBA
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        4
    }
}

/// A physical screen as reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub id: u32,
    pub name: String,
    pub x: i32,
    pub y: i32,
    /// Width in points
    pub width: u32,
    /// Height in points
    pub height: u32,
    pub scale_factor: f32,
}

impl Display {
    /// Bounds in global coordinates (points)
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Size in physical pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = if self.scale_factor > 0.0 { self.scale_factor } else { 1.0 };
        (
            (self.width as f32 * scale).round() as u32,
            (self.height as f32 * scale).round() as u32,
        )
    }
}

/// Which content a stream includes
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFilter {
    pub display: Display,
    pub excluded_windows: Vec<WindowId>,
}

impl ContentFilter {
    /// Whole display, nothing excluded
    pub fn display(display: Display) -> Self {
        Self {
            display,
            excluded_windows: Vec::new(),
        }
    }

    pub fn excluding_windows(mut self, windows: &[WindowId]) -> Self {
        self.excluded_windows.extend_from_slice(windows);
        self
    }
}

/// Stream configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
}

impl StreamConfig {
    /// Sized to the display's pixel dimensions, BGRA
    pub fn for_display(display: &Display) -> Self {
        let (width, height) = display.pixel_size();
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_format: PixelFormat::Bgra8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retina() -> Display {
        Display {
            id: 1,
            name: "Built-in".into(),
            x: 0,
            y: 0,
            width: 1440,
            height: 900,
            scale_factor: 2.0,
        }
    }

    #[test]
    fn config_uses_pixel_dimensions() {
        let config = StreamConfig::for_display(&retina());
        assert_eq!((config.width, config.height), (2880, 1800));
        assert_eq!(config.pixel_format, PixelFormat::Bgra8);
    }

    #[test]
    fn zero_scale_falls_back_to_points() {
        let mut display = retina();
        display.scale_factor = 0.0;
        assert_eq!(display.pixel_size(), (1440, 900));
    }

    #[test]
    fn filter_collects_excluded_windows() {
        let filter = ContentFilter::display(retina()).excluding_windows(&[7, 9]);
        assert_eq!(filter.excluded_windows, vec![7, 9]);
        assert_eq!(filter.display.bounds(), Rect::new(0, 0, 1440, 900));
    }
}
