//! Screen capture module for Tango
//!
//! Wraps the platform screen-capture primitives: display enumeration, a
//! single-frame stream capture, and a direct rectangle grab.

pub mod backend;
pub mod capture;
pub mod display;
pub mod frame;

#[cfg(target_os = "macos")]
pub mod macos;

pub use backend::{CaptureBackend, CaptureStream, FrameHandler, RegionGrabber};
pub use capture::{CaptureSession, FrameLatch, LatchState};
pub use display::{ContentFilter, Display, PixelFormat, StreamConfig, WindowId};
pub use frame::CapturedImage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Display enumeration failed: {0}")]
    Enumeration(String),

    #[error("No displays found")]
    NoDisplays,

    #[error("Failed to start stream: {0}")]
    StreamStart(String),

    #[error("Failed to stop stream: {0}")]
    StreamStop(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Region capture failed for {0:?}")]
    RegionCapture(Rect),

    #[error("Invalid frame: expected {expected} bytes, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Rectangle in global screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_emptiness() {
        let rect = Rect::new(10, 20, 30, 40);
        assert!(!rect.is_empty());
        assert!(!Rect::new(-5, -5, 1, 1).is_empty());
        assert!(Rect::new(5, 5, 0, 10).is_empty());
    }
}
