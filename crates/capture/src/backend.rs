//! Platform capture interfaces
//!
//! A platform adapter implements [`CaptureBackend`] for stream captures and
//! [`RegionGrabber`] for direct rectangle grabs. Frames come back through a
//! [`FrameHandler`], usually on a thread owned by the backend.

use crate::{CaptureError, CaptureResult, CapturedImage, ContentFilter, Display, Rect, StreamConfig};
use std::sync::Arc;

/// Receives frames and asynchronous errors from a running stream
pub trait FrameHandler: Send + Sync {
    fn on_frame(&self, image: CapturedImage);
    fn on_error(&self, error: CaptureError);
}

/// A running capture stream
pub trait CaptureStream {
    /// Tear the stream down. The stream is considered stopped even on error.
    fn stop(&mut self) -> CaptureResult<()>;
}

/// Stream-based screen capture
pub trait CaptureBackend {
    /// Enumerate the available displays
    fn list_displays(&self) -> CaptureResult<Vec<Display>>;

    /// Start a stream delivering frames of `filter` to `handler`
    fn start_stream(
        &self,
        filter: ContentFilter,
        config: StreamConfig,
        handler: Arc<dyn FrameHandler>,
    ) -> CaptureResult<Box<dyn CaptureStream>>;
}

/// Synchronous single-frame grab of a global rectangle
pub trait RegionGrabber {
    /// `None` when the platform could not produce an image
    fn capture_rect(&self, rect: Rect) -> Option<CapturedImage>;
}
