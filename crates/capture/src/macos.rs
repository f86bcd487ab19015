//! macOS capture adapter built on xcap

use crate::{
    CaptureBackend, CaptureError, CaptureResult, CaptureStream, CapturedImage, ContentFilter,
    Display, FrameHandler, PixelFormat, Rect, RegionGrabber, StreamConfig,
};
use log::{debug, error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use xcap::{Frame, Monitor, VideoRecorder};

const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Screen capture through the system capture APIs
#[derive(Debug, Default, Clone, Copy)]
pub struct MacCapture;

impl MacCapture {
    pub fn new() -> Self {
        Self
    }
}

fn display_from_monitor(monitor: &Monitor) -> CaptureResult<Display> {
    let backend = |e: xcap::XCapError| CaptureError::Enumeration(e.to_string());
    Ok(Display {
        id: monitor.id().map_err(backend)?,
        name: monitor.name().unwrap_or_default(),
        x: monitor.x().map_err(backend)?,
        y: monitor.y().map_err(backend)?,
        width: monitor.width().map_err(backend)?,
        height: monitor.height().map_err(backend)?,
        scale_factor: monitor.scale_factor().unwrap_or(1.0),
    })
}

fn find_monitor(id: u32) -> CaptureResult<Monitor> {
    Monitor::all()
        .map_err(|e| CaptureError::Enumeration(e.to_string()))?
        .into_iter()
        .find(|m| m.id().map(|mid| mid == id).unwrap_or(false))
        .ok_or_else(|| CaptureError::StreamStart(format!("display {} is gone", id)))
}

impl CaptureBackend for MacCapture {
    fn list_displays(&self) -> CaptureResult<Vec<Display>> {
        let monitors = Monitor::all().map_err(|e| CaptureError::Enumeration(e.to_string()))?;
        monitors.iter().map(display_from_monitor).collect()
    }

    fn start_stream(
        &self,
        filter: ContentFilter,
        config: StreamConfig,
        handler: Arc<dyn FrameHandler>,
    ) -> CaptureResult<Box<dyn CaptureStream>> {
        if !filter.excluded_windows.is_empty() {
            warn!(
                "Window exclusion is not supported; capturing {} excluded windows",
                filter.excluded_windows.len()
            );
        }

        let monitor = find_monitor(filter.display.id)?;
        let (recorder, frames) = monitor
            .video_recorder()
            .map_err(|e| CaptureError::StreamStart(e.to_string()))?;

        // The recorder picks its own size and RGBA layout; frames are
        // wrapped as Rgba8 below regardless of `config`.
        debug!(
            "Recorder for display {} requested at {}x{} {:?}",
            filter.display.id, config.width, config.height, config.pixel_format
        );

        let running = Arc::new(AtomicBool::new(true));
        let worker = {
            let running = running.clone();
            thread::Builder::new()
                .name("tango-frames".into())
                .spawn(move || pump_frames(frames, running, handler))
                .map_err(|e| CaptureError::StreamStart(e.to_string()))?
        };

        if let Err(e) = recorder.start() {
            running.store(false, Ordering::SeqCst);
            join_worker(worker);
            return Err(CaptureError::StreamStart(e.to_string()));
        }

        Ok(Box::new(MacStream {
            recorder,
            running,
            worker: Some(worker),
        }))
    }
}

/// Forward recorder frames to the handler until the stream is stopped
fn pump_frames(frames: Receiver<Frame>, running: Arc<AtomicBool>, handler: Arc<dyn FrameHandler>) {
    while running.load(Ordering::SeqCst) {
        match frames.recv_timeout(FRAME_POLL_INTERVAL) {
            Ok(frame) => match CapturedImage::new(frame.width, frame.height, PixelFormat::Rgba8, frame.raw) {
                Ok(image) => handler.on_frame(image),
                Err(e) => handler.on_error(e),
            },
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                if running.load(Ordering::SeqCst) {
                    handler.on_error(CaptureError::Stream("recorder closed".into()));
                }
                break;
            }
        }
    }
}

fn join_worker(worker: JoinHandle<()>) {
    if worker.join().is_err() {
        warn!("Frame worker panicked");
    }
}

struct MacStream {
    recorder: VideoRecorder,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CaptureStream for MacStream {
    fn stop(&mut self) -> CaptureResult<()> {
        self.running.store(false, Ordering::SeqCst);
        let result = self
            .recorder
            .stop()
            .map_err(|e| CaptureError::StreamStop(e.to_string()));

        if let Some(worker) = self.worker.take() {
            join_worker(worker);
        }

        result
    }
}

impl RegionGrabber for MacCapture {
    fn capture_rect(&self, rect: Rect) -> Option<CapturedImage> {
        if rect.is_empty() {
            debug!("Skipping grab of zero-area rect {:?}", rect);
            return None;
        }

        let monitor = match Monitor::from_point(rect.x, rect.y) {
            Ok(monitor) => monitor,
            Err(e) => {
                error!("No display under {:?}: {}", rect, e);
                return None;
            }
        };

        let origin_x = monitor.x().ok()?;
        let origin_y = monitor.y().ok()?;
        let local_x = (rect.x - origin_x).max(0) as u32;
        let local_y = (rect.y - origin_y).max(0) as u32;

        match monitor.capture_region(local_x, local_y, rect.width, rect.height) {
            Ok(image) => Some(CapturedImage::from_rgba_image(image)),
            Err(e) => {
                error!("Region grab failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_panic_is_contained() {
        let worker = thread::spawn(|| panic!("frame conversion blew up"));
        join_worker(worker);
    }
}
