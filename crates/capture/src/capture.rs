//! Single-frame capture sessions

use crate::{
    CaptureBackend, CaptureError, CaptureResult, CaptureStream, CapturedImage, ContentFilter,
    Display, FrameHandler, StreamConfig, WindowId,
};
use log::{debug, trace, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Latch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Waiting for the first frame or error
    Armed,
    /// Something was delivered; everything after is dropped
    Fired,
}

/// Passes exactly one frame or error through to the wrapped handler
pub struct FrameLatch {
    state: Mutex<LatchState>,
    handler: Box<dyn FrameHandler>,
}

impl FrameLatch {
    pub fn new(handler: impl FrameHandler + 'static) -> Self {
        Self {
            state: Mutex::new(LatchState::Armed),
            handler: Box::new(handler),
        }
    }

    pub fn state(&self) -> LatchState {
        *self.state.lock()
    }

    /// Returns true for the caller that moved the latch to `Fired`
    fn fire(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            LatchState::Armed => {
                *state = LatchState::Fired;
                true
            }
            LatchState::Fired => false,
        }
    }
}

impl FrameHandler for FrameLatch {
    fn on_frame(&self, image: CapturedImage) {
        if self.fire() {
            self.handler.on_frame(image);
        } else {
            trace!("Dropping frame delivered after the first");
        }
    }

    fn on_error(&self, error: CaptureError) {
        if self.fire() {
            self.handler.on_error(error);
        } else {
            trace!("Dropping stream error after completion: {}", error);
        }
    }
}

/// One in-flight capture of a display: a stream plus its one-shot latch.
///
/// The stream is torn down by [`CaptureSession::stop`] or, failing that, on
/// drop.
pub struct CaptureSession {
    display_id: u32,
    stream: Option<Box<dyn CaptureStream>>,
    latch: Arc<FrameLatch>,
}

impl CaptureSession {
    /// Start capturing `display` minus `excluded_windows`.
    ///
    /// `handler` receives exactly one call: the first frame or the first
    /// error, whichever comes first.
    pub fn start(
        backend: &dyn CaptureBackend,
        display: &Display,
        excluded_windows: &[WindowId],
        handler: impl FrameHandler + 'static,
    ) -> CaptureResult<Self> {
        let config = StreamConfig::for_display(display);
        let filter = ContentFilter::display(display.clone()).excluding_windows(excluded_windows);
        let latch = Arc::new(FrameLatch::new(handler));

        debug!(
            "Starting stream on display {} ({}x{}, {:?})",
            display.id, config.width, config.height, config.pixel_format
        );
        let stream = backend.start_stream(filter, config, latch.clone())?;

        Ok(Self {
            display_id: display.id,
            stream: Some(stream),
            latch,
        })
    }

    pub fn display_id(&self) -> u32 {
        self.display_id
    }

    /// Stop the stream. Idempotent.
    pub fn stop(&mut self) -> CaptureResult<()> {
        match self.stream.take() {
            Some(mut stream) => {
                debug!("Stopping stream on display {} (latch {:?})", self.display_id, self.latch.state());
                stream.stop()
            }
            None => Ok(()),
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Failed to stop capture stream: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counts {
        frames: AtomicUsize,
        errors: AtomicUsize,
    }

    struct CountingHandler(Arc<Counts>);

    impl FrameHandler for CountingHandler {
        fn on_frame(&self, _image: CapturedImage) {
            self.0.frames.fetch_add(1, Ordering::SeqCst);
        }

        fn on_error(&self, _error: CaptureError) {
            self.0.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn frame() -> CapturedImage {
        CapturedImage::new(1, 1, PixelFormat::Bgra8, vec![0, 0, 0, 255]).unwrap()
    }

    fn display() -> Display {
        Display {
            id: 3,
            name: "Main".into(),
            x: 0,
            y: 0,
            width: 800,
            height: 600,
            scale_factor: 1.0,
        }
    }

    #[derive(Default)]
    struct StreamLog {
        config: Mutex<Option<StreamConfig>>,
        filter: Mutex<Option<ContentFilter>>,
        stops: AtomicUsize,
    }

    struct FakeStream(Arc<StreamLog>);

    impl CaptureStream for FakeStream {
        fn stop(&mut self) -> CaptureResult<()> {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Delivers `frames` synchronously from `start_stream`
    struct FakeBackend {
        log: Arc<StreamLog>,
        frames: usize,
        fail_start: bool,
    }

    impl CaptureBackend for FakeBackend {
        fn list_displays(&self) -> CaptureResult<Vec<Display>> {
            Ok(vec![display()])
        }

        fn start_stream(
            &self,
            filter: ContentFilter,
            config: StreamConfig,
            handler: Arc<dyn FrameHandler>,
        ) -> CaptureResult<Box<dyn CaptureStream>> {
            if self.fail_start {
                return Err(CaptureError::StreamStart("denied".into()));
            }
            *self.log.config.lock() = Some(config);
            *self.log.filter.lock() = Some(filter);
            for _ in 0..self.frames {
                handler.on_frame(frame());
            }
            Ok(Box::new(FakeStream(self.log.clone())))
        }
    }

    #[test]
    fn latch_passes_only_first_frame() {
        let counts = Arc::new(Counts::default());
        let latch = FrameLatch::new(CountingHandler(counts.clone()));

        assert_eq!(latch.state(), LatchState::Armed);
        latch.on_frame(frame());
        latch.on_frame(frame());
        latch.on_error(CaptureError::Stream("late".into()));

        assert_eq!(latch.state(), LatchState::Fired);
        assert_eq!(counts.frames.load(Ordering::SeqCst), 1);
        assert_eq!(counts.errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn latch_error_first_suppresses_frames() {
        let counts = Arc::new(Counts::default());
        let latch = FrameLatch::new(CountingHandler(counts.clone()));

        latch.on_error(CaptureError::Stream("boom".into()));
        latch.on_frame(frame());

        assert_eq!(counts.errors.load(Ordering::SeqCst), 1);
        assert_eq!(counts.frames.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn session_configures_stream_for_display() {
        let log = Arc::new(StreamLog::default());
        let backend = FakeBackend { log: log.clone(), frames: 0, fail_start: false };
        let counts = Arc::new(Counts::default());

        let session = CaptureSession::start(&backend, &display(), &[42], CountingHandler(counts)).unwrap();

        assert_eq!(session.display_id(), 3);
        assert_eq!(session.latch.state(), LatchState::Armed);
        let config = log.config.lock().clone().unwrap();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.pixel_format, PixelFormat::Bgra8);
        let filter = log.filter.lock().clone().unwrap();
        assert_eq!(filter.excluded_windows, vec![42]);
    }

    #[test]
    fn session_delivers_exactly_one_frame() {
        let log = Arc::new(StreamLog::default());
        let backend = FakeBackend { log, frames: 5, fail_start: false };
        let counts = Arc::new(Counts::default());

        let session = CaptureSession::start(&backend, &display(), &[], CountingHandler(counts.clone())).unwrap();

        assert_eq!(session.latch.state(), LatchState::Fired);
        assert_eq!(counts.frames.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_is_idempotent_and_drop_does_not_stop_twice() {
        let log = Arc::new(StreamLog::default());
        let backend = FakeBackend { log: log.clone(), frames: 1, fail_start: false };
        let counts = Arc::new(Counts::default());

        let mut session = CaptureSession::start(&backend, &display(), &[], CountingHandler(counts)).unwrap();
        session.stop().unwrap();
        session.stop().unwrap();
        assert!(session.stream.is_none());
        drop(session);

        assert_eq!(log.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_running_stream() {
        let log = Arc::new(StreamLog::default());
        let backend = FakeBackend { log: log.clone(), frames: 0, fail_start: false };
        let counts = Arc::new(Counts::default());

        let session = CaptureSession::start(&backend, &display(), &[], CountingHandler(counts)).unwrap();
        drop(session);

        assert_eq!(log.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn start_failure_is_reported() {
        let log = Arc::new(StreamLog::default());
        let backend = FakeBackend { log, frames: 0, fail_start: true };
        let counts = Arc::new(Counts::default());

        let result = CaptureSession::start(&backend, &display(), &[], CountingHandler(counts.clone()));

        assert!(matches!(result, Err(CaptureError::StreamStart(_))));
        assert_eq!(counts.frames.load(Ordering::SeqCst), 0);
    }
}
