//! Capture orchestration
//!
//! Mediates between the user actions, the overlay and the capture backend.
//! Backend callbacks only send [`CaptureEvent`]s; state is mutated in
//! [`Orchestrator::poll`], which the UI calls on every frame.

use crate::config::AppConfig;
use crate::state::{Action, AppState};
use capture::{
    CaptureBackend, CaptureError, CaptureSession, CapturedImage, FrameHandler, Rect, RegionGrabber,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use export::PngExporter;
use log::{debug, error, info, warn};
use overlay::{OverlayWindow, RectF};
use std::path::PathBuf;
use std::time::Instant;

/// Results delivered back to the UI thread
#[derive(Debug)]
pub enum CaptureEvent {
    /// First frame of the full-screen stream
    Frame(CapturedImage),
    /// The full-screen stream failed
    Failed(CaptureError),
    /// The overlay completed with a global rectangle
    RegionSelected(RectF),
}

/// Native "save file" prompt
pub trait SaveDialog {
    /// `None` when the user cancelled
    fn choose_destination(&self, suggested_name: &str) -> Option<PathBuf>;
}

/// What [`Orchestrator::save_image`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to save
    Disabled,
    Cancelled,
    Saved(PathBuf),
    /// Encoding or writing failed; logged only
    Failed,
}

/// Forwards stream callbacks into the event channel
struct ChannelHandler(Sender<CaptureEvent>);

impl FrameHandler for ChannelHandler {
    fn on_frame(&self, image: CapturedImage) {
        let _ = self.0.send(CaptureEvent::Frame(image));
    }

    fn on_error(&self, error: CaptureError) {
        let _ = self.0.send(CaptureEvent::Failed(error));
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingRegion {
    rect: Rect,
    due: Instant,
}

/// Owns the application state and every in-flight capture resource
pub struct Orchestrator {
    config: AppConfig,
    state: AppState,
    backend: Box<dyn CaptureBackend>,
    grabber: Box<dyn RegionGrabber>,
    session: Option<CaptureSession>,
    overlay: Option<OverlayWindow>,
    pending_region: Option<PendingRegion>,
    events_tx: Sender<CaptureEvent>,
    events_rx: Receiver<CaptureEvent>,
}

impl Orchestrator {
    pub fn new(config: AppConfig, backend: Box<dyn CaptureBackend>, grabber: Box<dyn RegionGrabber>) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            config,
            state: AppState::new(),
            backend,
            grabber,
            session: None,
            overlay: None,
            pending_region: None,
            events_tx,
            events_rx,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The selection overlay, while one is open
    pub fn overlay_mut(&mut self) -> Option<&mut OverlayWindow> {
        self.overlay.as_mut()
    }

    /// Work is pending that needs further [`Orchestrator::poll`] calls
    pub fn is_busy(&self) -> bool {
        self.session.is_some() || self.pending_region.is_some() || self.overlay.is_some()
    }

    /// Capture the first display. Returns false if a capture is already
    /// in flight.
    pub fn capture_full_screen(&mut self) -> bool {
        if !self.state.apply(Action::BeginFullScreenCapture) {
            debug!("Full-screen capture already in progress");
            return false;
        }

        let displays = match self.backend.list_displays() {
            Ok(displays) => displays,
            Err(e) => {
                error!("Failed to capture screen: {}", e);
                self.state.apply(Action::FullScreenFailed);
                return true;
            }
        };

        let Some(display) = displays.first() else {
            error!("Failed to capture screen: {}", CaptureError::NoDisplays);
            self.state.apply(Action::FullScreenFailed);
            return true;
        };

        let handler = ChannelHandler(self.events_tx.clone());
        match CaptureSession::start(self.backend.as_ref(), display, &[], handler) {
            Ok(session) => {
                info!("Capturing display {} ({})", display.id, display.name);
                self.session = Some(session);
            }
            Err(e) => {
                error!("Failed to capture screen: {}", e);
                self.state.apply(Action::FullScreenFailed);
            }
        }

        true
    }

    /// Open the selection overlay. The grab runs once the selection
    /// completes and the dismissal delay has elapsed.
    pub fn capture_region(&mut self) -> bool {
        if self.overlay.is_some() {
            debug!("Selection overlay already open");
            return false;
        }

        let mut overlay = OverlayWindow::new(self.config.overlay_style.clone());
        let events = self.events_tx.clone();
        overlay.on_selection_complete(move |rect| {
            let _ = events.send(CaptureEvent::RegionSelected(rect));
        });

        self.overlay = Some(overlay);
        true
    }

    /// Prompt for a destination and write the current image as PNG.
    /// Failures are logged, never surfaced.
    pub fn save_image(&mut self, dialog: &dyn SaveDialog) -> SaveOutcome {
        let Some(image) = self.state.captured_image() else {
            debug!("Nothing to save");
            return SaveOutcome::Disabled;
        };

        let Some(path) = dialog.choose_destination(&self.config.default_file_name) else {
            return SaveOutcome::Cancelled;
        };
        let path = PngExporter::normalize_path(path);

        match PngExporter::export(image, &path) {
            Ok(()) => {
                info!("Saved screenshot to {}", path.display());
                self.state.apply(Action::Saved(path.clone()));
                SaveOutcome::Saved(path)
            }
            Err(e) => {
                warn!("Failed to save screenshot: {}", e);
                SaveOutcome::Failed
            }
        }
    }

    /// Drop the current image. Returns false when there is none.
    pub fn reset(&mut self) -> bool {
        let accepted = self.state.apply(Action::Reset);
        if !accepted {
            debug!("Nothing to reset");
        }
        accepted
    }

    /// Apply delivered events and run due work. Call from the UI thread.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }

        if let Some(pending) = self.pending_region {
            if Instant::now() >= pending.due {
                self.pending_region = None;
                self.grab_region(pending.rect);
            }
        }

        if self.overlay.as_ref().map_or(false, |o| !o.is_open()) {
            self.overlay = None;
        }
    }

    fn handle_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Frame(image) => {
                self.finish_session();
                info!("Captured full screen {}x{}", image.width(), image.height());
                self.state.apply(Action::FullScreenCaptured(image));
            }
            CaptureEvent::Failed(e) => {
                self.finish_session();
                error!("Failed to capture screen: {}", e);
                self.state.apply(Action::FullScreenFailed);
            }
            CaptureEvent::RegionSelected(rect) => {
                let rect = rect.to_rect();
                debug!("Region {:?} selected", rect);
                self.pending_region = Some(PendingRegion {
                    rect,
                    due: Instant::now() + self.config.region_capture_delay,
                });
            }
        }
    }

    fn finish_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            debug!("Releasing capture of display {}", session.display_id());
            if let Err(e) = session.stop() {
                warn!("Failed to stop capture: {}", e);
            }
        }
    }

    fn grab_region(&mut self, rect: Rect) {
        self.state.apply(Action::BeginRegionCapture);

        match self.grabber.capture_rect(rect) {
            Some(image) => {
                info!("Captured region {}x{}", image.width(), image.height());
                self.state.apply(Action::RegionCaptured(image));
            }
            None => error!("Failed to capture selected area: {}", CaptureError::RegionCapture(rect)),
        }
    }
}
