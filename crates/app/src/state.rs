//! Application state for Tango

use capture::CapturedImage;
use std::path::PathBuf;

/// Everything that can change [`AppState`]
#[derive(Debug, Clone)]
pub enum Action {
    /// Full-screen capture requested
    BeginFullScreenCapture,
    /// The stream delivered its frame
    FullScreenCaptured(CapturedImage),
    /// Enumeration, stream start or the stream itself failed
    FullScreenFailed,
    /// A region grab is about to run
    BeginRegionCapture,
    /// The region grab produced an image
    RegionCaptured(CapturedImage),
    /// The current image was written to disk
    Saved(PathBuf),
    /// Drop the current image
    Reset,
}

/// The single piece of mutable application state.
///
/// Only changed through [`AppState::apply`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    captured_image: Option<CapturedImage>,
    capturing: bool,
    is_full_screen: bool,
    generation: u64,
    last_saved: Option<PathBuf>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_image(&self) -> Option<&CapturedImage> {
        self.captured_image.as_ref()
    }

    /// A full-screen capture is in flight
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Provenance of the current image
    pub fn is_full_screen(&self) -> bool {
        self.is_full_screen
    }

    /// Bumped every time a new image is stored
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_saved(&self) -> Option<&PathBuf> {
        self.last_saved.as_ref()
    }

    pub fn can_capture_full_screen(&self) -> bool {
        !self.capturing
    }

    /// The region button is disabled alongside the full-screen one; the
    /// region action itself is not guarded.
    pub fn can_capture_region(&self) -> bool {
        !self.capturing
    }

    pub fn can_save(&self) -> bool {
        self.captured_image.is_some()
    }

    pub fn can_reset(&self) -> bool {
        self.captured_image.is_some()
    }

    /// One-line status for the main window
    pub fn status_text(&self) -> String {
        if self.capturing {
            return "Capturing…".to_string();
        }

        match (&self.captured_image, &self.last_saved) {
            (Some(_), Some(path)) => format!("Saved to {}", path.display()),
            (Some(image), None) => format!("Captured {}×{}", image.width(), image.height()),
            (None, _) => "Ready".to_string(),
        }
    }

    /// Apply an action. Returns false when a guard rejected it.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::BeginFullScreenCapture => {
                if !self.can_capture_full_screen() {
                    return false;
                }
                self.capturing = true;
                self.is_full_screen = true;
            }
            Action::FullScreenCaptured(image) => {
                self.store(image);
                self.capturing = false;
                self.is_full_screen = true;
            }
            Action::FullScreenFailed => {
                self.capturing = false;
            }
            Action::BeginRegionCapture => {
                self.is_full_screen = false;
            }
            Action::RegionCaptured(image) => {
                self.store(image);
            }
            Action::Saved(path) => {
                if !self.can_save() {
                    return false;
                }
                self.last_saved = Some(path);
            }
            Action::Reset => {
                if !self.can_reset() {
                    return false;
                }
                self.captured_image = None;
                self.is_full_screen = false;
                self.last_saved = None;
            }
        }
        true
    }

    fn store(&mut self, image: CapturedImage) {
        self.captured_image = Some(image);
        self.generation += 1;
        self.last_saved = None;
    }
}
