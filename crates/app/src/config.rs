//! In-process tunables

use overlay::OverlayStyle;
use std::time::Duration;

/// Application configuration. Not persisted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Wait between the overlay closing and the region grab, so the overlay
    /// is gone from screen when the frame is sampled.
    pub region_capture_delay: Duration,
    /// Preview box for region captures; full-screen captures use all space
    pub preview_max_size: [f32; 2],
    pub default_file_name: String,
    pub window_size: [f32; 2],
    pub overlay_style: OverlayStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            region_capture_delay: Duration::from_millis(50),
            preview_max_size: [600.0, 400.0],
            default_file_name: "Screenshot.png".to_string(),
            window_size: [900.0, 640.0],
            overlay_style: OverlayStyle::default(),
        }
    }
}
