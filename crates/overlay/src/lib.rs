//! Overlay module for Tango
//!
//! Provides the full-screen drag overlay used to pick a capture region.

pub mod render;
pub mod selection;
pub mod window;

pub use render::OverlayStyle;
pub use selection::{
    calc_selection_rect, local_to_global, Point, RectF, RegionSelector, ScreenGeometry,
    SelectionRect, SelectorState,
};
pub use window::OverlayWindow;

/// Selection outcome
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// User selected a region (global coordinates)
    Region(RectF),
    /// User cancelled
    Cancelled,
}
