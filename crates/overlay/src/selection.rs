//! Drag selection state machine and coordinate conversion
//!
//! Window-local points use the platform view convention: origin at the
//! bottom-left corner of the overlay, y growing upward. Global rectangles
//! use screen capture coordinates: origin at the top-left of the primary
//! screen, y growing downward.

use crate::SelectionOutcome;
use capture::Rect;
use log::debug;

/// A point in window-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Fractional rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snap to whole screen points
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }
}

/// Where the overlay sits on screen
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenGeometry {
    /// Overlay window origin in the platform window coordinate system
    pub window_origin: Point,
    /// Height of the screen hosting the overlay
    pub screen_height: f32,
}

/// The two corners of a drag, live-updated while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    pub fn at(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Normalized so the drag direction does not matter
    pub fn normalized(&self) -> RectF {
        calc_selection_rect(self.start, self.end)
    }
}

/// `(min(x), min(y), |dx|, |dy|)` of two drag points
pub fn calc_selection_rect(start: Point, end: Point) -> RectF {
    RectF::new(
        start.x.min(end.x),
        start.y.min(end.y),
        (end.x - start.x).abs(),
        (end.y - start.y).abs(),
    )
}

/// Convert a window-local rectangle to global capture coordinates,
/// flipping the vertical axis.
pub fn local_to_global(local: RectF, geometry: ScreenGeometry) -> RectF {
    RectF::new(
        geometry.window_origin.x + local.x,
        geometry.window_origin.y + (geometry.screen_height - local.y - local.height),
        local.width,
        local.height,
    )
}

/// Selector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// Shown, waiting for pointer-down
    Idle,
    /// Pointer is down
    Dragging,
    /// Pointer released, callback running
    Completed,
    /// Overlay dismissed
    Closed,
}

pub type SelectionCallback = Box<dyn FnOnce(RectF)>;

/// Mouse-driven rectangle selection
pub struct RegionSelector {
    state: SelectorState,
    selection: Option<SelectionRect>,
    callback: Option<SelectionCallback>,
    outcome: Option<SelectionOutcome>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self {
            state: SelectorState::Idle,
            selection: None,
            callback: None,
            outcome: None,
        }
    }

    /// Register the single-use completion handler, replacing any previous one
    pub fn on_selection_complete(&mut self, callback: impl FnOnce(RectF) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    pub fn outcome(&self) -> Option<&SelectionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.state == SelectorState::Closed
    }

    /// Begin a drag. Returns true when a redraw is needed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.state != SelectorState::Idle {
            return false;
        }

        self.selection = Some(SelectionRect::at(point));
        self.state = SelectorState::Dragging;
        true
    }

    /// Track the drag. Returns true when a redraw is needed.
    pub fn pointer_moved(&mut self, point: Point) -> bool {
        match (self.state, self.selection.as_mut()) {
            (SelectorState::Dragging, Some(selection)) => {
                if selection.end == point {
                    return false;
                }
                selection.end = point;
                true
            }
            _ => false,
        }
    }

    /// Finish the drag, fire the completion handler and close.
    ///
    /// Returns the global rectangle handed to the handler. A release without
    /// movement yields a zero-area rectangle, which is still a completion.
    pub fn pointer_up(&mut self, point: Point, geometry: ScreenGeometry) -> Option<RectF> {
        if self.state != SelectorState::Dragging {
            return None;
        }

        let selection = self.selection.as_mut()?;
        selection.end = point;

        let local = selection.normalized();
        let global = local_to_global(local, geometry);
        debug!("Selection {:?} -> global {:?}", local, global);

        self.state = SelectorState::Completed;
        if let Some(callback) = self.callback.take() {
            callback(global);
        }

        self.outcome = Some(SelectionOutcome::Region(global));
        self.close();
        Some(global)
    }

    /// Dismiss without a selection
    pub fn cancel(&mut self) {
        if self.is_closed() {
            return;
        }

        debug!("Selection cancelled");
        self.callback = None;
        self.outcome = Some(SelectionOutcome::Cancelled);
        self.close();
    }

    fn close(&mut self) {
        self.state = SelectorState::Closed;
        self.selection = None;
    }
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new()
    }
}
