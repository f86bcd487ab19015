//! egui rendering for the selection overlay

use crate::selection::RectF;
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke};

/// Overlay colors and strokes
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub mask: Color32,
    pub outline: Color32,
    pub outline_width: f32,
    pub show_size_label: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask: Color32::from_black_alpha(77),
            outline: Color32::from_rgb(0, 122, 255),
            outline_width: 1.0,
            show_size_label: true,
        }
    }
}

/// Bands of `bounds` left uncovered by `hole`: top, bottom, left, right.
///
/// All rectangles share one coordinate system; empty bands are omitted.
pub fn mask_regions(bounds: RectF, hole: Option<RectF>) -> Vec<RectF> {
    let Some(hole) = hole else {
        return vec![bounds];
    };

    let left = hole.x.clamp(bounds.x, bounds.right());
    let right = hole.right().clamp(bounds.x, bounds.right());
    let low = hole.y.clamp(bounds.y, bounds.top());
    let high = hole.top().clamp(bounds.y, bounds.top());

    [
        RectF::new(bounds.x, high, bounds.width, bounds.top() - high),
        RectF::new(bounds.x, bounds.y, bounds.width, low - bounds.y),
        RectF::new(bounds.x, low, left - bounds.x, high - low),
        RectF::new(right, low, bounds.right() - right, high - low),
    ]
    .into_iter()
    .filter(|band| !band.is_empty())
    .collect()
}

/// Map a window-local rectangle (origin bottom-left, y up) into egui's
/// top-left, y-down space for a window `window_height` points tall.
pub fn to_ui_rect(local: RectF, window_height: f32) -> egui::Rect {
    let top = window_height - local.top();
    egui::Rect::from_min_size(
        Pos2::new(local.x, top),
        egui::vec2(local.width, local.height),
    )
}

/// Draw the mask with the selection cut out and outlined
pub fn paint_selection(painter: &Painter, window: egui::Rect, selection: Option<RectF>, style: &OverlayStyle) {
    let height = window.height();
    let bounds = RectF::new(0.0, 0.0, window.width(), height);

    for band in mask_regions(bounds, selection) {
        painter.rect_filled(to_ui_rect(band, height), 0.0, style.mask);
    }

    let Some(selection) = selection else {
        return;
    };

    let rect = to_ui_rect(selection, height);
    painter.rect_stroke(rect, 0.0, Stroke::new(style.outline_width, style.outline));

    if style.show_size_label && !selection.is_empty() {
        painter.text(
            rect.left_bottom() + egui::vec2(0.0, 4.0),
            Align2::LEFT_TOP,
            format!("{}×{}", selection.width.round(), selection.height.round()),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(rects: &[RectF]) -> f32 {
        rects.iter().map(|r| r.width * r.height).sum()
    }

    #[test]
    fn no_selection_masks_everything() {
        let bounds = RectF::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(mask_regions(bounds, None), vec![bounds]);
    }

    #[test]
    fn bands_surround_the_hole() {
        let bounds = RectF::new(0.0, 0.0, 800.0, 600.0);
        let hole = RectF::new(100.0, 200.0, 300.0, 100.0);

        let bands = mask_regions(bounds, Some(hole));

        assert_eq!(bands.len(), 4);
        assert_eq!(area(&bands), 800.0 * 600.0 - 300.0 * 100.0);
        assert!(bands.contains(&RectF::new(0.0, 300.0, 800.0, 300.0)));
        assert!(bands.contains(&RectF::new(400.0, 200.0, 400.0, 100.0)));
    }

    #[test]
    fn hole_touching_edges_drops_empty_bands() {
        let bounds = RectF::new(0.0, 0.0, 800.0, 600.0);
        let hole = RectF::new(0.0, 0.0, 800.0, 300.0);

        let bands = mask_regions(bounds, Some(hole));

        assert_eq!(bands, vec![RectF::new(0.0, 300.0, 800.0, 300.0)]);
    }

    #[test]
    fn hole_is_clipped_to_bounds() {
        let bounds = RectF::new(0.0, 0.0, 100.0, 100.0);
        let hole = RectF::new(-50.0, 50.0, 500.0, 500.0);

        let bands = mask_regions(bounds, Some(hole));

        assert_eq!(bands, vec![RectF::new(0.0, 0.0, 100.0, 50.0)]);
    }

    #[test]
    fn ui_rect_flips_vertical_axis() {
        let rect = to_ui_rect(RectF::new(100.0, 400.0, 200.0, 100.0), 800.0);
        assert_eq!(rect.min, Pos2::new(100.0, 300.0));
        assert_eq!(rect.max, Pos2::new(300.0, 400.0));
    }
}
