//! Overlay window implementation

use crate::{
    render::{paint_selection, OverlayStyle},
    selection::{Point, RectF, RegionSelector, ScreenGeometry},
};
use egui::{Context, Key, Pos2, Vec2, ViewportBuilder, ViewportClass, ViewportId};
use log::debug;

/// Full-screen, transparent, topmost window hosting a [`RegionSelector`].
///
/// Rendered as an immediate egui viewport: call [`OverlayWindow::show`] every
/// frame of the host application until [`OverlayWindow::is_open`] is false.
pub struct OverlayWindow {
    id: ViewportId,
    selector: RegionSelector,
    style: OverlayStyle,
}

impl OverlayWindow {
    const TITLE: &'static str = "Tango Selection";
    const FALLBACK_SCREEN: Vec2 = Vec2::new(1440.0, 900.0);

    pub fn new(style: OverlayStyle) -> Self {
        Self {
            id: ViewportId::from_hash_of("tango_selection_overlay"),
            selector: RegionSelector::new(),
            style,
        }
    }

    /// Register the single-use handler receiving the global selection
    pub fn on_selection_complete(&mut self, callback: impl FnOnce(RectF) + 'static) {
        self.selector.on_selection_complete(callback);
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut RegionSelector {
        &mut self.selector
    }

    pub fn is_open(&self) -> bool {
        !self.selector.is_closed()
    }

    /// Show the overlay over the primary screen for this frame
    pub fn show(&mut self, ctx: &Context) {
        if !self.is_open() {
            return;
        }

        let screen_size = ctx
            .input(|i| i.viewport().monitor_size)
            .unwrap_or(Self::FALLBACK_SCREEN);

        let builder = ViewportBuilder::default()
            .with_title(Self::TITLE)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false)
            .with_position(Pos2::ZERO)
            .with_inner_size(screen_size);

        let id = self.id;
        ctx.show_viewport_immediate(id, builder, |ctx, _class: ViewportClass| {
            self.update(ctx, screen_size);
        });

        ctx.request_repaint();
    }

    fn update(&mut self, ctx: &Context, screen_size: Vec2) {
        let (pressed, released, pointer, escape, close_requested, outer) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.key_pressed(Key::Escape),
                i.viewport().close_requested(),
                i.viewport().outer_rect,
            )
        });

        if escape || close_requested {
            debug!("Overlay dismissed by user");
            self.selector.cancel();
            return;
        }

        let window = ctx.screen_rect();
        let height = window.height();
        let to_local = |pos: Pos2| Point::new(pos.x, height - pos.y);

        if let Some(pos) = pointer {
            if pressed {
                self.selector.pointer_down(to_local(pos));
            }
            if released {
                let geometry = Self::geometry(outer, height, screen_size.y);
                self.selector.pointer_up(to_local(pos), geometry);
            } else if !pressed {
                self.selector.pointer_moved(to_local(pos));
            }
        }

        if self.selector.is_closed() {
            return;
        }

        let selection = self.selector.selection().map(|s| s.normalized());
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
                paint_selection(ui.painter(), window, selection, &self.style);
            });
    }

    /// Window origin in bottom-left platform coordinates
    fn geometry(outer: Option<egui::Rect>, window_height: f32, screen_height: f32) -> ScreenGeometry {
        let (left, top) = outer.map(|r| (r.min.x, r.min.y)).unwrap_or((0.0, 0.0));
        ScreenGeometry {
            window_origin: Point::new(left, screen_height - (top + window_height)),
            screen_height,
        }
    }
}

impl Default for OverlayWindow {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{local_to_global, SelectorState};

    #[test]
    fn full_screen_window_has_zero_origin() {
        let outer = Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(1440.0, 900.0)));
        let geometry = OverlayWindow::geometry(outer, 900.0, 900.0);
        assert_eq!(geometry.window_origin, Point::new(0.0, 0.0));
        assert_eq!(geometry.screen_height, 900.0);
    }

    #[test]
    fn global_rect_matches_ui_top_edge() {
        // A window-local selection maps to the same top edge egui draws it at
        let geometry = OverlayWindow::geometry(None, 900.0, 900.0);
        let local = RectF::new(10.0, 600.0, 50.0, 100.0);
        let global = local_to_global(local, geometry);
        let ui = crate::render::to_ui_rect(local, 900.0);
        assert_eq!(global.y, ui.min.y);
    }

    #[test]
    fn new_overlay_is_open_and_idle() {
        let overlay = OverlayWindow::default();
        assert!(overlay.is_open());
        assert_eq!(overlay.selector().state(), SelectorState::Idle);
    }
}
