//! Main window using egui

use app::preview::preview_size;
use app::{Orchestrator, SaveDialog};
use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;

/// Save panel restricted to PNG
pub struct PngSaveDialog;

impl SaveDialog for PngSaveDialog {
    fn choose_destination(&self, suggested_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(suggested_name)
            .save_file()
    }
}

/// Uploaded preview texture and the image generation it shows
struct Preview {
    generation: u64,
    texture: egui::TextureHandle,
}

/// Main application
pub struct TangoApp {
    orchestrator: Orchestrator,
    preview: Option<Preview>,
}

impl TangoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            preview: None,
        }
    }

    /// Keep the texture in step with the stored image
    fn sync_preview(&mut self, ctx: &egui::Context) {
        let state = self.orchestrator.state();
        let Some(image) = state.captured_image() else {
            self.preview = None;
            return;
        };

        if self.preview.as_ref().map(|p| p.generation) == Some(state.generation()) {
            return;
        }

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width() as usize, image.height() as usize],
            &image.to_rgba_bytes(),
        );
        let texture = ctx.load_texture("tango_preview", color_image, egui::TextureOptions::LINEAR);
        self.preview = Some(Preview {
            generation: state.generation(),
            texture,
        });
    }

    fn action_button(label: &str, primary: bool) -> egui::Button<'static> {
        let (fill, text) = if primary {
            (egui::Color32::from_rgb(0, 122, 255), egui::Color32::WHITE)
        } else {
            (egui::Color32::from_gray(210), egui::Color32::BLACK)
        };

        egui::Button::new(egui::RichText::new(label.to_owned()).size(15.0).color(text))
            .fill(fill)
            .min_size(egui::vec2(if primary { 120.0 } else { 100.0 }, 40.0))
            .rounding(10.0)
    }

    fn buttons(&mut self, ui: &mut egui::Ui) {
        let state = self.orchestrator.state();
        let (can_full, can_region, can_save, can_reset) = (
            state.can_capture_full_screen(),
            state.can_capture_region(),
            state.can_save(),
            state.can_reset(),
        );

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 20.0;

            if ui
                .add_enabled(can_full, Self::action_button("Capture Full Screen", true))
                .clicked()
            {
                self.orchestrator.capture_full_screen();
            }

            if ui
                .add_enabled(can_region, Self::action_button("Capture Selected Area", true))
                .clicked()
            {
                self.orchestrator.capture_region();
            }

            if ui
                .add_enabled(can_save, Self::action_button("Save Image", false))
                .clicked()
            {
                self.orchestrator.save_image(&PngSaveDialog);
            }

            if ui
                .add_enabled(can_reset, Self::action_button("Reset", false))
                .clicked()
            {
                self.orchestrator.reset();
            }
        });
    }

    fn preview_panel(&self, ui: &mut egui::Ui) {
        let state = self.orchestrator.state();

        egui::Frame::none()
            .fill(egui::Color32::WHITE)
            .rounding(16.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                let available = ui.available_size();
                match (&self.preview, state.captured_image()) {
                    (Some(preview), Some(image)) => {
                        let size = preview_size(
                            image.size(),
                            [available.x, available.y],
                            state.is_full_screen(),
                            self.orchestrator.config().preview_max_size,
                        );
                        ui.centered_and_justified(|ui| {
                            ui.add(egui::Image::new(egui::load::SizedTexture::new(
                                preview.texture.id(),
                                egui::vec2(size[0], size[1]),
                            )));
                        });
                    }
                    _ => {
                        ui.centered_and_justified(|ui| {
                            ui.label(
                                egui::RichText::new("No screenshot captured yet.")
                                    .size(20.0)
                                    .color(egui::Color32::GRAY),
                            );
                        });
                    }
                }
            });
    }
}

impl eframe::App for TangoApp {
    /// Transparent so the selection overlay viewport shows the desktop
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.orchestrator.poll();

        if let Some(overlay) = self.orchestrator.overlay_mut() {
            overlay.show(ctx);
        }

        self.sync_preview(ctx);

        egui::TopBottomPanel::bottom("actions")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(16.0))
            .show(ctx, |ui| {
                self.buttons(ui);
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(self.orchestrator.state().status_text())
                        .size(12.0)
                        .color(egui::Color32::from_rgb(102, 102, 102)),
                );
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(40.0))
            .show(ctx, |ui| self.preview_panel(ui));

        if self.orchestrator.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}
