use std::time::{Duration, Instant};

use eframe::egui;

use sl_app::camera::{self, FRAME_PERIOD_MS};
use sl_app::preprocess::Preprocess;
use sl_app::selection::{self, RectPx};
use sl_app::{Action, AppModel, Effect};
use sl_ocr::EngineConfig;
use sl_vision::{CaptureDevice, Frame};

use crate::canvas::{self, MIN_CANVAS};
use crate::ocr_flow::{self, OcrRequest};

/// Scaled preview currently shown on the canvas.
///
/// `width`/`height` are the displayed pixmap dimensions the selection
/// rectangle is interpreted against.
struct DisplayTexture {
    texture: egui::TextureHandle,
    width: i32,
    height: i32,
}

pub struct ScanlensApp {
    model: AppModel,
    /// Unmodified source buffer; replaced wholesale on load/capture.
    source: Option<Frame>,
    display: Option<DisplayTexture>,
    ocr_text: String,
    /// Held only while the camera model is in `Capturing`.
    capture: Option<CaptureDevice>,
    last_frame_at: Instant,
    canvas_area: (i32, i32),
    engine_config: EngineConfig,
}

impl ScanlensApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            model: AppModel::new(),
            source: None,
            display: None,
            ocr_text: String::new(),
            capture: None,
            last_frame_at: Instant::now(),
            canvas_area: (MIN_CANVAS.x as i32, MIN_CANVAS.y as i32),
            engine_config: EngineConfig::default(),
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, action: Action) {
        let effects = self.model.reduce(action);
        self.run_effects(ctx, effects);
    }

    fn run_effects(&mut self, ctx: &egui::Context, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Selection(selection::Effect::RequestRedraw) => ctx.request_repaint(),
                Effect::Camera(e) => self.run_camera_effect(ctx, e),
                Effect::RefreshDisplay => self.refresh_display(ctx),
                Effect::ShowWarning { message } => {
                    log::warn!("{message}");
                    warning_dialog(&message);
                }
                Effect::ExtractText { roi } => self.run_ocr_text(roi),
                Effect::ExtractWords { roi } => self.run_ocr_overlay(ctx, roi),
            }
        }
    }

    fn run_camera_effect(&mut self, ctx: &egui::Context, effect: camera::Effect) {
        match effect {
            camera::Effect::OpenDevice { index } => match CaptureDevice::open(index) {
                Ok(device) => {
                    self.capture = Some(device);
                    self.dispatch(ctx, Action::Camera(camera::Action::DeviceOpened));
                }
                Err(e) => {
                    log::error!("{e}");
                    warning_dialog("Could not open camera");
                    self.dispatch(ctx, Action::Camera(camera::Action::DeviceOpenFailed));
                }
            },
            camera::Effect::StartFrameTimer { period_ms } => {
                self.last_frame_at = Instant::now();
                ctx.request_repaint_after(Duration::from_millis(period_ms));
            }
            // Ticks are gated on the capturing phase; nothing to tear down.
            camera::Effect::StopFrameTimer => {}
            camera::Effect::ReleaseDevice => {
                self.capture = None;
            }
        }
    }

    /// Cooperative frame timer: one synchronous read per elapsed period.
    fn tick_camera(&mut self, ctx: &egui::Context) {
        if !self.model.camera().is_capturing() {
            return;
        }

        let period = Duration::from_millis(FRAME_PERIOD_MS);
        if self.last_frame_at.elapsed() >= period {
            self.last_frame_at = Instant::now();
            let read = match self.capture.as_mut() {
                Some(device) => device.read_frame(),
                None => Ok(None),
            };
            match read {
                Ok(Some(frame)) => {
                    self.source = Some(frame);
                    self.dispatch(ctx, Action::FrameCaptured);
                }
                // A missed frame just skips this tick's display update.
                Ok(None) => {}
                Err(e) => log::warn!("camera read failed: {e}"),
            }
        }

        ctx.request_repaint_after(period);
    }

    fn refresh_display(&mut self, ctx: &egui::Context) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        match build_texture(ctx, source, self.canvas_area) {
            Ok(display) => self.display = Some(display),
            Err(e) => log::error!("display refresh failed: {e:#}"),
        }
    }

    fn display_size(&self) -> (i32, i32) {
        match self.display.as_ref() {
            Some(d) => (d.width, d.height),
            // No preview yet: identity mapping against the source.
            None => self
                .source
                .as_ref()
                .map(|s| (s.width(), s.height()))
                .unwrap_or((1, 1)),
        }
    }

    fn run_ocr_text(&mut self, roi: Option<RectPx>) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let req = OcrRequest {
            source,
            roi,
            display_size: self.display_size(),
            mode: self.model.preprocess(),
            threshold: self.model.threshold(),
        };

        match ocr_flow::recognize_text(&req, &self.engine_config) {
            Ok(outcome) => self.ocr_text = outcome.display_text().to_string(),
            Err(e) => {
                log::error!("OCR failed: {e:#}");
                error_dialog(&format!("OCR failed: {e:#}"));
            }
        }
    }

    fn run_ocr_overlay(&mut self, ctx: &egui::Context, roi: Option<RectPx>) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let req = OcrRequest {
            source,
            roi,
            display_size: self.display_size(),
            mode: self.model.preprocess(),
            threshold: self.model.threshold(),
        };

        match ocr_flow::recognize_overlay(&req, &self.engine_config) {
            Ok(annotated) => match build_texture(ctx, &annotated, self.canvas_area) {
                // The annotated image replaces the plain preview; the source
                // buffer itself stays untouched.
                Ok(display) => self.display = Some(display),
                Err(e) => log::error!("overlay display failed: {e:#}"),
            },
            Err(e) => {
                log::error!("overlay failed: {e:#}");
                error_dialog(&format!("Overlay failed: {e:#}"));
            }
        }
    }

    fn load_image(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image Files", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        else {
            return;
        };

        match Frame::load(&path) {
            Ok(frame) => {
                self.source = Some(frame);
                self.dispatch(ctx, Action::ImageLoaded);
            }
            // Not surfaced here; a missing image shows up as a precondition
            // warning when OCR is invoked.
            Err(e) => log::warn!("image load failed: {e}"),
        }
    }

    fn controls_row(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Load Image").clicked() {
                self.load_image(ctx);
            }
            if ui.button(self.model.camera().button_label()).clicked() {
                self.dispatch(ctx, Action::Camera(camera::Action::Toggle));
            }
            if ui.button("Clear Selection").clicked() {
                self.dispatch(ctx, Action::ClearSelection);
            }

            ui.separator();
            ui.label("Preprocessing:");

            let mut mode = self.model.preprocess();
            egui::ComboBox::from_id_salt("preprocess_mode")
                .selected_text(mode.label())
                .show_ui(ui, |ui| {
                    for m in Preprocess::ALL {
                        ui.selectable_value(&mut mode, m, m.label());
                    }
                });
            if mode != self.model.preprocess() {
                self.dispatch(ctx, Action::SetPreprocess(mode));
            }

            let mut threshold = self.model.threshold();
            ui.add_enabled(
                self.model.threshold_control_enabled(),
                egui::Slider::new(&mut threshold, 0..=255).text("Threshold"),
            );
            if threshold != self.model.threshold() {
                self.dispatch(ctx, Action::SetThreshold(threshold));
            }
        });
    }
}

impl eframe::App for ScanlensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_camera(ctx);

        egui::SidePanel::right("text_panel")
            .min_width(360.0)
            .show(ctx, |ui| {
                ui.label("Extracted Text:");
                let text_height = (ui.available_height() - 80.0).max(120.0);
                egui::ScrollArea::vertical()
                    .max_height(text_height)
                    .show(ui, |ui| {
                        ui.add_sized(
                            [ui.available_width(), text_height],
                            egui::TextEdit::multiline(&mut self.ocr_text.as_str()),
                        );
                    });
                if ui.button("Run OCR").clicked() {
                    self.dispatch(ctx, Action::RunOcr);
                }
                if ui.button("Show Text Overlay").clicked() {
                    self.dispatch(ctx, Action::RunOcrWithOverlay);
                }
            });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.controls_row(ctx, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            self.canvas_area = (
                avail.x.max(MIN_CANVAS.x) as i32,
                avail.y.max(MIN_CANVAS.y) as i32,
            );

            let texture = self
                .display
                .as_ref()
                .map(|d| (&d.texture, egui::vec2(d.width as f32, d.height as f32)));
            let actions = canvas::show(ui, texture, self.model.selection());
            for action in actions {
                self.dispatch(ctx, Action::Selection(action));
            }
        });
    }
}

fn build_texture(
    ctx: &egui::Context,
    frame: &Frame,
    area: (i32, i32),
) -> anyhow::Result<DisplayTexture> {
    let scaled = frame.scaled_to_fit(area.0, area.1)?;
    let rgba = scaled.to_rgba()?;

    let image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width as usize, rgba.height as usize],
        &rgba.data,
    );
    let texture = ctx.load_texture("preview", image, egui::TextureOptions::LINEAR);

    Ok(DisplayTexture {
        texture,
        width: rgba.width,
        height: rgba.height,
    })
}

fn warning_dialog(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Warning")
        .set_description(message)
        .show();
}

fn error_dialog(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .show();
}
