use std::path::Path;

use eframe::egui::{self, Color32, RichText};
use sar_detect_common::messages::{DOWNLOAD_FAILED, NOT_AN_IMAGE};
use sar_detect_common::{mime_from_file_name, original_download_name, result_download_name, Selection};

use crate::io::{DecodedImage, read_image_file, save_bytes};
use crate::model::{DesktopSession, Preview};
use crate::worker::{PendingDetection, resolve_cli_binary, spawn_detection};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

pub struct DesktopApp {
    session: DesktopSession,
    pending: Option<PendingDetection>,
    status: String,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self {
            session: DesktopSession::new(),
            pending: None,
            status: String::new(),
        }
    }
}

impl DesktopApp {
    fn open_image(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.select_path(ctx, &path);
        }
    }

    fn select_path(&mut self, ctx: &egui::Context, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(mime_type) = mime_from_file_name(&file_name) else {
            self.session.report_error(NOT_AN_IMAGE);
            return;
        };

        let (bytes, decoded) = match read_image_file(path) {
            Ok(loaded) => loaded,
            Err(err) => {
                self.session.report_error(&format!("{err:#}"));
                return;
            }
        };

        let preview = to_preview(ctx, &file_name, bytes, decoded);
        let selection = Selection {
            file: path.to_path_buf(),
            file_name,
            mime_type: mime_type.to_string(),
            preview,
        };
        match self.session.select(selection) {
            Ok(()) => self.status = format!("Loaded {}", path.display()),
            Err(err) => self.session.report_error(&err.to_string()),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|f| f.path) else {
            return;
        };
        self.select_path(ctx, &path);
    }

    fn run_detection(&mut self) {
        let ticket = match self.session.begin_detection() {
            Ok(ticket) => ticket,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };
        let Some(image) = self.session.file().cloned() else {
            return;
        };

        self.status = "Processing...".to_string();
        self.pending = Some(spawn_detection(resolve_cli_binary(), image, ticket));
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.pending.as_ref().and_then(PendingDetection::poll) else {
            return;
        };
        self.pending = None;

        match outcome.result {
            Ok(result) => {
                let preview = to_preview(ctx, "detection-result", result.bytes, result.image);
                if self.session.complete_success(outcome.ticket, preview) {
                    self.status = "Detection complete".to_string();
                } else {
                    self.status = "Result discarded (image changed)".to_string();
                }
            }
            Err(message) => {
                self.session.complete_failure(outcome.ticket, &message);
                self.status.clear();
            }
        }
    }

    fn save_original(&mut self) {
        let Some(selection) = self.session.selection() else {
            return;
        };
        let file_name = original_download_name(&selection.file_name);
        let bytes = selection.preview.bytes.clone();
        self.save_with_dialog(&file_name, &bytes);
    }

    fn save_result(&mut self) {
        let Some(preview) = self.session.result_preview() else {
            return;
        };
        let file_name = result_download_name(Some(&preview.mime_type));
        let bytes = preview.bytes.clone();
        self.save_with_dialog(&file_name, &bytes);
    }

    fn save_with_dialog(&mut self, file_name: &str, bytes: &[u8]) {
        let Some(path) = rfd::FileDialog::new().set_file_name(file_name).save_file() else {
            return;
        };
        match save_bytes(&path, bytes) {
            Ok(()) => self.status = format!("Saved {}", path.display()),
            Err(err) => {
                self.status = format!("{err:#}");
                self.session.report_error(DOWNLOAD_FAILED);
            }
        }
    }

    fn render_original(&mut self, ui: &mut egui::Ui) {
        ui.heading("Original Image");
        ui.separator();

        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let mut save_clicked = false;

        match self.session.original_preview() {
            Some(preview) => {
                render_preview(ui, preview);
                save_clicked = ui.button("Save Original").clicked();
            }
            None => {
                let stroke_color = if hovering { Color32::from_rgb(59, 130, 246) } else { Color32::from_gray(90) };
                egui::Frame::none()
                    .stroke(egui::Stroke::new(2.0, stroke_color))
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(32.0))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new("Drag & drop an image or use Open Image").size(16.0));
                            ui.label(RichText::new("Supports JPG, PNG files").color(Color32::from_gray(140)));
                        });
                    });
            }
        }

        if save_clicked {
            self.save_original();
        }

        ui.add_space(12.0);
        let busy = self.session.is_busy();
        ui.horizontal(|ui| {
            let label = if busy { "Processing..." } else { "Detect People" };
            if ui
                .add_enabled(self.session.can_submit(), egui::Button::new(label))
                .clicked()
            {
                self.run_detection();
            }
            if busy {
                ui.add(egui::Spinner::new());
            }
        });

        if let Some(error) = self.session.error() {
            ui.add_space(8.0);
            ui.label(RichText::new(format!("⚠ {error}")).color(Color32::from_rgb(239, 68, 68)));
        }
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        ui.heading("Detection Results");
        ui.separator();

        let mut save_clicked = false;
        match self.session.result_preview() {
            Some(preview) => {
                render_preview(ui, preview);
                save_clicked = ui.button("Save Result").clicked();
            }
            None => {
                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), 240.0),
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.label(RichText::new("Detection results will appear here").color(Color32::from_gray(140)));
                    },
                );
            }
        }

        if save_clicked {
            self.save_result();
        }
    }
}

fn to_preview(ctx: &egui::Context, name: &str, bytes: Vec<u8>, decoded: DecodedImage) -> Preview {
    let color_image = egui::ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.pixels);
    let texture = ctx.load_texture(name, color_image, egui::TextureOptions::default());
    Preview {
        texture,
        bytes,
        mime_type: decoded.mime_type,
        size: decoded.size,
    }
}

fn render_preview(ui: &mut egui::Ui, preview: &Preview) {
    let max_width = ui.available_width();
    let [w, h] = preview.size;
    let scale = if w > 0 { (max_width / w as f32).min(1.0) } else { 1.0 };
    let size = egui::vec2(w as f32 * scale, h as f32 * scale);
    ui.add(egui::Image::new(&preview.texture).fit_to_exact_size(size));
    ui.label(RichText::new(format!("{} × {}", w, h)).color(Color32::from_gray(140)).size(12.0));
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.is_busy() {
            ctx.request_repaint();
        }
        self.poll_messages(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if ui.button("Open Image").clicked() {
                    self.open_image(ctx);
                }
                ui.separator();
                ui.label(RichText::new("Search & Rescue Operation").strong());
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    self.render_original(&mut columns[0]);
                    self.render_result(&mut columns[1]);
                });
            });
        });
    }
}
