//! The eframe application shell.
//!
//! Pure presentation glue: gestures and text entry are converted into
//! [`EditorSession`] calls, and the session's results are turned into status
//! text. No editing logic lives here.

use eframe::egui;
use egui::{
    Align2, Color32, ColorImage, FontId, Pos2, Rect, RichText, Sense, Stroke, TextureHandle,
    TextureOptions, Vec2,
};

use crate::config::CANVAS_EXTENT;
use crate::error::EditError;
use crate::io;
use crate::mapping::DisplayMapping;
use crate::parse::parse_int;
use crate::region::{PixelRect, Selection, SelectionMode};
use crate::session::{EditOutcome, EditorSession};

// ============================================================================
// STATUS LINE
// ============================================================================

#[derive(Clone, Copy, PartialEq)]
enum StatusKind {
    Info,
    Success,
    Error,
}

struct Status {
    kind: StatusKind,
    text: String,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct PixEditApp {
    session: EditorSession,

    // Canvas rendering
    texture: Option<TextureHandle>,
    texture_dirty: bool,

    // Pixel edit entries
    entry_x: String,
    entry_y: String,
    entry_r: String,
    entry_g: String,
    entry_b: String,

    // Selection panel
    sel_mode: SelectionMode,
    sel_r: String,
    sel_g: String,
    sel_b: String,
    sel_radius: String,

    // In-progress canvas drag, in canvas-relative display coordinates
    drag_start: Option<Pos2>,
    drag_current: Option<Pos2>,

    info_line: String,
    coords_line: String,
    status: Option<Status>,
}

impl PixEditApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            session: EditorSession::new(),
            texture: None,
            texture_dirty: false,
            entry_x: String::new(),
            entry_y: String::new(),
            entry_r: String::new(),
            entry_g: String::new(),
            entry_b: String::new(),
            sel_mode: SelectionMode::default(),
            sel_r: String::new(),
            sel_g: String::new(),
            sel_b: String::new(),
            sel_radius: "10".to_string(),
            drag_start: None,
            drag_current: None,
            info_line: "No image loaded".to_string(),
            coords_line: "Position: ---, ---".to_string(),
            status: None,
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    // ------------------------------------------------------------------
    // Button handlers
    // ------------------------------------------------------------------

    fn do_load(&mut self) {
        let Some(path) = io::pick_open_path() else {
            return;
        };
        match self.session.load_path(&path) {
            Ok(msg) => {
                self.info_line = msg;
                self.texture = None;
                self.texture_dirty = true;
                self.set_status(StatusKind::Success, "Image loaded");
                crate::log_info!("loaded {}", path.display());
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                crate::log_err!("load failed: {}", e);
            }
        }
    }

    fn do_save(&mut self) {
        if !self.session.has_image() {
            self.set_status(StatusKind::Info, "No image to save");
            return;
        }
        let Some(path) = io::pick_save_path() else {
            return;
        };
        match self.session.save_path(&path) {
            Ok(written) => {
                self.set_status(
                    StatusKind::Success,
                    format!("Image saved to {}", written.display()),
                );
                crate::log_info!("saved {}", written.display());
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                crate::log_err!("save failed: {}", e);
            }
        }
    }

    fn do_undo(&mut self) {
        if self.session.undo() {
            self.texture_dirty = true;
            self.set_status(StatusKind::Info, "Undid last change");
        } else {
            self.set_status(StatusKind::Info, "No more actions to undo");
        }
    }

    fn do_restore(&mut self) {
        match self.session.restore_original() {
            Ok(()) => {
                self.texture_dirty = true;
                self.set_status(StatusKind::Info, "Image restored to original");
            }
            Err(e) => self.set_status(StatusKind::Info, e.to_string()),
        }
    }

    fn apply_pixel_edit(&mut self) {
        let result = (|| -> Result<EditOutcome, EditError> {
            let x = parse_int("X coordinate", &self.entry_x)?;
            let y = parse_int("Y coordinate", &self.entry_y)?;
            let r = parse_int("R channel", &self.entry_r)?;
            let g = parse_int("G channel", &self.entry_g)?;
            let b = parse_int("B channel", &self.entry_b)?;
            self.session.set_single_pixel(x, y, r, g, b)
        })();
        match result {
            Ok(out) => {
                self.texture_dirty = true;
                self.set_status(StatusKind::Success, out.message);
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    fn apply_selection_edit(&mut self) {
        let Some(rect) = self.session.selection else {
            self.set_status(StatusKind::Info, "Select an area on the canvas first");
            return;
        };
        let mode = self.sel_mode;
        let result = (|| -> Result<EditOutcome, EditError> {
            let r = parse_int("R channel", &self.sel_r)?;
            let g = parse_int("G channel", &self.sel_g)?;
            let b = parse_int("B channel", &self.sel_b)?;
            let selection = match mode {
                SelectionMode::Rectangle => Selection::Rectangle(rect),
                SelectionMode::Circle => {
                    let radius = parse_int("radius", &self.sel_radius)?;
                    let (cx, cy) = rect.center();
                    Selection::Circle { cx, cy, radius }
                }
                SelectionMode::Brush => Selection::Brush,
            };
            self.session.apply_selection(&selection, r, g, b)
        })();
        match result {
            Ok(out) => {
                self.texture_dirty = true;
                self.session.selection = None;
                self.set_status(StatusKind::Success, out.message);
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    fn sample_average(&mut self) {
        let Some(rect) = self.session.selection else {
            self.set_status(StatusKind::Info, "Select an area on the canvas first");
            return;
        };
        match self.session.average_color(rect.x1, rect.y1, rect.x2, rect.y2) {
            Ok(Some(avg)) => {
                self.sel_r = avg.0[0].to_string();
                self.sel_g = avg.0[1].to_string();
                self.sel_b = avg.0[2].to_string();
                self.set_status(
                    StatusKind::Success,
                    format!(
                        "Average color: RGB({}, {}, {})",
                        avg.0[0], avg.0[1], avg.0[2]
                    ),
                );
            }
            Ok(None) => {
                self.set_status(StatusKind::Info, "Average not available (empty region)")
            }
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Panels
    // ------------------------------------------------------------------

    fn controls_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Load").clicked() {
                    self.do_load();
                }
                if ui.button("💾 Save").clicked() {
                    self.do_save();
                }
                if ui.button("↩ Undo").clicked() {
                    self.do_undo();
                }
                if ui.button("🔄 Restore").clicked() {
                    self.do_restore();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("History: {}", self.session.undo_depth()));
                });
            });
        });
    }

    fn edit_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("edit_panel")
            .min_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading("Pixel edit");
                ui.horizontal(|ui| {
                    ui.label("X:");
                    ui.add(egui::TextEdit::singleline(&mut self.entry_x).desired_width(48.0));
                    ui.label("Y:");
                    ui.add(egui::TextEdit::singleline(&mut self.entry_y).desired_width(48.0));
                });
                channel_entries(ui, &mut self.entry_r, &mut self.entry_g, &mut self.entry_b);
                ui.horizontal(|ui| {
                    ui.label("Preview:");
                    color_preview(ui, &self.entry_r, &self.entry_g, &self.entry_b);
                    if ui.button("✏ Apply change").clicked() {
                        self.apply_pixel_edit();
                    }
                });

                ui.separator();
                ui.heading("Selection");
                ui.horizontal(|ui| {
                    for mode in SelectionMode::picker_modes() {
                        ui.radio_value(&mut self.sel_mode, *mode, mode.label());
                    }
                });
                if self.sel_mode == SelectionMode::Circle {
                    ui.horizontal(|ui| {
                        ui.label("Radius:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.sel_radius).desired_width(48.0),
                        );
                    });
                }
                channel_entries(ui, &mut self.sel_r, &mut self.sel_g, &mut self.sel_b);
                ui.horizontal(|ui| {
                    ui.label("Preview:");
                    color_preview(ui, &self.sel_r, &self.sel_g, &self.sel_b);
                });
                ui.horizontal(|ui| {
                    if ui.button("Apply to selection").clicked() {
                        self.apply_selection_edit();
                    }
                    if ui.button("Sample average").clicked() {
                        self.sample_average();
                    }
                });
                match self.session.selection {
                    Some(rect) => {
                        ui.weak(format!(
                            "Selected: {}x{} px",
                            rect.width() + 1,
                            rect.height() + 1
                        ));
                    }
                    None => {
                        ui.weak("Drag on the canvas to select an area");
                    }
                }
            });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            match &self.status {
                Some(status) => {
                    let color = match status.kind {
                        StatusKind::Info => ui.visuals().weak_text_color(),
                        StatusKind::Success => Color32::from_rgb(39, 174, 96),
                        StatusKind::Error => Color32::from_rgb(231, 76, 60),
                    };
                    ui.colored_label(color, status.text.as_str());
                }
                None => {
                    ui.weak("Ready");
                }
            };
        });
    }

    // ------------------------------------------------------------------
    // Canvas
    // ------------------------------------------------------------------

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(Vec2::splat(CANVAS_EXTENT as f32), Sense::click_and_drag());
        let canvas_rect = response.rect;
        let origin = canvas_rect.min;

        painter.rect_filled(canvas_rect, 2.0, Color32::from_gray(245));
        painter.rect_stroke(canvas_rect, 2.0, Stroke::new(1.0, Color32::from_gray(160)));

        let Some((w, h)) = self.session.dimensions() else {
            self.draw_placeholder(&painter, canvas_rect);
            return;
        };

        // Recomputed every frame: edits never change dimensions today, but a
        // reload does and the fit is cheap.
        let mapping = DisplayMapping::fit(w, h, CANVAS_EXTENT);

        self.refresh_texture(ui, w, h);
        let (off_x, off_y) = mapping.centering_offset();
        let image_rect = Rect::from_min_size(
            origin + Vec2::new(off_x as f32, off_y as f32),
            Vec2::new(mapping.displayed_w as f32, mapping.displayed_h as f32),
        );
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        // Live coordinate readout under the cursor
        if let Some(pos) = response.hover_pos() {
            let rel = pos - origin;
            self.coords_line = match mapping.display_to_image(rel.x as f64, rel.y as f64, w, h) {
                Some((ix, iy)) => match self.session.pixel_at(ix as i64, iy as i64) {
                    Some(c) => format!(
                        "Position: X={}, Y={} | Color: RGB({}, {}, {})",
                        ix, iy, c.0[0], c.0[1], c.0[2]
                    ),
                    None => "Position: ---, ---".to_string(),
                },
                None => "Position: outside image".to_string(),
            };
        }

        // Click picks the pixel into the edit entries
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let rel = pos - origin;
            if let Some((ix, iy)) = mapping.display_to_image(rel.x as f64, rel.y as f64, w, h)
                && let Some(c) = self.session.pixel_at(ix as i64, iy as i64)
            {
                self.entry_x = ix.to_string();
                self.entry_y = iy.to_string();
                self.entry_r = c.0[0].to_string();
                self.entry_g = c.0[1].to_string();
                self.entry_b = c.0[2].to_string();
            }
        }

        // Drag defines the selection rectangle
        if response.drag_started()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.drag_start = Some(pos - origin.to_vec2());
            self.drag_current = self.drag_start;
        }
        if response.dragged()
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.drag_current = Some(pos - origin.to_vec2());
        }
        if let (Some(a), Some(b)) = (self.drag_start, self.drag_current) {
            let rubber = Rect::from_two_pos(origin + a.to_vec2(), origin + b.to_vec2());
            painter.rect_stroke(rubber, 0.0, Stroke::new(2.0, Color32::from_rgb(52, 152, 219)));
        }
        if response.drag_released() {
            if let (Some(a), Some(b)) = (self.drag_start.take(), self.drag_current.take()) {
                self.commit_selection(&mapping, a, b, w, h);
            }
            self.drag_start = None;
            self.drag_current = None;
        }

        // Committed selection outline
        if let Some(rect) = self.session.selection {
            let (x1, y1) = mapping.image_to_display(
                rect.x1.min(rect.x2).max(0) as u32,
                rect.y1.min(rect.y2).max(0) as u32,
            );
            let (x2, y2) = mapping.image_to_display(
                (rect.x1.max(rect.x2) + 1).max(0) as u32,
                (rect.y1.max(rect.y2) + 1).max(0) as u32,
            );
            let outline = Rect::from_two_pos(
                origin + Vec2::new(x1 as f32, y1 as f32),
                origin + Vec2::new(x2 as f32, y2 as f32),
            );
            painter.rect_stroke(outline, 0.0, Stroke::new(1.5, Color32::from_rgb(41, 128, 185)));
        }
    }

    /// Convert both drag corners to grid coordinates; the drag is discarded
    /// when either end misses the image (no pixel under that corner).
    fn commit_selection(&mut self, mapping: &DisplayMapping, a: Pos2, b: Pos2, w: u32, h: u32) {
        let start = mapping.display_to_image(a.x as f64, a.y as f64, w, h);
        let end = mapping.display_to_image(b.x as f64, b.y as f64, w, h);
        if let (Some((x1, y1)), Some((x2, y2))) = (start, end) {
            let rect = PixelRect::new(x1 as i64, y1 as i64, x2 as i64, y2 as i64);
            self.session.selection = Some(rect);
            self.set_status(
                StatusKind::Info,
                format!(
                    "Selected area: {}x{} | Total pixels: {}",
                    rect.width() + 1,
                    rect.height() + 1,
                    (rect.width() + 1) * (rect.height() + 1)
                ),
            );
        }
    }

    fn refresh_texture(&mut self, ui: &egui::Ui, w: u32, h: u32) {
        if !self.texture_dirty && self.texture.is_some() {
            return;
        }
        let Some(buffer) = self.session.buffer() else {
            return;
        };
        // egui textures are RGBA; widen the RGB grid with an opaque alpha.
        let rgb = buffer.export().as_raw();
        let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
        for px in rgb.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }
        let color_image =
            ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba);
        match &mut self.texture {
            Some(t) => t.set(color_image, TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ui.ctx().load_texture("image", color_image, TextureOptions::NEAREST))
            }
        }
        self.texture_dirty = false;
    }

    fn draw_placeholder(&self, painter: &egui::Painter, rect: Rect) {
        let step = 50.0;
        let stroke = Stroke::new(1.0, Color32::from_gray(215));
        let mut x = rect.left();
        while x <= rect.right() {
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            x += step;
        }
        let mut y = rect.top();
        while y <= rect.bottom() {
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            y += step;
        }
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Load an image here",
            FontId::proportional(14.0),
            Color32::from_gray(150),
        );
    }
}

impl eframe::App for PixEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controls_bar(ctx);
        self.edit_panel(ctx);
        self.status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&self.info_line).strong());
                ui.add_space(6.0);
                self.canvas(ui);
                ui.add_space(4.0);
                ui.label(RichText::new(&self.coords_line).monospace().weak());
            });
        });
    }
}

// ============================================================================
// SMALL WIDGET HELPERS
// ============================================================================

fn channel_entries(ui: &mut egui::Ui, r: &mut String, g: &mut String, b: &mut String) {
    ui.horizontal(|ui| {
        ui.colored_label(Color32::from_rgb(231, 76, 60), "R:");
        ui.add(egui::TextEdit::singleline(r).desired_width(40.0));
        ui.colored_label(Color32::from_rgb(39, 174, 96), "G:");
        ui.add(egui::TextEdit::singleline(g).desired_width(40.0));
        ui.colored_label(Color32::from_rgb(52, 152, 219), "B:");
        ui.add(egui::TextEdit::singleline(b).desired_width(40.0));
    });
}

/// Swatch tracking the entered channel values; white while the text does not
/// parse, clamped into range while it does.
fn color_preview(ui: &mut egui::Ui, r: &str, g: &str, b: &str) {
    let channel = |text: &str| {
        text.trim()
            .parse::<i64>()
            .ok()
            .map(|v| v.clamp(0, 255) as u8)
    };
    let color = match (channel(r), channel(g), channel(b)) {
        (Some(r), Some(g), Some(b)) => Color32::from_rgb(r, g, b),
        _ => Color32::WHITE,
    };
    egui::color_picker::show_color(ui, color, Vec2::new(48.0, 18.0));
}
