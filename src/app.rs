use std::time::Instant;

use eframe::egui;
use tracing::warn;

use crate::canvas::{self, CanvasSession, HexColor, Point, Tool};
use crate::config::Config;
use crate::note::NoteId;
use crate::prefs::Preferences;
use crate::search::{Debouncer, SearchQuery};
use crate::share::{self, ClipboardChannel, ShareChannel, ShareOutcome};
use crate::storage::FileStore;
use crate::store::{Composer, EXPORT_FILE_NAME, NoteStore};

const CARD_WIDTH: f32 = 220.0;

enum CardAction {
    Share(NoteId),
    Edit(NoteId),
    Delete(NoteId),
}

pub struct NotesApp {
    notes: NoteStore<FileStore>,
    prefs: Preferences<FileStore>,
    composer: Composer,
    text_color: egui::Color32,

    search_input: String,
    regex_mode: bool,
    // None while the typed regex does not compile
    query: Option<SearchQuery>,
    search_error: Option<String>,
    search_debounce: Debouncer<String>,

    canvas: CanvasSession,
    canvas_texture: Option<egui::TextureHandle>,
    show_drawing: bool,
    // hex text beside each picker, committed on focus loss
    color_hex: String,
    background_hex: String,

    clipboard: ClipboardChannel,
    manual_copy: Option<String>,
    status: Option<String>,
}

impl NotesApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config, storage: FileStore) -> Self {
        let prefs = Preferences::load(storage.clone());
        cc.egui_ctx.set_visuals(visuals(prefs.dark_mode()));
        Self {
            notes: NoteStore::open(storage),
            prefs,
            composer: Composer::default(),
            text_color: cc.egui_ctx.style().visuals.text_color(),
            search_input: String::new(),
            regex_mode: false,
            query: Some(SearchQuery::default()),
            search_error: None,
            search_debounce: Debouncer::new(config.search_debounce),
            canvas: CanvasSession::new(config.canvas_size),
            color_hex: HexColor::BLACK.to_string(),
            background_hex: HexColor::WHITE.to_string(),
            canvas_texture: None,
            show_drawing: false,
            clipboard: ClipboardChannel::new(),
            manual_copy: None,
            status: None,
        }
    }

    fn apply_pending_search(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(text) = self.search_debounce.poll(now) {
            self.apply_search(&text);
        }
        if let Some(remaining) = self.search_debounce.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn apply_search(&mut self, text: &str) {
        match SearchQuery::parse(text, self.regex_mode) {
            Ok(query) => {
                self.query = Some(query);
                self.search_error = None;
            }
            Err(err) => {
                self.query = None;
                self.search_error = Some(err.to_string());
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("📝 Notes");
            ui.separator();

            ui.label("🔍");
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search notes...")
                    .desired_width(200.0),
            );
            if search.changed() {
                self.search_debounce
                    .schedule(self.search_input.clone(), Instant::now());
            }
            if ui.checkbox(&mut self.regex_mode, "Regex").changed() {
                self.search_debounce.cancel();
                let text = self.search_input.clone();
                self.apply_search(&text);
            }
            if let Some(error) = &self.search_error {
                ui.colored_label(egui::Color32::RED, error.as_str());
            }

            ui.separator();

            if ui.button("⬇ Export").clicked() {
                if let Err(e) = self.export_notes() {
                    warn!(error = %e, "note export failed");
                    self.status = Some(format!("Export failed: {e}"));
                }
            }
            if ui.button(self.prefs.toggle_label()).clicked() {
                let dark = self.prefs.toggle_dark_mode();
                ui.ctx().set_visuals(visuals(dark));
            }
            let drawing_label = if self.show_drawing {
                "🎨 Hide Drawing"
            } else {
                "🎨 Drawing"
            };
            if ui.button(drawing_label).clicked() {
                self.show_drawing = !self.show_drawing;
                if self.show_drawing {
                    self.canvas.request_redraw();
                }
            }
        });

        if let Some(err) = self.notes.last_error() {
            ui.colored_label(egui::Color32::RED, format!("Notes not saved: {err}"));
        } else if let Some(status) = &self.status {
            ui.label(status.as_str());
        }
    }

    fn composer_ui(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.composer.title)
                        .hint_text("Title")
                        .desired_width(240.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.composer.category)
                        .hint_text("Category")
                        .desired_width(140.0),
                );
                ui.label("Text color:");
                ui.color_edit_button_srgba(&mut self.text_color);
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.composer.content)
                    .hint_text("Write your note...")
                    .text_color(self.text_color)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                let submit = ui.button(self.composer.submit_label()).clicked()
                    || ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.ctrl);
                if submit {
                    self.composer.submit(&mut self.notes);
                }
                if self.composer.editing().is_some() && ui.button("Cancel").clicked() {
                    self.composer.cancel();
                }
                ui.label("Ctrl+Enter to save");
            });
        });
    }

    fn notes_grid(&mut self, ui: &mut egui::Ui) {
        let Some(query) = &self.query else {
            return;
        };
        let listed = self.notes.list_matching(query);
        if listed.is_empty() {
            ui.label(if self.notes.is_empty() {
                "No notes yet. Add one above!"
            } else {
                "No notes match your search."
            });
            return;
        }

        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for note in &listed {
                    ui.group(|ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                if ui.small_button("🔗").on_hover_text("Share").clicked() {
                                    action = Some(CardAction::Share(note.id));
                                }
                                if ui.small_button("✏").on_hover_text("Edit").clicked() {
                                    action = Some(CardAction::Edit(note.id));
                                }
                                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                                    action = Some(CardAction::Delete(note.id));
                                }
                            });
                            ui.heading(note.display_title());
                            ui.label(note.content.as_str());
                            ui.small(note.meta_line());
                        });
                    });
                }
            });
        });

        if let Some(action) = action {
            self.apply_card_action(action);
        }
    }

    fn apply_card_action(&mut self, action: CardAction) {
        match action {
            CardAction::Share(id) => {
                let Some(note) = self.notes.get(id).cloned() else {
                    return;
                };
                let mut channels: [&mut dyn ShareChannel; 1] = [&mut self.clipboard];
                match share::share(&note, &mut channels) {
                    ShareOutcome::Delivered { channel } if channel == ClipboardChannel::NAME => {
                        self.status = Some("Note copied to clipboard!".to_string());
                    }
                    ShareOutcome::Delivered { channel } => {
                        self.status = Some(format!("Shared via {channel}"));
                    }
                    ShareOutcome::ManualCopy(text) => self.manual_copy = Some(text),
                }
            }
            CardAction::Edit(id) => {
                if let Some(note) = self.notes.get(id) {
                    self.composer.begin_edit(note);
                }
            }
            CardAction::Delete(id) => {
                if self.notes.delete(id) && self.composer.editing() == Some(id) {
                    self.composer.cancel();
                }
            }
        }
    }

    fn drawing_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tool in Tool::ALL {
                if ui
                    .selectable_label(self.canvas.tool() == tool, tool.label())
                    .clicked()
                {
                    self.canvas.set_tool(tool);
                }
            }
        });

        ui.horizontal(|ui| {
            let undo = egui::Button::new("↶ Undo");
            if ui.add_enabled(self.canvas.history().can_undo(), undo).clicked() {
                self.canvas.undo();
            }
            let redo = egui::Button::new("↷ Redo");
            if ui.add_enabled(self.canvas.history().can_redo(), redo).clicked() {
                self.canvas.redo();
            }
            ui.separator();
            ui.label(format!("Strokes: {}", self.canvas.history().committed().len()));
        });

        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut color = self.canvas.color().rgb();
            if ui.color_edit_button_srgb(&mut color).changed() {
                self.canvas.set_color(HexColor::from(color));
                self.color_hex = self.canvas.color().to_string();
            }
            if hex_field(ui, &mut self.color_hex) {
                if let Err(e) = self.canvas.set_color_hex(&self.color_hex) {
                    self.status = Some(e.to_string());
                }
                self.color_hex = self.canvas.color().to_string();
            }
            ui.label("Background:");
            let mut background = self.canvas.background().rgb();
            if ui.color_edit_button_srgb(&mut background).changed() {
                self.canvas.set_background(HexColor::from(background));
                self.background_hex = self.canvas.background().to_string();
            }
            if hex_field(ui, &mut self.background_hex) {
                if let Err(e) = self.canvas.set_background_hex(&self.background_hex) {
                    self.status = Some(e.to_string());
                }
                self.background_hex = self.canvas.background().to_string();
            }
            ui.separator();
            if ui.button("💾 Export PNG").clicked() {
                if let Err(e) = self.export_drawing() {
                    warn!(error = %e, "drawing export failed");
                    self.status = Some(format!("Export failed: {e}"));
                }
            }
        });

        ui.separator();
        self.canvas_surface(ui);
    }

    fn canvas_surface(&mut self, ui: &mut egui::Ui) {
        let (width, height) = self.canvas.size();
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width as f32, height as f32), egui::Sense::drag());
        let rect = response.rect;
        let to_canvas = |pos: egui::Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

        if let Some(pointer_pos) = response.interact_pointer_pos() {
            if response.drag_started() {
                self.canvas.begin_stroke(to_canvas(pointer_pos));
            } else if self.canvas.is_drawing() && response.dragged() {
                if rect.contains(pointer_pos) {
                    self.canvas.extend_stroke(to_canvas(pointer_pos));
                } else {
                    // leaving the surface ends the stroke
                    self.canvas.commit_stroke();
                }
            }
        }
        if response.drag_stopped() {
            self.canvas.commit_stroke();
        }

        if self.canvas.take_redraw() || self.canvas_texture.is_none() {
            let img = self.canvas.render();
            let size = [img.width() as usize, img.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            match &mut self.canvas_texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.canvas_texture = Some(ui.ctx().load_texture(
                        "drawing-canvas",
                        image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
            }
        }

        if let Some(texture) = &self.canvas_texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
    }

    fn manual_copy_window(&mut self, ctx: &egui::Context) {
        let Some(text) = self.manual_copy.as_mut() else {
            return;
        };
        let mut open = true;
        let mut done = false;
        egui::Window::new("Copy the note text")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add(egui::TextEdit::multiline(text).desired_width(320.0));
                if ui.button("Done").clicked() {
                    done = true;
                }
            });
        if !open || done {
            self.manual_copy = None;
        }
    }

    fn export_notes(&self) -> anyhow::Result<()> {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(EXPORT_FILE_NAME)
            .save_file()
        {
            self.notes.export_to(&path)?;
        }
        Ok(())
    }

    fn export_drawing(&self) -> anyhow::Result<()> {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(canvas::PNG_FILE_NAME)
            .save_file()
        {
            canvas::export_png(&self.canvas, &path)?;
        }
        Ok(())
    }
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_pending_search(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        if self.show_drawing {
            let (canvas_width, _) = self.canvas.size();
            egui::SidePanel::right("drawing")
                .resizable(false)
                .min_width(canvas_width as f32 + 16.0)
                .show(ctx, |ui| self.drawing_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.composer_ui(ui);
            ui.separator();
            self.notes_grid(ui);
        });

        self.manual_copy_window(ctx);
    }
}

fn visuals(dark: bool) -> egui::Visuals {
    if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}

/// A short hex entry. Returns `true` once editing finishes.
fn hex_field(ui: &mut egui::Ui, text: &mut String) -> bool {
    ui.add(egui::TextEdit::singleline(text).desired_width(64.0))
        .lost_focus()
}
