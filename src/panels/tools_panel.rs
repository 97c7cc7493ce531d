use std::path::PathBuf;

use egui::{Button, Color32, RichText};

use crate::command::Command;
use crate::element::factory;
use crate::services::GenerationRequest;
use crate::PaintApp;

const ACCENT: Color32 = Color32::from_rgb(0xff, 0x98, 0x00);
const DANGER: Color32 = Color32::from_rgb(0xff, 0x00, 0x00);

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Toolbox");
                ui.separator();

                text_section(app, ui);
                ui.separator();
                shape_section(app, ui);
                ui.separator();
                image_section(app, ui);
                ui.separator();
                generation_section(app, ui);
                ui.separator();
                selection_section(app, ui);

                if let Some(status) = &app.status {
                    ui.separator();
                    ui.colored_label(ui.visuals().warn_fg_color, status);
                    if ui.small_button("Dismiss").clicked() {
                        app.status = None;
                    }
                }
            });
        });
}

fn text_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.label("Text");
    let response = ui.text_edit_singleline(&mut app.chrome.text_draft);
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if ui.button("Add Text").clicked() || submitted {
        app.add_text();
    }
}

fn shape_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label("Color:");
        let mut color = app.model.brush_color();
        if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque).changed() {
            app.model.set_brush_color(color);
        }
    });

    ui.horizontal(|ui| {
        if ui.add(Button::new("Add Rectangle").fill(ACCENT)).clicked() {
            let color = app.model.brush_color();
            app.execute_command(Command::AddElement {
                kind: factory::rectangle(color),
                position: None,
            });
        }
        if ui.add(Button::new("Add Circle").fill(ACCENT)).clicked() {
            let color = app.model.brush_color();
            app.execute_command(Command::AddElement {
                kind: factory::circle(color),
                position: None,
            });
        }
    });

    let mut drawing = app.model.draw_mode_active();
    if ui.toggle_value(&mut drawing, "✏ Draw").changed() {
        app.set_draw_mode(drawing);
    }
}

fn image_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.label("Image file");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.chrome.image_path);
        if ui.button("Upload").clicked() && !app.chrome.image_path.trim().is_empty() {
            let path = PathBuf::from(app.chrome.image_path.trim());
            app.upload_image(&path);
        }
    });

    ui.label("Image URL");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.chrome.image_url);
        if ui.button("Fetch").clicked() && !app.chrome.image_url.trim().is_empty() {
            let url = app.chrome.image_url.trim().to_owned();
            app.add_image_from_url(url);
        }
    });
    ui.small("Images can also be dropped onto the window.");
}

fn generation_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    let enabled = app.can_generate();

    ui.label("Generate image");
    ui.text_edit_singleline(&mut app.chrome.prompt);
    let has_prompt = !app.chrome.prompt.trim().is_empty();
    if ui.add_enabled(enabled && has_prompt, Button::new("Generate")).clicked() {
        let prompt = app.chrome.prompt.trim().to_owned();
        app.generate(GenerationRequest::Prompt { prompt });
    }

    ui.add_space(4.0);
    ui.label(RichText::new("Generate Mockup").strong());
    egui::Grid::new("mockup_grid").num_columns(2).show(ui, |ui| {
        ui.label("Artist is");
        ui.text_edit_singleline(&mut app.chrome.mockup.artist_action);
        ui.end_row();
        ui.label("Dress type");
        ui.text_edit_singleline(&mut app.chrome.mockup.dress_type);
        ui.end_row();
        ui.label("Dress color");
        ui.text_edit_singleline(&mut app.chrome.mockup.dress_color);
        ui.end_row();
    });
    if ui.add_enabled(enabled, Button::new("Generate Mockup")).clicked() {
        app.generate_mockup();
    }

    if !enabled {
        ui.small("No generation endpoint configured.");
    }
    for job in &app.jobs {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(job.label());
        });
    }
}

fn selection_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.label(format!("Elements: {}", app.model.list_elements().len()));
    match app.selection_summary() {
        Some(summary) => ui.label(format!("Selected: {}", summary)),
        None => ui.label("Nothing selected"),
    };

    let has_selection = app.model.selected_element().is_some();
    let delete = Button::new(RichText::new("Delete Selected").color(Color32::WHITE)).fill(DANGER);
    if ui.add_enabled(has_selection, delete).clicked() {
        app.delete_selected();
    }
}
