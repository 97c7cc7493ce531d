use egui::Sense;

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(app.renderer.canvas_size(), Sense::click_and_drag());
        app.input.set_canvas_rect(response.rect);

        // Key presses belong to the toolbox while one of its text fields has focus
        let keyboard_free = !ctx.wants_keyboard_input();
        let events = app.input.process_input(ctx);
        app.handle_input(events, keyboard_free);

        let preview = app.selection_tool.drag_preview();
        app.renderer
            .render(ctx, &painter, response.rect, &app.model, &mut app.images, preview);

        if app.model.draw_mode_active() {
            response.on_hover_cursor(egui::CursorIcon::Crosshair);
        }
    });
}
