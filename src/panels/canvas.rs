use crate::SignatureApp;

pub fn canvas_panel(app: &mut SignatureApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        // Canvas takes about 40% of the window height
        let height = (ctx.screen_rect().height() * 0.4).clamp(120.0, available.y.max(120.0));
        app.widget.canvas_ui(ui, egui::vec2(available.x, height));

        ui.add_space(4.0);
        ui.label(format!("Strokes: {}", app.widget.pad().history().len()));
    });
}
