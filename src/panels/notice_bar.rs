use egui::Color32;

use crate::SignatureApp;
use crate::notice::NoticeLevel;

pub fn notice_panel(app: &mut SignatureApp, ctx: &egui::Context) {
    let Some(notice) = app.widget.notices().current() else {
        return;
    };

    egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let color = match notice.level {
                NoticeLevel::Loading => {
                    ui.spinner();
                    ui.visuals().text_color()
                }
                NoticeLevel::Info => Color32::from_rgb(0x16, 0x77, 0xff),
                NoticeLevel::Success => Color32::from_rgb(0x52, 0xc4, 0x1a),
                NoticeLevel::Error => Color32::from_rgb(0xff, 0x4d, 0x4f),
            };
            ui.colored_label(color, &notice.text);
            if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                app.widget.notices().dismiss();
            }
        });
    });

    // Keep repainting so expired notices disappear without input
    ctx.request_repaint_after(std::time::Duration::from_millis(250));
}
