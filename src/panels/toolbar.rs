use egui::Color32;
use egui::color_picker::{self, Alpha};

use crate::SignatureApp;
use crate::export::ExportFormat;
use crate::style;

pub fn toolbar(app: &mut SignatureApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Signature pad");
            ui.separator();

            if ui.button("🗑").on_hover_text("Clear the signature").clicked() {
                log::info!("Clearing signature");
                app.widget.clear();
            }

            let can_undo = !app.widget.pad().is_empty();
            if ui
                .add_enabled(can_undo, egui::Button::new("⟲"))
                .on_hover_text("Undo last stroke")
                .clicked()
            {
                app.widget.undo();
            }

            let mut pen_color = app.widget.pad().style().pen_color;
            if color_picker::color_edit_button_srgba(ui, &mut pen_color, Alpha::Opaque)
                .on_hover_text("Pen color")
                .changed()
            {
                app.widget.set_pen_color(pen_color);
            }
            if let Some(color) = hex_field(ui, &mut app.pen_hex, pen_color) {
                app.widget.set_pen_color(color);
            }

            let mut background_color = app.widget.pad().style().background_color;
            if color_picker::color_edit_button_srgba(ui, &mut background_color, Alpha::Opaque)
                .on_hover_text("Background color")
                .changed()
            {
                app.widget.set_background_color(background_color);
            }
            if let Some(color) = hex_field(ui, &mut app.background_hex, background_color) {
                app.widget.set_background_color(color);
            }

            ui.menu_button("Pen", |ui| {
                let mut options = *app.widget.pad().options();
                let mut changed = false;
                changed |= ui
                    .add(egui::Slider::new(&mut options.min_width, 0.1..=5.0).text("Min width"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut options.max_width, 0.5..=10.0).text("Max width"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut options.dot_size, 0.5..=10.0).text("Dot size"))
                    .changed();
                if changed {
                    app.widget.set_options(options);
                }
            })
            .response
            .on_hover_text("Pen width settings");

            ui.separator();

            ui.menu_button("Insert into cell", |ui| {
                for format in ExportFormat::ALL {
                    if ui.button(format.label()).clicked() {
                        log::info!("Insert requested as {format}");
                        app.widget.insert(format);
                        ui.close_menu();
                    }
                }
            })
            .response
            .on_hover_text("Select an empty attachment cell to insert the signature into it");

            ui.menu_button("Download", |ui| {
                for format in ExportFormat::ALL {
                    if ui.button(format.label()).clicked() {
                        #[cfg(not(target_arch = "wasm32"))]
                        app.widget.download(format, &app.download_dir);
                        #[cfg(target_arch = "wasm32")]
                        app.widget.download(format);
                        ui.close_menu();
                    }
                }
            })
            .response
            .on_hover_text("Download the signature");
        });
    });
}

/// Hex text input next to a color button. Returns the parsed color once the
/// user finishes editing; follows `current` while not focused.
fn hex_field(ui: &mut egui::Ui, text: &mut String, current: Color32) -> Option<Color32> {
    let response = ui.add(egui::TextEdit::singleline(text).desired_width(60.0));
    if response.lost_focus() {
        return commit_hex(text, current);
    }
    if !response.has_focus() {
        *text = style::to_hex(current);
    }
    None
}

/// Parse the edited text. Invalid input snaps back to `current`.
fn commit_hex(text: &mut String, current: Color32) -> Option<Color32> {
    let parsed = style::parse_hex_color(text);
    if parsed.is_none() {
        log::warn!("Ignoring invalid color {text:?}");
    }
    *text = style::to_hex(parsed.unwrap_or(current));
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_hex_applies_valid_color() {
        let mut text = String::from(" #ff0000 ");
        assert_eq!(commit_hex(&mut text, Color32::BLACK), Some(Color32::RED));
        assert_eq!(text, "#ff0000");
    }

    #[test]
    fn test_commit_hex_reverts_invalid_text() {
        let mut text = String::from("not a color");
        assert_eq!(commit_hex(&mut text, Color32::BLUE), None);
        assert_eq!(text, "#0000ff");
    }
}
