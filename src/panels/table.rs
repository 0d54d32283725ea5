use crate::SignatureApp;
use crate::host::{FieldType, Selection};

/// Demo attachment table; clicking a cell selects it as the insert target.
pub fn table_panel(app: &mut SignatureApp, ctx: &egui::Context) {
    egui::SidePanel::right("table_panel")
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.heading("Table");
            ui.separator();

            let fields = app.host.fields();
            let records = app.host.records();
            let selection = app.host.current_selection();

            egui::Grid::new("records_grid")
                .num_columns(fields.len() + 1)
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("#");
                    for field in &fields {
                        let suffix = if field.field_type == FieldType::Attachment {
                            " 📎"
                        } else {
                            ""
                        };
                        ui.strong(format!("{}{}", field.name, suffix));
                    }
                    ui.end_row();

                    for (row, record) in records.iter().enumerate() {
                        ui.label((row + 1).to_string());
                        for field in &fields {
                            let is_selected = selection.record_id.as_ref() == Some(record)
                                && selection.field_id.as_ref() == Some(&field.id);
                            let text = match field.field_type {
                                FieldType::Attachment => {
                                    let count = app.host.attachments(record, &field.id).len();
                                    if count == 0 {
                                        "-".to_owned()
                                    } else {
                                        format!("{count} file(s)")
                                    }
                                }
                                _ => String::new(),
                            };
                            if ui.selectable_label(is_selected, text).clicked() {
                                log::debug!("Selected cell {} / {}", record, field.id);
                                app.host.select(Selection::cell(field.id.clone(), record.clone()));
                            }
                        }
                        ui.end_row();
                    }
                });

            ui.separator();
            if ui.button("Clear selection").clicked() {
                app.host.select(Selection::default());
            }
        });
}
