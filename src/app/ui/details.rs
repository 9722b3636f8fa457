use eframe::egui::{self, Color32, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let Some(record) = self.explorer.detail() else {
            ui.label("Hover or click a node or link to see its details.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(&record.title).strong());
            if self.explorer.detail_locked() {
                ui.label(
                    RichText::new("locked")
                        .small()
                        .color(Color32::from_rgb(245, 206, 93)),
                )
                .on_hover_text("Click the element again or the background to release it.");
            }
        });
        ui.add_space(6.0);

        egui::Grid::new("detail_fields")
            .num_columns(2)
            .striped(true)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in &record.fields {
                    ui.label(RichText::new(&field.key).strong());
                    ui.add(egui::Label::new(field.value.as_str()).wrap());
                    ui.end_row();
                }
            });

        if self.explorer.detail_locked() {
            ui.add_space(10.0);
            if ui.button("Clear selection").clicked() {
                self.explorer.on_background_click();
            }
        }
    }
}
