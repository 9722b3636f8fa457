use eframe::egui::{self, Align, Color32, Context, Layout, RichText};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("bionet-explorer");
                    ui.separator();
                    ui.label(format!("source: {}", self.source));
                    ui.label(format!("nodes: {}", self.explorer.graph().node_count()));
                    ui.label(format!("edges: {}", self.explorer.graph().edge_count()));

                    let diagnostics = self.explorer.graph().diagnostics();
                    if !diagnostics.is_empty() {
                        let text = diagnostics
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("\n");
                        ui.label(format!("skipped: {}", diagnostics.len()))
                            .on_hover_text(text);
                    }

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.layout_status_text());
                        if let Some(error) = &self.load_error {
                            ui.label(
                                RichText::new("load failed")
                                    .small()
                                    .color(Color32::from_rgb(214, 120, 104)),
                            )
                            .on_hover_text(error.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.explorer.graph().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.label("No entities to show.");
                });
                return;
            }
            self.draw_graph(ui);
        });
    }

    fn layout_status_text(&self) -> String {
        let simulation = self.explorer.simulation();
        if !self.live_physics {
            "layout paused".to_owned()
        } else if simulation.is_settled() {
            "layout settled".to_owned()
        } else {
            format!("alpha {:.3}", simulation.alpha())
        }
    }
}
