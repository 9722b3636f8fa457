use bionet_explorer::{PolicyKind, ScaleSelection, humanize};
use eframe::egui::{self, Color32, Sense, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::category_color;

fn color_swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.5, color);
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search entities")
            .on_hover_text("Fuzzy-highlight nodes whose name or id matches.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        let filter_changed = match self.config.policy {
            PolicyKind::Scale => self.draw_scale_filter(ui),
            PolicyKind::Category => self.draw_category_filter(ui),
        };
        if filter_changed {
            self.apply_filter();
        }

        if self.config.policy == PolicyKind::Scale {
            ui.separator();
            ui.label("Categories");
            for category in &self.categories {
                ui.horizontal(|ui| {
                    color_swatch(ui, category_color(category));
                    ui.label(humanize(category));
                });
            }
        }

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Advance the force layout every frame until it settles.");

        ui.horizontal(|ui| {
            if ui
                .button("Reheat layout")
                .on_hover_text("Restart the simulation at full energy.")
                .clicked()
            {
                self.explorer.reheat();
            }
            if ui.button("Reset view").clicked() {
                self.view.reset();
            }
        });

        let mut physics_changed = false;
        ui.collapsing("Physics tuning", |ui| {
            let layout = &mut self.config.layout;
            physics_changed |= ui
                .add(
                    egui::Slider::new(&mut layout.charge_strength, -1000.0..=-10.0)
                        .text("Charge")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Pairwise repulsion between all nodes.")
                .changed();
            physics_changed |= ui
                .add(
                    egui::Slider::new(&mut layout.link_distance, 5.0..=200.0)
                        .text("Link distance")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Rest length of the spring along each edge.")
                .changed();
            physics_changed |= ui
                .add(
                    egui::Slider::new(&mut layout.velocity_decay, 0.05..=0.9)
                        .text("Velocity decay")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Fraction of velocity lost every tick.")
                .changed();
            physics_changed |= ui
                .add(
                    egui::Slider::new(&mut layout.theta, 0.3..=1.5)
                        .text("Approximation")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Barnes-Hut opening angle; larger is faster and coarser.")
                .changed();
        });
        if physics_changed {
            self.explorer.configure_layout(self.config.layout);
        }
    }

    fn draw_scale_filter(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        ui.label("Scale");

        let selected_text = match &self.scale_choice {
            ScaleSelection::All => "All scales".to_owned(),
            ScaleSelection::Only(scale) => humanize(scale),
        };
        egui::ComboBox::from_id_salt("scale_filter")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                changed |= ui
                    .selectable_value(&mut self.scale_choice, ScaleSelection::All, "All scales")
                    .changed();
                for scale in &self.scales {
                    changed |= ui
                        .selectable_value(
                            &mut self.scale_choice,
                            ScaleSelection::Only(scale.clone()),
                            humanize(scale),
                        )
                        .changed();
                }
            });

        let restricted = self.scale_choice != ScaleSelection::All;
        changed |= ui
            .add_enabled(
                restricted,
                egui::Checkbox::new(&mut self.show_connected, "Show connected"),
            )
            .on_hover_text("Dim, rather than hide, entities one link away from the scale.")
            .changed();

        changed
    }

    fn draw_category_filter(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        let categories = &self.categories;

        ui.horizontal(|ui| {
            ui.label("Categories");
            if ui.small_button("All").clicked() {
                self.active_categories = categories.iter().cloned().collect();
                changed = true;
            }
            if ui.small_button("None").clicked() {
                self.active_categories.clear();
                changed = true;
            }
        });

        for category in categories {
            let mut active = self.active_categories.contains(category);
            ui.horizontal(|ui| {
                color_swatch(ui, category_color(category));
                if ui.checkbox(&mut active, humanize(category)).changed() {
                    if active {
                        self.active_categories.insert(category.clone());
                    } else {
                        self.active_categories.remove(category);
                    }
                    changed = true;
                }
            });
        }

        changed
    }
}
