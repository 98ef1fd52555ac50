use crate::app::SurveyLens;
use crate::controller::Gesture;
use crate::data::Metric;
use eframe::egui::{ComboBox, Ui};

/// File controls, metric selector and panel toggles
pub fn render_toolbar(app: &mut SurveyLens, ui: &mut Ui, gestures: &mut Vec<Gesture>) {
    ui.horizontal(|ui| {
        if ui.button("📂").on_hover_text("Open survey CSV").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Survey CSV", &["csv"])
                .pick_file()
            {
                app.open_dataset(path);
            }
        }

        if let Some(file) = app.current_file() {
            ui.label(format!(
                "📄 {}",
                file.file_name().and_then(|n| n.to_str()).unwrap_or("Unknown")
            ))
            .on_hover_text(file.display().to_string());
        }

        if app.is_loading() {
            ui.spinner();
            ui.weak("Loading…");
        }

        let Some(dashboard) = app.dashboard() else {
            return;
        };
        ui.separator();

        let filters = dashboard.filters();
        let current = filters.selected_metric();
        let has_filters = filters.has_active_filters();
        drop(filters);

        let mut metric = current;
        ComboBox::from_label("Metric")
            .selected_text(metric.label())
            .show_ui(ui, |ui| {
                for m in Metric::ALL {
                    ui.selectable_value(&mut metric, m, m.label());
                }
            });
        if metric != current {
            gestures.push(Gesture::MetricSelected(metric));
        }

        ui.separator();
        if ui
            .add_enabled(has_filters, eframe::egui::Button::new("✖ Clear filters"))
            .clicked()
        {
            gestures.push(Gesture::FiltersCleared);
        }

        ui.separator();
        ui.toggle_value(&mut app.show_records, "📋").on_hover_text("Records table");
        ui.toggle_value(&mut app.show_help, "❓").on_hover_text("Help (H / F1)");
    });
}
