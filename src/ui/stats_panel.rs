use super::gender_color;
use crate::config::DashboardConfig;
use crate::controller::{Dashboard, Gesture};
use crate::data::Gender;
use crate::data::stats::gender_means;
use crate::widgets::FilterChips;
use eframe::egui::Ui;

/// Visible counts, active filters and per-gender means of the selected metric
pub fn render_status_panel(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    ui: &mut Ui,
    gestures: &mut Vec<Gesture>,
) {
    profiling::scope!("render_status_panel");
    let metric = dashboard.filters().selected_metric();
    let facets = dashboard.filters().active_facets();

    ui.horizontal(|ui| {
        if let Some(name) = dashboard.dataset().file_path().and_then(|p| p.file_name()) {
            ui.label(format!("📁 {}", name.to_string_lossy()));
            ui.separator();
        }
        let total = dashboard.dataset().len();
        let visible = dashboard.visible_count();
        if visible < total {
            ui.label(format!("Showing {visible} of {total} respondents"));
        } else {
            ui.label(format!("{total} respondents"));
        }
        if let Some(scene) = dashboard.renderer().scatter() {
            if scene.omitted > 0 {
                ui.separator();
                ui.weak(format!("{} without age or {}", scene.omitted, metric.label().to_lowercase()))
                    .on_hover_text("These respondents match the filters but cannot be plotted");
            }
        }
    });

    let (_, cleared) = FilterChips::new(&facets).show(ui);
    if let Some(facet) = cleared {
        gestures.push(Gesture::FacetCleared(facet));
    }

    let filtered = dashboard.filtered_records();
    let means = gender_means(filtered.iter().copied(), metric);
    ui.horizontal(|ui| {
        ui.label(format!("Mean {}:", metric.label().to_lowercase()));
        for gender in Gender::ALL {
            let summary = means[gender.index()];
            let text = match summary.mean {
                Some(mean) => format!("{gender} {mean:.2} (n={})", summary.count),
                None => format!("{gender} -"),
            };
            ui.colored_label(gender_color(&config.colors, gender), text);
        }
    });
}
