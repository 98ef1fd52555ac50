use super::gender_color;
use crate::config::DashboardConfig;
use crate::constants::chart::{HOVER_RADIUS, POINT_OPACITY, POINT_RADIUS, POINT_SELECT_TOLERANCE};
use crate::controller::{Dashboard, Gesture};
use crate::data::Gender;
use crate::render::{LegendScene, ScatterPoint, ScatterScene};
use eframe::egui::{self, RichText, Sense, Ui};
use egui_plot::{Plot, PlotPoint, Points};

/// Note shown above a plot with nothing to draw
fn empty_notice(scene: &ScatterScene) -> Option<&'static str> {
    if scene.visible == 0 {
        Some("No respondents match the current filters")
    } else if scene.points.is_empty() {
        Some("Matching respondents lack an age or a value for this metric")
    } else {
        None
    }
}

/// Index of the point closest to `pos`, distances normalised by the visible bounds
fn nearest_point(points: &[ScatterPoint], pos: PlotPoint, width: f64, height: f64) -> Option<usize> {
    let mut closest = None;
    let mut min_dist = f64::INFINITY;
    for (i, point) in points.iter().enumerate() {
        let dx = (point.age - pos.x) / width;
        let dy = (point.value - pos.y) / height;
        let dist = dx * dx + dy * dy;
        if dist < min_dist {
            min_dist = dist;
            closest = Some(i);
        }
    }
    closest.filter(|_| min_dist < POINT_SELECT_TOLERANCE)
}

fn render_legend(
    legend: &LegendScene,
    config: &DashboardConfig,
    interactive: bool,
    ui: &mut Ui,
    gestures: &mut Vec<Gesture>,
) {
    ui.horizontal(|ui| {
        for entry in &legend.entries {
            let color = gender_color(&config.colors, entry.gender).gamma_multiply(entry.opacity);
            let (rect, swatch) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::click());
            ui.painter().circle_filled(rect.center(), 6.0, color);

            let text_color = ui.visuals().text_color().gamma_multiply(entry.opacity);
            let label = ui.add(
                egui::Label::new(RichText::new(entry.gender.label()).color(text_color))
                    .sense(Sense::click()),
            );
            let clicked = swatch.clicked() || label.clicked();
            if interactive {
                label.on_hover_text("Click to filter by gender");
                if clicked {
                    gestures.push(Gesture::LegendClicked(entry.gender));
                }
            }
            ui.add_space(8.0);
        }
    });
}

fn render_plot(scene: &ScatterScene, config: &DashboardConfig, ui: &mut Ui) {
    let mut plot = Plot::new("scatter")
        .width(config.main_width.min(ui.available_width()))
        .height(config.main_height.min(ui.available_height().max(120.0)))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Age")
        .y_axis_label(scene.metric.label())
        .include_y(scene.y_domain.min)
        .include_y(scene.y_domain.max);
    if let Some(x_domain) = scene.x_domain {
        plot = plot.include_x(x_domain.min).include_x(x_domain.max);
    }

    let plot_response = plot.show(ui, |plot_ui| {
        for gender in Gender::ALL {
            let points: Vec<[f64; 2]> = scene
                .points
                .iter()
                .filter(|p| p.gender == gender)
                .map(|p| [p.age, p.value])
                .collect();
            if points.is_empty() {
                continue;
            }
            let color = gender_color(&config.colors, gender).gamma_multiply(POINT_OPACITY);
            plot_ui.points(Points::new(gender.label(), points).radius(POINT_RADIUS).color(color));
        }

        let bounds = plot_ui.plot_bounds();
        let hovered = plot_ui
            .pointer_coordinate()
            .and_then(|pos| nearest_point(&scene.points, pos, bounds.width(), bounds.height()));
        if let Some(point) = hovered.map(|i| &scene.points[i]) {
            let color = gender_color(&config.colors, point.gender);
            plot_ui.points(
                Points::new("", vec![[point.age, point.value]])
                    .radius(HOVER_RADIUS)
                    .color(color),
            );
        }
        hovered
    });

    if let Some(point) = plot_response.inner.map(|i| &scene.points[i]) {
        plot_response.response.on_hover_ui(|ui| {
            ui.label(format!("Age: {}", point.age));
            ui.colored_label(
                gender_color(&config.colors, point.gender),
                format!("Gender: {}", point.gender),
            );
            ui.label(format!("Occupation: {}", point.occupation));
            ui.label(format!("{}: {}", scene.metric.label(), point.value));
        });
    }
}

/// Scatter plot of age against the selected metric, with the gender legend
pub fn render_scatter_region(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    ui: &mut Ui,
    gestures: &mut Vec<Gesture>,
) {
    profiling::scope!("paint_scatter");
    let renderer = dashboard.renderer();

    if let Some(legend) = renderer.legend() {
        ui.horizontal(|ui| {
            ui.strong(legend.metric.label());
            ui.separator();
            render_legend(legend, config, renderer.primary_gestures_bound(), ui, gestures);
        });
    }

    match renderer.scatter() {
        Some(scene) => {
            if let Some(notice) = empty_notice(scene) {
                ui.weak(notice);
            }
            render_plot(scene, config, ui);
        }
        None => {
            ui.weak("Scatter plot not drawn");
        }
    }
}
