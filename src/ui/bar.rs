use super::gender_color;
use crate::config::DashboardConfig;
use crate::constants::chart::BAR_WIDTH;
use crate::controller::{Dashboard, Gesture};
use crate::data::Gender;
use crate::render::BarScene;
use crate::state::BarView;
use eframe::egui::{ComboBox, Ui};
use egui_plot::{Bar, BarChart, Corner, Legend, Plot};

/// Center of a gender's bar inside its group slot
fn bar_x(scene: &BarScene, group: usize, gender: Gender) -> f64 {
    if scene.stacked() {
        group as f64
    } else {
        let width = BAR_WIDTH / Gender::ALL.len() as f64;
        group as f64 + (gender.index() as f64 - 1.0) * width
    }
}

fn bar_width(scene: &BarScene) -> f64 {
    if scene.stacked() {
        BAR_WIDTH
    } else {
        BAR_WIDTH / Gender::ALL.len() as f64
    }
}

/// Category label under integer ticks, nothing elsewhere
fn tick_label(labels: &[String], value: f64) -> String {
    if value.fract().abs() > 1e-6 || value < 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

fn charts(scene: &BarScene, config: &DashboardConfig) -> Vec<BarChart> {
    let mut charts: Vec<BarChart> = Vec::with_capacity(Gender::ALL.len());
    for gender in Gender::ALL {
        let color = gender_color(&config.colors, gender);
        let bars: Vec<Bar> = scene
            .groups
            .iter()
            .enumerate()
            .filter_map(|(i, group)| {
                let value = group.value(gender)?;
                Some(
                    Bar::new(bar_x(scene, i, gender), value)
                        .width(bar_width(scene))
                        .name(&group.label)
                        .fill(color.gamma_multiply(group.opacity)),
                )
            })
            .collect();

        let mut chart = BarChart::new(gender.label(), bars).color(color);
        if scene.stacked() {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }
    charts
}

/// Bar view selector and the bar chart of the active view
pub fn render_bar_region(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    ui: &mut Ui,
    gestures: &mut Vec<Gesture>,
) {
    profiling::scope!("paint_bar");
    let current = dashboard.filters().bar_view();
    let mut selected = current;
    ComboBox::from_id_salt("bar_view")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for view in BarView::ALL {
                ui.selectable_value(&mut selected, view, view.label());
            }
        });
    if selected != current {
        gestures.push(Gesture::BarViewSelected(selected));
    }

    let Some(scene) = dashboard.renderer().bar() else {
        ui.weak("Bar chart not drawn");
        return;
    };

    let (x_label, y_label) = match scene.view {
        BarView::Occupation => ("Occupation", "Respondents"),
        BarView::DepressionTime => ("Depression level", "Mean minutes per day"),
    };
    let labels: Vec<String> = scene.groups.iter().map(|g| g.label.clone()).collect();

    let plot = Plot::new("bar")
        .width(config.side_width.min(ui.available_width()))
        .height(config.side_height.min(ui.available_height().max(120.0)))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| tick_label(&labels, mark.value))
        .include_y(0.0)
        .include_y(scene.y_max);

    let plot_response = plot.show(ui, |plot_ui| {
        for chart in charts(scene, config) {
            plot_ui.bar_chart(chart);
        }
    });

    if plot_response.response.clicked() {
        if let Some(group) = plot_response
            .response
            .interact_pointer_pos()
            .map(|pos| plot_response.transform.value_from_position(pos))
            .and_then(|point| scene.group_at(point.x))
        {
            gestures.push(Gesture::BarClicked(group.label.clone()));
        }
    }
}
