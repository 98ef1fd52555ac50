use super::{gender_color, rgb};
use crate::config::DashboardConfig;
use crate::constants::chart::{ARC_SEGMENTS_PER_RADIAN, DONUT_INNER_RATIO, DONUT_SELECTED_OFFSET};
use crate::controller::{Dashboard, Gesture};
use crate::data::Gender;
use crate::render::{DonutScene, DonutSlice};
use crate::state::SecondaryView;
use eframe::egui::{self, ComboBox, Pos2, Sense, Shape, Stroke, Ui, Vec2};

/// Unit vector for an angle measured clockwise from twelve o'clock
fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Angle of `pos` around `center`, clockwise from twelve o'clock
fn angle_of(center: Pos2, pos: Pos2) -> f32 {
    let d = pos - center;
    d.x.atan2(-d.y)
}

/// Slice under the pointer, if the pointer is on the ring
fn hit_test<'a>(scene: &'a DonutScene, center: Pos2, outer: f32, pos: Pos2) -> Option<&'a DonutSlice> {
    let distance = (pos - center).length();
    if distance < outer * DONUT_INNER_RATIO || distance > outer + DONUT_SELECTED_OFFSET {
        return None;
    }
    scene.slice_at(angle_of(center, pos))
}

fn paint_slice(painter: &egui::Painter, slice: &DonutSlice, center: Pos2, outer: f32) {
    let sweep = slice.end_angle - slice.start_angle;
    if sweep <= 0.0 {
        return;
    }
    let center = if slice.selected {
        center + direction(slice.start_angle + sweep / 2.0) * DONUT_SELECTED_OFFSET
    } else {
        center
    };
    let inner = outer * DONUT_INNER_RATIO;
    let fill = rgb(slice.color).gamma_multiply(slice.opacity);

    // Quads are convex even where the whole ring segment is not
    let segments = ((sweep * ARC_SEGMENTS_PER_RADIAN).ceil() as usize).max(1);
    let step = sweep / segments as f32;
    for i in 0..segments {
        let a0 = slice.start_angle + step * i as f32;
        let a1 = a0 + step;
        let quad = vec![
            center + direction(a0) * inner,
            center + direction(a0) * outer,
            center + direction(a1) * outer,
            center + direction(a1) * inner,
        ];
        painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
    }
}

fn slice_tooltip(ui: &mut Ui, slice: &DonutSlice, total: usize, config: &DashboardConfig) {
    let count = slice.counts.total();
    let share = if total == 0 { 0.0 } else { 100.0 * count as f64 / total as f64 };
    ui.strong(&slice.category);
    ui.label(format!("{count} respondents ({share:.1}%)"));
    for gender in Gender::ALL {
        ui.colored_label(
            gender_color(&config.colors, gender),
            format!("{}: {}", gender, slice.counts.get(gender)),
        );
    }
}

/// Secondary view selector and the donut of the active view
pub fn render_donut_region(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    ui: &mut Ui,
    gestures: &mut Vec<Gesture>,
) {
    profiling::scope!("paint_donut");
    let current = dashboard.filters().secondary_view();
    let mut selected = current;
    ComboBox::from_id_salt("secondary_view")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for view in SecondaryView::ALL {
                ui.selectable_value(&mut selected, view, view.label());
            }
        });
    if selected != current {
        gestures.push(Gesture::SecondaryViewSelected(selected));
    }

    let Some(scene) = dashboard.renderer().donut() else {
        ui.weak("Donut not drawn");
        return;
    };
    if scene.slices.is_empty() {
        ui.weak("No categories to show");
        return;
    }

    let side = config.side_width.min(config.side_height).min(ui.available_width());
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
    let center = response.rect.center();
    let outer = side / 2.0 - DONUT_SELECTED_OFFSET;

    for slice in &scene.slices {
        paint_slice(&painter, slice, center, outer);
    }

    if response.clicked() {
        if let Some(slice) = response
            .interact_pointer_pos()
            .and_then(|pos| hit_test(scene, center, outer, pos))
        {
            gestures.push(Gesture::DonutSliceClicked(slice.category.clone()));
        }
    }

    if let Some(slice) = response
        .hover_pos()
        .and_then(|pos| hit_test(scene, center, outer, pos))
    {
        response.on_hover_ui_at_pointer(|ui| slice_tooltip(ui, slice, scene.total, config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregates::GenderCounts;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn scene() -> DonutScene {
        let slice = |category: &str, start_angle, end_angle| DonutSlice {
            category: category.to_string(),
            counts: GenderCounts::default(),
            start_angle,
            end_angle,
            color: [0, 0, 0],
            selected: false,
            opacity: 1.0,
        };
        DonutScene {
            view: SecondaryView::Platforms,
            slices: vec![slice("Instagram", 0.0, PI), slice("TikTok", PI, TAU)],
            total: 2,
        }
    }

    #[test]
    fn test_angle_clockwise_from_top() {
        let center = Pos2::new(100.0, 100.0);
        assert!(angle_of(center, Pos2::new(100.0, 50.0)).abs() < 1e-6);
        assert!((angle_of(center, Pos2::new(150.0, 100.0)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_hit_test_ring_only() {
        let scene = scene();
        let center = Pos2::new(100.0, 100.0);
        // Right side of the ring, first half of the circle
        let hit = hit_test(&scene, center, 80.0, Pos2::new(170.0, 100.0));
        assert_eq!(hit.map(|s| s.category.as_str()), Some("Instagram"));
        // Left side
        let hit = hit_test(&scene, center, 80.0, Pos2::new(30.0, 100.0));
        assert_eq!(hit.map(|s| s.category.as_str()), Some("TikTok"));
        // Hole and outside
        assert!(hit_test(&scene, center, 80.0, Pos2::new(105.0, 100.0)).is_none());
        assert!(hit_test(&scene, center, 80.0, Pos2::new(199.0, 100.0)).is_none());
    }
}
