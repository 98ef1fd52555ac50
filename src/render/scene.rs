//! Retained scenes painted by the egui layer
//!
//! A scene is the node set of one chart region. Redrawing a region replaces
//! its scene wholesale; the UI paints whatever scene is current every frame.

use super::{BarData, ChartRenderer, ScatterFrame};
use crate::constants::chart::DIMMED_LEGEND_OPACITY;
use crate::constants::palette::CATEGORY;
use crate::data::aggregates::{CategoryCounts, GenderCounts};
use crate::data::stats::Domain;
use crate::data::{Gender, Metric};
use crate::state::{BarView, SecondaryView};
use std::f32::consts::TAU;

/// One plotted respondent
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub age: f64,
    pub value: f64,
    pub gender: Gender,
    pub occupation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterScene {
    pub metric: Metric,
    pub x_domain: Option<Domain>,
    pub y_domain: Domain,
    pub points: Vec<ScatterPoint>,
    /// Filtered records left out for lacking an age or metric value
    pub omitted: usize,
    pub visible: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub gender: Gender,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendScene {
    pub metric: Metric,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub category: String,
    pub counts: GenderCounts,
    /// Radians, clockwise from twelve o'clock
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: [u8; 3],
    pub selected: bool,
    pub opacity: f32,
}

impl DonutSlice {
    pub fn contains_angle(&self, angle: f32) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutScene {
    pub view: SecondaryView,
    pub slices: Vec<DonutSlice>,
    pub total: usize,
}

impl DonutScene {
    /// Slice under an angle measured clockwise from twelve o'clock
    pub fn slice_at(&self, angle: f32) -> Option<&DonutSlice> {
        let angle = angle.rem_euclid(TAU);
        self.slices.iter().find(|s| s.contains_angle(angle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    /// Per-gender values in [`Gender::ALL`] order; `None` draws nothing
    pub values: [Option<f64>; 3],
    pub selected: bool,
    pub opacity: f32,
}

impl BarGroup {
    pub fn value(&self, gender: Gender) -> Option<f64> {
        self.values[gender.index()]
    }

    pub fn stacked_total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarScene {
    pub view: BarView,
    pub groups: Vec<BarGroup>,
    pub y_max: f64,
}

impl BarScene {
    /// Occupation counts are stacked; mean minutes are drawn side by side
    pub fn stacked(&self) -> bool {
        self.view == BarView::Occupation
    }

    /// Group whose slot contains the x coordinate, groups at x = 0, 1, 2, ...
    pub fn group_at(&self, x: f64) -> Option<&BarGroup> {
        let index = x.round();
        if index < 0.0 || (x - index).abs() > 0.5 {
            return None;
        }
        self.groups.get(index as usize)
    }
}

/// [`ChartRenderer`] that keeps each region as a retained scene
#[derive(Debug)]
pub struct SceneRenderer {
    scatter: Option<ScatterScene>,
    legend: Option<LegendScene>,
    donut: Option<DonutScene>,
    bar: Option<BarScene>,
    primary_generation: u64,
    bound_generation: Option<u64>,
    dimmed_opacity: f32,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::with_dimmed_opacity(DIMMED_LEGEND_OPACITY)
    }
}

impl SceneRenderer {
    /// Renderer drawing unselected legend swatches, slices and bars at `dimmed_opacity`
    pub fn with_dimmed_opacity(dimmed_opacity: f32) -> Self {
        Self {
            scatter: None,
            legend: None,
            donut: None,
            bar: None,
            primary_generation: 0,
            bound_generation: None,
            dimmed_opacity,
        }
    }

    fn emphasis(&self, selected: bool, any_selected: bool) -> f32 {
        if selected || !any_selected {
            1.0
        } else {
            self.dimmed_opacity
        }
    }

    pub fn scatter(&self) -> Option<&ScatterScene> {
        self.scatter.as_ref()
    }

    pub fn legend(&self) -> Option<&LegendScene> {
        self.legend.as_ref()
    }

    pub fn donut(&self) -> Option<&DonutScene> {
        self.donut.as_ref()
    }

    pub fn bar(&self) -> Option<&BarScene> {
        self.bar.as_ref()
    }

    /// Number of primary rebuilds so far
    #[cfg(test)]
    pub fn primary_generation(&self) -> u64 {
        self.primary_generation
    }

    /// Primary gestures are only live once bound to the current scene
    pub fn primary_gestures_bound(&self) -> bool {
        self.bound_generation == Some(self.primary_generation) && self.scatter.is_some()
    }
}

impl ChartRenderer for SceneRenderer {
    fn clear_primary(&mut self) {
        self.scatter = None;
        self.legend = None;
        self.bound_generation = None;
    }

    fn draw_scatter(&mut self, frame: &ScatterFrame<'_>) {
        let points: Vec<ScatterPoint> = frame
            .records
            .iter()
            .filter_map(|r| {
                Some(ScatterPoint {
                    age: f64::from(r.age?),
                    value: r.metric(frame.metric)?,
                    gender: r.gender,
                    occupation: r.occupation.clone(),
                })
            })
            .collect();

        self.primary_generation += 1;
        self.scatter = Some(ScatterScene {
            metric: frame.metric,
            x_domain: frame.x_domain,
            y_domain: frame.y_domain,
            omitted: frame.records.len() - points.len(),
            visible: frame.records.len(),
            total: frame.total,
            points,
        });
    }

    fn draw_legend(&mut self, selected_gender: Option<Gender>, metric: Metric) {
        let entries = Gender::ALL
            .iter()
            .map(|&gender| LegendEntry {
                gender,
                opacity: self.emphasis(selected_gender == Some(gender), selected_gender.is_some()),
            })
            .collect();
        self.legend = Some(LegendScene { metric, entries });
    }

    fn bind_primary_gestures(&mut self) {
        self.bound_generation = Some(self.primary_generation);
    }

    fn draw_donut(&mut self, view: SecondaryView, slices: &[CategoryCounts], selected: Option<&str>) {
        let total: usize = slices.iter().map(|s| s.counts.total()).sum();
        let mut angle = 0.0f32;
        let scene_slices = slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let sweep = if total == 0 {
                    0.0
                } else {
                    TAU * slice.counts.total() as f32 / total as f32
                };
                let is_selected = selected == Some(slice.category.as_str());
                let out = DonutSlice {
                    category: slice.category.clone(),
                    counts: slice.counts,
                    start_angle: angle,
                    end_angle: angle + sweep,
                    color: CATEGORY[i % CATEGORY.len()],
                    selected: is_selected,
                    opacity: self.emphasis(is_selected, selected.is_some()),
                };
                angle += sweep;
                out
            })
            .collect();

        self.donut = Some(DonutScene {
            view,
            slices: scene_slices,
            total,
        });
    }

    fn draw_bar(&mut self, view: BarView, data: BarData<'_>, selected_occupation: Option<&str>) {
        let groups: Vec<BarGroup> = match data {
            BarData::Occupation(rows) => rows
                .iter()
                .map(|row| {
                    let is_selected = selected_occupation == Some(row.category.as_str());
                    BarGroup {
                        label: row.category.clone(),
                        values: Gender::ALL.map(|g| Some(row.counts.get(g) as f64)),
                        selected: is_selected,
                        opacity: self.emphasis(is_selected, selected_occupation.is_some()),
                    }
                })
                .collect(),
            BarData::DepressionTime(levels) => levels
                .iter()
                .map(|level| BarGroup {
                    label: format!("Level {}", level.level),
                    values: level.mean_minutes,
                    selected: false,
                    opacity: 1.0,
                })
                .collect(),
        };

        let y_max = match view {
            BarView::Occupation => groups.iter().map(BarGroup::stacked_total).fold(0.0, f64::max),
            BarView::DepressionTime => groups
                .iter()
                .flat_map(|g| g.values.iter().flatten().copied())
                .fold(0.0, f64::max),
        };

        self.bar = Some(BarScene { view, groups, y_max });
    }
}
