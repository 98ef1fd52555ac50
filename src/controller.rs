//! View controllers and the dashboard session
//!
//! Each chart region has a controller that turns its gestures into filter
//! state mutations. Controllers share one [`FilterHandle`]; the [`Dashboard`]
//! routes gestures to them and redraws whatever the mutation reports.

use crate::data::{Dataset, Gender, Metric, Record};
use crate::render::{RenderOrchestrator, SceneRenderer};
use crate::state::{
    BarView, Facet, FilterHandle, FilterState, RenderScope, SecondaryView, filter_dataset,
    filter_handle,
};
use std::cell::Ref;

/// User input that can change the filter state
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    MetricSelected(Metric),
    SecondaryViewSelected(SecondaryView),
    BarViewSelected(BarView),
    DonutSliceClicked(String),
    BarClicked(String),
    LegendClicked(Gender),
    FacetCleared(Facet),
    FiltersCleared,
}

/// Scatter plot region: metric selector and gender legend
#[derive(Debug, Clone)]
pub struct ScatterController {
    filters: FilterHandle,
}

impl ScatterController {
    pub fn new(filters: FilterHandle) -> Self {
        Self { filters }
    }

    pub fn select_metric(&self, metric: Metric) -> RenderScope {
        self.filters.borrow_mut().set_metric(metric)
    }

    pub fn legend_clicked(&self, gender: Gender) -> RenderScope {
        self.filters.borrow_mut().toggle_gender_filter(gender)
    }
}

/// Donut region: secondary view selector and slice clicks
#[derive(Debug, Clone)]
pub struct DonutController {
    filters: FilterHandle,
}

impl DonutController {
    pub fn new(filters: FilterHandle) -> Self {
        Self { filters }
    }

    pub fn select_view(&self, view: SecondaryView) -> RenderScope {
        self.filters.borrow_mut().set_secondary_view(view)
    }

    pub fn slice_clicked(&self, category: &str) -> RenderScope {
        self.filters.borrow_mut().toggle_category_filter(category)
    }
}

/// Bar region: bar view selector and bar clicks
#[derive(Debug, Clone)]
pub struct BarController {
    filters: FilterHandle,
}

impl BarController {
    pub fn new(filters: FilterHandle) -> Self {
        Self { filters }
    }

    pub fn select_view(&self, view: BarView) -> RenderScope {
        self.filters.borrow_mut().set_bar_view(view)
    }

    /// Only occupation bars filter; depression-level bars are informational
    pub fn bar_clicked(&self, label: &str) -> RenderScope {
        let mut filters = self.filters.borrow_mut();
        match filters.bar_view() {
            BarView::Occupation => filters.toggle_occupation_filter(label),
            BarView::DepressionTime => RenderScope::NONE,
        }
    }
}

/// One loaded dataset with its filter state, controllers and rendered scenes
#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    filters: FilterHandle,
    scatter: ScatterController,
    donut: DonutController,
    bar: BarController,
    orchestrator: RenderOrchestrator,
    renderer: SceneRenderer,
    visible: usize,
}

impl Dashboard {
    /// Build a session with default filters and draw every region once
    #[cfg(test)]
    pub fn new(dataset: Dataset) -> Self {
        Self::with_renderer(dataset, SceneRenderer::default())
    }

    pub fn with_renderer(dataset: Dataset, renderer: SceneRenderer) -> Self {
        let filters = filter_handle();
        let mut dashboard = Self {
            orchestrator: RenderOrchestrator::new(&dataset),
            scatter: ScatterController::new(filters.clone()),
            donut: DonutController::new(filters.clone()),
            bar: BarController::new(filters.clone()),
            renderer,
            visible: dataset.len(),
            filters,
            dataset,
        };
        dashboard.rerender(RenderScope::ALL);
        dashboard
    }

    /// Apply a gesture and redraw the affected regions
    pub fn handle(&mut self, gesture: Gesture) -> RenderScope {
        let scope = match &gesture {
            Gesture::MetricSelected(metric) => self.scatter.select_metric(*metric),
            Gesture::LegendClicked(gender) => {
                if !self.renderer.primary_gestures_bound() {
                    tracing::trace!("legend click ignored while primary view is unbound");
                    return RenderScope::NONE;
                }
                self.scatter.legend_clicked(*gender)
            }
            Gesture::SecondaryViewSelected(view) => self.donut.select_view(*view),
            Gesture::DonutSliceClicked(category) => self.donut.slice_clicked(category),
            Gesture::BarViewSelected(view) => self.bar.select_view(*view),
            Gesture::BarClicked(label) => self.bar.bar_clicked(label),
            Gesture::FacetCleared(facet) => self.filters.borrow_mut().clear_facet(*facet),
            Gesture::FiltersCleared => self.filters.borrow_mut().clear_filters(),
        };
        tracing::debug!(?gesture, ?scope, "gesture handled");
        self.rerender(scope);
        scope
    }

    fn rerender(&mut self, scope: RenderScope) {
        if scope.is_empty() {
            return;
        }
        let state = self.filters.borrow();
        if let Some(visible) = self
            .orchestrator
            .apply(scope, &self.dataset, &state, &mut self.renderer)
        {
            self.visible = visible;
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> Ref<'_, FilterState> {
        self.filters.borrow()
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Records passing the filters as of the last primary redraw
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Records passing the current filters, dataset order
    pub fn filtered_records(&self) -> Vec<&Record> {
        filter_dataset(self.dataset.records(), &self.filters.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeBucket;

    fn scenario() -> Dataset {
        let record = |gender, occupation: &str, platforms: Vec<String>| {
            Record::new(Some(20), gender, occupation, platforms, TimeBucket::OneToTwo)
                .with_metric(Metric::Depression, Some(3.0))
        };
        Dataset::from_records(vec![
            record(Gender::Male, "Student", vec!["Instagram".into()]),
            record(Gender::Female, "Student", vec!["TikTok".into()]),
            record(Gender::Female, "Employed", vec!["Instagram".into()]),
            record(Gender::Other, "Student", vec![]),
        ])
    }

    #[test]
    fn test_new_dashboard_renders_every_region() {
        let dashboard = Dashboard::new(scenario());
        let renderer = dashboard.renderer();
        assert!(renderer.scatter().is_some());
        assert!(renderer.legend().is_some());
        assert!(renderer.donut().is_some());
        assert!(renderer.bar().is_some());
        assert!(renderer.primary_gestures_bound());
        assert_eq!(dashboard.visible_count(), 4);
    }

    #[test]
    fn test_bar_and_legend_scenario() {
        let mut dashboard = Dashboard::new(scenario());

        dashboard.handle(Gesture::BarClicked("Student".into()));
        assert_eq!(dashboard.visible_count(), 3);
        assert_eq!(dashboard.renderer().scatter().unwrap().points.len(), 3);

        dashboard.handle(Gesture::LegendClicked(Gender::Female));
        assert_eq!(dashboard.visible_count(), 1);
        let filtered = dashboard.filtered_records();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].gender, Gender::Female);
        assert_eq!(filtered[0].occupation, "Student");
    }

    #[test]
    fn test_controllers_share_one_state() {
        let filters = filter_handle();
        let scatter = ScatterController::new(filters.clone());
        let donut = DonutController::new(filters.clone());

        donut.slice_clicked("Instagram");
        scatter.legend_clicked(Gender::Male);
        let state = filters.borrow();
        assert_eq!(state.selected_platform(), Some("Instagram"));
        assert_eq!(state.selected_gender(), Some(Gender::Male));
    }

    #[test]
    fn test_donut_gestures() {
        let mut dashboard = Dashboard::new(scenario());
        let scope = dashboard.handle(Gesture::DonutSliceClicked("Instagram".into()));
        assert!(scope.primary && scope.donut && !scope.bar);
        assert_eq!(dashboard.visible_count(), 2);
        let donut = dashboard.renderer().donut().unwrap();
        assert!(donut.slices.iter().any(|s| s.selected && s.category == "Instagram"));

        dashboard.handle(Gesture::SecondaryViewSelected(SecondaryView::Time));
        assert_eq!(dashboard.filters().selected_platform(), None);
        assert_eq!(dashboard.filters().selected_time_bucket(), None);
        assert_eq!(dashboard.visible_count(), 4);
        assert_eq!(dashboard.renderer().donut().unwrap().view, SecondaryView::Time);
    }

    #[test]
    fn test_metric_gesture_redraws_primary_only() {
        let mut dashboard = Dashboard::new(scenario());
        let donut_before = dashboard.renderer().donut().cloned();
        let scope = dashboard.handle(Gesture::MetricSelected(Metric::Worry));
        assert_eq!(scope, RenderScope::PRIMARY);
        let scatter = dashboard.renderer().scatter().unwrap();
        assert_eq!(scatter.metric, Metric::Worry);
        // No worry answers in the fixture: nothing plotted, fallback axis
        assert!(scatter.points.is_empty());
        assert_eq!(scatter.y_domain.max, 5.0);
        assert_eq!(dashboard.renderer().donut().cloned(), donut_before);
    }

    #[test]
    fn test_bar_clicks_ignored_in_depression_view() {
        let mut dashboard = Dashboard::new(scenario());
        dashboard.handle(Gesture::BarViewSelected(BarView::DepressionTime));
        let scope = dashboard.handle(Gesture::BarClicked("Level 3".into()));
        assert!(scope.is_empty());
        assert_eq!(dashboard.filters().selected_occupation(), None);
    }

    #[test]
    fn test_clear_gestures() {
        let mut dashboard = Dashboard::new(scenario());
        dashboard.handle(Gesture::BarClicked("Student".into()));
        dashboard.handle(Gesture::LegendClicked(Gender::Male));
        assert_eq!(dashboard.visible_count(), 1);

        dashboard.handle(Gesture::FacetCleared(Facet::Gender));
        assert_eq!(dashboard.visible_count(), 3);

        dashboard.handle(Gesture::FiltersCleared);
        assert_eq!(dashboard.visible_count(), 4);
        assert!(!dashboard.filters().has_active_filters());
    }
}
