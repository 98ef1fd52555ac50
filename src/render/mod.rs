//! Render orchestration
//!
//! [`RenderOrchestrator`] turns the dataset plus the current filter state into
//! calls on a [`ChartRenderer`]. Each redraw of a region is a full teardown and
//! rebuild; nothing is diffed.

mod scene;

pub use scene::{
    BarGroup, BarScene, DonutScene, DonutSlice, LegendEntry, LegendScene, ScatterPoint,
    ScatterScene, SceneRenderer,
};

use crate::data::aggregates::{self, CategoryCounts, LevelMinutes};
use crate::data::stats::{self, Domain};
use crate::data::{Dataset, Gender, Metric, Record};
use crate::state::{BarView, FilterState, RenderScope, SecondaryView, filter_dataset};

/// Everything the scatter plot needs for one draw
#[derive(Debug)]
pub struct ScatterFrame<'a> {
    /// Filtered records, dataset order
    pub records: &'a [&'a Record],
    pub metric: Metric,
    /// Age extent of the full dataset
    pub x_domain: Option<Domain>,
    /// Metric extent of the full dataset
    pub y_domain: Domain,
    /// Size of the unfiltered dataset
    pub total: usize,
}

/// Aggregate shown by the bar chart
#[derive(Debug, Clone, Copy)]
pub enum BarData<'a> {
    Occupation(&'a [CategoryCounts]),
    DepressionTime(&'a [LevelMinutes]),
}

/// Drawing capability the orchestrator calls into
pub trait ChartRenderer {
    /// Drop everything drawn in the primary region. Safe on an empty region.
    fn clear_primary(&mut self);

    fn draw_scatter(&mut self, frame: &ScatterFrame<'_>);

    /// Gender legend and metric label bound to the scatter plot
    fn draw_legend(&mut self, selected_gender: Option<Gender>, metric: Metric);

    /// Attach gesture handling to the primary nodes created since the last clear
    fn bind_primary_gestures(&mut self);

    fn draw_donut(&mut self, view: SecondaryView, slices: &[CategoryCounts], selected: Option<&str>);

    fn draw_bar(&mut self, view: BarView, data: BarData<'_>, selected_occupation: Option<&str>);
}

/// Full-dataset aggregates and axis domains, computed once per dataset
#[derive(Debug, Clone)]
pub struct RenderOrchestrator {
    platforms: Vec<CategoryCounts>,
    time_buckets: Vec<CategoryCounts>,
    occupations: Vec<CategoryCounts>,
    depression_minutes: Vec<LevelMinutes>,
    age_domain: Option<Domain>,
    metric_domains: Vec<Domain>,
}

impl RenderOrchestrator {
    pub fn new(dataset: &Dataset) -> Self {
        profiling::scope!("orchestrator_aggregates");
        let records = dataset.records();
        Self {
            platforms: aggregates::platform_by_gender(records),
            time_buckets: aggregates::time_by_gender(records),
            occupations: aggregates::occupation_by_gender(records),
            depression_minutes: aggregates::depression_minutes_by_gender(records),
            age_domain: stats::age_domain(records),
            metric_domains: Metric::ALL
                .iter()
                .map(|m| stats::metric_domain(records, *m))
                .collect(),
        }
    }

    /// Donut categories for a secondary view
    pub fn categories(&self, view: SecondaryView) -> &[CategoryCounts] {
        match view {
            SecondaryView::Platforms => &self.platforms,
            SecondaryView::Time => &self.time_buckets,
        }
    }

    /// Filter, tear down and rebuild the primary region. Returns the number of
    /// records that passed the filters.
    pub fn render_all<R: ChartRenderer + ?Sized>(
        &self,
        dataset: &Dataset,
        state: &FilterState,
        renderer: &mut R,
    ) -> usize {
        profiling::scope!("render_primary");
        let filtered = filter_dataset(dataset.records(), state);
        let metric = state.selected_metric();

        renderer.clear_primary();
        renderer.draw_scatter(&ScatterFrame {
            records: &filtered,
            metric,
            x_domain: self.age_domain,
            y_domain: self.metric_domains[metric.index()],
            total: dataset.len(),
        });
        renderer.draw_legend(state.selected_gender(), metric);
        renderer.bind_primary_gestures();

        tracing::debug!(visible = filtered.len(), total = dataset.len(), filters = %state, "primary view rendered");
        filtered.len()
    }

    pub fn render_donut<R: ChartRenderer + ?Sized>(&self, state: &FilterState, renderer: &mut R) {
        profiling::scope!("render_donut");
        let view = state.secondary_view();
        renderer.draw_donut(view, self.categories(view), state.selected_category());
    }

    pub fn render_bar<R: ChartRenderer + ?Sized>(&self, state: &FilterState, renderer: &mut R) {
        profiling::scope!("render_bar");
        let view = state.bar_view();
        let data = match view {
            BarView::Occupation => BarData::Occupation(&self.occupations),
            BarView::DepressionTime => BarData::DepressionTime(&self.depression_minutes),
        };
        renderer.draw_bar(view, data, state.selected_occupation());
    }

    /// Redraw the regions named by `scope`, primary first. Returns the visible
    /// record count when the primary region was redrawn.
    pub fn apply<R: ChartRenderer + ?Sized>(
        &self,
        scope: RenderScope,
        dataset: &Dataset,
        state: &FilterState,
        renderer: &mut R,
    ) -> Option<usize> {
        let visible = scope
            .primary
            .then(|| self.render_all(dataset, state, renderer));
        if scope.donut {
            self.render_donut(state, renderer);
        }
        if scope.bar {
            self.render_bar(state, renderer);
        }
        visible
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::TimeBucket;

    /// Test double that logs every renderer call
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub calls: Vec<String>,
        pub last_scatter_len: Option<usize>,
        pub last_y_domain: Option<Domain>,
        pub last_donut_selected: Option<Option<String>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn clear_primary(&mut self) {
            self.calls.push("clear_primary".into());
        }

        fn draw_scatter(&mut self, frame: &ScatterFrame<'_>) {
            self.calls.push(format!("draw_scatter:{}", frame.metric.label()));
            self.last_scatter_len = Some(frame.records.len());
            self.last_y_domain = Some(frame.y_domain);
        }

        fn draw_legend(&mut self, selected_gender: Option<Gender>, _metric: Metric) {
            self.calls.push(format!("draw_legend:{:?}", selected_gender));
        }

        fn bind_primary_gestures(&mut self) {
            self.calls.push("bind_primary_gestures".into());
        }

        fn draw_donut(&mut self, view: SecondaryView, slices: &[CategoryCounts], selected: Option<&str>) {
            self.calls.push(format!("draw_donut:{}:{}", view.label(), slices.len()));
            self.last_donut_selected = Some(selected.map(str::to_string));
        }

        fn draw_bar(&mut self, view: BarView, _data: BarData<'_>, _selected: Option<&str>) {
            self.calls.push(format!("draw_bar:{}", view.label()));
        }
    }

    fn record(
        age: Option<u32>,
        gender: Gender,
        occupation: &str,
        platforms: &[&str],
        bucket: TimeBucket,
        depression: Option<f64>,
    ) -> Record {
        Record::new(
            age,
            gender,
            occupation,
            platforms.iter().map(|p| p.to_string()).collect(),
            bucket,
        )
        .with_metric(Metric::Depression, depression)
    }

    pub(crate) fn fixture() -> Dataset {
        Dataset::from_records(vec![
            record(Some(21), Gender::Male, "Student", &["Instagram"], TimeBucket::OneToTwo, Some(3.0)),
            record(Some(24), Gender::Female, "Student", &["TikTok"], TimeBucket::TwoToThree, Some(4.0)),
            record(Some(35), Gender::Female, "Employed", &["Instagram"], TimeBucket::OneToTwo, None),
            record(None, Gender::Other, "Student", &[], TimeBucket::Unknown, Some(2.0)),
        ])
    }

    #[test]
    fn test_render_all_protocol_order() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut renderer = RecordingRenderer::default();

        let visible = orchestrator.render_all(&dataset, &FilterState::new(), &mut renderer);
        assert_eq!(visible, 4);
        assert_eq!(
            renderer.calls,
            vec![
                "clear_primary",
                "draw_scatter:Feeling depressed",
                "draw_legend:None",
                "bind_primary_gestures",
            ]
        );
    }

    #[test]
    fn test_render_all_passes_filtered_records() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut renderer = RecordingRenderer::default();
        let mut state = FilterState::new();
        state.toggle_gender_filter(Gender::Female);

        orchestrator.render_all(&dataset, &state, &mut renderer);
        assert_eq!(renderer.last_scatter_len, Some(2));
        assert_eq!(renderer.calls[2], "draw_legend:Some(Female)");
    }

    #[test]
    fn test_empty_result_keeps_full_domain() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut renderer = RecordingRenderer::default();
        let mut state = FilterState::new();
        state.toggle_category_filter("Snapchat");

        let visible = orchestrator.render_all(&dataset, &state, &mut renderer);
        assert_eq!(visible, 0);
        assert_eq!(renderer.last_scatter_len, Some(0));
        assert_eq!(renderer.last_y_domain, Some(Domain::new(0.0, 4.0)));
    }

    #[test]
    fn test_apply_redraws_only_requested_regions() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut renderer = RecordingRenderer::default();
        let mut state = FilterState::new();

        let scope = state.set_bar_view(BarView::DepressionTime);
        assert_eq!(orchestrator.apply(scope, &dataset, &state, &mut renderer), None);
        assert_eq!(renderer.calls, vec!["draw_bar:Depression vs. time"]);

        renderer.calls.clear();
        let scope = state.toggle_category_filter("Instagram");
        assert_eq!(orchestrator.apply(scope, &dataset, &state, &mut renderer), Some(2));
        assert_eq!(renderer.calls.len(), 5);
        assert_eq!(renderer.calls[4], "draw_donut:Platforms:2");
        assert_eq!(renderer.last_donut_selected, Some(Some("Instagram".to_string())));
    }

    #[test]
    fn test_donut_aggregates_ignore_filters() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut state = FilterState::new();
        state.toggle_gender_filter(Gender::Male);

        let mut renderer = RecordingRenderer::default();
        orchestrator.render_donut(&state, &mut renderer);
        assert_eq!(renderer.calls, vec!["draw_donut:Platforms:2"]);

        state.set_secondary_view(SecondaryView::Time);
        renderer.calls.clear();
        orchestrator.render_donut(&state, &mut renderer);
        assert_eq!(renderer.calls, vec!["draw_donut:Daily time:3"]);
        assert_eq!(orchestrator.categories(SecondaryView::Platforms)[0].counts.total(), 2);
    }

    #[test]
    fn test_apply_full_scope_order() {
        let dataset = fixture();
        let orchestrator = RenderOrchestrator::new(&dataset);
        let mut renderer = RecordingRenderer::default();
        orchestrator.apply(RenderScope::ALL, &dataset, &FilterState::new(), &mut renderer);
        assert_eq!(renderer.calls.first().map(String::as_str), Some("clear_primary"));
        assert_eq!(renderer.calls[4], "draw_donut:Platforms:2");
        assert_eq!(renderer.calls[5], "draw_bar:Occupation");
    }
}
