//! Shared cross-chart filter state
//!
//! Every mutation goes through a named operation that returns the
//! [`RenderScope`] the caller must redraw. Platform and time-bucket
//! selections are two facets of the same donut and are mutually exclusive.

use crate::data::{Gender, Metric, Record, TimeBucket};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Aggregate shown by the donut chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryView {
    Platforms,
    Time,
}

impl Default for SecondaryView {
    fn default() -> Self {
        SecondaryView::Platforms
    }
}

impl SecondaryView {
    pub const ALL: [SecondaryView; 2] = [SecondaryView::Platforms, SecondaryView::Time];

    pub fn label(self) -> &'static str {
        match self {
            SecondaryView::Platforms => "Platforms",
            SecondaryView::Time => "Daily time",
        }
    }
}

/// Aggregate shown by the bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarView {
    Occupation,
    DepressionTime,
}

impl Default for BarView {
    fn default() -> Self {
        BarView::Occupation
    }
}

impl BarView {
    pub const ALL: [BarView; 2] = [BarView::Occupation, BarView::DepressionTime];

    pub fn label(self) -> &'static str {
        match self {
            BarView::Occupation => "Occupation",
            BarView::DepressionTime => "Depression vs. time",
        }
    }
}

/// Chart regions that must be rebuilt after a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderScope {
    /// Scatter plot plus its legend
    pub primary: bool,
    pub donut: bool,
    pub bar: bool,
}

impl RenderScope {
    pub const NONE: RenderScope = RenderScope { primary: false, donut: false, bar: false };
    pub const PRIMARY: RenderScope = RenderScope { primary: true, donut: false, bar: false };
    pub const DONUT: RenderScope = RenderScope { primary: false, donut: true, bar: false };
    pub const BAR: RenderScope = RenderScope { primary: false, donut: false, bar: true };
    pub const ALL: RenderScope = RenderScope { primary: true, donut: true, bar: true };

    pub fn is_empty(&self) -> bool {
        !(self.primary || self.donut || self.bar)
    }
}

impl BitOr for RenderScope {
    type Output = RenderScope;

    fn bitor(self, rhs: RenderScope) -> RenderScope {
        RenderScope {
            primary: self.primary || rhs.primary,
            donut: self.donut || rhs.donut,
            bar: self.bar || rhs.bar,
        }
    }
}

impl BitOrAssign for RenderScope {
    fn bitor_assign(&mut self, rhs: RenderScope) {
        *self = *self | rhs;
    }
}

/// One independently filterable dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Platform,
    TimeBucket,
    Occupation,
    Gender,
}

impl Facet {
    pub fn label(self) -> &'static str {
        match self {
            Facet::Platform => "Platform",
            Facet::TimeBucket => "Time",
            Facet::Occupation => "Occupation",
            Facet::Gender => "Gender",
        }
    }
}

/// Replace `slot` with `value`, or clear it when it already holds `value`
fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

/// Current visualization configuration and active cross-chart filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    selected_metric: Metric,
    secondary_view: SecondaryView,
    bar_view: BarView,
    selected_platform: Option<String>,
    selected_time_bucket: Option<TimeBucket>,
    selected_gender: Option<Gender>,
    selected_occupation: Option<String>,
}

impl FilterState {
    /// Create a FilterState with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_metric(&self) -> Metric {
        self.selected_metric
    }

    pub fn secondary_view(&self) -> SecondaryView {
        self.secondary_view
    }

    pub fn bar_view(&self) -> BarView {
        self.bar_view
    }

    pub fn selected_platform(&self) -> Option<&str> {
        self.selected_platform.as_deref()
    }

    #[cfg(test)]
    pub fn selected_time_bucket(&self) -> Option<TimeBucket> {
        self.selected_time_bucket
    }

    pub fn selected_gender(&self) -> Option<Gender> {
        self.selected_gender
    }

    pub fn selected_occupation(&self) -> Option<&str> {
        self.selected_occupation.as_deref()
    }

    /// Selected donut category label for the active secondary view
    pub fn selected_category(&self) -> Option<&str> {
        match self.secondary_view {
            SecondaryView::Platforms => self.selected_platform(),
            SecondaryView::Time => self.selected_time_bucket.map(TimeBucket::label),
        }
    }

    /// Check if any facet filter is active
    pub fn has_active_filters(&self) -> bool {
        self.selected_platform.is_some()
            || self.selected_time_bucket.is_some()
            || self.selected_gender.is_some()
            || self.selected_occupation.is_some()
    }

    /// Active facets with display values, in a fixed order
    pub fn active_facets(&self) -> Vec<(Facet, String)> {
        let mut facets = Vec::new();
        if let Some(platform) = &self.selected_platform {
            facets.push((Facet::Platform, platform.clone()));
        }
        if let Some(bucket) = self.selected_time_bucket {
            facets.push((Facet::TimeBucket, bucket.label().to_string()));
        }
        if let Some(occupation) = &self.selected_occupation {
            facets.push((Facet::Occupation, occupation.clone()));
        }
        if let Some(gender) = self.selected_gender {
            facets.push((Facet::Gender, gender.label().to_string()));
        }
        facets
    }

    /// Change the scatter plot's vertical metric. Secondary views do not depend on it.
    pub fn set_metric(&mut self, metric: Metric) -> RenderScope {
        self.selected_metric = metric;
        tracing::debug!(metric = metric.label(), "metric selected");
        RenderScope::PRIMARY
    }

    /// Switch the donut aggregate; clears both donut facets
    pub fn set_secondary_view(&mut self, view: SecondaryView) -> RenderScope {
        self.secondary_view = view;
        self.selected_platform = None;
        self.selected_time_bucket = None;
        tracing::debug!(view = view.label(), "secondary view selected");
        RenderScope::PRIMARY | RenderScope::DONUT
    }

    /// Switch the bar chart aggregate
    pub fn set_bar_view(&mut self, view: BarView) -> RenderScope {
        self.bar_view = view;
        tracing::debug!(view = view.label(), "bar view selected");
        RenderScope::BAR
    }

    /// Donut slice gesture: toggles the facet of the active secondary view
    /// and force-clears the other donut facet
    pub fn toggle_category_filter(&mut self, category: &str) -> RenderScope {
        match self.secondary_view {
            SecondaryView::Platforms => {
                toggle(&mut self.selected_platform, category.to_string());
                self.selected_time_bucket = None;
            }
            SecondaryView::Time => {
                toggle(&mut self.selected_time_bucket, TimeBucket::parse(category));
                self.selected_platform = None;
            }
        }
        tracing::debug!(
            category,
            platform = ?self.selected_platform,
            time_bucket = ?self.selected_time_bucket,
            "category filter toggled"
        );
        RenderScope::PRIMARY | RenderScope::DONUT
    }

    /// Bar gesture: toggles the occupation facet. The bar chart is redrawn for emphasis.
    pub fn toggle_occupation_filter(&mut self, occupation: &str) -> RenderScope {
        toggle(&mut self.selected_occupation, occupation.to_string());
        tracing::debug!(occupation = ?self.selected_occupation, "occupation filter toggled");
        RenderScope::PRIMARY | RenderScope::BAR
    }

    /// Legend gesture: toggles the gender facet
    pub fn toggle_gender_filter(&mut self, gender: Gender) -> RenderScope {
        toggle(&mut self.selected_gender, gender);
        tracing::debug!(gender = ?self.selected_gender, "gender filter toggled");
        RenderScope::PRIMARY
    }

    /// Clear a single facet
    pub fn clear_facet(&mut self, facet: Facet) -> RenderScope {
        tracing::debug!(facet = facet.label(), "facet cleared");
        match facet {
            Facet::Platform => {
                self.selected_platform = None;
                RenderScope::PRIMARY | RenderScope::DONUT
            }
            Facet::TimeBucket => {
                self.selected_time_bucket = None;
                RenderScope::PRIMARY | RenderScope::DONUT
            }
            Facet::Occupation => {
                self.selected_occupation = None;
                RenderScope::PRIMARY | RenderScope::BAR
            }
            Facet::Gender => {
                self.selected_gender = None;
                RenderScope::PRIMARY
            }
        }
    }

    /// Clear all four facets; metric and view selections are kept
    pub fn clear_filters(&mut self) -> RenderScope {
        self.selected_platform = None;
        self.selected_time_bucket = None;
        self.selected_gender = None;
        self.selected_occupation = None;
        tracing::debug!("all filters cleared");
        RenderScope::ALL
    }

    /// Check if a record passes every active facet
    pub fn matches(&self, record: &Record) -> bool {
        self.selected_platform
            .as_deref()
            .is_none_or(|p| record.uses_platform(p))
            && self
                .selected_time_bucket
                .is_none_or(|b| record.time_bucket == b)
            && self
                .selected_occupation
                .as_deref()
                .is_none_or(|o| record.occupation == o)
            && self.selected_gender.is_none_or(|g| record.gender == g)
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let facets = self.active_facets();
        if facets.is_empty() {
            return f.write_str("no filters");
        }
        let parts: Vec<String> = facets
            .iter()
            .map(|(facet, value)| format!("{}={}", facet.label(), value))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Records passing every active facet, in dataset order
pub fn filter_dataset<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    profiling::scope!("filter_dataset");
    records.iter().filter(|r| state.matches(r)).collect()
}
