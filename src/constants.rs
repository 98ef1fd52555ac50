//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Chart region sizes (pixels)
pub mod layout {
    /// Scatter plot region width
    pub const MAIN_WIDTH: f32 = 600.0;

    /// Scatter plot region height
    pub const MAIN_HEIGHT: f32 = 600.0;

    /// Donut / bar region width
    pub const SIDE_WIDTH: f32 = 350.0;

    /// Donut / bar region height
    pub const SIDE_HEIGHT: f32 = 250.0;

    /// Bottom panel (status) default height
    pub const STATUS_PANEL_HEIGHT: f32 = 90.0;

    /// Records table panel default width
    pub const RECORDS_PANEL_WIDTH: f32 = 420.0;

    /// Table header row height
    pub const TABLE_HEADER_HEIGHT: f32 = 20.0;
}

/// Chart drawing defaults
pub mod chart {
    /// Opacity of legend swatches and donut slices that are not selected
    pub const DIMMED_LEGEND_OPACITY: f32 = 0.3;

    /// Opacity of scatter points
    pub const POINT_OPACITY: f32 = 0.7;

    /// Scatter point radius
    pub const POINT_RADIUS: f32 = 5.0;

    /// Hovered scatter point radius
    pub const HOVER_RADIUS: f32 = 8.0;

    /// Donut inner radius as a fraction of the outer radius
    pub const DONUT_INNER_RATIO: f32 = 0.45;

    /// Radial offset of the selected donut slice
    pub const DONUT_SELECTED_OFFSET: f32 = 8.0;

    /// Line segments per radian when tessellating donut arcs
    pub const ARC_SEGMENTS_PER_RADIAN: f32 = 24.0;

    /// Bar width in plot units
    pub const BAR_WIDTH: f64 = 0.7;

    /// Y domain used when a metric has no values at all
    pub const FALLBACK_METRIC_DOMAIN: (f64, f64) = (0.0, 5.0);

    /// Tolerance for scatter hit-testing (normalized plot coordinates)
    pub const POINT_SELECT_TOLERANCE: f64 = 0.0004;
}

/// Gender palette (RGB)
pub mod palette {
    /// Vibrant blue
    pub const MALE: [u8; 3] = [0x34, 0x98, 0xdb];

    /// Vibrant red
    pub const FEMALE: [u8; 3] = [0xe7, 0x4c, 0x3c];

    /// Vibrant green
    pub const OTHER: [u8; 3] = [0x2e, 0xcc, 0x71];

    /// Donut slice colors, cycled by category index
    pub const CATEGORY: [[u8; 3]; 8] = [
        [0x1f, 0x77, 0xb4],
        [0xff, 0x7f, 0x0e],
        [0x2c, 0xa0, 0x2c],
        [0xd6, 0x27, 0x28],
        [0x94, 0x67, 0xbd],
        [0x8c, 0x56, 0x4b],
        [0xe3, 0x77, 0xc2],
        [0x17, 0xbe, 0xcf],
    ];
}

/// Survey data constants
pub mod data {
    /// Smallest valid answer on a survey scale
    pub const SCALE_MIN: f64 = 1.0;

    /// Largest valid answer on a survey scale
    pub const SCALE_MAX: f64 = 5.0;

    /// Midpoint minutes of each daily-usage bucket, `<1h` through `>5h`
    pub const BUCKET_MINUTES: [f64; 6] = [30.0, 90.0, 150.0, 210.0, 270.0, 330.0];
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "survey-lens.json";

    /// Dataset loaded at startup when nothing else is configured
    pub const DEFAULT_DATASET: &str = "dataset.csv";

    /// Default log filter when RUST_LOG is unset
    pub const DEFAULT_LOG_FILTER: &str = "survey_lens=info";
}
