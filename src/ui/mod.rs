mod bar;
mod donut;
mod help_dialog;
mod records_table;
mod scatter;
mod stats_panel;
mod toolbar;

pub use bar::render_bar_region;
pub use donut::render_donut_region;
pub use help_dialog::render_help_dialog;
pub use records_table::render_records_panel;
pub use scatter::render_scatter_region;
pub use stats_panel::render_status_panel;
pub use toolbar::render_toolbar;

use crate::config::GenderColors;
use crate::data::Gender;
use eframe::egui::Color32;

pub(crate) fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub(crate) fn gender_color(colors: &GenderColors, gender: Gender) -> Color32 {
    rgb(colors.get(gender))
}
