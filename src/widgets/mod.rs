//! Reusable UI widgets for the survey dashboard

mod filter_chips;

pub use filter_chips::FilterChips;
