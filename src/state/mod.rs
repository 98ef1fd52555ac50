//! Application state management
//!
//! The filter state is the one mutable piece shared between chart views.
//! The UI runs on a single thread, so views share it through an
//! `Rc<RefCell<_>>` handle handed to each controller at construction.

mod filters;

pub use filters::{BarView, Facet, FilterState, RenderScope, SecondaryView, filter_dataset};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the page-wide filter state
pub type FilterHandle = Rc<RefCell<FilterState>>;

/// Create a fresh filter state with defaults behind a shared handle
pub fn filter_handle() -> FilterHandle {
    Rc::new(RefCell::new(FilterState::new()))
}
