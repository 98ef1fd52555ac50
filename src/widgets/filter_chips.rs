//! Active filter chips widget

use crate::state::Facet;
use egui::{Response, RichText, Ui};

/// Row of active facets; clicking a chip clears that facet
pub struct FilterChips<'a> {
    facets: &'a [(Facet, String)],
}

impl<'a> FilterChips<'a> {
    pub fn new(facets: &'a [(Facet, String)]) -> Self {
        Self { facets }
    }

    /// Show the chips. Returns the row's response and the facet clicked this frame, if any.
    pub fn show(self, ui: &mut Ui) -> (Response, Option<Facet>) {
        let mut cleared = None;
        let response = ui
            .horizontal_wrapped(|ui| {
                ui.label("Filters:");
                if self.facets.is_empty() {
                    ui.weak("none");
                    return;
                }
                for (facet, value) in self.facets {
                    let chip = ui
                        .small_button(RichText::new(format!("{}: {} ✖", facet.label(), value)))
                        .on_hover_text(format!("Remove the {} filter", facet.label().to_lowercase()));
                    if chip.clicked() {
                        cleared = Some(*facet);
                    }
                }
            })
            .response;
        (response, cleared)
    }
}
