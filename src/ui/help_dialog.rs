use crate::app::SurveyLens;

pub fn render_help_dialog(app: &mut SurveyLens, ctx: &eframe::egui::Context) {
    if app.show_help {
        eframe::egui::Window::new("❓ Using the dashboard")
            .anchor(eframe::egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("Filtering");
                ui.label("Click a donut slice - Filter by platform or daily time");
                ui.label("Click an occupation bar - Filter by occupation");
                ui.label("Click a legend entry - Filter by gender");
                ui.label("Click the same item again - Remove that filter");
                ui.label("Click a filter chip - Remove that filter");

                ui.separator();
                ui.heading("Views");
                ui.label("Metric selector - Choose the scatter plot's y axis");
                ui.label("Donut selector - Platforms or daily time");
                ui.label("Bar selector - Occupation or depression vs. time");
                ui.label("Switching the donut view clears its filter");

                ui.separator();
                ui.heading("Keyboard");
                ui.label("H / F1 - Toggle help");
                ui.label("ESC - Close help");
                ui.label("Ctrl+O - Open dataset");

                ui.separator();
                if ui.button("Close").clicked() {
                    app.show_help = false;
                }
            });
    }
}
