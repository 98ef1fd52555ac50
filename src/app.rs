use eframe::egui::{self, CentralPanel, SidePanel, TopBottomPanel};
use egui_extras::{Size, StripBuilder};
use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::constants::{config, layout};
use crate::controller::{Dashboard, Gesture};
use crate::error::DashboardError;
use crate::loader::{BackgroundLoader, LoadResult};
use crate::render::SceneRenderer;
use crate::ui;

/// Error shown in the banner window until dismissed
#[derive(Debug, PartialEq)]
struct ErrorBanner {
    title: &'static str,
    message: String,
}

impl From<&DashboardError> for ErrorBanner {
    fn from(error: &DashboardError) -> Self {
        Self {
            title: error.title(),
            message: error.user_message(),
        }
    }
}

/// Fold one finished load into the session state. A failure leaves the
/// dashboard and file as they were and returns the banner to show.
fn apply_load_result(
    dashboard: &mut Option<Dashboard>,
    current_file: &mut Option<PathBuf>,
    result: LoadResult,
    dimmed_opacity: f32,
) -> Option<ErrorBanner> {
    match result {
        LoadResult::Loaded { path, dataset } => {
            tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
            let renderer = SceneRenderer::with_dimmed_opacity(dimmed_opacity);
            *dashboard = Some(Dashboard::with_renderer(dataset, renderer));
            *current_file = Some(path);
            None
        }
        LoadResult::Failed { path, error } => {
            tracing::error!(path = %path.display(), error = %error, "dataset load failed");
            Some(ErrorBanner::from(&error))
        }
    }
}

pub struct SurveyLens {
    config: DashboardConfig,
    loader: BackgroundLoader,
    dashboard: Option<Dashboard>,
    current_file: Option<PathBuf>,
    error: Option<ErrorBanner>,
    pub(crate) show_records: bool,
    pub(crate) show_help: bool,
}

impl SurveyLens {
    /// Start the app and queue the configured dataset
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.dataset_path.clone();
        let mut app = Self {
            config,
            loader: BackgroundLoader::spawn(),
            dashboard: None,
            current_file: None,
            error: None,
            show_records: false,
            show_help: false,
        };
        app.open_dataset(path);
        app
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_busy()
    }

    fn set_error(&mut self, error: &DashboardError) {
        self.error = Some(ErrorBanner::from(error));
    }

    /// Queue a background load; the current session and file stay up until it succeeds
    pub fn open_dataset(&mut self, path: PathBuf) {
        let queued = self
            .config
            .separator_byte()
            .and_then(|separator| self.loader.load(path.clone(), separator));
        if let Err(e) = queued {
            tracing::error!(path = %path.display(), error = %e, "could not queue dataset load");
            self.set_error(&e);
        }
    }

    fn poll_loader(&mut self) {
        while let Some(result) = self.loader.poll() {
            let banner = apply_load_result(
                &mut self.dashboard,
                &mut self.current_file,
                result,
                self.config.dimmed_opacity,
            );
            match banner {
                Some(banner) => self.error = Some(banner),
                None => {
                    self.error = None;
                    if let Some(path) = self.current_file.clone() {
                        self.remember_dataset(path);
                    }
                }
            }
        }
    }

    /// Persist the last successfully opened dataset
    fn remember_dataset(&mut self, path: PathBuf) {
        if self.config.dataset_path == path {
            return;
        }
        self.config.dataset_path = path;
        if let Err(e) = self.config.save(Path::new(config::CONFIG_FILE)) {
            tracing::warn!(error = %e, "failed to save configuration");
        }
    }

    fn pick_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Survey CSV", &["csv"])
            .pick_file()
        {
            self.open_dataset(path);
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.open_dataset(path);
        }

        let (toggle_help, close_help, open) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1),
                i.key_pressed(egui::Key::Escape),
                i.modifiers.command && i.key_pressed(egui::Key::O),
            )
        });
        if toggle_help {
            self.show_help = !self.show_help;
        }
        if close_help {
            self.show_help = false;
        }
        if open {
            self.pick_dataset();
        }
    }

    fn render_error(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        if let Some(banner) = &self.error {
            egui::Window::new(format!("⚠ {}", banner.title))
                .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&banner.message);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
        }
        if dismissed {
            self.error = None;
        }
    }

    fn render_dashboard(&self, ui: &mut egui::Ui, gestures: &mut Vec<Gesture>) {
        let Some(dashboard) = &self.dashboard else {
            ui.vertical_centered(|ui| {
                if self.loader.is_busy() {
                    ui.spinner();
                    ui.heading("Loading survey data…");
                } else {
                    ui.heading("No data loaded");
                    ui.label("Click 📂 or drag and drop a survey CSV file to get started");
                }
            });
            return;
        };

        StripBuilder::new(ui)
            .size(Size::remainder().at_least(layout::SIDE_WIDTH))
            .size(Size::exact(self.config.side_width))
            .horizontal(|mut strip| {
                strip.cell(|ui| {
                    ui::render_scatter_region(dashboard, &self.config, ui, gestures);
                });
                strip.strip(|builder| {
                    builder
                        .size(Size::exact(self.config.side_height + 30.0))
                        .size(Size::remainder())
                        .vertical(|mut strip| {
                            strip.cell(|ui| {
                                ui::render_donut_region(dashboard, &self.config, ui, gestures);
                            });
                            strip.cell(|ui| {
                                ui::render_bar_region(dashboard, &self.config, ui, gestures);
                            });
                        });
                });
            });
    }
}

impl eframe::App for SurveyLens {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();
        self.poll_loader();
        self.handle_input(ctx);

        let mut gestures = Vec::new();

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(self, ui, &mut gestures);
        });

        if let Some(dashboard) = &self.dashboard {
            TopBottomPanel::bottom("status")
                .exact_height(layout::STATUS_PANEL_HEIGHT)
                .show(ctx, |ui| {
                    ui::render_status_panel(dashboard, &self.config, ui, &mut gestures);
                });

            if self.show_records {
                SidePanel::right("records")
                    .default_width(layout::RECORDS_PANEL_WIDTH)
                    .show(ctx, |ui| {
                        ui::render_records_panel(dashboard, ui);
                    });
            }
        }

        CentralPanel::default().show(ctx, |ui| {
            self.render_dashboard(ui, &mut gestures);
        });

        if let Some(dashboard) = &mut self.dashboard {
            for gesture in gestures {
                dashboard.handle(gesture);
            }
        }

        self.render_error(ctx);
        ui::render_help_dialog(self, ctx);

        if self.loader.is_busy() {
            ctx.request_repaint();
        }
    }
}
