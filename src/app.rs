use std::path::Path;
use std::sync::Arc;

use eframe::egui;

use crate::config::ReportHeader;
use crate::data::loader::load_registry;
use crate::data::model::ShotType;
use crate::data::source::DirectorySource;
use crate::state::SelectionController;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ShotReportApp {
    controller: SelectionController,
    header: ReportHeader,
    default_shot: ShotType,
    show_shot_selector: bool,
    status_message: Option<String>,
}

impl ShotReportApp {
    pub fn new(controller: SelectionController, header: ReportHeader, default_shot: ShotType) -> Self {
        let status_message = controller
            .available()
            .is_empty()
            .then(|| format!("No shot data could be loaded from {}", controller.registry().origin));
        Self {
            controller,
            header,
            default_shot,
            show_shot_selector: false,
            status_message,
        }
    }

    /// Replace the dataset with tables read from `path`. A new registry gets
    /// a fresh controller and cache.
    fn open_directory(&mut self, path: &Path) {
        let registry = Arc::new(load_registry(&DirectorySource::new(path)));
        if registry.available().is_empty() {
            log::error!("No shot types could be loaded from {}", path.display());
            self.status_message = Some(format!("Error: no shot data in {}", path.display()));
            return;
        }
        log::info!(
            "Loaded {} shot types from {}",
            registry.available().len(),
            path.display()
        );
        self.controller = SelectionController::new(registry, self.default_shot);
        self.status_message = None;
    }
}

impl eframe::App for ShotReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let picked = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| {
                panels::top_bar(ui, &self.controller, self.status_message.as_deref())
            })
            .inner;
        if let Some(path) = picked {
            self.open_directory(&path);
        }

        // ---- Bottom panel: shot selection ----
        egui::TopBottomPanel::bottom("shot_selection").show(ctx, |ui| {
            panels::shot_selector(ui, &mut self.controller, &mut self.show_shot_selector);
        });

        // ---- Central panel: report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::report_header(ui, &self.header);
                    ui.separator();
                    panels::report_body(ui, &mut self.controller);
                });
        });
    }
}
