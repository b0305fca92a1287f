use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use shot_report::app::ShotReportApp;
use shot_report::config::{ReportConfig, ReportHeader, SourceConfig};
use shot_report::data::loader::load_registry;
use shot_report::data::model::ShotType;
use shot_report::state::SelectionController;

#[derive(Debug, Parser)]
#[command(name = "shot-report", about = "Basketball shooting report viewer")]
struct Cli {
    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read tables from a local directory.
    #[arg(long, conflicts_with = "url")]
    data: Option<PathBuf>,

    /// Read tables over HTTP from this base URL.
    #[arg(long)]
    url: Option<String>,

    /// Query string appended to every remote resource URL (e.g. `?raw=true`).
    #[arg(long, requires = "url")]
    query: Option<String>,

    /// Shot type selected at startup.
    #[arg(long)]
    shot: Option<ShotType>,

    #[arg(long)]
    athlete: Option<String>,

    /// Write the selected shot type's report as JSON to this file and exit.
    #[arg(long)]
    export: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<(ReportConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(path) = self.data {
            config.source = SourceConfig::Directory { path };
        }
        if let Some(base_url) = self.url {
            config.source = SourceConfig::Remote {
                base_url,
                query: self.query,
            };
        }
        if let Some(shot) = self.shot {
            config.default_shot = shot;
        }
        if let Some(athlete) = self.athlete {
            config.athlete = athlete;
        }
        Ok((config, self.export))
    }
}

fn export_report(controller: &SelectionController, path: &Path) -> Result<()> {
    let bundle = controller
        .report()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("nothing to export")?;
    let json = serde_json::to_string_pretty(bundle.as_ref()).context("serializing report")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} report to {}", bundle.shot, path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let (config, export) = Cli::parse().into_config()?;
    log::info!("Loading shot data from {:?}", config.source);

    let source = config.source.build();
    let registry = Arc::new(load_registry(source.as_ref()));
    let controller = SelectionController::new(registry, config.default_shot);

    if let Some(path) = export {
        return export_report(&controller, &path);
    }

    let header = ReportHeader::now(&config.athlete);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shot Report",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ShotReportApp::new(controller, header, config.default_shot)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
