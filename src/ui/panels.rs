use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::ReportHeader;
use crate::report::tables::{PhaseCard, ReportTable, TimingCard};
use crate::report::{DerivedReportBundle, ReportError, ViewMode};
use crate::state::SelectionController;

use super::color32;
use super::plot::{figure_plot, paired_plot, COMBINED_HEIGHT};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu bar. Returns a data folder the user picked, if any.
pub fn top_bar(
    ui: &mut Ui,
    controller: &SelectionController,
    status_message: Option<&str>,
) -> Option<PathBuf> {
    let mut picked = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                picked = open_folder_dialog();
                ui.close_menu();
            }
        });

        ui.separator();

        let registry = controller.registry();
        ui.label(format!(
            "{} shot types loaded from {}",
            registry.available().len(),
            registry.origin
        ));
        for (shot, reason) in registry.excluded() {
            ui.label(RichText::new(format!("{shot} unavailable")).color(Color32::YELLOW))
                .on_hover_text(reason);
        }

        if let Some(msg) = status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    picked
}

pub fn open_folder_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open shot data folder")
        .pick_folder()
}

// ---------------------------------------------------------------------------
// Header and shot selection
// ---------------------------------------------------------------------------

pub fn report_header(ui: &mut Ui, header: &ReportHeader) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&header.title).size(28.0).strong());
        ui.label(RichText::new(&header.athlete).size(22.0));
        ui.label(RichText::new(format!("{}  {}", header.date, header.time)).size(18.0));
    });
}

/// Collapsible shot-type selector. Clicking a shot type is a selection event.
pub fn shot_selector(ui: &mut Ui, controller: &mut SelectionController, open: &mut bool) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.selectable_label(*open, "Shot Selection").clicked() {
            *open = !*open;
        }
        if !*open {
            return;
        }
        ui.separator();
        let selected = controller.selected_shot();
        for shot in controller.available() {
            if ui
                .selectable_label(selected == Some(shot), shot.label())
                .clicked()
                && selected != Some(shot)
            {
                log::info!("Shot type selected: {shot}");
                if let Err(e) = controller.select(shot) {
                    log::warn!("{e}");
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Report body
// ---------------------------------------------------------------------------

/// Phase cards, signal tabs and the timing card for the current selection, or
/// a placeholder when there is nothing consistent to show.
pub fn report_body(ui: &mut Ui, controller: &mut SelectionController) {
    let bundle: Arc<DerivedReportBundle> = match controller.report() {
        Ok(bundle) => Arc::clone(bundle),
        Err(ReportError::MissingSelection) => {
            placeholder(ui, idle_message(controller));
            return;
        }
        Err(e) => {
            let text = match controller.selected_shot() {
                Some(shot) => format!("No report available for {shot}"),
                None => "No report available".to_string(),
            };
            placeholder(ui, &text);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(e.to_string()).weak());
            });
            return;
        }
    };

    for card in &bundle.phase_cards {
        phase_card(ui, card);
        ui.add_space(8.0);
    }

    ui.separator();
    let mut mode = controller.view_mode();
    ui.horizontal(|ui: &mut Ui| {
        for candidate in ViewMode::ALL {
            ui.selectable_value(&mut mode, candidate, candidate.label());
        }
    });
    if mode != controller.view_mode() {
        controller.set_view_mode(mode);
    }

    let view = bundle.project(mode);
    let prefix = format!("{}_{}", bundle.shot, mode.label());
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        figure_plot(ui, format!("{prefix}_combined"), view.combined, COMBINED_HEIGHT);
    });
    for pair in view.pairs {
        ui.add_space(4.0);
        paired_plot(ui, &format!("{prefix}_{}", pair.signal), pair);
    }

    ui.separator();
    timing_card(ui, &bundle.timing_card);
}

/// Shown while nothing is selected.
fn idle_message(controller: &SelectionController) -> &'static str {
    if controller.available().is_empty() {
        "No shot types available"
    } else {
        "Select a shot type"
    }
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(text);
    });
}

fn phase_card(ui: &mut Ui, card: &PhaseCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(&card.title);
        });
        ui.columns(card.views.len(), |cols| {
            for (col, view) in cols.iter_mut().zip(&card.views) {
                col.vertical_centered(|ui: &mut Ui| {
                    ui.strong(&view.heading);
                });
                report_table(col, (card.phase, view.view), &view.table);
            }
        });
    });
}

fn timing_card(ui: &mut Ui, card: &TimingCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(&card.title);
        });
        report_table(ui, "timing_table", &card.table);
    });
}

/// Two header rows: side groups, then colour-coded outcomes.
fn report_table(ui: &mut Ui, id: impl std::hash::Hash, table: &ReportTable) {
    const ROW_HEIGHT: f32 = 20.0;

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(70.0), table.columns.len())
            .header(ROW_HEIGHT, |mut header| {
                for group in &table.outer_header {
                    for i in 0..group.span {
                        header.col(|ui: &mut Ui| {
                            if i == 0 {
                                ui.strong(&group.label);
                            }
                        });
                    }
                }
            })
            .body(|mut body| {
                body.row(ROW_HEIGHT, |mut row| {
                    for cell in &table.inner_header {
                        row.col(|ui: &mut Ui| {
                            let mut text = RichText::new(&cell.text).strong();
                            if let Some(color) = cell.color {
                                text = text.color(color32(color));
                            }
                            ui.label(text);
                        });
                    }
                });
                for data in &table.rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&data.label);
                        });
                        for cell in &data.cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::complete_source;
    use crate::data::loader::load_registry;
    use crate::data::model::ShotType;
    use crate::data::source::MemorySource;

    #[test]
    fn idle_message_prompts_for_selection_when_shots_loaded() {
        let mut source = complete_source();
        source.remove("Set/timing");
        let controller =
            SelectionController::new(Arc::new(load_registry(&source)), ShotType::Set);
        assert!(controller.report().is_err());
        assert_eq!(idle_message(&controller), "Select a shot type");
    }

    #[test]
    fn idle_message_reports_empty_dataset() {
        let controller =
            SelectionController::new(Arc::new(load_registry(&MemorySource::new())), ShotType::Set);
        assert_eq!(idle_message(&controller), "No shot types available");
    }
}
