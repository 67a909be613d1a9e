use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::position::PositionCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – search widgets
// ---------------------------------------------------------------------------

/// Render the left search panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Búsqueda de Jugadores");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            competition_filter(ui, state);
            ui.separator();
            position_filter(ui, state);
            ui.separator();
            range_filters(ui, state);
            ui.separator();
            passport_filter(ui, state);
        });
}

/// Multi-select over `source_file` values.
fn competition_filter(ui: &mut Ui, state: &mut AppState) {
    let options = state.report.group_options.clone();
    let header = format!(
        "Competición (archivo)  ({}/{})",
        state.criteria.groups.len(),
        options.len()
    );

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("competitions")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_groups();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_groups();
                }
            });

            for group in &options {
                let mut checked = state.criteria.groups.contains(group);
                let text = RichText::new(group).color(state.group_colors.color_for(group));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_group(group);
                }
            }
        });

    if let Some(n) = state.report.rows_after_grouping {
        ui.label(format!("Resultados tras filtrar por competición: {n} registros"));
    }
}

fn position_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Filtrar por posición principal");
    let current = state.criteria.position.unwrap_or_default();
    let mut selected = current;
    egui::ComboBox::from_id_salt("position")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for category in PositionCategory::ALL {
                ui.selectable_value(&mut selected, category, category.label());
            }
        });
    if selected != current {
        state.set_position(selected);
    }
}

/// Age and height sliders; bounds come from the rows left by earlier stages.
fn range_filters(ui: &mut Ui, state: &mut AppState) {
    let (Some(age_bounds), Some(height_bounds)) =
        (state.report.age_bounds, state.report.height_bounds)
    else {
        return;
    };

    let age = state.criteria.age_range.unwrap_or(age_bounds);
    if let Some(range) = range_slider(ui, "Selecciona un rango de edad", age_bounds, age) {
        state.set_age_range(range);
    }

    let height = state.criteria.height_range.unwrap_or(height_bounds);
    if let Some(range) =
        range_slider(ui, "Selecciona un rango de altura (cm)", height_bounds, height)
    {
        state.set_height_range(range);
    }
}

/// Two linked sliders standing in for a range slider. Returns the new range
/// when the user moved either end.
fn range_slider(
    ui: &mut Ui,
    title: &str,
    (min, max): (i64, i64),
    (mut lo, mut hi): (i64, i64),
) -> Option<(i64, i64)> {
    ui.strong(title);
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).text("mín"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).text("máx"))
        .changed();
    if !(lo_changed || hi_changed) {
        return None;
    }
    if lo > hi {
        if lo_changed {
            hi = lo;
        } else {
            lo = hi;
        }
    }
    Some((lo, hi))
}

fn passport_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Filtrar por pasaporte (ej. 'España')");
    let mut text = state.criteria.passport.clone();
    if ui.text_edit_singleline(&mut text).changed() {
        state.set_passport(text);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = state.report.table().map(|t| t.len()).unwrap_or(0);
            ui.label(format!("{} players loaded, {shown} shown", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open player tables")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_files();

    if let Some(paths) = files {
        load_into(state, &paths);
    }
}

/// Replace the held dataset with the given files, reporting failures in the
/// status line.
pub fn load_into(state: &mut AppState, paths: &[PathBuf]) {
    match crate::data::loader::load_files(paths) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} players with columns {:?}",
                dataset.len(),
                dataset.columns
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load files: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
