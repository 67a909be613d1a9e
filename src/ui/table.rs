use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Dataset, POSITION_COLUMN};
use crate::data::position::translate_position;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Result table (central panel)
// ---------------------------------------------------------------------------

/// Render the search result, or the reason there is none.
pub fn results(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open player tables to start  (File → Open…)");
        });
        return;
    }

    for warning in &state.report.warnings {
        ui.label(RichText::new(format!("⚠ {warning}")).color(Color32::YELLOW));
    }

    match &state.report.outcome {
        Ok(table) => player_table(ui, table),
        Err(halt) => {
            ui.label(RichText::new(halt.to_string()).color(Color32::YELLOW));
        }
    }
}

fn player_table(ui: &mut Ui, table: &Dataset) {
    if table.is_empty() {
        ui.label("Ningún jugador cumple los filtros.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0).clip(true), table.columns.len())
        .header(22.0, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, table.len(), |mut row| {
                let idx = row.index();
                for col in &table.columns {
                    let text = cell_text(col, table.value(idx, col));
                    row.col(|ui: &mut Ui| {
                        ui.label(text);
                    });
                }
            });
        });
}

/// Position cells also show their readable label.
fn cell_text(column: &str, value: &CellValue) -> String {
    match (column, value) {
        (POSITION_COLUMN, CellValue::String(raw)) => {
            let label = translate_position(raw);
            if label == raw.as_str() {
                raw.clone()
            } else {
                format!("{raw} ({label})")
            }
        }
        (_, CellValue::Float(v)) => format!("{v:.2}"),
        _ => value.to_string(),
    }
}
