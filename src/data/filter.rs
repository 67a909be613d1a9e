use std::collections::BTreeSet;

use log::{debug, warn};
use thiserror::Error;

use super::model::{
    CellValue, Dataset, Record, AGE_COLUMN, DISPLAY_COLUMNS, HEIGHT_COLUMN, PASSPORT_COLUMN,
    POSITION_COLUMN, SOURCE_COLUMN,
};
use super::position::PositionCategory;

// ---------------------------------------------------------------------------
// Criteria and outcomes
// ---------------------------------------------------------------------------

/// User selections for one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected competitions (`source_file` values). Empty pauses the search.
    pub groups: BTreeSet<String>,
    /// `None` leaves positions unfiltered.
    pub position: Option<PositionCategory>,
    /// Inclusive age range; `None` means the full observed range.
    pub age_range: Option<(i64, i64)>,
    /// Inclusive height range in cm; `None` means the full observed range.
    pub height_range: Option<(i64, i64)>,
    /// Case-insensitive passport substring; empty disables the stage.
    pub passport: String,
}

/// Conditions that stop the search before a table can be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Halt {
    #[error("No hay datos cargados. Por favor, asegúrate de que los datos se han cargado correctamente.")]
    NoData,
    #[error("Selecciona al menos una competencia para aplicar los siguientes filtros.")]
    SelectionRequired,
    #[error("No se encontró la columna requerida '{0}'.")]
    MissingAttribute(String),
}

/// Stages skipped because the data lacks what they need.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageWarning {
    #[error("No se encontraron datos de edad o altura en los archivos.")]
    RangeAttributesMissing,
    #[error("No se encontraron datos de pasaporte en los archivos.")]
    PassportMissing,
    #[error("Algunas de las columnas necesarias no están presentes en los datos: {}.", .0.join(", "))]
    ProjectionColumnsMissing(Vec<String>),
}

/// Everything one pipeline run produces for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    /// The reduced table, or why there is none.
    pub outcome: Result<Dataset, Halt>,
    pub warnings: Vec<StageWarning>,
    /// Competition values available in the loaded dataset.
    pub group_options: BTreeSet<String>,
    /// Rows left after the competition stage, once it has run.
    pub rows_after_grouping: Option<usize>,
    /// Observed age bounds after the position stage (slider limits).
    pub age_bounds: Option<(i64, i64)>,
    /// Observed height bounds after the position stage (slider limits).
    pub height_bounds: Option<(i64, i64)>,
}

impl FilterReport {
    fn halted(halt: Halt) -> Self {
        FilterReport {
            outcome: Err(halt),
            warnings: Vec::new(),
            group_options: BTreeSet::new(),
            rows_after_grouping: None,
            age_bounds: None,
            height_bounds: None,
        }
    }

    /// The result table, if the run produced one.
    pub fn table(&self) -> Option<&Dataset> {
        self.outcome.as_ref().ok()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every stage over `dataset` in order. Each stage only removes rows; the
/// input is never modified.
///
/// Stages:
/// 1. no data → halt
/// 2. competition (`source_file`) → halt when missing or nothing selected
/// 3. position category → halt when the `Position` column is missing
/// 4. age + height ranges → warn and skip when either column is missing
/// 5. passport substring → warn and skip when the column is missing
/// 6. projection onto [`DISPLAY_COLUMNS`] → warn and keep all columns when
///    any is missing
pub fn run_pipeline(dataset: Option<&Dataset>, criteria: &FilterCriteria) -> FilterReport {
    let Some(source) = dataset.filter(|ds| !ds.is_empty()) else {
        debug!("filter: no data loaded");
        return FilterReport::halted(Halt::NoData);
    };

    if !source.has_column(SOURCE_COLUMN) {
        warn!("filter: dataset has no '{SOURCE_COLUMN}' column");
        return FilterReport::halted(Halt::MissingAttribute(SOURCE_COLUMN.to_string()));
    }

    let group_options = group_options(source);
    let mut report = FilterReport::halted(Halt::SelectionRequired);
    report.group_options = group_options;

    if criteria.groups.is_empty() {
        debug!("filter: waiting for a competition selection");
        return report;
    }

    let mut df = source.clone();
    df.retain(|r| {
        cell(r, SOURCE_COLUMN)
            .map(|v| criteria.groups.contains(&v.to_string()))
            .unwrap_or(false)
    });
    report.rows_after_grouping = Some(df.len());
    debug!("filter: {} rows after competition stage", df.len());

    if let Some(category) = criteria.position {
        if !df.has_column(POSITION_COLUMN) {
            warn!("filter: dataset has no '{POSITION_COLUMN}' column");
            report.outcome = Err(Halt::MissingAttribute(POSITION_COLUMN.to_string()));
            return report;
        }
        df.retain(|r| {
            cell(r, POSITION_COLUMN)
                .and_then(CellValue::as_str)
                .map(|p| category.matches(p))
                .unwrap_or(false)
        });
        debug!("filter: {} rows after position stage ({category})", df.len());
    }

    if df.has_column(AGE_COLUMN) && df.has_column(HEIGHT_COLUMN) {
        report.age_bounds = df.numeric_bounds(AGE_COLUMN);
        report.height_bounds = df.numeric_bounds(HEIGHT_COLUMN);
        let age = criteria.age_range.or(report.age_bounds);
        let height = criteria.height_range.or(report.height_bounds);
        df.retain(|r| in_range(r, AGE_COLUMN, age) && in_range(r, HEIGHT_COLUMN, height));
        debug!("filter: {} rows after age/height stage", df.len());
    } else {
        warn!("filter: skipping age/height stage, columns missing");
        report.warnings.push(StageWarning::RangeAttributesMissing);
    }

    if df.has_column(PASSPORT_COLUMN) {
        if !criteria.passport.is_empty() {
            let needle = criteria.passport.to_lowercase();
            df.retain(|r| {
                cell(r, PASSPORT_COLUMN)
                    .and_then(CellValue::as_str)
                    .map(|p| p.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            });
            debug!("filter: {} rows after passport stage", df.len());
        }
    } else {
        warn!("filter: skipping passport stage, column missing");
        report.warnings.push(StageWarning::PassportMissing);
    }

    match df.project(&DISPLAY_COLUMNS) {
        Ok(projected) => report.outcome = Ok(projected),
        Err(e) => {
            warn!("filter: not projecting result, {e}");
            report
                .warnings
                .push(StageWarning::ProjectionColumnsMissing(e.missing));
            report.outcome = Ok(df);
        }
    }
    report
}

/// Distinct competition labels present in the dataset.
fn group_options(dataset: &Dataset) -> BTreeSet<String> {
    dataset
        .unique_values(SOURCE_COLUMN)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn cell<'a>(record: &'a Record, column: &str) -> Option<&'a CellValue> {
    record.get(column).filter(|v| !v.is_null())
}

/// Null or non-numeric values, or a missing range, never pass.
fn in_range(record: &Record, column: &str, range: Option<(i64, i64)>) -> bool {
    let Some((lo, hi)) = range else {
        return false;
    };
    cell(record, column)
        .and_then(CellValue::as_f64)
        .map(|v| v >= lo as f64 && v <= hi as f64)
        .unwrap_or(false)
}
