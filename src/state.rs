use crate::color::GroupColors;
use crate::data::filter::{run_pipeline, FilterCriteria, FilterReport};
use crate::data::model::Dataset;
use crate::data::position::PositionCategory;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded player table (None until the user opens files). Only the loader
    /// writes it; searches borrow it read-only.
    pub dataset: Option<Dataset>,

    /// Current search selections.
    pub criteria: FilterCriteria,

    /// Result of the last pipeline run (cached).
    pub report: FilterReport,

    /// Tint per competition.
    pub group_colors: GroupColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let criteria = FilterCriteria {
            position: Some(PositionCategory::default()),
            ..Default::default()
        };
        let report = run_pipeline(None, &criteria);
        Self {
            dataset: None,
            criteria,
            report,
            group_colors: GroupColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and start a fresh search over it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.criteria = FilterCriteria {
            position: self.criteria.position,
            ..Default::default()
        };
        self.refilter();
        self.group_colors = GroupColors::new(&self.report.group_options);
        self.status_message = None;
    }

    /// Re-run the pipeline after a criteria change.
    pub fn refilter(&mut self) {
        self.report = run_pipeline(self.dataset.as_ref(), &self.criteria);
    }

    /// Toggle one competition in the selection.
    pub fn toggle_group(&mut self, group: &str) {
        if !self.criteria.groups.remove(group) {
            self.criteria.groups.insert(group.to_string());
        }
        self.reset_ranges();
    }

    /// Select every competition present in the data.
    pub fn select_all_groups(&mut self) {
        self.criteria.groups = self.report.group_options.clone();
        self.reset_ranges();
    }

    pub fn select_no_groups(&mut self) {
        self.criteria.groups.clear();
        self.reset_ranges();
    }

    pub fn set_position(&mut self, category: PositionCategory) {
        if self.criteria.position != Some(category) {
            self.criteria.position = Some(category);
            self.reset_ranges();
        }
    }

    pub fn set_age_range(&mut self, range: (i64, i64)) {
        self.criteria.age_range = Some(range);
        self.refilter();
    }

    pub fn set_height_range(&mut self, range: (i64, i64)) {
        self.criteria.height_range = Some(range);
        self.refilter();
    }

    pub fn set_passport(&mut self, passport: String) {
        self.criteria.passport = passport;
        self.refilter();
    }

    /// Slider bounds follow the rows left by earlier stages, so any change
    /// upstream of the sliders puts them back to the full observed range.
    fn reset_ranges(&mut self) {
        self.criteria.age_range = None;
        self.criteria.height_range = None;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Halt;
    use crate::data::model::{CellValue, Record, AGE_COLUMN, HEIGHT_COLUMN, SOURCE_COLUMN};

    fn dataset() -> Dataset {
        let rows = [("LaLiga", 19, "GK"), ("LaLiga", 28, "CF"), ("Serie A", 33, "GK")];
        let records = rows
            .iter()
            .map(|(src, age, pos)| {
                let mut r = Record::new();
                r.insert(SOURCE_COLUMN.into(), CellValue::String(src.to_string()));
                r.insert(AGE_COLUMN.into(), CellValue::Integer(*age));
                r.insert(HEIGHT_COLUMN.into(), CellValue::Integer(180));
                r.insert("Position".into(), CellValue::String(pos.to_string()));
                r
            })
            .collect();
        Dataset::new(Vec::new(), records)
    }

    #[test]
    fn starts_without_data() {
        let state = AppState::default();
        assert_eq!(state.report.outcome, Err(Halt::NoData));
        assert_eq!(state.criteria.position, Some(PositionCategory::Goalkeeper));
    }

    #[test]
    fn new_dataset_waits_for_competition() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.report.outcome, Err(Halt::SelectionRequired));
        assert_eq!(state.report.group_options.len(), 2);
    }

    #[test]
    fn changing_upstream_selection_resets_ranges() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_all_groups();
        assert_eq!(state.report.age_bounds, Some((19, 33)));
        assert_eq!(state.report.table().map(Dataset::len), Some(2));

        state.set_age_range((30, 40));
        assert_eq!(state.report.table().map(Dataset::len), Some(1));

        state.toggle_group("Serie A");
        assert_eq!(state.criteria.age_range, None);
        assert_eq!(state.report.table().map(Dataset::len), Some(1));

        state.select_no_groups();
        assert_eq!(state.report.outcome, Err(Halt::SelectionRequired));
    }

    #[test]
    fn position_change_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.toggle_group("LaLiga");
        state.set_position(PositionCategory::Forward);
        assert_eq!(state.report.rows_after_grouping, Some(2));
        assert_eq!(state.report.table().map(Dataset::len), Some(1));
    }
}
