use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::color::CounterColors;
use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::data::selection::choice_is_available;
use crate::data::view::{DashboardView, SelectionInput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Directory the current dataset came from.
    pub data_dir: Option<PathBuf>,

    /// Loaded dataset (None until a directory loads successfully).
    pub dataset: Option<Dataset>,

    /// Colour per counter for the loaded dataset.
    pub colors: Option<CounterColors>,

    /// Raw widget state: chosen names and month endpoints.
    pub input: SelectionInput,

    /// Derived tables for the current selection (cached).
    pub view: Option<DashboardView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            data_dir: None,
            dataset: None,
            colors: None,
            input: SelectionInput::default(),
            view: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, apply default counters and recompute.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let known: BTreeSet<String> = dataset.counters.names().into_iter().collect();
        self.input = SelectionInput {
            counter_names: self
                .config
                .default_counters
                .iter()
                .filter(|name| known.contains(*name))
                .cloned()
                .collect(),
            months: Vec::new(),
        };
        self.colors = Some(CounterColors::new(&dataset.counters));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Load a data directory, keeping the current dataset on failure.
    pub fn load_dir(&mut self, dir: &Path) {
        match crate::data::loader::load_dir(dir) {
            Ok(dataset) => {
                self.data_dir = Some(dir.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Rebuild the view after a selection change.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            return;
        };
        let mut view = DashboardView::compute(ds, &self.input, &self.config);

        // Counter changes can remove chosen months; start over from the full range.
        if !choice_is_available(&self.input.months, &view.month_options) {
            self.input.months.clear();
            view = DashboardView::compute(ds, &self.input, &self.config);
        }
        self.view = Some(view);
    }

    /// Toggle a single counter name in the choice.
    pub fn toggle_counter(&mut self, name: &str) {
        if !self.input.counter_names.remove(name) {
            self.input.counter_names.insert(name.to_string());
        }
        self.recompute();
    }

    /// Choose every counter explicitly.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.input.counter_names = ds.counters.names().into_iter().collect();
            self.recompute();
        }
    }

    /// Clear the choice, which shows every counter.
    pub fn select_none(&mut self) {
        self.input.counter_names.clear();
        self.recompute();
    }

    /// Set both month endpoints, positionally.
    pub fn set_months(&mut self, start: NaiveDate, end: NaiveDate) {
        self.input.months = vec![start, end];
        self.recompute();
    }
}
