use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::filter::{aggregate_for_display, filter_by_counters, filter_by_date_range, filter_counter_table};
use super::model::{CounterId, CounterTable, Dataset, RidershipTable};
use super::selection::{
    full_month_range, month_options, resolve_counter_selection, resolve_date_range_selection,
    CounterSelection, DateRange,
};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Selection input
// ---------------------------------------------------------------------------

/// Raw widget state, before fallback resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionInput {
    /// Chosen counter display names.
    pub counter_names: BTreeSet<String>,
    /// Chosen month endpoints (first-of-month dates), positional.
    pub months: Vec<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Map markers
// ---------------------------------------------------------------------------

/// One marker on the counter map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub counter_id: CounterId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total: f64,
    pub radius: f64,
}

impl MapMarker {
    pub fn tooltip(&self) -> String {
        format!("{}\n{:.0} daily riders", self.name, self.total.round())
    }
}

// ---------------------------------------------------------------------------
// DashboardView – every derived table for one interaction
// ---------------------------------------------------------------------------

/// Everything the rendering layer draws, derived from a dataset snapshot and
/// a selection. Rebuilt from scratch on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selection: CounterSelection,
    pub counters: CounterTable,
    /// Months available in the historical table for the selected counters.
    pub month_options: Vec<NaiveDate>,
    /// Resolved month endpoints, positional.
    pub months: Option<DateRange>,
    /// Date window applied to the historical table.
    pub window: Option<DateRange>,
    pub hourly: RidershipTable,
    pub weekly: RidershipTable,
    pub historical: RidershipTable,
    pub totals: BTreeMap<CounterId, f64>,
    pub markers: Vec<MapMarker>,
}

impl DashboardView {
    pub fn compute(dataset: &Dataset, input: &SelectionInput, config: &DashboardConfig) -> Self {
        let selection = resolve_counter_selection(&input.counter_names, &dataset.counters);
        let ids = &selection.ids;

        let counters = filter_counter_table(&dataset.counters, ids);
        let hourly = filter_by_counters(&dataset.hourly, ids);
        let weekly = filter_by_counters(&dataset.weekly, ids);
        let historical_all = filter_by_counters(&dataset.historical, ids);

        let options = month_options(&historical_all);
        let months = resolve_date_range_selection(&input.months, full_month_range(&options));
        let window = months.map(|m| DateRange::whole_months(m.start, m.end));
        let historical = match window {
            Some(w) => filter_by_date_range(&historical_all, w.start, w.end),
            None => historical_all,
        };

        let totals = aggregate_for_display(&hourly);
        let markers = counters
            .counters
            .iter()
            .map(|c| {
                let total = totals.get(&c.id).copied().unwrap_or(0.0);
                MapMarker {
                    counter_id: c.id.clone(),
                    name: c.name.clone(),
                    latitude: c.latitude,
                    longitude: c.longitude,
                    total,
                    radius: total * config.marker_scale,
                }
            })
            .collect();

        log::debug!(
            "View: {} counters, {} hourly / {} weekly / {} historical rows",
            counters.len(),
            hourly.len(),
            weekly.len(),
            historical.len()
        );

        DashboardView {
            selection,
            counters,
            month_options: options,
            months,
            window,
            hourly,
            weekly,
            historical,
            totals,
            markers,
        }
    }
}
