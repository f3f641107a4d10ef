use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Months, NaiveDate};

use super::filter::CounterSet;
use super::model::{CounterTable, RidershipTable};

// ---------------------------------------------------------------------------
// Counter selection
// ---------------------------------------------------------------------------

/// Counters the user effectively selected.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSelection {
    pub ids: CounterSet,
    /// Display names, sorted.
    pub names: Vec<String>,
    /// True when the choice was empty and everything was selected instead.
    pub is_fallback: bool,
}

/// Resolve chosen display names to counter ids.
///
/// An empty choice selects every counter. Names are matched against all
/// counters carrying them, so a shared name brings in every matching id.
/// Names that match nothing are dropped.
pub fn resolve_counter_selection(choice: &BTreeSet<String>, counters: &CounterTable) -> CounterSelection {
    if choice.is_empty() {
        return CounterSelection {
            ids: counters.ids(),
            names: counters.names(),
            is_fallback: true,
        };
    }

    let mut ids = CounterSet::new();
    let mut names = Vec::new();
    for name in choice {
        let matches = counters.ids_for_name(name);
        if matches.is_empty() {
            log::debug!("No counter named {name:?}; ignoring");
            continue;
        }
        if matches.len() > 1 {
            log::debug!("Counter name {name:?} maps to {} ids", matches.len());
        }
        ids.extend(matches);
        names.push(name.clone());
    }

    CounterSelection {
        ids,
        names,
        is_fallback: false,
    }
}

// ---------------------------------------------------------------------------
// Date range selection
// ---------------------------------------------------------------------------

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// From the first day of `start`'s month to the last day of `end`'s month.
    pub fn whole_months(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start: month_start(start),
            end: month_end(end),
        }
    }
}

/// Resolve the user's endpoints against the full available range.
///
/// Exactly two endpoints are used positionally, even when reversed. Any other
/// shape falls back to `full`.
pub fn resolve_date_range_selection(choice: &[NaiveDate], full: Option<DateRange>) -> Option<DateRange> {
    match choice {
        [start, end] => Some(DateRange::new(*start, *end)),
        _ => {
            if !choice.is_empty() {
                log::debug!("Ignoring malformed date choice with {} endpoints", choice.len());
            }
            full
        }
    }
}

// ---------------------------------------------------------------------------
// Month options
// ---------------------------------------------------------------------------

/// The distinct months present in a table, as first-of-month dates, sorted.
pub fn month_options(table: &RidershipTable) -> Vec<NaiveDate> {
    let months: BTreeSet<NaiveDate> = table
        .records
        .iter()
        .map(|rec| month_start(rec.timestamp.date()))
        .collect();
    months.into_iter().collect()
}

/// First and last month option as a range.
pub fn full_month_range(options: &[NaiveDate]) -> Option<DateRange> {
    Some(DateRange::new(*options.first()?, *options.last()?))
}

/// Whether every endpoint of `choice` is still an available option.
pub fn choice_is_available(choice: &[NaiveDate], options: &[NaiveDate]) -> bool {
    let available: HashSet<&NaiveDate> = options.iter().collect();
    choice.iter().all(|d| available.contains(d))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
