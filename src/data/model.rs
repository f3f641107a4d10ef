use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// CounterId – key shared by every table
// ---------------------------------------------------------------------------

/// Identifier of a physical counter. Numeric ids are kept as their decimal
/// text so the same key works for CSV, JSON and Parquet sources.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CounterId(pub String);

impl CounterId {
    pub fn new(id: impl Into<String>) -> Self {
        CounterId(id.into())
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

/// Time granularity of a ridership table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Hourly,
    Weekly,
    HistoricalWeekly,
}

impl Granularity {
    /// File stem the table is stored under inside a data directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            Granularity::Hourly => "by_hr",
            Granularity::Weekly => "by_wk",
            Granularity::HistoricalWeekly => "hist_by_wk",
        }
    }

    /// Optional column carrying the timestamp shown on chart axes.
    pub fn display_column(self) -> Option<&'static str> {
        match self {
            Granularity::Hourly => Some("display_time"),
            Granularity::Weekly => Some("display_date"),
            Granularity::HistoricalWeekly => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Hourly => write!(f, "hourly"),
            Granularity::Weekly => write!(f, "weekly"),
            Granularity::HistoricalWeekly => write!(f, "historical weekly"),
        }
    }
}

// ---------------------------------------------------------------------------
// RidershipRecord / RidershipTable
// ---------------------------------------------------------------------------

/// One count observation, keyed by `(counter_id, timestamp)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RidershipRecord {
    pub counter_id: CounterId,
    pub timestamp: NaiveDateTime,
    /// Timestamp used on chart axes; equals `timestamp` when the source has
    /// no dedicated display column.
    pub display_time: NaiveDateTime,
    pub count: f64,
}

/// An ordered collection of records of a single granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct RidershipTable {
    pub granularity: Granularity,
    pub records: Vec<RidershipRecord>,
}

impl RidershipTable {
    pub fn new(granularity: Granularity, records: Vec<RidershipRecord>) -> Self {
        RidershipTable {
            granularity,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records grouped per counter, each group in table order.
    pub fn series_by_counter(&self) -> BTreeMap<&CounterId, Vec<&RidershipRecord>> {
        let mut series: BTreeMap<&CounterId, Vec<&RidershipRecord>> = BTreeMap::new();
        for rec in &self.records {
            series.entry(&rec.counter_id).or_default().push(rec);
        }
        series
    }
}

// ---------------------------------------------------------------------------
// CounterMetadata / CounterTable
// ---------------------------------------------------------------------------

/// Static description of one counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterMetadata {
    pub id: CounterId,
    /// User-facing label. Not guaranteed unique.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Display colour as stored by the data provider, usually `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterTable {
    pub counters: Vec<CounterMetadata>,
}

impl CounterTable {
    pub fn new(counters: Vec<CounterMetadata>) -> Self {
        CounterTable { counters }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Every known counter id.
    pub fn ids(&self) -> BTreeSet<CounterId> {
        self.counters.iter().map(|c| c.id.clone()).collect()
    }

    /// Sorted, de-duplicated display names.
    pub fn names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.counters.iter().map(|c| c.name.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// All ids whose counter carries `name`. Empty when nothing matches.
    pub fn ids_for_name(&self, name: &str) -> Vec<CounterId> {
        self.counters
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn get(&self, id: &CounterId) -> Option<&CounterMetadata> {
        self.counters.iter().find(|c| &c.id == id)
    }
}

// ---------------------------------------------------------------------------
// Dataset – everything the data provider supplies
// ---------------------------------------------------------------------------

/// Immutable snapshot of the loaded tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub hourly: RidershipTable,
    pub weekly: RidershipTable,
    pub historical: RidershipTable,
    pub counters: CounterTable,
    /// When the upstream data was retrieved, if recorded.
    pub retrieved_at: Option<NaiveDateTime>,
}

impl Dataset {
    /// Total number of ridership records across all granularities.
    pub fn record_count(&self) -> usize {
        self.hourly.len() + self.weekly.len() + self.historical.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(id: &str, name: &str) -> CounterMetadata {
        CounterMetadata {
            id: CounterId::new(id),
            name: name.to_string(),
            latitude: 40.7,
            longitude: -73.9,
            color: "#ff0000".to_string(),
        }
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let table = CounterTable::new(vec![
            counter("3", "Williamsburg Br"),
            counter("1", "Brooklyn Br"),
            counter("2", "Brooklyn Br"),
        ]);
        assert_eq!(table.names(), vec!["Brooklyn Br", "Williamsburg Br"]);
        assert_eq!(
            table.ids_for_name("Brooklyn Br"),
            vec![CounterId::new("1"), CounterId::new("2")]
        );
        assert!(table.ids_for_name("Queensboro Br").is_empty());
    }
}
