use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{CounterId, CounterMetadata, CounterTable, RidershipRecord, RidershipTable};

/// A set of counter identifiers to keep.
pub type CounterSet = BTreeSet<CounterId>;

// ---------------------------------------------------------------------------
// Counter membership
// ---------------------------------------------------------------------------

/// Rows that can be filtered by counter membership.
pub trait CounterKeyed {
    fn counter_id(&self) -> &CounterId;
}

impl CounterKeyed for RidershipRecord {
    fn counter_id(&self) -> &CounterId {
        &self.counter_id
    }
}

impl CounterKeyed for CounterMetadata {
    fn counter_id(&self) -> &CounterId {
        &self.id
    }
}

/// Copy of the rows whose counter is in `ids`, in their original order.
pub fn retain_counters<T: CounterKeyed + Clone>(rows: &[T], ids: &CounterSet) -> Vec<T> {
    rows.iter()
        .filter(|row| ids.contains(row.counter_id()))
        .cloned()
        .collect()
}

/// Narrow a ridership table to the given counters.
///
/// An empty `ids` yields an empty table: "nothing chosen means everything"
/// is decided by [`super::selection::resolve_counter_selection`], not here.
pub fn filter_by_counters(table: &RidershipTable, ids: &CounterSet) -> RidershipTable {
    RidershipTable::new(table.granularity, retain_counters(&table.records, ids))
}

/// Narrow the counter metadata to the given counters.
pub fn filter_counter_table(counters: &CounterTable, ids: &CounterSet) -> CounterTable {
    CounterTable::new(retain_counters(&counters.counters, ids))
}

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// Rows whose date lies in `start..=end`.
///
/// Bounds are taken as given: `start > end` matches nothing.
pub fn filter_by_date_range(table: &RidershipTable, start: NaiveDate, end: NaiveDate) -> RidershipTable {
    let records = table
        .records
        .iter()
        .filter(|rec| {
            let date = rec.timestamp.date();
            start <= date && date <= end
        })
        .cloned()
        .collect();
    RidershipTable::new(table.granularity, records)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum of `count` per counter, used to size map markers.
pub fn aggregate_for_display(table: &RidershipTable) -> BTreeMap<CounterId, f64> {
    let mut totals: BTreeMap<CounterId, f64> = BTreeMap::new();
    for rec in &table.records {
        *totals.entry(rec.counter_id.clone()).or_insert(0.0) += rec.count;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Granularity;

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn rec(id: &str, ts: chrono::NaiveDateTime, count: f64) -> RidershipRecord {
        RidershipRecord {
            counter_id: CounterId::new(id),
            timestamp: ts,
            display_time: ts,
            count,
        }
    }

    fn ids(list: &[&str]) -> CounterSet {
        list.iter().map(|s| CounterId::new(*s)).collect()
    }

    fn sample_table() -> RidershipTable {
        RidershipTable::new(
            Granularity::Hourly,
            vec![
                rec("1", at(2023, 1, 1, 0), 10.0),
                rec("2", at(2023, 1, 1, 0), 4.0),
                rec("1", at(2023, 1, 1, 1), 20.0),
                rec("3", at(2023, 1, 1, 1), 7.0),
                rec("1", at(2023, 1, 1, 2), 5.0),
                rec("2", at(2023, 1, 1, 2), 1.0),
            ],
        )
    }

    #[test]
    fn counter_filter_keeps_members_in_order() {
        let table = sample_table();
        let out = filter_by_counters(&table, &ids(&["1"]));

        let expected = table.records.iter().filter(|r| r.counter_id.0 == "1").count();
        assert_eq!(out.len(), expected);
        assert!(out.records.iter().all(|r| r.counter_id.0 == "1"));
        let counts: Vec<f64> = out.records.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![10.0, 20.0, 5.0]);
        assert_eq!(out.granularity, Granularity::Hourly);
        // input untouched
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn counter_filter_includes_every_member_once() {
        let table = sample_table();
        let selected = ids(&["1", "3"]);
        let out = filter_by_counters(&table, &selected);
        for row in table.records.iter().filter(|r| selected.contains(&r.counter_id)) {
            assert_eq!(out.records.iter().filter(|o| *o == row).count(), 1);
        }
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn empty_counter_set_gives_empty_table() {
        let out = filter_by_counters(&sample_table(), &CounterSet::new());
        assert!(out.is_empty());
    }

    #[test]
    fn counter_table_filter() {
        let counter = |id: &str| CounterMetadata {
            id: CounterId::new(id),
            name: format!("c{id}"),
            latitude: 0.0,
            longitude: 0.0,
            color: String::new(),
        };
        let table = CounterTable::new(vec![counter("1"), counter("2"), counter("3")]);
        let out = filter_counter_table(&table, &ids(&["3", "1"]));
        let names: Vec<&str> = out.counters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c1", "c3"]);
    }

    #[test]
    fn date_filter_is_inclusive_on_both_ends() {
        let table = RidershipTable::new(
            Granularity::HistoricalWeekly,
            vec![
                rec("1", at(2022, 12, 31, 23), 1.0),
                rec("1", at(2023, 1, 1, 0), 2.0),
                rec("1", at(2023, 1, 15, 0), 3.0),
                rec("1", at(2023, 1, 31, 18), 4.0),
                rec("1", at(2023, 2, 1, 0), 5.0),
            ],
        );
        let jan1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let jan31 = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let out = filter_by_date_range(&table, jan1, jan31);
        let counts: Vec<f64> = out.records.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn date_filter_is_idempotent() {
        let table = sample_table();
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let once = filter_by_date_range(&table, day, day);
        let twice = filter_by_date_range(&once, day, day);
        assert_eq!(once, twice);
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let start = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(filter_by_date_range(&sample_table(), start, end).is_empty());
    }

    #[test]
    fn aggregate_sums_per_counter() {
        let totals = aggregate_for_display(&sample_table());
        assert_eq!(totals[&CounterId::new("1")], 35.0);
        assert_eq!(totals[&CounterId::new("2")], 5.0);
        assert_eq!(totals[&CounterId::new("3")], 7.0);
        assert_eq!(totals.len(), 3);
    }
}
