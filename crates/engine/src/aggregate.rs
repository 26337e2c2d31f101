//! Aggregations over a snapshot of sales records.
//!
//! Everything here is a pure function of `&[Record]`. Groups are kept in the
//! order their key first appears in the snapshot; rankings sort stably, so ties
//! keep that order as well.
//!
//! A report with nothing to show (empty snapshot, or no record carrying the
//! column it groups by) is [`Report::NoData`], never an empty or zeroed
//! [`Report::Data`]. The scalar [`Summary`] is the exception: it is always
//! present and is all zeros on an empty snapshot.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use crate::{Record, util::round2};

/// How many doctors the ranking keeps.
pub const TOP_DOCTORS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum Report<T> {
    NoData,
    Data(T),
}

impl<T> Report<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

impl<T> Report<Vec<T>> {
    fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::NoData
        } else {
            Self::Data(rows)
        }
    }
}

/// Mean sales, profit and quantity of one application.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationMeans {
    pub application: String,
    pub mean_sales: f64,
    pub mean_profit: f64,
    /// `None` when no record of the group has a quantity.
    pub mean_quantity: Option<f64>,
}

/// Total sales of one field of activity and its fraction of the grand total.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityShare {
    pub field_of_activity: String,
    pub total_sales: f64,
    /// In `[0, 1]` for non-negative sales; 0 when the grand total is 0.
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoctorRanking {
    pub doctor_name: String,
    pub mean_sales: f64,
}

/// One record projected for a bubble plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub product_name: String,
    pub discount: Option<f64>,
    pub profit: f64,
    pub quantity: Option<i32>,
}

/// Mean sales per state, indexed by field of activity.
///
/// `categories` is the full field-of-activity axis. A state without records
/// for some activity has no point there: gaps are omitted, never zero-filled.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedSeries {
    pub categories: Vec<String>,
    pub series: Vec<StateSeries>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateSeries {
    pub state: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub field_of_activity: String,
    pub mean_sales: f64,
}

impl StateSeries {
    fn total(&self) -> f64 {
        self.points.iter().map(|point| point.mean_sales).sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub doctor_count: u64,
    pub product_count: u64,
    /// Rounded to two decimals.
    pub total_sales: f64,
    /// Rounded to two decimals.
    pub mean_profit: f64,
}

/// Every report the dashboard shows, computed from one snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub application_means: Report<Vec<ApplicationMeans>>,
    pub activity_share: Report<Vec<ActivityShare>>,
    pub top_doctors: Report<Vec<DoctorRanking>>,
    pub product_scatter: Report<Vec<ScatterPoint>>,
    pub state_series: Report<StackedSeries>,
    pub summary: Summary,
}

impl Dashboard {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            application_means: application_means(records),
            activity_share: activity_share(records),
            top_doctors: top_doctors(records, TOP_DOCTORS),
            product_scatter: product_scatter(records),
            state_series: state_series(records),
            summary: summary(records),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Accumulators keyed by group, in first-appearance order.
struct Groups<K, A> {
    index: HashMap<K, usize>,
    entries: Vec<(K, A)>,
}

impl<K, A> Default for Groups<K, A> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, A: Default> Groups<K, A> {
    fn entry(&mut self, key: K) -> &mut A {
        let slot = match self.index.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, A::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    fn into_entries(self) -> Vec<(K, A)> {
        self.entries
    }
}

/// Mean sales, profit and quantity per application.
pub fn application_means(records: &[Record]) -> Report<Vec<ApplicationMeans>> {
    #[derive(Default)]
    struct Acc {
        sales: Mean,
        profit: Mean,
        quantity: Mean,
    }

    let mut groups: Groups<&str, Acc> = Groups::default();
    for record in records {
        let acc = groups.entry(record.application.as_str());
        acc.sales.add(record.sales);
        acc.profit.add(record.profit);
        if let Some(quantity) = record.quantity {
            acc.quantity.add(f64::from(quantity));
        }
    }

    let rows = groups
        .into_entries()
        .into_iter()
        .map(|(application, acc)| ApplicationMeans {
            application: application.to_string(),
            mean_sales: acc.sales.value().unwrap_or_default(),
            mean_profit: acc.profit.value().unwrap_or_default(),
            mean_quantity: acc.quantity.value(),
        })
        .collect();
    Report::from_rows(rows)
}

/// Sales per field of activity as a fraction of the total.
///
/// Records without a field of activity belong to no group and do not count
/// towards the total.
pub fn activity_share(records: &[Record]) -> Report<Vec<ActivityShare>> {
    let mut groups: Groups<&str, f64> = Groups::default();
    for record in records {
        if let Some(activity) = record.field_of_activity.as_deref() {
            *groups.entry(activity) += record.sales;
        }
    }

    let entries = groups.into_entries();
    let grand_total: f64 = entries.iter().map(|(_, total)| total).sum();
    let rows = entries
        .into_iter()
        .map(|(activity, total_sales)| ActivityShare {
            field_of_activity: activity.to_string(),
            total_sales,
            share: if grand_total == 0.0 {
                0.0
            } else {
                total_sales / grand_total
            },
        })
        .collect();
    Report::from_rows(rows)
}

/// The `limit` doctors with the highest mean sales, best first.
pub fn top_doctors(records: &[Record], limit: usize) -> Report<Vec<DoctorRanking>> {
    let mut groups: Groups<&str, Mean> = Groups::default();
    for record in records {
        groups.entry(record.doctor_name.as_str()).add(record.sales);
    }

    let mut rows: Vec<DoctorRanking> = groups
        .into_entries()
        .into_iter()
        .filter_map(|(doctor, mean)| {
            mean.value().map(|mean_sales| DoctorRanking {
                doctor_name: doctor.to_string(),
                mean_sales,
            })
        })
        .collect();
    // `sort_by` is stable: equal means keep first-appearance order.
    rows.sort_by(|a, b| b.mean_sales.total_cmp(&a.mean_sales));
    rows.truncate(limit);
    Report::from_rows(rows)
}

pub fn product_scatter(records: &[Record]) -> Report<Vec<ScatterPoint>> {
    let rows = records
        .iter()
        .map(|record| ScatterPoint {
            product_name: record.product_name.clone(),
            discount: record.discount,
            profit: record.profit,
            quantity: record.quantity,
        })
        .collect();
    Report::from_rows(rows)
}

/// Mean sales per `(field of activity, state)`, one series per state.
///
/// Series are ordered by ascending sum of their points (ties keep
/// first-appearance order), which is the stacking order of the chart.
pub fn state_series(records: &[Record]) -> Report<StackedSeries> {
    let mut activities: Groups<&str, ()> = Groups::default();
    let mut states: Groups<&str, ()> = Groups::default();
    let mut cells: Groups<(&str, &str), Mean> = Groups::default();
    for record in records {
        let Some(activity) = record.field_of_activity.as_deref() else {
            continue;
        };
        activities.entry(activity);
        states.entry(record.state.as_str());
        cells.entry((activity, record.state.as_str())).add(record.sales);
    }
    if cells.entries.is_empty() {
        return Report::NoData;
    }

    let categories: Vec<&str> = activities.keys().copied().collect();
    let means: HashMap<(&str, &str), f64> = cells
        .into_entries()
        .into_iter()
        .filter_map(|(key, mean)| mean.value().map(|value| (key, value)))
        .collect();

    let mut series: Vec<StateSeries> = states
        .keys()
        .map(|state| StateSeries {
            state: state.to_string(),
            points: categories
                .iter()
                .filter_map(|activity| {
                    means
                        .get(&(*activity, *state))
                        .map(|mean_sales| SeriesPoint {
                            field_of_activity: activity.to_string(),
                            mean_sales: *mean_sales,
                        })
                })
                .collect(),
        })
        .collect();
    series.sort_by(|a, b| a.total().total_cmp(&b.total()));

    Report::Data(StackedSeries {
        categories: categories.into_iter().map(ToString::to_string).collect(),
        series,
    })
}

/// Distinct doctors and products, total sales and mean profit.
pub fn summary(records: &[Record]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let doctors: HashSet<&str> = records.iter().map(|r| r.doctor_name.as_str()).collect();
    let products: HashSet<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
    let total_sales: f64 = records.iter().map(|r| r.sales).sum();
    let total_profit: f64 = records.iter().map(|r| r.profit).sum();

    Summary {
        doctor_count: doctors.len() as u64,
        product_count: products.len() as u64,
        total_sales: round2(total_sales),
        mean_profit: round2(total_profit / records.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(doctor: &str, application: &str, sales: f64) -> Record {
        Record {
            id: 0,
            date: Utc::now(),
            field_of_activity: None,
            doctor_name: doctor.to_string(),
            country: "Italy".to_string(),
            state: "Veneto".to_string(),
            application: application.to_string(),
            product_name: "Implant".to_string(),
            sales,
            quantity: None,
            discount: None,
            profit: 0.0,
        }
    }

    fn with_activity(mut record: Record, activity: &str, state: &str) -> Record {
        record.field_of_activity = Some(activity.to_string());
        record.state = state.to_string();
        record
    }

    #[test]
    fn application_mean_is_exact() {
        let records = vec![
            record("a", "A", 10.0),
            record("b", "A", 20.0),
            record("c", "A", 30.0),
        ];
        let Report::Data(rows) = application_means(&records) else {
            panic!("expected data");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].application, "A");
        assert_eq!(rows[0].mean_sales, 20.0);
        assert_eq!(rows[0].mean_quantity, None);
    }

    #[test]
    fn application_mean_quantity_skips_missing_values() {
        let mut first = record("a", "A", 1.0);
        first.quantity = Some(4);
        let second = record("b", "A", 1.0);
        let mut third = record("c", "B", 1.0);
        third.quantity = Some(0);

        let Report::Data(rows) = application_means(&[first, second, third]) else {
            panic!("expected data");
        };
        assert_eq!(rows[0].mean_quantity, Some(4.0));
        assert_eq!(rows[1].application, "B");
        assert_eq!(rows[1].mean_quantity, Some(0.0));
    }

    #[test]
    fn activity_share_sums_to_one_and_skips_missing_activity() {
        let records = vec![
            with_activity(record("a", "A", 30.0), "Dentistry", "Veneto"),
            with_activity(record("b", "A", 10.0), "Surgery", "Veneto"),
            with_activity(record("c", "A", 60.0), "Dentistry", "Lazio"),
            record("d", "A", 1000.0),
        ];
        let Report::Data(rows) = activity_share(&records) else {
            panic!("expected data");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field_of_activity, "Dentistry");
        assert_eq!(rows[0].total_sales, 90.0);
        assert_eq!(rows[0].share, 0.9);
        assert_eq!(rows[1].share, 0.1);
    }

    #[test]
    fn activity_share_without_activities_is_no_data() {
        let records = vec![record("a", "A", 30.0)];
        assert!(activity_share(&records).is_no_data());
        assert!(state_series(&records).is_no_data());
    }

    #[test]
    fn top_doctors_keeps_best_five() {
        let records: Vec<_> = [
            ("d50", 50.0),
            ("d10", 10.0),
            ("d90", 90.0),
            ("d30", 30.0),
            ("d70", 70.0),
            ("d60", 60.0),
        ]
        .into_iter()
        .map(|(doctor, sales)| record(doctor, "A", sales))
        .collect();

        let Report::Data(rows) = top_doctors(&records, TOP_DOCTORS) else {
            panic!("expected data");
        };
        let names: Vec<_> = rows.iter().map(|row| row.doctor_name.as_str()).collect();
        assert_eq!(names, vec!["d90", "d70", "d60", "d50", "d30"]);
        assert!(!names.contains(&"d10"));
    }

    #[test]
    fn top_doctors_ties_keep_first_appearance() {
        let records = vec![
            record("late", "A", 5.0),
            record("early", "A", 5.0),
            record("best", "A", 9.0),
        ];
        let Report::Data(rows) = top_doctors(&records, 2) else {
            panic!("expected data");
        };
        assert_eq!(rows[0].doctor_name, "best");
        assert_eq!(rows[1].doctor_name, "late");
    }

    #[test]
    fn scatter_keeps_every_record() {
        let mut first = record("a", "A", 1.0);
        first.discount = Some(0.1);
        first.quantity = Some(2);
        let records = vec![first, record("a", "A", 2.0)];
        let Report::Data(points) = product_scatter(&records) else {
            panic!("expected data");
        };
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].discount, Some(0.1));
        assert_eq!(points[1].quantity, None);
    }

    #[test]
    fn state_series_omits_gaps_and_orders_by_total() {
        let records = vec![
            with_activity(record("a", "A", 100.0), "Dentistry", "Veneto"),
            with_activity(record("b", "A", 50.0), "Surgery", "Veneto"),
            with_activity(record("c", "A", 20.0), "Dentistry", "Lazio"),
            with_activity(record("d", "A", 40.0), "Dentistry", "Lazio"),
        ];
        let Report::Data(stacked) = state_series(&records) else {
            panic!("expected data");
        };
        assert_eq!(stacked.categories, vec!["Dentistry", "Surgery"]);

        assert_eq!(stacked.series[0].state, "Lazio");
        assert_eq!(
            stacked.series[0].points,
            vec![SeriesPoint {
                field_of_activity: "Dentistry".to_string(),
                mean_sales: 30.0,
            }]
        );
        assert_eq!(stacked.series[1].state, "Veneto");
        assert_eq!(stacked.series[1].points.len(), 2);
    }

    #[test]
    fn summary_on_empty_snapshot_is_zero() {
        let summary = summary(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.doctor_count, 0);
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.mean_profit, 0.0);
    }

    #[test]
    fn summary_counts_distinct_values() {
        let mut first = record("a", "A", 10.004);
        first.profit = 1.0;
        let mut second = record("a", "A", 5.0);
        second.profit = 2.0;
        second.product_name = "Crown".to_string();
        let mut third = record("b", "A", 5.0);
        third.profit = 2.0;

        let summary = summary(&[first, second, third]);
        assert_eq!(summary.doctor_count, 2);
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.total_sales, 20.0);
        assert_eq!(summary.mean_profit, 1.67);
    }

    #[test]
    fn empty_snapshot_has_no_data_everywhere() {
        let dashboard = Dashboard::from_records(&[]);
        assert!(dashboard.application_means.is_no_data());
        assert!(dashboard.activity_share.is_no_data());
        assert!(dashboard.top_doctors.is_no_data());
        assert!(dashboard.product_scatter.is_no_data());
        assert!(dashboard.state_series.is_no_data());
        assert_eq!(dashboard.summary, Summary::default());
    }
}
