//! Planned vs. actual cost aggregation for execution tracking.
//!
//! All functions here are total: missing categories, negative values and
//! missing ids are read as zero or as the "—" placeholder, never as errors.
//! Sums saturate at `i64::MAX`. Records are never mutated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::defaults::{MISSING_ID, NO_BASELINE_DEVIATION_PCT};
use crate::types::{cost_per_item, CategoryCosts, Cents, CostCategory, TrackingRecord};

/// How deviation is reported when there is no planned baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationPolicy {
    /// Deviation reported when planned is 0 and actual is positive
    pub no_baseline_pct: f64,
}

impl Default for DeviationPolicy {
    fn default() -> Self {
        Self {
            no_baseline_pct: NO_BASELINE_DEVIATION_PCT,
        }
    }
}

impl DeviationPolicy {
    pub fn new(no_baseline_pct: f64) -> Self {
        Self { no_baseline_pct }
    }

    /// `(actual - planned) / planned * 100`, or 0 when both are zero, or the
    /// no-baseline sentinel when only actual is positive.
    pub fn deviation_pct(&self, planned: i64, actual: i64) -> f64 {
        if planned > 0 {
            (actual as f64 - planned as f64) / planned as f64 * 100.0
        } else if actual <= 0 {
            0.0
        } else {
            self.no_baseline_pct
        }
    }
}

/// Grand totals over planned and actual records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    pub planned_cost_cents: Cents,
    pub actual_cost_cents: Cents,
    pub planned_items: i64,
    pub actual_items: i64,
    pub deviation_pct: f64,
    pub cost_per_item_planned: f64,
    pub cost_per_item_actual: f64,
    /// Actual items as a percentage of planned items
    pub items_progress_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub category: CostCategory,
    pub planned_cents: Cents,
    pub actual_cents: Cents,
    pub deviation_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianUnitRow {
    pub unit_id: String,
    pub technician_id: String,
    pub planned_cost_cents: Cents,
    pub actual_cost_cents: Cents,
    pub planned_days: usize,
    pub actual_days: usize,
    pub planned_items: i64,
    pub actual_items: i64,
    pub deviation_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateComparison {
    pub date: NaiveDate,
    pub planned_cost_cents: Cents,
    pub actual_cost_cents: Cents,
    pub planned_items: i64,
    pub actual_items: i64,
    pub deviation_pct: f64,
}

/// Sum of the six categories with missing or negative values read as 0.
pub fn sum_costs(costs: &CategoryCosts) -> Cents {
    CostCategory::ALL
        .iter()
        .map(|c| costs.clamped(*c))
        .fold(0, Cents::saturating_add)
}

fn total_cost(records: &[TrackingRecord]) -> Cents {
    records
        .iter()
        .map(|r| sum_costs(&r.costs_by_category))
        .fold(0, Cents::saturating_add)
}

fn total_items(records: &[TrackingRecord]) -> i64 {
    records.iter().map(TrackingRecord::items).fold(0, i64::saturating_add)
}

fn category_total(records: &[TrackingRecord], category: CostCategory) -> Cents {
    records
        .iter()
        .map(|r| r.costs_by_category.clamped(category))
        .fold(0, Cents::saturating_add)
}

pub fn aggregate_totals(
    planned: &[TrackingRecord],
    actual: &[TrackingRecord],
    policy: &DeviationPolicy,
) -> TotalsSummary {
    let planned_cost_cents = total_cost(planned);
    let actual_cost_cents = total_cost(actual);
    let planned_items = total_items(planned);
    let actual_items = total_items(actual);

    TotalsSummary {
        planned_cost_cents,
        actual_cost_cents,
        planned_items,
        actual_items,
        deviation_pct: policy.deviation_pct(planned_cost_cents, actual_cost_cents),
        cost_per_item_planned: cost_per_item(planned_cost_cents, planned_items),
        cost_per_item_actual: cost_per_item(actual_cost_cents, actual_items),
        items_progress_pct: if planned_items > 0 {
            actual_items as f64 / planned_items as f64 * 100.0
        } else {
            0.0
        },
    }
}

pub fn aggregate_by_category(
    planned: &[TrackingRecord],
    actual: &[TrackingRecord],
    policy: &DeviationPolicy,
) -> Vec<CategoryComparison> {
    CostCategory::ALL
        .iter()
        .map(|&category| {
            let planned_cents = category_total(planned, category);
            let actual_cents = category_total(actual, category);
            CategoryComparison {
                category,
                planned_cents,
                actual_cents,
                deviation_pct: policy.deviation_pct(planned_cents, actual_cents),
            }
        })
        .collect()
}

#[derive(Default)]
struct Bucket {
    planned_cost: Cents,
    actual_cost: Cents,
    planned_days: usize,
    actual_days: usize,
    planned_items: i64,
    actual_items: i64,
}

impl Bucket {
    fn add(&mut self, record: &TrackingRecord, is_actual: bool) {
        let cost = sum_costs(&record.costs_by_category);
        if is_actual {
            self.actual_cost = self.actual_cost.saturating_add(cost);
            self.actual_days += 1;
            self.actual_items = self.actual_items.saturating_add(record.items());
        } else {
            self.planned_cost = self.planned_cost.saturating_add(cost);
            self.planned_days += 1;
            self.planned_items = self.planned_items.saturating_add(record.items());
        }
    }
}

fn unit_key(record: &TrackingRecord) -> String {
    match record.unit_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => MISSING_ID.to_string(),
    }
}

fn technician_keys(record: &TrackingRecord) -> Vec<String> {
    let ids: Vec<String> = record
        .technician_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        vec![MISSING_ID.to_string()]
    } else {
        ids
    }
}

/// Group by unit × technician. A record listing several technicians adds its
/// full cost, day and items to each of their buckets.
pub fn aggregate_by_technician_unit(
    planned: &[TrackingRecord],
    actual: &[TrackingRecord],
    policy: &DeviationPolicy,
) -> Vec<TechnicianUnitRow> {
    let mut buckets: BTreeMap<(String, String), Bucket> = BTreeMap::new();

    for (records, is_actual) in [(planned, false), (actual, true)] {
        for record in records {
            let unit = unit_key(record);
            for technician in technician_keys(record) {
                buckets
                    .entry((unit.clone(), technician))
                    .or_default()
                    .add(record, is_actual);
            }
        }
    }

    let unplanned = buckets.values().filter(|b| b.planned_days == 0 && b.actual_days > 0).count();
    if unplanned > 0 {
        warn!("{} technician/unit group(s) have actual entries without a plan", unplanned);
    }

    buckets
        .into_iter()
        .map(|((unit_id, technician_id), b)| TechnicianUnitRow {
            unit_id,
            technician_id,
            planned_cost_cents: b.planned_cost,
            actual_cost_cents: b.actual_cost,
            planned_days: b.planned_days,
            actual_days: b.actual_days,
            planned_items: b.planned_items,
            actual_items: b.actual_items,
            deviation_pct: policy.deviation_pct(b.planned_cost, b.actual_cost),
        })
        .collect()
}

/// Per-date comparison, ordered by date.
pub fn aggregate_by_date(
    planned: &[TrackingRecord],
    actual: &[TrackingRecord],
    policy: &DeviationPolicy,
) -> Vec<DateComparison> {
    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for (records, is_actual) in [(planned, false), (actual, true)] {
        for record in records {
            buckets.entry(record.date).or_default().add(record, is_actual);
        }
    }

    buckets
        .into_iter()
        .map(|(date, b)| DateComparison {
            date,
            planned_cost_cents: b.planned_cost,
            actual_cost_cents: b.actual_cost,
            planned_items: b.planned_items,
            actual_items: b.actual_items,
            deviation_pct: policy.deviation_pct(b.planned_cost, b.actual_cost),
        })
        .collect()
}
