//! Distribution of a shared day's cost across simultaneous technicians.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::services::cost_aggregator::sum_costs;
use crate::types::{from_cents, CategoryCosts, Cents, TrackingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualizationMode {
    /// Every technician carries the full shared cost
    #[default]
    Replicate,
    /// Each category divided evenly, rounded to the nearest cent
    Split,
}

impl EqualizationMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            EqualizationMode::Replicate => "replicate",
            EqualizationMode::Split => "split",
        }
    }
}

impl FromStr for EqualizationMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replicate" => Ok(EqualizationMode::Replicate),
            "split" => Ok(EqualizationMode::Split),
            other => Err(PlannerError::invalid(format!("unknown equalization mode '{other}'"))),
        }
    }
}

/// Per-technician share of a day's costs.
///
/// `Split` rounds each category on its own, so the shares may not add back up
/// to the original total exactly.
pub fn equalize(costs: &CategoryCosts, mode: EqualizationMode, technician_count: usize) -> CategoryCosts {
    match mode {
        EqualizationMode::Replicate => *costs,
        EqualizationMode::Split => {
            let divisor = technician_count.max(1) as f64;
            CategoryCosts::from_fn(|category| (costs.get(category) as f64 / divisor).round() as Cents)
        }
    }
}

/// Outcome of equalizing one day's costs, with totals in cents and major units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualizationReport {
    pub mode: EqualizationMode,
    pub technicians: usize,
    pub share: CategoryCosts,
    pub original_total_cents: Cents,
    pub share_total_cents: Cents,
    pub original_total: f64,
    pub share_total: f64,
}

impl EqualizationReport {
    pub fn new(costs: &CategoryCosts, mode: EqualizationMode, technician_count: usize) -> Self {
        let share = equalize(costs, mode, technician_count);
        let original_total_cents = sum_costs(costs);
        let share_total_cents = sum_costs(&share);
        Self {
            mode,
            technicians: technician_count,
            share,
            original_total_cents,
            share_total_cents,
            original_total: from_cents(original_total_cents),
            share_total: from_cents(share_total_cents),
        }
    }
}

/// Apply equalization to a record using its own technician count.
pub fn equalize_record(record: &TrackingRecord, mode: EqualizationMode) -> TrackingRecord {
    TrackingRecord {
        costs_by_category: equalize(&record.costs_by_category, mode, record.technician_ids.len()),
        ..record.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CostCategory;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn shared_day() -> CategoryCosts {
        CategoryCosts {
            tickets: 10001,
            local_transport: 3000,
            hotel: 18000,
            food: 9500,
            hydration: 500,
            allowance_extra: 0,
        }
    }

    #[test]
    fn test_replicate_is_identity() {
        assert_eq!(equalize(&shared_day(), EqualizationMode::Replicate, 3), shared_day());
    }

    #[test]
    fn test_split_rounds_each_category() {
        let split = equalize(&shared_day(), EqualizationMode::Split, 2);
        assert_eq!(split.tickets, 5001); // 5000.5 rounds up
        assert_eq!(split.hotel, 9000);
        assert_eq!(split.hydration, 250);
        assert_eq!(split.allowance_extra, 0);
    }

    #[test]
    fn test_split_zero_technicians_divides_by_one() {
        assert_eq!(equalize(&shared_day(), EqualizationMode::Split, 0), shared_day());
    }

    #[test]
    fn test_equalize_record_uses_technician_count() {
        let record = TrackingRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            unit_id: Some("U1".to_string()),
            technician_ids: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            item_count: 90,
            costs_by_category: CategoryCosts { hotel: 30000, ..CategoryCosts::default() },
        };
        let shared = equalize_record(&record, EqualizationMode::Split);
        assert_eq!(shared.costs_by_category.hotel, 10000);
        assert_eq!(shared.item_count, 90);
        assert_eq!(shared.technician_ids, record.technician_ids);
    }

    #[test]
    fn test_report_totals_in_cents_and_major_units() {
        let report = EqualizationReport::new(&shared_day(), EqualizationMode::Split, 2);
        assert_eq!(report.original_total_cents, 41001);
        assert_eq!(report.share_total_cents, 5001 + 1500 + 9000 + 4750 + 250);
        assert!((report.original_total - 410.01).abs() < 1e-9);
        assert!((report.share_total - 205.01).abs() < 1e-9);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "split");
        assert_eq!(json["technicians"], 2);
        assert_eq!(json["shareTotalCents"], 20501);
        assert_eq!(json["share"]["hotel"], 9000);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("split".parse::<EqualizationMode>().unwrap(), EqualizationMode::Split);
        assert_eq!(" Replicate ".parse::<EqualizationMode>().unwrap(), EqualizationMode::Replicate);
        assert!("halve".parse::<EqualizationMode>().is_err());
        assert_eq!(serde_json::to_string(&EqualizationMode::Split).unwrap(), "\"split\"");
    }

    fn arb_costs() -> impl Strategy<Value = CategoryCosts> {
        proptest::collection::vec(0i64..1_000_000, 6).prop_map(|v| CategoryCosts::from_fn(|c| v[c as usize]))
    }

    proptest! {
        #[test]
        fn prop_split_drift_within_rounding_slack(costs in arb_costs(), n in 1usize..12) {
            let share = equalize(&costs, EqualizationMode::Split, n);
            let n_cents = n as i64;
            for category in CostCategory::ALL {
                // Each category drifts by at most half a cent per technician.
                let drift = (share.get(category) * n_cents - costs.get(category)).abs();
                prop_assert!(drift * 2 <= n_cents);
            }
            let total_drift = (sum_costs(&share) * n_cents - sum_costs(&costs)).abs();
            prop_assert!(total_drift <= 3 * n_cents);
        }

        #[test]
        fn prop_replicate_identity(costs in arb_costs(), n in 0usize..12) {
            prop_assert_eq!(equalize(&costs, EqualizationMode::Replicate, n), costs);
        }
    }
}
