//! Cost summaries over generated schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::calendar::days_between;
use crate::types::{
    cost_per_item, CategoryCosts, Cents, DayCosts, DayType, Schedule, TrackingRecord,
};

/// Totals for one technician's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCostSummary {
    pub technician_name: String,
    pub by_category: DayCosts,
    pub total_cost_cents: Cents,
    pub total_items: i64,
    pub cost_per_item_cents: f64,
    pub travel_days: usize,
    pub inventory_days: usize,
    pub rest_days: usize,
    pub return_days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Calendar days from departure to return, inclusive
    pub span_days: i64,
    /// Per visited city, in visiting order (the return leg is only in the totals)
    pub cities: Vec<CityCostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCostSummary {
    pub city: String,
    pub work_days: usize,
    pub items: i64,
    pub costs: DayCosts,
    pub total_cost_cents: Cents,
}

/// Combined totals for several technicians travelling in parallel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCostSummary {
    pub technicians: Vec<ScheduleCostSummary>,
    pub by_category: DayCosts,
    pub total_cost_cents: Cents,
    pub total_items: i64,
    pub cost_per_item_cents: f64,
    /// Sum of every technician's scheduled days
    pub technician_days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Day plans for several technicians together with their combined totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlan {
    pub schedules: Vec<Schedule>,
    pub team_summary: TeamCostSummary,
}

pub fn summarize_schedule(schedule: &Schedule) -> ScheduleCostSummary {
    let mut by_category = DayCosts::default();
    let mut cities: Vec<CityCostSummary> = Vec::new();
    let (mut travel_days, mut inventory_days, mut rest_days, mut return_days) = (0, 0, 0, 0);

    for day in &schedule.days {
        by_category.add(&day.costs);

        match day.day_type {
            DayType::Travel => travel_days += 1,
            DayType::InventoryWork => inventory_days += 1,
            DayType::Rest => rest_days += 1,
            DayType::Return => {
                return_days += 1;
                continue;
            }
        }

        let pos = match cities.iter().position(|c| c.city == day.city_label) {
            Some(pos) => pos,
            None => {
                cities.push(CityCostSummary {
                    city: day.city_label.clone(),
                    work_days: 0,
                    items: 0,
                    costs: DayCosts::default(),
                    total_cost_cents: 0,
                });
                cities.len() - 1
            }
        };
        let entry = &mut cities[pos];
        if day.day_type == DayType::InventoryWork {
            entry.work_days += 1;
            entry.items = entry.items.saturating_add(day.items_processed);
        }
        entry.costs.add(&day.costs);
        entry.total_cost_cents = entry.costs.total();
    }

    let total_cost_cents = by_category.total();
    let first_date = schedule.first_date();
    let last_date = schedule.last_date();

    ScheduleCostSummary {
        technician_name: schedule.technician_name.clone(),
        by_category,
        total_cost_cents,
        total_items: schedule.total_items,
        cost_per_item_cents: cost_per_item(total_cost_cents, schedule.total_items),
        travel_days,
        inventory_days,
        rest_days,
        return_days,
        first_date,
        last_date,
        span_days: match (first_date, last_date) {
            (Some(first), Some(last)) => days_between(first, last),
            _ => 0,
        },
        cities,
    }
}

pub fn summarize_team(schedules: &[Schedule]) -> TeamCostSummary {
    let technicians: Vec<ScheduleCostSummary> = schedules.iter().map(summarize_schedule).collect();

    let mut by_category = DayCosts::default();
    for summary in &technicians {
        by_category.add(&summary.by_category);
    }
    let total_cost_cents = by_category.total();
    let total_items = technicians.iter().map(|t| t.total_items).fold(0, i64::saturating_add);

    debug!("Team summary over {} technician(s): {} cents", technicians.len(), total_cost_cents);

    TeamCostSummary {
        by_category,
        total_cost_cents,
        total_items,
        cost_per_item_cents: cost_per_item(total_cost_cents, total_items),
        technician_days: schedules.iter().map(|s| s.total_days).sum(),
        first_date: technicians.iter().filter_map(|t| t.first_date).min(),
        last_date: technicians.iter().filter_map(|t| t.last_date).max(),
        technicians,
    }
}

pub fn team_plan(schedules: &[Schedule]) -> TeamPlan {
    TeamPlan {
        schedules: schedules.to_vec(),
        team_summary: summarize_team(schedules),
    }
}

/// Seed planned tracking records from a schedule, one per non-rest day.
///
/// Day costs map onto tracking categories: travel/return transport to
/// `tickets`, work-day transport to `local-transport`, lodging to `hotel`,
/// per diem to `food` and the technician fee to `allowance-extra`. The city
/// label becomes the unit id.
pub fn planned_records_from_schedule(schedule: &Schedule, technician_id: &str) -> Vec<TrackingRecord> {
    schedule
        .days
        .iter()
        .filter(|d| d.day_type != DayType::Rest)
        .map(|day| {
            let mut costs = CategoryCosts {
                hotel: day.costs.lodging_cents,
                food: day.costs.per_diem_cents,
                allowance_extra: day.costs.technician_fee_cents,
                ..CategoryCosts::default()
            };
            if day.day_type == DayType::InventoryWork {
                costs.local_transport = day.costs.transport_cents;
            } else {
                costs.tickets = day.costs.transport_cents;
            }

            TrackingRecord {
                date: day.date,
                unit_id: Some(day.city_label.clone()),
                technician_ids: vec![technician_id.to_string()],
                item_count: day.items_processed,
                costs_by_category: costs,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cost_aggregator::sum_costs;
    use crate::services::schedule_builder::build_schedule;
    use crate::types::{CityStop, InventoryUnit, Itinerary, PerDiem, ScheduleAssumptions};

    fn schedule(name: &str, start: NaiveDate, items: i64) -> Schedule {
        let itinerary = Itinerary {
            technician_name: name.to_string(),
            origin_city: "Curitiba".to_string(),
            start_date: start,
            daily_productivity: 150,
            daily_technician_rate_cents: 25000,
            per_diem: PerDiem {
                breakfast_cents: 1500,
                lunch_cents: 3500,
                dinner_cents: 4000,
                water_cents: 500,
            },
            work_weekends: false,
            cities: vec![CityStop {
                city: "Joinville".to_string(),
                intercity_transport_cost_cents: Some(12000),
                hotel_name: None,
                hotel_nightly_rate_cents: 18000,
                local_transport_per_day_cents: 3000,
                units: vec![InventoryUnit {
                    name: "Loja 12".to_string(),
                    address: String::new(),
                    estimated_item_count: items,
                }],
            }],
            return_transport_cost_cents: Some(13000),
        };
        build_schedule(&itinerary, &ScheduleAssumptions::default()).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_summarize_single_city() {
        let summary = summarize_schedule(&schedule("Ana", monday(), 320));

        // 3 work days × (3000 + 18000 + 9500 + 25000) + 12000 travel + 13000 return
        assert_eq!(summary.by_category.transport_cents, 3 * 3000 + 12000 + 13000);
        assert_eq!(summary.by_category.lodging_cents, 3 * 18000);
        assert_eq!(summary.by_category.per_diem_cents, 3 * 9500);
        assert_eq!(summary.by_category.technician_fee_cents, 3 * 25000);
        assert_eq!(summary.total_cost_cents, 3 * 55500 + 25000);
        assert_eq!(summary.total_items, 320);
        assert!((summary.cost_per_item_cents - 191_500.0 / 320.0).abs() < 1e-9);
        assert_eq!((summary.travel_days, summary.inventory_days, summary.rest_days, summary.return_days), (1, 3, 0, 1));
        assert_eq!(summary.span_days, 5);

        assert_eq!(summary.cities.len(), 1);
        let city = &summary.cities[0];
        assert_eq!(city.city, "Joinville");
        assert_eq!(city.work_days, 3);
        assert_eq!(city.items, 320);
        // Travel into the city counts towards it; the return leg does not.
        assert_eq!(city.total_cost_cents, 3 * 55500 + 12000);
    }

    #[test]
    fn test_rest_days_counted_without_cost() {
        let thursday = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let summary = summarize_schedule(&schedule("Ana", thursday, 320));
        assert_eq!(summary.rest_days, 2);
        assert_eq!(summary.total_cost_cents, 3 * 55500 + 25000);
        assert_eq!(summary.span_days, 7);
    }

    #[test]
    fn test_summarize_team() {
        let a = schedule("Ana", monday(), 320);
        let b = schedule("Bruno", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 100);
        let team = summarize_team(&[a.clone(), b.clone()]);

        assert_eq!(team.technicians.len(), 2);
        assert_eq!(team.total_items, 420);
        assert_eq!(
            team.total_cost_cents,
            summarize_schedule(&a).total_cost_cents + summarize_schedule(&b).total_cost_cents
        );
        assert_eq!(team.technician_days, a.total_days + b.total_days);
        assert_eq!(team.first_date, Some(monday()));
        // Ana returns Friday, Bruno on Thursday.
        assert_eq!(team.last_date, a.last_date());
        assert!(b.last_date() < a.last_date());
    }

    #[test]
    fn test_team_plan_carries_schedules_and_summary() {
        let a = schedule("Ana", monday(), 320);
        let b = schedule("Bruno", monday(), 100);
        let plan = team_plan(&[a.clone(), b.clone()]);

        assert_eq!(plan.schedules, vec![a.clone(), b.clone()]);
        assert_eq!(plan.team_summary, summarize_team(&[a, b]));

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["schedules"].as_array().unwrap().len(), 2);
        assert_eq!(json["teamSummary"]["totalItems"], 420);
    }

    #[test]
    fn test_summarize_empty_team() {
        let team = summarize_team(&[]);
        assert_eq!(team.total_cost_cents, 0);
        assert_eq!(team.cost_per_item_cents, 0.0);
        assert!(team.first_date.is_none());
    }

    #[test]
    fn test_planned_records_preserve_cost_and_items() {
        let s = schedule("Ana", NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(), 320);
        let records = planned_records_from_schedule(&s, "tech-ana");

        // Rest days are dropped.
        assert_eq!(records.len(), s.days.len() - 2);
        assert_eq!(records.iter().map(|r| r.item_count).sum::<i64>(), 320);
        assert_eq!(
            records.iter().map(|r| sum_costs(&r.costs_by_category)).sum::<i64>(),
            summarize_schedule(&s).total_cost_cents
        );

        let travel = &records[0];
        assert_eq!(travel.costs_by_category.tickets, 12000);
        assert_eq!(travel.technician_ids, vec!["tech-ana".to_string()]);
        let work = &records[1];
        assert_eq!(work.costs_by_category.local_transport, 3000);
        assert_eq!(work.costs_by_category.tickets, 0);
        assert_eq!(work.unit_id.as_deref(), Some("Joinville"));
    }
}
