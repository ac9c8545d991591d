//! Input validation for the schedule builder.
//!
//! The builder relies on these checks to avoid dividing by zero productivity
//! or producing plans for cities with nothing to count.

use crate::defaults::MAX_INVENTORY_DAYS;
use crate::error::{PlannerError, PlannerResult};
use crate::types::{Cents, Itinerary, ScheduleAssumptions};

/// Work days needed to count `total_items` at `daily_productivity`, rounded up.
/// `daily_productivity` must be positive.
pub fn days_needed(total_items: i64, daily_productivity: i64) -> i64 {
    total_items / daily_productivity + i64::from(total_items % daily_productivity != 0)
}

pub fn validate_itinerary(itinerary: &Itinerary) -> PlannerResult<()> {
    if itinerary.origin_city.trim().is_empty() {
        return Err(PlannerError::invalid("origin city is required"));
    }
    if itinerary.cities.is_empty() {
        return Err(PlannerError::invalid("itinerary must contain at least one city"));
    }
    if itinerary.daily_productivity <= 0 {
        return Err(PlannerError::invalid(format!(
            "daily productivity must be positive (got {})",
            itinerary.daily_productivity
        )));
    }

    non_negative("daily technician rate", itinerary.daily_technician_rate_cents)?;
    non_negative("per diem breakfast", itinerary.per_diem.breakfast_cents)?;
    non_negative("per diem lunch", itinerary.per_diem.lunch_cents)?;
    non_negative("per diem dinner", itinerary.per_diem.dinner_cents)?;
    non_negative("per diem water", itinerary.per_diem.water_cents)?;
    if let Some(cost) = itinerary.return_transport_cost_cents {
        non_negative("return transport cost", cost)?;
    }

    let mut work_days: i64 = 0;
    for (idx, city) in itinerary.cities.iter().enumerate() {
        let label = if city.city.trim().is_empty() {
            format!("city #{}", idx + 1)
        } else {
            city.city.clone()
        };

        if city.units.is_empty() {
            return Err(PlannerError::invalid(format!("{label}: at least one unit is required")));
        }
        if let Some(cost) = city.intercity_transport_cost_cents {
            non_negative(&format!("{label}: intercity transport cost"), cost)?;
        }
        non_negative(&format!("{label}: hotel nightly rate"), city.hotel_nightly_rate_cents)?;
        non_negative(&format!("{label}: local transport per day"), city.local_transport_per_day_cents)?;

        for unit in &city.units {
            if unit.estimated_item_count < 0 {
                return Err(PlannerError::invalid(format!(
                    "{label}: unit '{}' has a negative item count ({})",
                    unit.name, unit.estimated_item_count
                )));
            }
        }

        let items = city
            .checked_total_items()
            .ok_or_else(|| PlannerError::invalid(format!("{label}: total item count is too large")))?;
        work_days = work_days.saturating_add(days_needed(items, itinerary.daily_productivity));
        if work_days > MAX_INVENTORY_DAYS {
            return Err(PlannerError::invalid(format!(
                "itinerary needs more than {MAX_INVENTORY_DAYS} inventory days at {} items/day",
                itinerary.daily_productivity
            )));
        }
    }

    Ok(())
}

pub fn validate_assumptions(assumptions: &ScheduleAssumptions) -> PlannerResult<()> {
    if !assumptions.daily_working_hours.is_finite() || assumptions.daily_working_hours <= 0.0 {
        return Err(PlannerError::invalid("daily working hours must be a positive number"));
    }
    if !assumptions.travel_hours_per_leg.is_finite() || assumptions.travel_hours_per_leg < 0.0 {
        return Err(PlannerError::invalid("travel hours per leg must not be negative"));
    }
    Ok(())
}

fn non_negative(field: &str, value: Cents) -> PlannerResult<()> {
    if value < 0 {
        return Err(PlannerError::invalid(format!("{field} must not be negative (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CityStop, InventoryUnit, PerDiem};
    use chrono::NaiveDate;

    fn itinerary() -> Itinerary {
        Itinerary {
            technician_name: "Ana".to_string(),
            origin_city: "Curitiba".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            daily_productivity: 150,
            daily_technician_rate_cents: 25000,
            per_diem: PerDiem::default(),
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
                    estimated_item_count: 320,
                }],
            }],
            return_transport_cost_cents: None,
        }
    }

    #[test]
    fn test_valid_itinerary_passes() {
        assert!(validate_itinerary(&itinerary()).is_ok());
    }

    #[test]
    fn test_rejects_empty_itinerary() {
        let mut it = itinerary();
        it.cities.clear();
        let err = validate_itinerary(&it).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("at least one city"));
    }

    #[test]
    fn test_rejects_city_without_units() {
        let mut it = itinerary();
        it.cities[0].units.clear();
        let err = validate_itinerary(&it).unwrap_err();
        assert!(err.to_string().contains("Joinville"));
    }

    #[test]
    fn test_rejects_non_positive_productivity() {
        for productivity in [0, -10] {
            let mut it = itinerary();
            it.daily_productivity = productivity;
            assert!(validate_itinerary(&it).unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn test_rejects_negative_currency() {
        let mut it = itinerary();
        it.cities[0].hotel_nightly_rate_cents = -1;
        assert!(validate_itinerary(&it).unwrap_err().to_string().contains("hotel nightly rate"));

        let mut it = itinerary();
        it.return_transport_cost_cents = Some(-100);
        assert!(validate_itinerary(&it).is_err());

        let mut it = itinerary();
        it.per_diem.water_cents = -5;
        assert!(validate_itinerary(&it).is_err());
    }

    #[test]
    fn test_rejects_negative_item_count() {
        let mut it = itinerary();
        it.cities[0].units[0].estimated_item_count = -1;
        assert!(validate_itinerary(&it).unwrap_err().to_string().contains("Loja 12"));
    }

    #[test]
    fn test_zero_item_unit_is_allowed() {
        let mut it = itinerary();
        it.cities[0].units[0].estimated_item_count = 0;
        assert!(validate_itinerary(&it).is_ok());
    }

    #[test]
    fn test_days_needed_rounds_up() {
        assert_eq!(days_needed(320, 150), 3);
        assert_eq!(days_needed(300, 150), 2);
        assert_eq!(days_needed(0, 150), 0);
        assert_eq!(days_needed(i64::MAX, 2), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_rejects_item_count_sum_overflow() {
        let mut it = itinerary();
        it.cities[0].units[0].estimated_item_count = i64::MAX;
        it.cities[0].units.push(InventoryUnit {
            name: "Loja 13".to_string(),
            address: String::new(),
            estimated_item_count: 1,
        });
        let err = validate_itinerary(&it).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_rejects_itinerary_beyond_day_bound() {
        let mut it = itinerary();
        it.daily_productivity = 1;
        it.cities[0].units[0].estimated_item_count = 1_000_000_000;
        assert!(validate_itinerary(&it).unwrap_err().to_string().contains("inventory days"));

        let mut it = itinerary();
        it.daily_productivity = 2;
        it.cities[0].units[0].estimated_item_count = i64::MAX;
        assert!(validate_itinerary(&it).unwrap_err().is_invalid_input());

        let mut it = itinerary();
        it.daily_productivity = 1;
        it.cities[0].units[0].estimated_item_count = MAX_INVENTORY_DAYS;
        assert!(validate_itinerary(&it).is_ok());
    }

    #[test]
    fn test_assumptions_validation() {
        assert!(validate_assumptions(&ScheduleAssumptions::default()).is_ok());
        let bad_hours = ScheduleAssumptions { daily_working_hours: 0.0, travel_hours_per_leg: 2.0 };
        assert!(validate_assumptions(&bad_hours).is_err());
        let bad_travel = ScheduleAssumptions { daily_working_hours: 8.0, travel_hours_per_leg: -1.0 };
        assert!(validate_assumptions(&bad_travel).is_err());
        let nan = ScheduleAssumptions { daily_working_hours: f64::NAN, travel_hours_per_leg: 2.0 };
        assert!(validate_assumptions(&nan).is_err());
    }
}
