//! Day-by-day trip schedule generation.
//!
//! Given a validated itinerary, this module walks the city stops in order and
//! emits one record per calendar day: a travel day into each city, as many
//! inventory days as the city's item volume needs at the technician's daily
//! productivity, weekend rest days between them, and a final return day.
//! The walk is pure: the same itinerary always yields the same plan.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{PlannerError, PlannerResult};
use crate::services::calendar::next_work_day;
use crate::services::validation::{days_needed, validate_assumptions, validate_itinerary};
use crate::types::{
    CityStop, DayCosts, DayRecord, DayType, Itinerary, Schedule, ScheduleAssumptions,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Appends day records while tracking the current date and location.
struct DayPlanWriter {
    cursor: NaiveDate,
    work_weekends: bool,
    location: String,
    days: Vec<DayRecord>,
}

impl DayPlanWriter {
    fn new(start: NaiveDate, work_weekends: bool, origin: &str) -> Self {
        Self {
            cursor: start,
            work_weekends,
            location: origin.to_string(),
            days: Vec::new(),
        }
    }

    fn push(&mut self, day_type: DayType, city: &str, detail_text: String, items: i64, costs: DayCosts) {
        self.location = city.to_string();
        self.days.push(DayRecord {
            date: self.cursor,
            day_type,
            city_label: city.to_string(),
            detail_text,
            items_processed: items,
            costs,
        });
    }

    /// Move to the next work day, filling skipped weekend dates with rest days.
    fn advance(&mut self) -> PlannerResult<()> {
        let advance = next_work_day(self.cursor, self.work_weekends).ok_or_else(|| {
            PlannerError::invalid(format!("schedule runs past the last representable date ({})", self.cursor))
        })?;
        for date in advance.skipped {
            self.days.push(DayRecord {
                date,
                day_type: DayType::Rest,
                city_label: self.location.clone(),
                detail_text: format!("Weekend rest in {}", self.location),
                items_processed: 0,
                costs: DayCosts::default(),
            });
        }
        self.cursor = advance.date;
        Ok(())
    }

    fn finish(self) -> Vec<DayRecord> {
        self.days
    }
}

fn work_day_costs(itinerary: &Itinerary, city: &CityStop) -> DayCosts {
    DayCosts {
        transport_cents: city.local_transport_per_day_cents,
        lodging_cents: city.hotel_nightly_rate_cents,
        per_diem_cents: itinerary.per_diem.total(),
        technician_fee_cents: itinerary.daily_technician_rate_cents,
    }
}

fn inventory_detail(city: &CityStop, day: i64, of: i64, items: i64) -> String {
    let units = city
        .units
        .iter()
        .map(|u| u.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match &city.hotel_name {
        Some(hotel) if !hotel.is_empty() => {
            format!("Inventory day {day}/{of}: {units} ({items} items), staying at {hotel}")
        }
        _ => format!("Inventory day {day}/{of}: {units} ({items} items)"),
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Build the day plan for an itinerary.
///
/// Fails with `InvalidInput` for itineraries the walk cannot handle (no
/// cities, a city without units, non-positive productivity, negative money or
/// item counts, more inventory days than `MAX_INVENTORY_DAYS`, or a plan that
/// would run past the last representable date). The hour-based `assumptions` are validated and carried into
/// the result but do not change how many days are planned.
pub fn build_schedule(itinerary: &Itinerary, assumptions: &ScheduleAssumptions) -> PlannerResult<Schedule> {
    validate_itinerary(itinerary)?;
    validate_assumptions(assumptions)?;

    let productivity = itinerary.daily_productivity;
    let mut writer = DayPlanWriter::new(itinerary.start_date, itinerary.work_weekends, &itinerary.origin_city);

    // The first travel day stays on the start date even when it is a weekend.
    let first = &itinerary.cities[0];
    writer.push(
        DayType::Travel,
        &first.city,
        format!("Travel from {} to {}", itinerary.origin_city, first.city),
        0,
        DayCosts::transport_only(first.intercity_transport_cost_cents.unwrap_or(0)),
    );
    writer.advance()?;

    for (idx, city) in itinerary.cities.iter().enumerate() {
        let total_items = city.total_items();
        let needed = days_needed(total_items, productivity);
        let costs = work_day_costs(itinerary, city);

        debug!(
            "City {} ({}): {} items over {} day(s) at {}/day",
            idx + 1,
            city.city,
            total_items,
            needed,
            productivity
        );

        for k in 0..needed {
            let items = productivity.min(total_items - k * productivity);
            writer.push(
                DayType::InventoryWork,
                &city.city,
                inventory_detail(city, k + 1, needed, items),
                items,
                costs,
            );
            writer.advance()?;
        }

        if let Some(next) = itinerary.cities.get(idx + 1) {
            writer.push(
                DayType::Travel,
                &next.city,
                format!("Travel from {} to {}", city.city, next.city),
                0,
                DayCosts::transport_only(next.intercity_transport_cost_cents.unwrap_or(0)),
            );
            writer.advance()?;
        }
    }

    writer.push(
        DayType::Return,
        &itinerary.origin_city,
        format!("Return to {}", itinerary.origin_city),
        0,
        DayCosts::transport_only(itinerary.return_transport_cost_cents.unwrap_or(0)),
    );

    let mut days = writer.finish();
    days.sort_by_key(|d| d.date);

    let total_items = days
        .iter()
        .filter(|d| d.day_type == DayType::InventoryWork)
        .map(|d| d.items_processed)
        .fold(0, i64::saturating_add);

    info!(
        "Schedule for {} built: {} day(s), {} item(s) across {} city(ies)",
        itinerary.technician_name,
        days.len(),
        total_items,
        itinerary.cities.len()
    );

    Ok(Schedule {
        technician_name: itinerary.technician_name.clone(),
        origin_city: itinerary.origin_city.clone(),
        total_days: days.len(),
        total_items,
        days,
        assumptions: *assumptions,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
