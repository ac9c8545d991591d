//! Itinerary types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::{to_cents, Cents};
use crate::defaults::{DEFAULT_DAILY_WORKING_HOURS, DEFAULT_TRAVEL_HOURS_PER_LEG};

/// A technician's trip plan, in cents. Immutable for the duration of a schedule run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub technician_name: String,
    pub origin_city: String,
    pub start_date: NaiveDate,
    /// Items one technician counts per work day
    pub daily_productivity: i64,
    pub daily_technician_rate_cents: Cents,
    pub per_diem: PerDiem,
    #[serde(default)]
    pub work_weekends: bool,
    /// Ordered city stops
    pub cities: Vec<CityStop>,
    /// Final leg back to the origin
    pub return_transport_cost_cents: Option<Cents>,
}

impl Itinerary {
    /// Saturates at `i64::MAX`; validation rejects itineraries that get there.
    pub fn total_estimated_items(&self) -> i64 {
        self.cities.iter().map(CityStop::total_items).fold(0, i64::saturating_add)
    }
}

/// Daily meal/hydration allowance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerDiem {
    #[serde(default)]
    pub breakfast_cents: Cents,
    #[serde(default)]
    pub lunch_cents: Cents,
    #[serde(default)]
    pub dinner_cents: Cents,
    #[serde(default)]
    pub water_cents: Cents,
}

impl PerDiem {
    pub fn total(&self) -> Cents {
        [self.breakfast_cents, self.lunch_cents, self.dinner_cents, self.water_cents]
            .into_iter()
            .fold(0, Cents::saturating_add)
    }
}

/// One visited city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStop {
    pub city: String,
    /// Cost to reach this city from the previous stop (or the origin)
    pub intercity_transport_cost_cents: Option<Cents>,
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub hotel_nightly_rate_cents: Cents,
    #[serde(default)]
    pub local_transport_per_day_cents: Cents,
    pub units: Vec<InventoryUnit>,
}

impl CityStop {
    /// Saturating sum of unit item counts
    pub fn total_items(&self) -> i64 {
        self.checked_total_items().unwrap_or(i64::MAX)
    }

    /// Sum of unit item counts, `None` on overflow
    pub fn checked_total_items(&self) -> Option<i64> {
        self.units
            .iter()
            .try_fold(0i64, |acc, u| acc.checked_add(u.estimated_item_count))
    }
}

/// A store/site whose items get counted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUnit {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub estimated_item_count: i64,
}

/// Working-day assumptions.
///
/// Hours are carried through to the schedule for display only; day counts are
/// driven by `Itinerary::daily_productivity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAssumptions {
    #[serde(default = "default_daily_working_hours")]
    pub daily_working_hours: f64,
    #[serde(default = "default_travel_hours_per_leg")]
    pub travel_hours_per_leg: f64,
}

fn default_daily_working_hours() -> f64 { DEFAULT_DAILY_WORKING_HOURS }

fn default_travel_hours_per_leg() -> f64 { DEFAULT_TRAVEL_HOURS_PER_LEG }

impl Default for ScheduleAssumptions {
    fn default() -> Self {
        Self {
            daily_working_hours: DEFAULT_DAILY_WORKING_HOURS,
            travel_hours_per_leg: DEFAULT_TRAVEL_HOURS_PER_LEG,
        }
    }
}

// ---------------------------------------------------------------------------
// Form DTOs (major currency units)
// ---------------------------------------------------------------------------

/// Itinerary as submitted by a planning form, with currency in major units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryForm {
    pub technician_name: String,
    pub origin_city: String,
    pub start_date: NaiveDate,
    pub daily_productivity: i64,
    #[serde(default)]
    pub daily_technician_rate: f64,
    #[serde(default)]
    pub per_diem: PerDiemForm,
    #[serde(default)]
    pub work_weekends: bool,
    pub cities: Vec<CityStopForm>,
    pub return_transport_cost: Option<f64>,
    /// Optional per-itinerary override of the configured assumptions
    pub assumptions: Option<ScheduleAssumptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerDiemForm {
    #[serde(default)]
    pub breakfast: f64,
    #[serde(default)]
    pub lunch: f64,
    #[serde(default)]
    pub dinner: f64,
    #[serde(default)]
    pub water: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStopForm {
    pub city: String,
    pub intercity_transport_cost: Option<f64>,
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub hotel_nightly_rate: f64,
    #[serde(default)]
    pub local_transport_per_day: f64,
    #[serde(default)]
    pub units: Vec<InventoryUnit>,
}

impl ItineraryForm {
    /// Normalize all currency to cents.
    pub fn into_itinerary(self) -> Itinerary {
        Itinerary {
            technician_name: self.technician_name,
            origin_city: self.origin_city,
            start_date: self.start_date,
            daily_productivity: self.daily_productivity,
            daily_technician_rate_cents: to_cents(self.daily_technician_rate),
            per_diem: PerDiem {
                breakfast_cents: to_cents(self.per_diem.breakfast),
                lunch_cents: to_cents(self.per_diem.lunch),
                dinner_cents: to_cents(self.per_diem.dinner),
                water_cents: to_cents(self.per_diem.water),
            },
            work_weekends: self.work_weekends,
            cities: self
                .cities
                .into_iter()
                .map(|c| CityStop {
                    city: c.city,
                    intercity_transport_cost_cents: c.intercity_transport_cost.map(to_cents),
                    hotel_name: c.hotel_name,
                    hotel_nightly_rate_cents: to_cents(c.hotel_nightly_rate),
                    local_transport_per_day_cents: to_cents(c.local_transport_per_day),
                    units: c.units,
                })
                .collect(),
            return_transport_cost_cents: self.return_transport_cost.map(to_cents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itinerary_form_deserialize_and_convert() {
        let json = r#"{
            "technicianName": "Ana",
            "originCity": "Curitiba",
            "startDate": "2024-03-04",
            "dailyProductivity": 150,
            "dailyTechnicianRate": 250.5,
            "perDiem": { "breakfast": 15, "lunch": 35.9, "dinner": 40, "water": 5.1 },
            "cities": [{
                "city": "Joinville",
                "intercityTransportCost": 120.0,
                "hotelName": "Hotel Centro",
                "hotelNightlyRate": 189.9,
                "localTransportPerDay": 30,
                "units": [{ "name": "Loja 12", "address": "Rua A, 10", "estimatedItemCount": 320 }]
            }],
            "returnTransportCost": 130.25
        }"#;

        let form: ItineraryForm = serde_json::from_str(json).unwrap();
        assert!(form.assumptions.is_none());
        let itinerary = form.into_itinerary();

        assert_eq!(itinerary.daily_technician_rate_cents, 25050);
        assert_eq!(itinerary.per_diem.total(), 1500 + 3590 + 4000 + 510);
        assert!(!itinerary.work_weekends);
        assert_eq!(itinerary.cities[0].intercity_transport_cost_cents, Some(12000));
        assert_eq!(itinerary.cities[0].hotel_nightly_rate_cents, 18990);
        assert_eq!(itinerary.cities[0].local_transport_per_day_cents, 3000);
        assert_eq!(itinerary.return_transport_cost_cents, Some(13025));
        assert_eq!(itinerary.total_estimated_items(), 320);
    }

    #[test]
    fn test_city_without_units_field_deserializes_empty() {
        let json = r#"{ "city": "Blumenau" }"#;
        let city: CityStopForm = serde_json::from_str(json).unwrap();
        assert!(city.units.is_empty());
        assert!(city.intercity_transport_cost.is_none());
    }

    #[test]
    fn test_assumptions_defaults() {
        let assumptions: ScheduleAssumptions = serde_json::from_str("{}").unwrap();
        assert_eq!(assumptions, ScheduleAssumptions::default());
        assert!((assumptions.daily_working_hours - 8.0).abs() < f64::EPSILON);
        assert!((assumptions.travel_hours_per_leg - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_city_total_items() {
        let city = CityStop {
            city: "Itajaí".to_string(),
            intercity_transport_cost_cents: None,
            hotel_name: None,
            hotel_nightly_rate_cents: 0,
            local_transport_per_day_cents: 0,
            units: vec![
                InventoryUnit { name: "A".into(), address: String::new(), estimated_item_count: 100 },
                InventoryUnit { name: "B".into(), address: String::new(), estimated_item_count: 45 },
            ],
        };
        assert_eq!(city.total_items(), 145);
        assert_eq!(city.checked_total_items(), Some(145));
    }

    #[test]
    fn test_city_total_items_overflow() {
        let city = CityStop {
            city: "Itajaí".to_string(),
            intercity_transport_cost_cents: None,
            hotel_name: None,
            hotel_nightly_rate_cents: 0,
            local_transport_per_day_cents: 0,
            units: vec![
                InventoryUnit { name: "A".into(), address: String::new(), estimated_item_count: i64::MAX },
                InventoryUnit { name: "B".into(), address: String::new(), estimated_item_count: 1 },
            ],
        };
        assert_eq!(city.checked_total_items(), None);
        assert_eq!(city.total_items(), i64::MAX);
    }
}
