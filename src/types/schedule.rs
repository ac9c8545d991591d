//! Schedule (day plan) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::itinerary::ScheduleAssumptions;
use super::money::Cents;

/// Classification of one calendar day of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Travel,
    InventoryWork,
    Return,
    Rest,
}

impl DayType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DayType::Travel => "travel",
            DayType::InventoryWork => "inventory_work",
            DayType::Return => "return",
            DayType::Rest => "rest",
        }
    }
}

/// Cost of a single day, in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCosts {
    pub transport_cents: Cents,
    pub lodging_cents: Cents,
    pub per_diem_cents: Cents,
    pub technician_fee_cents: Cents,
}

impl DayCosts {
    pub fn transport_only(transport_cents: Cents) -> Self {
        Self {
            transport_cents,
            ..Self::default()
        }
    }

    /// Sum of the four parts, saturating at `i64::MAX`
    pub fn total(&self) -> Cents {
        [self.transport_cents, self.lodging_cents, self.per_diem_cents, self.technician_fee_cents]
            .into_iter()
            .fold(0, Cents::saturating_add)
    }

    pub fn add(&mut self, other: &DayCosts) {
        self.transport_cents = self.transport_cents.saturating_add(other.transport_cents);
        self.lodging_cents = self.lodging_cents.saturating_add(other.lodging_cents);
        self.per_diem_cents = self.per_diem_cents.saturating_add(other.per_diem_cents);
        self.technician_fee_cents = self.technician_fee_cents.saturating_add(other.technician_fee_cents);
    }
}

/// One calendar day of the generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub city_label: String,
    pub detail_text: String,
    pub items_processed: i64,
    pub costs: DayCosts,
}

/// Generated day plan for one technician
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub technician_name: String,
    pub origin_city: String,
    pub days: Vec<DayRecord>,
    pub total_days: usize,
    pub total_items: i64,
    pub assumptions: ScheduleAssumptions,
}

impl Schedule {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn days_of_type(&self, day_type: DayType) -> impl Iterator<Item = &DayRecord> {
        self.days.iter().filter(move |d| d.day_type == day_type)
    }
}
