//! Planned/actual execution tracking types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Cents;

/// The six cost categories tracked per planned/actual record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CostCategory {
    #[serde(rename = "tickets")]
    Tickets,
    #[serde(rename = "local-transport")]
    LocalTransport,
    #[serde(rename = "hotel")]
    Hotel,
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "hydration")]
    Hydration,
    #[serde(rename = "allowance-extra")]
    AllowanceExtra,
}

impl CostCategory {
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Tickets,
        CostCategory::LocalTransport,
        CostCategory::Hotel,
        CostCategory::Food,
        CostCategory::Hydration,
        CostCategory::AllowanceExtra,
    ];

    /// Storage/export key, stable across formats
    pub const fn as_str(self) -> &'static str {
        match self {
            CostCategory::Tickets => "tickets",
            CostCategory::LocalTransport => "local-transport",
            CostCategory::Hotel => "hotel",
            CostCategory::Food => "food",
            CostCategory::Hydration => "hydration",
            CostCategory::AllowanceExtra => "allowance-extra",
        }
    }
}

/// Cost per category, in cents.
///
/// Values are stored as received (possibly negative or missing); readers go
/// through [`CategoryCosts::clamped`], which treats non-positive values as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCosts {
    #[serde(default, rename = "tickets", alias = "ticketsCents")]
    pub tickets: Cents,
    #[serde(default, rename = "local-transport", alias = "localTransportCents")]
    pub local_transport: Cents,
    #[serde(default, rename = "hotel", alias = "hotelCents")]
    pub hotel: Cents,
    #[serde(default, rename = "food", alias = "foodCents")]
    pub food: Cents,
    #[serde(default, rename = "hydration", alias = "hydrationCents")]
    pub hydration: Cents,
    #[serde(default, rename = "allowance-extra", alias = "allowanceExtraCents")]
    pub allowance_extra: Cents,
}

impl CategoryCosts {
    /// Raw stored value for a category
    pub fn get(&self, category: CostCategory) -> Cents {
        match category {
            CostCategory::Tickets => self.tickets,
            CostCategory::LocalTransport => self.local_transport,
            CostCategory::Hotel => self.hotel,
            CostCategory::Food => self.food,
            CostCategory::Hydration => self.hydration,
            CostCategory::AllowanceExtra => self.allowance_extra,
        }
    }

    pub fn set(&mut self, category: CostCategory, value: Cents) {
        match category {
            CostCategory::Tickets => self.tickets = value,
            CostCategory::LocalTransport => self.local_transport = value,
            CostCategory::Hotel => self.hotel = value,
            CostCategory::Food => self.food = value,
            CostCategory::Hydration => self.hydration = value,
            CostCategory::AllowanceExtra => self.allowance_extra = value,
        }
    }

    /// Category value with negatives discarded
    pub fn clamped(&self, category: CostCategory) -> Cents {
        self.get(category).max(0)
    }

    pub fn from_fn(mut f: impl FnMut(CostCategory) -> Cents) -> Self {
        let mut costs = Self::default();
        for category in CostCategory::ALL {
            costs.set(category, f(category));
        }
        costs
    }
}

/// One planned or actual execution entry for a date/unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub date: NaiveDate,
    pub unit_id: Option<String>,
    /// Technicians jointly responsible for the day
    #[serde(default)]
    pub technician_ids: Vec<String>,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default, alias = "costs")]
    pub costs_by_category: CategoryCosts,
}

impl TrackingRecord {
    /// Item count, never negative
    pub fn items(&self) -> i64 {
        self.item_count.max(0)
    }
}
