pub const DEFAULT_DAILY_WORKING_HOURS: f64 = 8.0;

pub const DEFAULT_TRAVEL_HOURS_PER_LEG: f64 = 2.0;

/// Deviation reported when actual cost exists but nothing was planned.
pub const NO_BASELINE_DEVIATION_PCT: f64 = 200.0;

/// Upper bound for consecutive non-working days skipped in one advance.
pub const MAX_CONSECUTIVE_SKIPPED_DAYS: u32 = 7;

/// Upper bound for inventory work days in one itinerary (about a century).
pub const MAX_INVENTORY_DAYS: i64 = 36_500;

/// Placeholder for a missing unit or technician id in grouped rows.
pub const MISSING_ID: &str = "—";

pub fn default_logs_dir() -> String {
    "./logs".to_string()
}
