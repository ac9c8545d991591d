//! Currency representation and the major-unit/cents boundary.
//!
//! Everything inside the planner works in integer cents. Floating major-unit
//! values only appear in form DTOs and are converted here, once.

/// Amount in the smallest currency unit.
pub type Cents = i64;

/// Convert a major-unit amount (e.g. `12.34`) to cents, rounding half away from zero.
/// Non-finite values become 0.
pub fn to_cents(major: f64) -> Cents {
    if !major.is_finite() {
        return 0;
    }
    (major * 100.0).round() as Cents
}

/// Convert cents back to a major-unit amount for presentation.
pub fn from_cents(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Ratio of a cost to an item count, zero when there are no items.
pub fn cost_per_item(cost: Cents, items: i64) -> f64 {
    if items > 0 {
        cost as f64 / items as f64
    } else {
        0.0
    }
}
