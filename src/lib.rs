//! Inventory Trip Planner
//!
//! Schedule builder and cost aggregator for multi-city inventory counting
//! trips. Everything here is synchronous and side-effect free apart from the
//! file helpers in `services::export`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use error::{PlannerError, PlannerResult};
pub use services::cost_aggregator::{
    aggregate_by_category, aggregate_by_date, aggregate_by_technician_unit, aggregate_totals,
    sum_costs, DeviationPolicy,
};
pub use services::equalization::{equalize, equalize_record, EqualizationMode, EqualizationReport};
pub use services::schedule_builder::build_schedule;
pub use services::schedule_costs::{
    planned_records_from_schedule, summarize_schedule, summarize_team, team_plan, TeamPlan,
};
