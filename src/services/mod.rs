//! Business logic services

pub mod calendar;
pub mod cost_aggregator;
pub mod equalization;
pub mod export;
pub mod schedule_builder;
pub mod schedule_costs;
pub mod validation;
