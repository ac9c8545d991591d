//! Configuration management

use anyhow::{self, Context, Result};

use crate::defaults::{
    default_logs_dir, DEFAULT_DAILY_WORKING_HOURS, DEFAULT_TRAVEL_HOURS_PER_LEG,
    NO_BASELINE_DEVIATION_PCT,
};
use crate::services::cost_aggregator::DeviationPolicy;
use crate::services::validation::validate_assumptions;
use crate::types::ScheduleAssumptions;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for rolling log files
    pub logs_dir: String,

    /// Working-day assumptions applied when an itinerary carries none
    pub assumptions: ScheduleAssumptions,

    /// Deviation reporting policy for execution tracking
    pub deviation: DeviationPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let logs_dir = lookup("LOGS_DIR").unwrap_or_else(default_logs_dir);

        let assumptions = ScheduleAssumptions {
            daily_working_hours: parse_number(&lookup, "PLANNER_DAILY_WORKING_HOURS", DEFAULT_DAILY_WORKING_HOURS)?,
            travel_hours_per_leg: parse_number(&lookup, "PLANNER_TRAVEL_HOURS_PER_LEG", DEFAULT_TRAVEL_HOURS_PER_LEG)?,
        };
        validate_assumptions(&assumptions).context("Invalid working-day settings")?;

        let no_baseline_pct = parse_number(&lookup, "PLANNER_NO_BASELINE_DEVIATION_PCT", NO_BASELINE_DEVIATION_PCT)?;
        if !no_baseline_pct.is_finite() {
            anyhow::bail!("PLANNER_NO_BASELINE_DEVIATION_PCT must be a finite number");
        }

        Ok(Self {
            logs_dir,
            assumptions,
            deviation: DeviationPolicy::new(no_baseline_pct),
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number (got '{raw}')")),
        _ => Ok(default),
    }
}
