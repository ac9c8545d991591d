//! Inventory Trip Planner - command line front end
//!
//! Reads itineraries and tracking records from files and prints day plans,
//! cost summaries and plan-vs-actual reports.

mod cli;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_trip_planner::config::Config;
use inventory_trip_planner::services::export::{
    read_tracking_records, write_rows_csv, write_schedules_csv, write_summaries_csv,
};
use inventory_trip_planner::types::{CategoryCosts, Itinerary, ItineraryForm, ScheduleAssumptions};
use inventory_trip_planner::{
    aggregate_by_category, aggregate_by_date, aggregate_by_technician_unit, aggregate_totals,
    build_schedule, summarize_schedule, summarize_team, team_plan, EqualizationMode, EqualizationReport,
};

use cli::{Cli, Command, OutputFormat, TrackingView};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "trip-planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - stderr (stdout carries the report) and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,inventory_trip_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Configuration loaded");

    let result = match cli.command {
        Command::Schedule { itineraries, format, summary } => run_schedule(&config, &itineraries, format, summary),
        Command::Track { planned, actual, view, format } => run_track(&config, &planned, &actual, view, format),
        Command::Equalize { costs, technicians, mode } => run_equalize(&costs, technicians, &mode),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

fn load_itinerary(config: &Config, path: &Path) -> Result<(Itinerary, ScheduleAssumptions)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read itinerary {}", path.display()))?;
    let form: ItineraryForm = serde_json::from_str(&content)
        .with_context(|| format!("Invalid itinerary JSON in {}", path.display()))?;

    let assumptions = form.assumptions.unwrap_or(config.assumptions);
    Ok((form.into_itinerary(), assumptions))
}

fn run_schedule(config: &Config, paths: &[PathBuf], format: OutputFormat, summary: bool) -> Result<()> {
    let mut schedules = Vec::with_capacity(paths.len());
    for path in paths {
        let (itinerary, assumptions) = load_itinerary(config, path)?;
        let schedule = build_schedule(&itinerary, &assumptions)
            .with_context(|| format!("Cannot build schedule from {}", path.display()))?;
        schedules.push(schedule);
    }

    let mut out = io::stdout().lock();
    match (format, summary) {
        (OutputFormat::Json, false) if schedules.len() == 1 => write_json(&mut out, &schedules[0]),
        (OutputFormat::Json, false) => write_json(&mut out, &team_plan(&schedules)),
        (OutputFormat::Json, true) if schedules.len() == 1 => write_json(&mut out, &summarize_schedule(&schedules[0])),
        (OutputFormat::Json, true) => write_json(&mut out, &summarize_team(&schedules)),
        (OutputFormat::Csv, false) => Ok(write_schedules_csv(&schedules, &mut out)?),
        (OutputFormat::Csv, true) => {
            let summaries: Vec<_> = schedules.iter().map(summarize_schedule).collect();
            Ok(write_summaries_csv(&summaries, &mut out)?)
        }
    }
}

fn run_track(
    config: &Config,
    planned_path: &Path,
    actual_path: &Path,
    view: TrackingView,
    format: OutputFormat,
) -> Result<()> {
    let planned = read_tracking_records(planned_path)
        .with_context(|| format!("Failed to load planned records from {}", planned_path.display()))?;
    let actual = read_tracking_records(actual_path)
        .with_context(|| format!("Failed to load actual records from {}", actual_path.display()))?;
    info!("Comparing {} planned against {} actual record(s)", planned.len(), actual.len());

    let policy = &config.deviation;
    let mut out = io::stdout().lock();
    match view {
        TrackingView::Totals => {
            let totals = aggregate_totals(&planned, &actual, policy);
            match format {
                OutputFormat::Json => write_json(&mut out, &totals),
                OutputFormat::Csv => Ok(write_rows_csv(&[totals], &mut out)?),
            }
        }
        TrackingView::Category => emit_rows(&mut out, format, &aggregate_by_category(&planned, &actual, policy)),
        TrackingView::TechnicianUnit => {
            emit_rows(&mut out, format, &aggregate_by_technician_unit(&planned, &actual, policy))
        }
        TrackingView::Date => emit_rows(&mut out, format, &aggregate_by_date(&planned, &actual, policy)),
    }
}

fn run_equalize(costs_path: &Path, technicians: usize, mode: &str) -> Result<()> {
    let mode: EqualizationMode = mode.parse()?;
    let content = std::fs::read_to_string(costs_path)
        .with_context(|| format!("Failed to read costs {}", costs_path.display()))?;
    let costs: CategoryCosts = serde_json::from_str(&content)
        .with_context(|| format!("Invalid cost JSON in {}", costs_path.display()))?;

    let report = EqualizationReport::new(&costs, mode, technicians);
    write_json(&mut io::stdout().lock(), &report)
}

fn emit_rows<T: Serialize, W: Write>(out: &mut W, format: OutputFormat, rows: &[T]) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &rows),
        OutputFormat::Csv => Ok(write_rows_csv(rows, out)?),
    }
}

fn write_json<T: Serialize + ?Sized, W: Write>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
