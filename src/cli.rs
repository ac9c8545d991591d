//! CLI argument parsing for the trip-planner binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "trip-planner", about = "Inventory trip schedule and cost planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build day plans from itinerary files (currency in major units)
    Schedule {
        /// Itinerary JSON file; repeat for one itinerary per technician
        #[arg(long = "itinerary", required = true, num_args = 1..)]
        itineraries: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Print cost summaries instead of the day plans
        #[arg(long)]
        summary: bool,
    },
    /// Compare planned against actual tracking records (JSON or .csv)
    Track {
        #[arg(long)]
        planned: PathBuf,
        #[arg(long)]
        actual: PathBuf,
        #[arg(long, value_enum, default_value_t = TrackingView::Totals)]
        view: TrackingView,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Share one day's category costs across technicians
    Equalize {
        /// JSON file with the six category amounts in cents
        #[arg(long)]
        costs: PathBuf,
        #[arg(long)]
        technicians: usize,
        #[arg(long, default_value = "split")]
        mode: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrackingView {
    Totals,
    Category,
    TechnicianUnit,
    Date,
}
