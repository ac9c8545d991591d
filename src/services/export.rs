//! Reading tracking records and writing plan/report rows.
//!
//! CSV uses `;` as delimiter with a header row. Money is written raw in cents;
//! formatting for people is left to whoever opens the file.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::services::schedule_costs::ScheduleCostSummary;
use crate::types::{CategoryCosts, Schedule, TrackingRecord};

const DELIMITER: u8 = b';';

/// One tracking record as found in a CSV file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvTrackingRow {
    date: String,
    unit_id: Option<String>,
    /// Comma-separated technician ids
    technician_ids: Option<String>,
    item_count: Option<i64>,
    tickets: Option<i64>,
    #[serde(rename = "local-transport")]
    local_transport: Option<i64>,
    hotel: Option<i64>,
    food: Option<i64>,
    hydration: Option<i64>,
    #[serde(rename = "allowance-extra")]
    allowance_extra: Option<i64>,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%d/%m/%Y").ok())
}

impl CsvTrackingRow {
    fn into_record(self, line: usize) -> PlannerResult<TrackingRecord> {
        let date = parse_date(&self.date)
            .ok_or_else(|| PlannerError::invalid(format!("row {line}: invalid date '{}'", self.date)))?;

        Ok(TrackingRecord {
            date,
            unit_id: self.unit_id.filter(|u| !u.trim().is_empty()),
            technician_ids: self
                .technician_ids
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            item_count: self.item_count.unwrap_or(0),
            costs_by_category: CategoryCosts {
                tickets: self.tickets.unwrap_or(0),
                local_transport: self.local_transport.unwrap_or(0),
                hotel: self.hotel.unwrap_or(0),
                food: self.food.unwrap_or(0),
                hydration: self.hydration.unwrap_or(0),
                allowance_extra: self.allowance_extra.unwrap_or(0),
            },
        })
    }
}

pub fn parse_tracking_csv(content: &str) -> PlannerResult<Vec<TrackingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvTrackingRow = result?;
        // Line 1 is the header.
        records.push(row.into_record(idx + 2)?);
    }
    Ok(records)
}

pub fn parse_tracking_json(content: &str) -> PlannerResult<Vec<TrackingRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Load tracking records from a `.csv` file or a JSON array file.
pub fn read_tracking_records(path: &Path) -> PlannerResult<Vec<TrackingRecord>> {
    let content = std::fs::read_to_string(path)?;
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        parse_tracking_csv(&content)?
    } else {
        parse_tracking_json(&content)?
    };
    debug!("Loaded {} tracking record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Write day plans, one row per technician day.
pub fn write_schedules_csv<W: Write>(schedules: &[Schedule], writer: W) -> PlannerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);

    csv_writer.write_record([
        "technician",
        "date",
        "dayType",
        "city",
        "detail",
        "items",
        "transport",
        "lodging",
        "perDiem",
        "technicianFee",
        "total",
    ])?;

    for (schedule, day) in schedules.iter().flat_map(|s| s.days.iter().map(move |d| (s, d))) {
        csv_writer.write_record([
            schedule.technician_name.clone(),
            day.date.format("%Y-%m-%d").to_string(),
            day.day_type.as_str().to_string(),
            day.city_label.clone(),
            day.detail_text.clone(),
            day.items_processed.to_string(),
            day.costs.transport_cents.to_string(),
            day.costs.lodging_cents.to_string(),
            day.costs.per_diem_cents.to_string(),
            day.costs.technician_fee_cents.to_string(),
            day.costs.total().to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Flat per-technician summary row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryCsvRow<'a> {
    technician: &'a str,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    span_days: i64,
    inventory_days: usize,
    rest_days: usize,
    total_items: i64,
    transport: i64,
    lodging: i64,
    per_diem: i64,
    technician_fee: i64,
    total: i64,
    cost_per_item: f64,
}

pub fn write_summaries_csv<W: Write>(summaries: &[ScheduleCostSummary], writer: W) -> PlannerResult<()> {
    let rows: Vec<SummaryCsvRow> = summaries
        .iter()
        .map(|s| SummaryCsvRow {
            technician: &s.technician_name,
            first_date: s.first_date,
            last_date: s.last_date,
            span_days: s.span_days,
            inventory_days: s.inventory_days,
            rest_days: s.rest_days,
            total_items: s.total_items,
            transport: s.by_category.transport_cents,
            lodging: s.by_category.lodging_cents,
            per_diem: s.by_category.per_diem_cents,
            technician_fee: s.by_category.technician_fee_cents,
            total: s.total_cost_cents,
            cost_per_item: s.cost_per_item_cents,
        })
        .collect();
    write_rows_csv(&rows, writer)
}

/// Write flat report rows (totals, categories, groups) with a header taken
/// from the row's field names.
pub fn write_rows_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> PlannerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
