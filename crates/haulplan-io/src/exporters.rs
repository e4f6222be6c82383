//! CSV and text exporters for planning outputs.

use chrono::NaiveDate;
use haulplan_algo::recording::{HorizonMatrix, RouteLog};
use haulplan_algo::summary::HaulerStats;
use haulplan_core::{DemandFrame, PlanError, PlanResult};
use std::io::Write;
use std::path::Path;

/// Write a demand frame in the same shape it was read: site column first,
/// then one column per date.
pub fn write_demand_csv(frame: &DemandFrame, path: &Path) -> PlanResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    let mut header = vec!["site".to_string()];
    header.extend(frame.dates().iter().map(|d| d.to_string()));
    writer.write_record(&header).map_err(csv_error)?;

    for (row, id) in frame.site_ids().iter().enumerate() {
        let mut record = vec![id.to_string()];
        record.extend((0..frame.num_days()).map(|day| frame.get(row, day).to_string()));
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a horizon matrix with date column headers; the first column holds
/// the row index under `row_label` (fleet size or hauler slot).
pub fn write_matrix_csv(
    matrix: &HorizonMatrix,
    dates: &[NaiveDate],
    row_label: &str,
    path: &Path,
) -> PlanResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    let mut header = vec![row_label.to_string()];
    header.extend(dates.iter().map(|d| d.to_string()));
    writer.write_record(&header).map_err(csv_error)?;

    for row in 0..matrix.rows() {
        let mut record = vec![row.to_string()];
        record.extend((0..matrix.num_days()).map(|day| matrix.get(row, day).to_string()));
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the route log as indented text, one day per block.
pub fn write_route_log(log: &RouteLog, path: &Path) -> PlanResult<()> {
    let mut file = std::fs::File::create(path)?;
    for day in &log.days {
        writeln!(file, "{}:", day.label)?;
        for hauler in &day.haulers {
            writeln!(file, "  {}:", hauler.label)?;
            for leg in &hauler.legs {
                writeln!(file, "    ({}, {}) x{}", leg.from, leg.to, leg.count)?;
            }
        }
    }
    Ok(())
}

/// Write the per-hauler statistics table.
pub fn write_summary_csv(stats: &[HaulerStats], path: &Path) -> PlanResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record([
            "Hauler",
            "Hours Worked in Range",
            "Days Utilized",
            "Percentage of Working Days Utilized",
            "Average Hours Worked per Utilized Day",
        ])
        .map_err(csv_error)?;
    for row in stats {
        writer
            .write_record([
                row.hauler.to_string(),
                row.hours_worked.to_string(),
                row.days_utilized.to_string(),
                row.utilization_pct.to_string(),
                row.avg_hours_per_utilized_day.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_error(err: csv::Error) -> PlanError {
    PlanError::Parse(err.to_string())
}
