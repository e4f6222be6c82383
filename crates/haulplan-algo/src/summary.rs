//! Per-hauler utilization statistics.

use crate::recording::HorizonMatrix;
use serde::Serialize;

/// Aggregate statistics for one hauler over the horizon. Labels are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HaulerStats {
    pub hauler: usize,
    /// Total hours worked in the range, rounded to a whole hour.
    pub hours_worked: f64,
    /// Days with any recorded working time.
    pub days_utilized: usize,
    /// Share of horizon days utilized, percent, one decimal.
    pub utilization_pct: f64,
    /// Hours per utilized day, one decimal.
    pub avg_hours_per_utilized_day: f64,
}

/// Summarize the hauler-minutes matrix. Haulers that never worked are
/// excluded; the remaining rows keep their slot order, labelled from 1.
pub fn summarize(minutes: &HorizonMatrix) -> Vec<HaulerStats> {
    let num_days = minutes.num_days() as f64;
    let mut stats = Vec::new();

    for row in 0..minutes.rows() {
        let days_utilized = (0..minutes.num_days())
            .filter(|&day| minutes.get(row, day) > 0.0)
            .count();
        if days_utilized == 0 {
            continue;
        }

        let total_hours = minutes.row_sum(row) / 60.0;
        stats.push(HaulerStats {
            hauler: row + 1,
            hours_worked: total_hours.round(),
            days_utilized,
            utilization_pct: round_one(days_utilized as f64 / num_days * 100.0),
            avg_hours_per_utilized_day: round_one(total_hours / days_utilized as f64),
        });
    }

    stats
}

/// Total miles driven over the horizon by the largest fleet considered.
pub fn total_fleet_miles(mileage: &HorizonMatrix) -> f64 {
    mileage.row_sum(mileage.rows() - 1)
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
