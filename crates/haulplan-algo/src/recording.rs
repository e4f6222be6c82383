//! Decoding router solutions into horizon-level records.
//!
//! Three artifacts grow over the horizon: the fleet-mileage matrix (miles a
//! fleet of each size would run per day), the hauler-minutes matrix (working
//! minutes per hauler slot per day), and the human-readable route log.

use crate::routing::{DayParams, RouteOutcome};
use haulplan_core::PlanConfig;
use serde::Serialize;

/// Sentinel recorded when the fleet search exhausts its upper bound without
/// ever reaching optimality.
pub const EXHAUSTED_SENTINEL: f64 = -9_999_999.0;

/// A dense rows-by-days matrix used for fleet mileage and hauler minutes.
///
/// Cells default to 0; infeasible routing attempts record NaN.
#[derive(Debug, Clone)]
pub struct HorizonMatrix {
    rows: usize,
    days: usize,
    data: Vec<f64>,
}

impl HorizonMatrix {
    pub fn zeros(rows: usize, days: usize) -> Self {
        Self {
            rows,
            days,
            data: vec![0.0; rows * days],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn num_days(&self) -> usize {
        self.days
    }

    pub fn get(&self, row: usize, day: usize) -> f64 {
        self.data[row * self.days + day]
    }

    pub fn set(&mut self, row: usize, day: usize, value: f64) {
        self.data[row * self.days + day] = value;
    }

    /// Sum of a row, skipping NaN sentinels.
    pub fn row_sum(&self, row: usize) -> f64 {
        (0..self.days)
            .map(|day| self.get(row, day))
            .filter(|v| !v.is_nan())
            .sum()
    }
}

/// Assign an optimal day's mileage to every fleet size from the first
/// feasible one upward: a larger fleet never does strictly worse on a
/// minimization with relaxed capacity.
pub fn propagate_mileage(mileage: &mut HorizonMatrix, fleet_size: usize, day: usize, miles: i64) {
    for row in fleet_size..mileage.rows() {
        mileage.set(row, day, miles as f64);
    }
}

/// One traversed leg of a hauler's day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub count: i64,
}

/// A hauler's decoded day: total working minutes and the legs driven.
#[derive(Debug, Clone)]
pub struct HaulerDay {
    pub minutes: f64,
    pub legs: Vec<RouteLeg>,
}

/// Routes of every hauler on one day.
#[derive(Debug, Clone, Serialize)]
pub struct DayRoutes {
    pub label: String,
    pub haulers: Vec<HaulerRoutes>,
}

/// The labelled legs one hauler ran on one day.
#[derive(Debug, Clone, Serialize)]
pub struct HaulerRoutes {
    pub label: String,
    pub legs: Vec<RouteLeg>,
}

/// Ordered day-by-day route log for the horizon. Days without demand log
/// nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteLog {
    pub days: Vec<DayRoutes>,
}

impl RouteLog {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn location_label(params: &DayParams, index: usize) -> String {
    if index == params.start_hub() || index == params.end_hub() {
        "hub".to_string()
    } else {
        format!("site {}", params.site_ids()[index])
    }
}

/// Decode an optimal day's arc counts into per-hauler minutes and legs.
///
/// Minutes for a hauler sum count · (T[i][j]/rate + handle) over its
/// traversed arcs, skipping the start-to-start and start-to-end idle arcs,
/// then subtract one handle: the first or last reload happens outside the
/// working shift. Legs whose two labels coincide (hub to hub) are left out
/// of the log but still counted as working time.
pub fn decode_day(
    config: &PlanConfig,
    params: &DayParams,
    outcome: &RouteOutcome,
    fleet_size: usize,
) -> Vec<HaulerDay> {
    let n = params.num_locations();
    let end = params.end_hub();
    let mut haulers = Vec::with_capacity(fleet_size);

    for k in 0..fleet_size {
        let mut minutes = 0.0;
        let mut legs = Vec::new();

        for i in 0..n {
            for j in 0..n {
                let count = outcome.flows[i][j][k];
                if count == 0 {
                    continue;
                }
                if i == 0 && (j == 0 || j == end) {
                    continue;
                }

                minutes += count as f64
                    * (params.travel(i, j) as f64 / config.travel_rate + config.handle as f64);

                let from = location_label(params, i);
                let to = location_label(params, j);
                if from != to {
                    legs.push(RouteLeg { from, to, count });
                }
            }
        }

        // one fewer reload than arcs traversed
        minutes -= config.handle as f64;
        haulers.push(HaulerDay { minutes, legs });
    }

    haulers
}
