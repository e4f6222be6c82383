//! Fleet-sizing driver
//!
//! Walks the horizon day by day. For each day with demand it derives the
//! routing inputs, then tries fleet sizes 0, 1, 2, ... until the router
//! first reports optimality; the first feasible size is the operational
//! fleet for that day. Mileage, working minutes, and routes are recorded as
//! the loop goes; the matrices are owned here and returned whole.

use crate::recording::{
    decode_day, propagate_mileage, DayRoutes, HaulerRoutes, HorizonMatrix, RouteLog,
    EXHAUSTED_SENTINEL,
};
use crate::routing::{route_fleet, DayParams, RouterConfig};
use crate::SolveStatus;
use haulplan_core::{DemandFrame, PlanConfig, PlanResult, SiteTable};
use tracing::info;

/// Everything the horizon loop accumulates.
#[derive(Debug, Clone)]
pub struct HorizonOutcome {
    /// Miles a fleet of each size (row) would run each day (column); NaN
    /// where a size was tried and found infeasible, −9,999,999 where the
    /// search exhausted its upper bound.
    pub fleet_mileage: HorizonMatrix,
    /// Working minutes per hauler slot per day, most-loaded slot first.
    pub hauler_minutes: HorizonMatrix,
    /// Day-by-day route listing for the operational fleets.
    pub route_log: RouteLog,
}

/// Solve every day of the smoothed horizon.
///
/// Days without demand leave all-zero matrix columns and log no routes.
/// Structural failures (a demanded site with no coordinates) propagate;
/// per-fleet-size infeasibility is absorbed into the matrices.
pub fn solve_horizon(
    config: &PlanConfig,
    router: &RouterConfig,
    sites: &SiteTable,
    demand: &DemandFrame,
) -> PlanResult<HorizonOutcome> {
    let num_days = demand.num_days();
    let rows = config.fleet_upper_bound + 1;
    let mut fleet_mileage = HorizonMatrix::zeros(rows, num_days);
    let mut hauler_minutes = HorizonMatrix::zeros(rows, num_days);
    let mut route_log = RouteLog::default();

    for day in 0..num_days {
        let active = demand.active_on_day(day);
        if active.is_empty() {
            info!(day, "no demand");
            continue;
        }

        let params = DayParams::build(config, sites, &active)?;
        let upper = (params.total_events() as usize).min(config.fleet_upper_bound);
        let mut feasible = false;

        for fleet_size in 0..=upper {
            let outcome = route_fleet(config, router, &params, fleet_size);
            info!(day, fleet_size, status = ?outcome.status, miles = ?outcome.total_miles,
                "routing attempt");

            match outcome.status {
                SolveStatus::Infeasible | SolveStatus::Undefined => {
                    fleet_mileage.set(fleet_size, day, f64::NAN);
                }
                SolveStatus::Optimal => {
                    let miles = outcome.total_miles.expect("optimal solve carries mileage");
                    propagate_mileage(&mut fleet_mileage, fleet_size, day, miles);

                    // most-loaded hauler takes slot 0
                    let mut haulers = decode_day(config, &params, &outcome, fleet_size);
                    haulers.sort_by(|a, b| {
                        b.minutes.partial_cmp(&a.minutes).expect("minutes are finite")
                    });

                    let mut day_routes = Vec::with_capacity(fleet_size);
                    for (slot, hauler) in haulers.into_iter().enumerate() {
                        hauler_minutes.set(slot, day, hauler.minutes);
                        day_routes.push(HaulerRoutes {
                            label: format!("hauler {}", slot + 1),
                            legs: hauler.legs,
                        });
                    }
                    route_log.days.push(DayRoutes {
                        label: format!("day {}", day + 1),
                        haulers: day_routes,
                    });

                    feasible = true;
                    break;
                }
            }
        }

        // an exhausted search leaves an unmistakable sentinel
        if !feasible {
            fleet_mileage.set(upper, day, EXHAUSTED_SENTINEL);
        }
    }

    Ok(HorizonOutcome {
        fleet_mileage,
        hauler_minutes,
        route_log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use haulplan_core::{Site, SiteId};

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start: NaiveDate = "2024-06-03".parse().unwrap();
        (0..n).map(|i| start + chrono::Duration::days(i as i64)).collect()
    }

    fn config() -> PlanConfig {
        PlanConfig {
            travel_rate: 1.0,
            day_length: 600,
            handle: 30,
            fleet_upper_bound: 3,
            window: 3,
            periods: vec![5],
            start_date: "2024-06-03".parse().unwrap(),
            end_date: "2024-06-07".parse().unwrap(),
        }
    }

    fn sites() -> SiteTable {
        SiteTable::new(vec![
            Site { id: SiteId::new(0), latitude: 40.0, longitude: -88.0 },
            Site { id: SiteId::new(1), latitude: 40.5, longitude: -88.0 },
            Site { id: SiteId::new(2), latitude: 40.5, longitude: -88.1 },
            Site { id: SiteId::new(9), latitude: 40.0, longitude: -88.0 },
        ])
        .unwrap()
    }

    #[test]
    fn test_no_demand_horizon_stays_zero() {
        let frame = DemandFrame::new(
            vec![SiteId::new(1), SiteId::new(2)],
            dates(3),
            vec![vec![0, 0, 0], vec![0, 0, 0]],
        )
        .unwrap();

        let outcome =
            solve_horizon(&config(), &RouterConfig::default(), &sites(), &frame).unwrap();

        for row in 0..4 {
            for day in 0..3 {
                assert_eq!(outcome.fleet_mileage.get(row, day), 0.0);
                assert_eq!(outcome.hauler_minutes.get(row, day), 0.0);
            }
        }
        assert!(outcome.route_log.is_empty());
    }

    #[test]
    fn test_single_day_first_feasible_wins() {
        let frame = DemandFrame::new(
            vec![SiteId::new(1), SiteId::new(2)],
            dates(2),
            vec![vec![-1, 0], vec![1, 0]],
        )
        .unwrap();

        let outcome =
            solve_horizon(&config(), &RouterConfig::default(), &sites(), &frame).unwrap();

        // fleet size 0 infeasible, fleet size 1 wins and propagates upward
        assert!(outcome.fleet_mileage.get(0, 0).is_nan());
        let miles = outcome.fleet_mileage.get(1, 0);
        assert!(miles > 0.0);
        assert_eq!(outcome.fleet_mileage.get(2, 0), miles);
        assert_eq!(outcome.fleet_mileage.get(3, 0), miles);

        // one hauler worked within its shift, nobody else did
        let minutes = outcome.hauler_minutes.get(0, 0);
        assert!(minutes > 0.0 && minutes <= 600.0);
        assert_eq!(outcome.hauler_minutes.get(1, 0), 0.0);

        assert_eq!(outcome.route_log.days.len(), 1);
        assert_eq!(outcome.route_log.days[0].label, "day 1");
        assert_eq!(outcome.route_log.days[0].haulers.len(), 1);
        assert_eq!(outcome.route_log.days[0].haulers[0].label, "hauler 1");
    }

    #[test]
    fn test_missing_site_propagates() {
        let frame = DemandFrame::new(
            vec![SiteId::new(7)],
            dates(1),
            vec![vec![1]],
        )
        .unwrap();

        let result = solve_horizon(&config(), &RouterConfig::default(), &sites(), &frame);
        assert!(result.is_err());
    }
}
