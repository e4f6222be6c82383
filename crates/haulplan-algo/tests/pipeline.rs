//! End-to-end pipeline scenarios: smooth, size the fleet, record, summarize.

use chrono::NaiveDate;
use haulplan_algo::{
    driver::solve_horizon, routing::RouterConfig, smoothing::smooth_demand, summary::summarize,
    summary::total_fleet_miles,
};
use haulplan_core::{DemandFrame, PlanConfig, Site, SiteId, SiteTable};

fn dates(n: usize) -> Vec<NaiveDate> {
    let start: NaiveDate = "2024-06-03".parse().unwrap();
    (0..n)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect()
}

fn config(window: usize, day_length: i64, handle: i64, fleet_upper_bound: usize) -> PlanConfig {
    PlanConfig {
        travel_rate: 1.0,
        day_length,
        handle,
        fleet_upper_bound,
        window,
        periods: vec![5],
        start_date: "2024-06-03".parse().unwrap(),
        end_date: "2024-06-07".parse().unwrap(),
    }
}

fn site(id: u32, lat: f64, lon: f64) -> Site {
    Site {
        id: SiteId::new(id),
        latitude: lat,
        longitude: lon,
    }
}

#[test]
fn idle_horizon_produces_empty_plan() {
    let sites = SiteTable::new(vec![
        site(0, 40.0, -88.0),
        site(1, 40.5, -88.0),
        site(2, 41.0, -88.1),
        site(3, 40.2, -88.3),
        site(9, 40.0, -88.0),
    ])
    .unwrap();
    let frame = DemandFrame::new(
        vec![SiteId::new(1), SiteId::new(2), SiteId::new(3)],
        dates(5),
        vec![vec![0; 5], vec![0; 5], vec![0; 5]],
    )
    .unwrap();
    let config = config(3, 600, 30, 4);

    let smoothed = smooth_demand(&config, &frame).unwrap();
    assert_eq!(smoothed.demand, frame);

    let horizon = solve_horizon(&config, &RouterConfig::default(), &sites, &smoothed.demand)
        .unwrap();

    for row in 0..=4 {
        for day in 0..5 {
            assert_eq!(horizon.fleet_mileage.get(row, day), 0.0);
            assert_eq!(horizon.hauler_minutes.get(row, day), 0.0);
        }
    }
    assert!(horizon.route_log.is_empty());
    assert!(summarize(&horizon.hauler_minutes).is_empty());
    assert_eq!(total_fleet_miles(&horizon.fleet_mileage), 0.0);
}

#[test]
fn one_hauler_serves_a_two_site_round_trip() {
    let sites = SiteTable::new(vec![
        site(0, 40.0, -88.0),
        site(1, 40.5, -88.0),
        site(2, 40.5, -88.1),
        site(9, 40.0, -88.0),
    ])
    .unwrap();
    // window 1 keeps both events on day 1
    let config = config(1, 600, 30, 4);
    let frame = DemandFrame::new(
        vec![SiteId::new(1), SiteId::new(2)],
        dates(5),
        vec![vec![-1, 0, 0, 0, 0], vec![1, 0, 0, 0, 0]],
    )
    .unwrap();

    let smoothed = smooth_demand(&config, &frame).unwrap();
    assert_eq!(smoothed.demand, frame);

    let horizon = solve_horizon(&config, &RouterConfig::default(), &sites, &smoothed.demand)
        .unwrap();

    // hub -> site 1: 34 mi, site 1 -> site 2: 5 mi, site 2 -> hub: 39 mi
    assert!(horizon.fleet_mileage.get(0, 0).is_nan());
    assert_eq!(horizon.fleet_mileage.get(1, 0), 78.0);
    // larger fleets inherit the mileage
    assert_eq!(horizon.fleet_mileage.get(4, 0), 78.0);

    let day = &horizon.route_log.days[0];
    assert_eq!(day.label, "day 1");
    assert_eq!(day.haulers.len(), 1);
    // a chain hub -> site -> site -> hub, in one of its two orientations
    let legs = &day.haulers[0].legs;
    assert_eq!(legs.len(), 3);
    assert_eq!(legs.iter().filter(|leg| leg.from == "hub").count(), 1);
    assert_eq!(legs.iter().filter(|leg| leg.to == "hub").count(), 1);
    assert!(legs
        .iter()
        .any(|leg| leg.from.starts_with("site") && leg.to.starts_with("site")));

    let stats = summarize(&horizon.hauler_minutes);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].hauler, 1);
    assert_eq!(stats[0].days_utilized, 1);
    assert_eq!(stats[0].utilization_pct, 20.0);
}

#[test]
fn tight_shift_forces_a_second_hauler() {
    // Two drop-off/pickup pairs on opposite sides of the hub; one hauler
    // cannot cover both pairs inside the shift, two split them evenly.
    let sites = SiteTable::new(vec![
        site(0, 40.0, -88.0),
        site(1, 41.0, -88.0), // drop-off north
        site(2, 41.0, -88.1), // pickup north
        site(3, 39.0, -88.0), // drop-off south
        site(4, 39.0, -88.1), // pickup south
        site(9, 40.0, -88.0),
    ])
    .unwrap();
    let config = config(1, 420, 60, 3);
    let frame = DemandFrame::new(
        vec![SiteId::new(1), SiteId::new(2), SiteId::new(3), SiteId::new(4)],
        dates(5),
        vec![
            vec![-1, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0],
            vec![-1, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0],
        ],
    )
    .unwrap();

    let smoothed = smooth_demand(&config, &frame).unwrap();
    let horizon = solve_horizon(&config, &RouterConfig::default(), &sites, &smoothed.demand)
        .unwrap();

    // sizes 0 and 1 are infeasible, 2 is first feasible
    assert!(horizon.fleet_mileage.get(0, 0).is_nan());
    assert!(horizon.fleet_mileage.get(1, 0).is_nan());
    // each half: 69 out, 5 across, 74 back
    assert_eq!(horizon.fleet_mileage.get(2, 0), 296.0);
    assert_eq!(horizon.fleet_mileage.get(3, 0), 296.0);

    // the most-loaded slot comes first
    let first = horizon.hauler_minutes.get(0, 0);
    let second = horizon.hauler_minutes.get(1, 0);
    assert!(first > 0.0 && second > 0.0);
    assert!(first >= second);
    // both shifts fit the working day
    assert!(first <= 420.0);

    assert_eq!(horizon.route_log.days[0].haulers.len(), 2);
}

#[test]
fn smoothing_flattens_a_spike_and_wins_on_variance() {
    let config = config(3, 600, 30, 4);
    let frame = DemandFrame::new(
        vec![SiteId::new(1)],
        dates(5),
        vec![vec![0, 0, 3, 0, 0]],
    )
    .unwrap();

    let outcome = smooth_demand(&config, &frame).unwrap();

    let smoothed: Vec<i64> = (0..5).map(|l| outcome.demand.get(0, l)).collect();
    assert_eq!(smoothed, vec![0, 0, 1, 1, 1]);

    // unsmoothed variance of [0,0,3,0,0] is 1.44; smoothing reaches 0.24
    assert!((outcome.variance - 0.24).abs() < 1e-9);
    assert!(outcome.variance < 1.44);
}

#[test]
fn dropoff_on_first_day_stays_put() {
    let config = config(3, 600, 30, 4);
    let frame = DemandFrame::new(
        vec![SiteId::new(1)],
        dates(5),
        vec![vec![-2, 0, 0, 0, 0]],
    )
    .unwrap();

    let outcome = smooth_demand(&config, &frame).unwrap();
    // no earlier day exists, so both units remain on day 1
    assert_eq!(outcome.demand.get(0, 0), -2);
    for l in 1..5 {
        assert_eq!(outcome.demand.get(0, l), 0);
    }
}

#[test]
fn mileage_is_monotone_in_fleet_size() {
    let sites = SiteTable::new(vec![
        site(0, 40.0, -88.0),
        site(1, 40.5, -88.0),
        site(2, 40.5, -88.1),
        site(9, 40.0, -88.0),
    ])
    .unwrap();
    let config = config(1, 600, 30, 4);
    let frame = DemandFrame::new(
        vec![SiteId::new(1), SiteId::new(2)],
        dates(5),
        vec![vec![-2, 0, -1, 0, 0], vec![2, 0, 1, 0, 0]],
    )
    .unwrap();

    let smoothed = smooth_demand(&config, &frame).unwrap();
    let horizon = solve_horizon(&config, &RouterConfig::default(), &sites, &smoothed.demand)
        .unwrap();

    for day in 0..5 {
        for f in 0..4 {
            let a = horizon.fleet_mileage.get(f, day);
            let b = horizon.fleet_mileage.get(f + 1, day);
            if !a.is_nan() && !b.is_nan() && a >= 0.0 && b >= 0.0 {
                assert!(a >= b, "fleet {f} ran {a} mi, fleet {} ran {b} mi", f + 1);
            }
        }
    }
}
