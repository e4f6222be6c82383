use clap::Parser;
use haulplan_algo::{smooth_demand, solve_horizon, summarize, total_fleet_miles, RouterConfig};
use haulplan_core::PlanConfig;
use haulplan_io::{
    read_demand_csv, read_sites_csv, validate_inputs, write_demand_csv, write_matrix_csv,
    write_route_log, write_summary_csv,
};
use std::fs;
use std::io::{self, Write};
use std::time::Duration;
use tabwriter::TabWriter;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PlanConfig {
        travel_rate: cli.travel_rate,
        day_length: cli.day_length,
        handle: cli.handle,
        fleet_upper_bound: cli.fleet_upper_bound,
        window: cli.window,
        periods: cli.periods.clone(),
        start_date: cli.start_date,
        end_date: cli.end_date,
    };
    config.validate()?;

    let sites = read_sites_csv(&cli.sites)?;
    let demand = read_demand_csv(&cli.demand)?;
    validate_inputs(&sites, &demand)?;
    let demand = demand.restrict(config.start_date, config.end_date)?;

    let smoothed = smooth_demand(&config, &demand)?;
    info!(
        period = smoothed.period,
        variance = smoothed.variance,
        peak = smoothed.peak,
        "demand smoothed"
    );

    let router = RouterConfig {
        time_limit: cli.time_limit.map(Duration::from_secs),
        verbose: cli.verbose_solver,
    };
    let horizon = solve_horizon(&config, &router, &sites, &smoothed.demand)?;
    let stats = summarize(&horizon.hauler_minutes);

    fs::create_dir_all(&cli.out)?;
    let dates = smoothed.demand.dates();
    write_demand_csv(&smoothed.demand, &cli.out.join("smoothed_demand.csv"))?;
    write_matrix_csv(
        &horizon.fleet_mileage,
        dates,
        "fleet_size",
        &cli.out.join("fleet_mileage.csv"),
    )?;
    write_matrix_csv(
        &horizon.hauler_minutes,
        dates,
        "hauler",
        &cli.out.join("hauler_minutes.csv"),
    )?;
    write_route_log(&horizon.route_log, &cli.out.join("route_log.txt"))?;
    write_summary_csv(&stats, &cli.out.join("hauler_summary.csv"))?;

    print_summary(&stats)?;
    println!(
        "Total Miles Driven by All Haulers: {}",
        total_fleet_miles(&horizon.fleet_mileage)
    );

    Ok(())
}

fn print_summary(stats: &[haulplan_algo::HaulerStats]) -> anyhow::Result<()> {
    if stats.is_empty() {
        println!("No hauler was utilized in the selected range.");
        return Ok(());
    }

    let mut tw = TabWriter::new(io::stdout());
    writeln!(
        tw,
        "Hauler\tHours Worked in Range\tDays Utilized\tPercentage of Working Days Utilized\tAverage Hours Worked per Utilized Day"
    )?;
    for row in stats {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            row.hauler,
            row.hours_worked,
            row.days_utilized,
            row.utilization_pct,
            row.avg_hours_per_utilized_day
        )?;
    }
    tw.flush()?;
    Ok(())
}
