use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Size and schedule a fleet of equipment haulers over a planning horizon.
///
/// Reads a signed demand matrix and a site coordinate table, levels the
/// demand within each site's flexibility window, finds the smallest fleet
/// that can service each day, and writes the smoothed demand, mileage,
/// working minutes, route log, and per-hauler summary under --out.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Demand matrix CSV: site rows, ISO-date columns, signed counts
    #[arg(long)]
    pub demand: PathBuf,

    /// Site table CSV: project, lat, long
    #[arg(long)]
    pub sites: PathBuf,

    /// Average driving speed (miles per minute)
    #[arg(long, default_value_t = 0.75)]
    pub travel_rate: f64,

    /// Working shift length (minutes)
    #[arg(long, default_value_t = 600)]
    pub day_length: i64,

    /// Minutes to load or unload one equipment set
    #[arg(long, default_value_t = 30)]
    pub handle: i64,

    /// Largest fleet size to try on any day
    #[arg(long, default_value_t = 10)]
    pub fleet_upper_bound: usize,

    /// Days a demand event may slide (earlier for drop-offs, later for pickups)
    #[arg(long, default_value_t = 3)]
    pub window: usize,

    /// Candidate smoothing period lengths, in days
    #[arg(long, value_delimiter = ',', default_value = "5")]
    pub periods: Vec<usize>,

    /// First day of the horizon (YYYY-MM-DD); must be a demand column
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day of the horizon, inclusive; must be a demand column
    #[arg(long)]
    pub end_date: NaiveDate,

    /// Wall-clock bound per routing solve, in seconds
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Directory for the output files
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Let the MILP solver print its own log
    #[arg(long)]
    pub verbose_solver: bool,
}
