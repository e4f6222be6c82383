//! # haulplan-io: Planning Input and Output Files
//!
//! Readers for the two input tables (the signed demand matrix and the site
//! coordinate table), validation tying them together, and writers for every
//! planning artifact (smoothed demand, fleet mileage, hauler minutes, route
//! log, hauler summary). All tabular files are plain CSV with ISO-date
//! column headers.

pub mod exporters;
pub mod importers;
pub mod validate;

pub use exporters::{write_demand_csv, write_matrix_csv, write_route_log, write_summary_csv};
pub use importers::{read_demand_csv, read_sites_csv};
pub use validate::validate_inputs;
