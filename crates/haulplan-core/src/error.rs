//! Failure modes of the planning pipeline.
//!
//! Everything that can stop a planning run funnels into [`PlanError`]:
//! unreadable input files, tables that cannot be decoded, inputs that
//! disagree with each other, operating parameters that cannot drive a
//! solve, and the MILP layer failing outright. A routing attempt that is
//! merely infeasible at one fleet size is not an error and never reaches
//! this type; the fleet-sizing driver absorbs it and tries a larger fleet.

use thiserror::Error;

/// What stopped a planning run.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Reading or writing a planning file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input table could not be decoded: a demand header that is not an
    /// ISO date, a non-numeric cell, a malformed site row.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The inputs disagree with each other: demand naming a site with no
    /// coordinates, a horizon date missing from the demand columns, a
    /// demand row claiming to be a hub.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The optimization layer failed in a way the driver cannot absorb,
    /// such as every smoothing period candidate coming back infeasible.
    #[error("Solver error: {0}")]
    Solver(String),

    /// Operating parameters that cannot drive a solve: a zero travel rate,
    /// a handle longer than the shift, reversed horizon dates.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used across the planning crates.
pub type PlanResult<T> = Result<T, PlanError>;
