//! Daily hauler routing
//!
//! Decides whether a fixed-size fleet can service one day's drop-offs and
//! pickups within the shift length, and at what total mileage.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  DAILY HAULER ROUTING                                           │
//! │                                                                 │
//! │  Given:                                                         │
//! │    • The day's sites with signed demand (− drop-off, + pickup)  │
//! │    • A start hub and an end hub (may coincide)                  │
//! │    • Rectangular-approximation mileage between locations        │
//! │    • Shift length, handling time, driving rate                  │
//! │                                                                 │
//! │  Decide:                                                        │
//! │    • How many times each hauler runs each arc (integer)         │
//! │                                                                 │
//! │  Minimize:                                                      │
//! │    Total fleet-miles                                            │
//! │                                                                 │
//! │  Subject to:                                                    │
//! │    • Departure from the start hub, arrival at the end hub       │
//! │    • Flow conservation and demand satisfaction at customers     │
//! │    • The shift-length budget per hauler                         │
//! │    • Arc-count caps from the demand-sign structure              │
//! │    • Subset-leave constraints forbidding disconnected tours     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The subset-leave pair in [`route_fleet`] couples a binary indicator to
//! any intra-subset traversal and then forces at least one arc out of the
//! subset, so a hauler cannot close a tour among customers without ever
//! touching a hub. Only even-cardinality mixed-sign subsets can host such a
//! tour, which keeps the family small.

mod params;
mod solver;

pub use params::{DayParams, UNBOUNDED_CAP};
pub use solver::{route_fleet, RouteOutcome, RouterConfig};
