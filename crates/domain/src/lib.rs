//! # frostwatch-domain
//!
//! Pure domain model for the frostwatch monitoring client.
//!
//! ## Responsibilities
//! - Define the **snapshots** returned by the monitoring server's polling endpoints
//! - Classify a snapshot into a dashboard **card state** (alarm / normal / offline)
//! - Describe the **operational status strip** (run, comp, defrost, fan badges)
//! - Describe the **history chart** independently of any charting library
//! - Validate **device forms** before anything is sent to the server
//! - Define user-facing **alerts**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Network and view boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod alert;
pub mod chart;
pub mod detail;
pub mod device;
pub mod notification;
pub mod snapshot;
