//! # frostwatch-adapter-http-reqwest
//!
//! [`MonitorApi`](frostwatch_app::ports::MonitorApi) implementation built on
//! [reqwest](https://docs.rs/reqwest), used by the terminal watcher.
//!
//! ## Status mapping
//! - 2xx: the body is decoded into the endpoint's response type.
//! - non-2xx: [`ApiError::Rejected`](frostwatch_app::ports::ApiError::Rejected)
//!   carrying the body's `message`, or `HTTP <status>` when there is none.
//! - `POST /api/test_connection` is the exception: its failure body is a
//!   regular report and is returned as `Ok` with `success: false`.
//!
//! ## Dependency rule
//! Depends on `frostwatch-app` for the port trait and `frostwatch-domain` for
//! the payloads. No reqwest type crosses into the app layer.

mod client;

pub use client::{InvalidBaseUrl, ReqwestMonitorApi};
