//! # frostwatch-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `MonitorApi`: the monitoring server's REST API
//!   - `CardRegistry` / `CardView`: dashboard cards keyed by device name
//!   - `DetailView`: status strip and live history table of the detail page
//!   - `SettingsView`: alerts, confirmation, device modal, page reload
//!   - `ChartBackend`: draws and disposes the history chart
//!   - `Sleeper`: waits between poll ticks
//! - Provide the **use-cases**:
//!   - `DashboardPoller`: reconcile all cards from one snapshot batch
//!   - `DetailPoller`: refresh one device's strip and history table
//!   - `ChartSlot`: own the single chart instance of a page
//!   - `SettingsController`: device CRUD, connection tests, notification settings
//! - Schedule **cancellable poll loops** (`polling`)
//!
//! ## Dependency rule
//! Depends on `frostwatch-domain` only (plus `futures` for abortable tasks).
//! Never imports adapter crates. Futures returned by ports are not required
//! to be `Send`; everything runs on a single cooperative event loop.

pub mod config;
pub mod polling;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
