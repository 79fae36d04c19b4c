//! Application services: use-case implementations.
//!
//! Each service accepts port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from adapters.

pub mod chart_slot;
pub mod dashboard_poller;
pub mod detail_poller;
pub mod settings_controller;
