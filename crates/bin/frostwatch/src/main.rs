//! # frostwatch
//!
//! Composition root that wires the reqwest adapter into the pollers.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build the HTTP client and the log-backed views
//! - Run the dashboard poller (and the detail poller when a device is set)
//! - Cancel every poll loop on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod terminal;

use std::time::Duration;

use anyhow::Context;
use frostwatch_adapter_http_reqwest::ReqwestMonitorApi;
use frostwatch_app::polling::{FirstTick, schedule};
use frostwatch_app::ports::Sleeper;
use frostwatch_app::services::dashboard_poller::DashboardPoller;
use frostwatch_app::services::detail_poller::DetailPoller;
use futures::future::OptionFuture;

use crate::config::Config;
use crate::terminal::{LogCardRegistry, LogDetailView};

struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.env_filter()?)
        .init();

    let api = ReqwestMonitorApi::from_base_url(&config.server.base_url)?;
    let interval = config.timing.poll_interval();
    tracing::info!(server = %api.base_url(), ?interval, "watching");

    // Dashboard
    let registry = LogCardRegistry::new(config.watch.devices.clone());
    let (dashboard_loop, dashboard_guard) = schedule(
        TokioSleeper,
        interval,
        FirstTick::Immediate,
        DashboardPoller::new(api.clone(), registry),
    );

    // Detail
    let detail = config.watch.detail_device.clone().map(|name| {
        schedule(
            TokioSleeper,
            interval,
            FirstTick::AfterInterval,
            DetailPoller::new(api.clone(), LogDetailView::new(name.clone()), name),
        )
    });
    let (detail_loop, detail_guard) = match detail {
        Some((run, guard)) => (Some(run), Some(guard)),
        None => (None, None),
    };
    let detail_loop: OptionFuture<_> = detail_loop.into();

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("stopping"),
            Err(err) => tracing::error!(error = %err, "cannot listen for Ctrl-C, stopping"),
        }
        dashboard_guard.cancel();
        if let Some(guard) = &detail_guard {
            guard.cancel();
        }
    };

    futures::join!(dashboard_loop, detail_loop, shutdown);
    Ok(())
}
