//! # frostwatch-dashboard
//!
//! Browser adapter for the server-rendered monitoring pages.
//!
//! The server renders every page as plain HTML; this crate attaches to
//! whichever page it finds itself on:
//! - dashboard: `temp-div-*` cards, polled immediately and then every interval
//! - detail: `#tempChart`, history chart plus the live status strip and table
//! - settings: `#deviceModal`, the device CRUD form and notification settings
//!
//! ## Dependency rule
//! Depends on `frostwatch-app` for the services and port traits and on
//! `frostwatch-domain` for the data model. DOM, `gloo` and Leptos types stay
//! in this crate.

pub mod api;
mod components;
mod config;
mod dom;
mod lifecycle;
mod logging;
mod pages;
mod timer;

use web_sys::Document;

use crate::dom::DomError;

/// Entry point: install logging, read the page timing and bind the current page.
pub fn start() {
    logging::init();
    if let Err(err) = leptos::task::Executor::init_wasm_bindgen() {
        tracing::debug!(?err, "executor already initialised");
    }

    if let Err(err) = boot() {
        tracing::error!(error = %err, "failed to start page controller");
    }
}

fn boot() -> Result<(), DomError> {
    let document = dom::document()?;
    let timing = config::page_timing(&document);

    match Page::detect(&document) {
        Some(Page::Detail) => pages::detail::mount(&document, timing),
        Some(Page::Settings) => pages::settings::mount(&document, timing),
        Some(Page::Dashboard) => pages::dashboard::mount(&document, timing),
        None => {
            tracing::debug!("no monitoring page detected");
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Dashboard,
    Detail,
    Settings,
}

impl Page {
    fn detect(document: &Document) -> Option<Self> {
        if document.get_element_by_id("tempChart").is_some() {
            Some(Self::Detail)
        } else if document.get_element_by_id("deviceModal").is_some() {
            Some(Self::Settings)
        } else if matches!(document.query_selector("[id^='temp-div-']"), Ok(Some(_))) {
            Some(Self::Dashboard)
        } else {
            None
        }
    }
}
