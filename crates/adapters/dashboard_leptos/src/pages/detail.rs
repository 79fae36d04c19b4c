//! Detail page: history chart, operational status strip and live table.

use frostwatch_app::config::TimingConfig;
use frostwatch_app::polling::{FirstTick, schedule};
use frostwatch_app::ports::{ChartBackend, DetailView};
use frostwatch_app::services::chart_slot::ChartSlot;
use frostwatch_app::services::detail_poller::DetailPoller;
use frostwatch_domain::chart::{HistoryPoint, Thresholds};
use frostwatch_domain::detail::{Badge, HistoryRow};
use leptos::task::spawn_local;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTableRowElement, HtmlTableSectionElement};

use crate::api::GlooApi;
use crate::components::ChartistryBackend;
use crate::dom::{self, DomError};
use crate::lifecycle;
use crate::timer::GlooSleeper;

const HISTORY_SCRIPT_ID: &str = "history-chart-data";

/// History entry as embedded by the server; readings may be missing.
#[derive(Deserialize)]
struct EmbeddedPoint {
    timestamp: String,
    temperature: Option<f64>,
}

fn parse_history(raw: &str) -> Result<Vec<HistoryPoint>, serde_json::Error> {
    let points: Vec<EmbeddedPoint> = serde_json::from_str(raw)?;
    Ok(points
        .into_iter()
        .filter_map(|p| {
            Some(HistoryPoint {
                timestamp: p.timestamp,
                temperature: p.temperature?,
            })
        })
        .collect())
}

fn parse_threshold(raw: Option<String>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn badge_html(badges: &[Badge; 4]) -> String {
    badges
        .iter()
        .map(|badge| {
            format!(
                r#"<span class="badge {}" style="white-space: nowrap; font-size: 0.8rem;"><i class="fas {} me-1"></i> {}</span>"#,
                badge.class(),
                badge.flag.icon(),
                badge.flag.label()
            )
        })
        .collect()
}

fn read_history(document: &Document) -> Vec<HistoryPoint> {
    let Some(raw) = document
        .get_element_by_id(HISTORY_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return Vec::new();
    };
    parse_history(&raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "malformed history data");
        Vec::new()
    })
}

/// The element the chart is mounted into. A `<canvas>` placeholder is
/// hidden and the chart goes into its parent.
fn chart_host(container: &Element) -> Result<HtmlElement, DomError> {
    if container.tag_name().eq_ignore_ascii_case("canvas") {
        container.set_attribute("hidden", "")?;
        return container
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::Missing("#tempChart parent".to_string()));
    }
    container
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Missing("#tempChart".to_string()))
}

/// Draw the initial chart when a host was found.
///
/// A missing host or a failed draw is logged; the page keeps polling either way.
fn start_chart<B: ChartBackend>(
    backend: Result<B, DomError>,
    history: &[HistoryPoint],
    thresholds: Thresholds,
) -> Option<ChartSlot<B>> {
    let backend = match backend {
        Ok(backend) => backend,
        Err(err) => {
            tracing::warn!(error = %err, "no chart host, history chart skipped");
            return None;
        }
    };
    let mut chart = ChartSlot::new(backend);
    if let Err(err) = chart.render(history, thresholds) {
        tracing::warn!(error = %err, "history chart not drawn");
    }
    Some(chart)
}

/// Writes into `#op-status` and the history table.
pub struct DomDetailView {
    op_status: Option<Element>,
    table_body: Option<HtmlTableSectionElement>,
}

impl DomDetailView {
    fn new(document: &Document) -> Self {
        let table_body = document
            .query_selector(".table tbody")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlTableSectionElement>().ok());
        Self {
            op_status: document.get_element_by_id("op-status"),
            table_body,
        }
    }

    fn insert_row(body: &HtmlTableSectionElement, row: &HistoryRow) -> Result<(), DomError> {
        if let Some(placeholder) = body.query_selector(r#"td[colspan="2"]"#)? {
            if let Some(placeholder_row) = placeholder.parent_element() {
                placeholder_row.remove();
            }
        }
        let tr: HtmlTableRowElement = body.insert_row_with_index(0)?.unchecked_into();
        tr.insert_cell()?.set_text_content(Some(&row.timestamp));
        tr.insert_cell()?.set_text_content(Some(&row.temperature));
        Ok(())
    }
}

impl DetailView for DomDetailView {
    fn render_op_status(&self, badges: &[Badge; 4]) {
        if let Some(strip) = &self.op_status {
            strip.set_inner_html(&badge_html(badges));
        }
    }

    fn prepend_history_row(&self, row: &HistoryRow) {
        let Some(body) = &self.table_body else {
            return;
        };
        if let Err(err) = Self::insert_row(body, row) {
            tracing::warn!(error = %err, "failed to insert history row");
        }
    }
}

pub fn mount(document: &Document, timing: TimingConfig) -> Result<(), DomError> {
    let device_name = dom::require_selector(document, ".card-header .label")?
        .text_content()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| DomError::Missing("device name".to_string()))?;

    let container: Element = dom::require(document, "tempChart")?;
    let thresholds = Thresholds {
        set_temp: parse_threshold(container.get_attribute("data-set-temp")),
        alarm_threshold: parse_threshold(container.get_attribute("data-alarm-threshold")),
    };

    let host = chart_host(&container).map(ChartistryBackend::new);
    let chart = start_chart(host, &read_history(document), thresholds);

    let (run, guard) = schedule(
        GlooSleeper,
        timing.poll_interval(),
        FirstTick::AfterInterval,
        DetailPoller::new(GlooApi, DomDetailView::new(document), device_name),
    );
    spawn_local(run);
    lifecycle::release_on_pagehide((guard, chart))
}
