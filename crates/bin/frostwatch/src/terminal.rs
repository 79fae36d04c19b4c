//! Terminal views: cards and the detail strip are reported as log lines.

use frostwatch_app::ports::{CardRegistry, CardView, DetailView};
use frostwatch_domain::detail::{Badge, HistoryRow};
use frostwatch_domain::snapshot::CardPaint;

/// Resolves a card for every watched device. An empty list watches all of them.
pub struct LogCardRegistry {
    devices: Vec<String>,
}

impl LogCardRegistry {
    pub fn new(devices: Vec<String>) -> Self {
        Self { devices }
    }

    fn watches(&self, device_name: &str) -> bool {
        self.devices.is_empty() || self.devices.iter().any(|d| d == device_name)
    }
}

impl CardRegistry for LogCardRegistry {
    type Card = LogCard;

    fn resolve(&self, device_name: &str) -> Option<LogCard> {
        self.watches(device_name).then(|| LogCard {
            device_name: device_name.to_string(),
        })
    }
}

pub struct LogCard {
    device_name: String,
}

impl CardView for LogCard {
    fn paint(&self, paint: &CardPaint) {
        tracing::info!(
            device = %self.device_name,
            temperature = %paint.temperature,
            set_temp = %paint.set_temp,
            state = paint.state.label(),
            tone = paint.state.tone().css_class(),
            "card"
        );
    }
}

/// Reports the detail poller's badge strip and new history rows.
pub struct LogDetailView {
    device_name: String,
}

impl LogDetailView {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
        }
    }
}

impl DetailView for LogDetailView {
    fn render_op_status(&self, badges: &[Badge; 4]) {
        let active = badges
            .iter()
            .filter(|badge| badge.active)
            .map(|badge| badge.flag.label())
            .collect::<Vec<_>>()
            .join(",");
        tracing::info!(device = %self.device_name, active = %active, "op status");
    }

    fn prepend_history_row(&self, row: &HistoryRow) {
        tracing::info!(
            device = %self.device_name,
            timestamp = %row.timestamp,
            temperature = %row.temperature,
            "reading"
        );
    }
}
