//! Page-embedded timing overrides.
//!
//! A page may carry
//! `<script id="frostwatch-config" type="application/json">{"poll_interval_ms": 5000}</script>`;
//! missing fields keep their defaults.

use frostwatch_app::config::TimingConfig;
use web_sys::Document;

const CONFIG_SCRIPT_ID: &str = "frostwatch-config";

pub fn page_timing(document: &Document) -> TimingConfig {
    let raw = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    parse_timing(raw.as_deref())
}

fn parse_timing(raw: Option<&str>) -> TimingConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return TimingConfig::default();
    };
    match serde_json::from_str::<TimingConfig>(raw) {
        Ok(timing) => match timing.validate() {
            Ok(()) => timing,
            Err(reason) => {
                tracing::warn!(%reason, "ignoring page timing");
                TimingConfig::default()
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "malformed page timing");
            TimingConfig::default()
        }
    }
}
