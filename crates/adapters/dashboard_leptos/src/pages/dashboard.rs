//! Dashboard page: one status card per device.

use frostwatch_app::config::TimingConfig;
use frostwatch_app::polling::{FirstTick, schedule};
use frostwatch_app::ports::{CardRegistry, CardView};
use frostwatch_app::services::dashboard_poller::DashboardPoller;
use frostwatch_domain::snapshot::{CardPaint, OFFLINE_HEADER_CLASS, Tone};
use leptos::task::spawn_local;
use web_sys::{Document, Element};

use crate::api::GlooApi;
use crate::dom::DomError;
use crate::lifecycle;
use crate::timer::GlooSleeper;

/// Looks cards up by their `*-{device_name}` element ids.
pub struct DomCardRegistry {
    document: Document,
}

impl CardRegistry for DomCardRegistry {
    type Card = DomCard;

    fn resolve(&self, device_name: &str) -> Option<DomCard> {
        let find = |prefix: &str| {
            self.document
                .get_element_by_id(&format!("{prefix}-{device_name}"))
        };
        Some(DomCard {
            temp_div: find("temp-div")?,
            temp_value: find("temp-value")?,
            set_temp: find("set-temp")?,
            status: find("status")?,
            header: find("header")?,
        })
    }
}

/// The five elements making up one card.
pub struct DomCard {
    temp_div: Element,
    temp_value: Element,
    set_temp: Element,
    status: Element,
    header: Element,
}

fn apply_tone(element: &Element, tone: Tone) {
    let classes = element.class_list();
    for old in Tone::ALL {
        let _ = classes.remove_1(old.css_class());
    }
    let _ = classes.add_1(tone.css_class());
}

impl CardView for DomCard {
    fn paint(&self, paint: &CardPaint) {
        self.temp_value.set_text_content(Some(&paint.temperature));
        self.set_temp.set_text_content(Some(&paint.set_temp));
        self.status.set_text_content(Some(paint.state.label()));

        let tone = paint.state.tone();
        apply_tone(&self.temp_div, tone);
        apply_tone(&self.status, tone);
        let _ = self
            .header
            .class_list()
            .toggle_with_force(OFFLINE_HEADER_CLASS, paint.state.is_offline());
    }
}

pub fn mount(document: &Document, timing: TimingConfig) -> Result<(), DomError> {
    let registry = DomCardRegistry {
        document: document.clone(),
    };
    let (run, guard) = schedule(
        GlooSleeper,
        timing.poll_interval(),
        FirstTick::Immediate,
        DashboardPoller::new(GlooApi, registry),
    );
    spawn_local(run);
    tracing::info!(interval = ?timing.poll_interval(), "dashboard polling started");
    lifecycle::release_on_pagehide(guard)
}
