//! Settings page: device modal, device table and notification settings form.

use std::rc::Rc;
use std::time::Duration;

use frostwatch_app::config::TimingConfig;
use frostwatch_app::ports::SettingsView;
use frostwatch_app::services::settings_controller::{SettingsController, TableAction};
use frostwatch_domain::alert::Alert;
use frostwatch_domain::device::{DeviceForm, DeviceId, DeviceRecord};
use frostwatch_domain::notification::NotificationSettings;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::api::GlooApi;
use crate::components::AlertStack;
use crate::dom::{self, DomError};

#[wasm_bindgen]
extern "C" {
    /// `bootstrap.Modal` from the page's Bootstrap bundle.
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Modal;

    #[wasm_bindgen(catch, static_method_of = Modal, js_namespace = bootstrap, js_name = getOrCreateInstance)]
    fn get_or_create_instance(element: &Element) -> Result<Modal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &Modal);

    #[wasm_bindgen(method)]
    fn hide(this: &Modal);
}

/// Ids of the device modal inputs.
mod field {
    pub const ID: &str = "deviceId";
    pub const NAME: &str = "deviceName";
    pub const IP: &str = "deviceIp";
    pub const PORT: &str = "devicePort";
    pub const CONTROLLER_ID: &str = "deviceControllerId";
    pub const ALARM_THRESHOLD: &str = "deviceAlarmThreshold";
    pub const MEMO: &str = "deviceMemo";
    pub const PUSHOVER_TOKEN: &str = "pushoverApiToken";
    pub const PUSHOVER_USER_KEYS: &str = "pushoverUserKeys";
}

/// [`SettingsView`] over the Bootstrap markup of the settings page.
#[derive(Clone)]
pub struct DomSettingsView {
    document: Document,
    modal: Element,
    title: Option<Element>,
    alerts: AlertStack,
}

impl DomSettingsView {
    fn modal(&self) -> Option<Modal> {
        match get_or_create_instance(&self.modal) {
            Ok(modal) => Some(modal),
            Err(err) => {
                tracing::warn!(?err, "bootstrap modal unavailable");
                None
            }
        }
    }

    fn read_form(&self) -> DeviceForm {
        let value = |id: &str| dom::field_value(&self.document, id);
        DeviceForm {
            id: value(field::ID).parse::<DeviceId>().ok(),
            name: value(field::NAME),
            ip: value(field::IP),
            port: value(field::PORT),
            controller_id: value(field::CONTROLLER_ID),
            alarm_threshold: value(field::ALARM_THRESHOLD),
            memo: value(field::MEMO),
        }
    }

    fn fill_form(&self, form: &DeviceForm) {
        let set = |id: &str, value: &str| dom::set_field_value(&self.document, id, value);
        set(field::ID, &form.id.map(|id| id.to_string()).unwrap_or_default());
        set(field::NAME, &form.name);
        set(field::IP, &form.ip);
        set(field::PORT, &form.port);
        set(field::CONTROLLER_ID, &form.controller_id);
        set(field::ALARM_THRESHOLD, &form.alarm_threshold);
        set(field::MEMO, &form.memo);
    }

    fn read_notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            api_token: dom::field_value(&self.document, field::PUSHOVER_TOKEN),
            user_keys: dom::field_value(&self.document, field::PUSHOVER_USER_KEYS),
        }
    }
}

impl SettingsView for DomSettingsView {
    fn show_alert(&self, alert: Alert) {
        self.alerts.push(alert);
    }

    fn confirm(&self, message: &str) -> bool {
        dom::window()
            .ok()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn open_device_modal(&self, title: &str, form: &DeviceForm) {
        if let Some(label) = &self.title {
            label.set_text_content(Some(title));
        }
        self.fill_form(form);
        if let Some(modal) = self.modal() {
            modal.show();
        }
    }

    fn close_device_modal(&self) {
        if let Some(modal) = self.modal() {
            modal.hide();
        }
    }

    fn schedule_reload(&self, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            if let Ok(window) = dom::window() {
                if let Err(err) = window.location().reload() {
                    tracing::warn!(?err, "page reload failed");
                }
            }
        });
    }
}

/// Which row button was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowButton {
    Edit,
    Delete,
    Test,
}

impl RowButton {
    const ALL: [Self; 3] = [Self::Edit, Self::Delete, Self::Test];

    fn selector(self) -> &'static str {
        match self {
            Self::Edit => ".btn-edit",
            Self::Delete => ".btn-delete",
            Self::Test => ".btn-test",
        }
    }
}

/// Turn a row button's data attributes into an action.
fn decode_action(
    button: RowButton,
    device: Option<&str>,
    id: Option<&str>,
    name: Option<&str>,
) -> Option<TableAction> {
    let record = || serde_json::from_str::<DeviceRecord>(device?).ok();
    match button {
        RowButton::Edit => record().map(TableAction::Edit),
        RowButton::Test => record().map(TableAction::Test),
        RowButton::Delete => Some(TableAction::Delete {
            id: id?.parse().ok()?,
            name: name?.to_string(),
        }),
    }
}

fn table_action(target: &Element) -> Option<TableAction> {
    target.closest("tr").ok().flatten()?;
    let (button, element) = RowButton::ALL.into_iter().find_map(|button| {
        let element = target.closest(button.selector()).ok().flatten()?;
        Some((button, element))
    })?;
    let attr = |name: &str| element.get_attribute(name);
    let action = decode_action(
        button,
        attr("data-device").as_deref(),
        attr("data-id").as_deref(),
        attr("data-name").as_deref(),
    );
    if action.is_none() {
        tracing::warn!(?button, "row button carries unreadable device data");
    }
    action
}

type Controller = SettingsController<GlooApi, DomSettingsView>;

pub fn mount(document: &Document, timing: TimingConfig) -> Result<(), DomError> {
    let alert_container: HtmlElement = dom::require(document, "alert-container")?;
    let view = DomSettingsView {
        document: document.clone(),
        modal: dom::require(document, "deviceModal")?,
        title: document.get_element_by_id("deviceModalLabel"),
        alerts: AlertStack::mount(alert_container, timing.alert_timeout()),
    };
    let controller: Rc<Controller> = Rc::new(SettingsController::new(
        GlooApi,
        view.clone(),
        timing.reload_delay(),
    ));

    if let Some(button) = document.get_element_by_id("newDeviceBtn") {
        let controller = controller.clone();
        dom::on(&button, "click", move |_| controller.prepare_new())?;
    }

    if let Some(table_body) = document.query_selector("#device-table tbody")? {
        let controller = controller.clone();
        dom::on(&table_body, "click", move |event| {
            let Some(action) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|t| table_action(&t))
            else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move { controller.handle_table_action(action).await });
        })?;
    }

    let save_button = dom::require_selector(document, "#deviceModal .btn-primary")?;
    {
        let controller = controller.clone();
        let view = view.clone();
        dom::on(&save_button, "click", move |_| {
            let form = view.read_form();
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(err) = controller.save_device(&form).await {
                    tracing::debug!(error = %err, "device not saved");
                }
            });
        })?;
    }

    if let Some(form) = document.get_element_by_id("pushoverSettingsForm") {
        dom::on(&form, "submit", move |event| {
            event.prevent_default();
            let settings = view.read_notification_settings();
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(err) = controller.save_notification_settings(&settings).await {
                    tracing::debug!(error = %err, "notification settings not saved");
                }
            });
        })?;
    }

    tracing::info!("settings page ready");
    Ok(())
}
