//! Dismissible alerts for settings actions, rendered into `#alert-container`.

use std::time::Duration;

use frostwatch_domain::alert::Alert;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlElement;

/// A single visible alert.
#[derive(Debug, Clone)]
struct AlertEntry {
    /// Unique id for keyed rendering.
    id: u32,
    alert: Alert,
}

/// Handle for pushing alerts; every alert expires after `timeout`.
#[derive(Clone, Copy)]
pub struct AlertStack {
    alerts: RwSignal<Vec<AlertEntry>>,
    next_id: RwSignal<u32>,
    timeout: Duration,
}

impl AlertStack {
    /// Render the stack into `container` for the lifetime of the page.
    pub fn mount(container: HtmlElement, timeout: Duration) -> Self {
        let stack = Self {
            alerts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
            timeout,
        };
        leptos::mount::mount_to(container, move || view! { <AlertList stack=stack/> }).forget();
        stack
    }

    pub fn push(&self, alert: Alert) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.alerts.update(|list| list.push(AlertEntry { id, alert }));

        let alerts = self.alerts;
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            alerts.update(|list| list.retain(|entry| entry.id != id));
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.alerts.update(|list| list.retain(|entry| entry.id != id));
    }
}

#[component]
fn AlertList(stack: AlertStack) -> impl IntoView {
    move || {
        stack
            .alerts
            .get()
            .into_iter()
            .map(|entry| {
                let id = entry.id;
                let class = format!("alert {} alert-dismissible fade show", entry.alert.kind.css_class());
                view! {
                    <div class=class role="alert">
                        {entry.alert.message}
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            on:click=move |_| stack.dismiss(id)
                        ></button>
                    </div>
                }
            })
            .collect_view()
    }
}
