//! Page-lifetime resources.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::PageTransitionEvent;

use crate::dom::{self, DomError};

/// Resources released when the page is unloaded for good.
///
/// A page entering the back/forward cache keeps them, so its poll loops
/// resume when the page is shown again.
pub struct PageResources<T> {
    held: RefCell<Option<T>>,
}

impl<T> PageResources<T> {
    pub fn new(resources: T) -> Self {
        Self {
            held: RefCell::new(Some(resources)),
        }
    }

    /// React to `pagehide`. Returns `true` when the resources were dropped.
    pub fn page_hidden(&self, persisted: bool) -> bool {
        if persisted {
            return false;
        }
        self.held.borrow_mut().take().is_some()
    }

    pub fn is_held(&self) -> bool {
        self.held.borrow().is_some()
    }
}

/// Keep `resources` alive until the page is unloaded, then drop them.
///
/// Dropping a [`PollGuard`](frostwatch_app::polling::PollGuard) stops its
/// loop and dropping a [`ChartSlot`](frostwatch_app::services::chart_slot::ChartSlot)
/// disposes its chart.
pub fn release_on_pagehide<T: 'static>(resources: T) -> Result<(), DomError> {
    let resources = PageResources::new(resources);
    let window = dom::window()?;
    dom::on(&window, "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if resources.page_hidden(persisted) {
            tracing::debug!("page unloaded, pollers stopped");
        } else if persisted {
            tracing::debug!("page cached, pollers kept");
        }
    })
}
