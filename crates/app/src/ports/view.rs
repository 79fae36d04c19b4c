//! View ports: the parts of a page the controllers write to.

use std::time::Duration;

use frostwatch_domain::alert::Alert;
use frostwatch_domain::detail::{Badge, HistoryRow};
use frostwatch_domain::device::DeviceForm;
use frostwatch_domain::snapshot::CardPaint;

/// The handle bundle of one dashboard card.
pub trait CardView {
    /// Replace the card's temperature, set-point and state styling.
    ///
    /// Previous tone classes are cleared before the new state is applied.
    fn paint(&self, paint: &CardPaint);
}

/// Maps a device name to its dashboard card.
pub trait CardRegistry {
    type Card: CardView;

    /// Resolve every element of the card for `device_name`.
    ///
    /// Returns `None` when the card is missing or incomplete; the caller
    /// skips that device.
    fn resolve(&self, device_name: &str) -> Option<Self::Card>;
}

/// Live parts of the device detail page.
pub trait DetailView {
    /// Redraw the operational status strip.
    fn render_op_status(&self, badges: &[Badge; 4]);

    /// Insert `row` as the first history row, removing the "no data" placeholder.
    fn prepend_history_row(&self, row: &HistoryRow);
}

/// Interactive surface of the settings page.
pub trait SettingsView {
    /// Show a dismissible alert that expires on its own.
    fn show_alert(&self, alert: Alert);

    /// Ask the user to confirm an irreversible action.
    fn confirm(&self, message: &str) -> bool;

    /// Fill the device modal and show it.
    fn open_device_modal(&self, title: &str, form: &DeviceForm);

    fn close_device_modal(&self);

    /// Reload the whole page once `delay` has elapsed.
    fn schedule_reload(&self, delay: Duration);
}
