//! Detail poller: refreshes one device's status strip and live history table.

use frostwatch_domain::detail::HistoryRow;

use crate::polling::PollTask;
use crate::ports::{ApiError, DetailView, MonitorApi};

/// What a single detail poll changed on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailUpdate {
    pub op_status_rendered: bool,
    pub inserted_row: Option<HistoryRow>,
}

/// Polls `GET /api/device_data/{name}` for the device bound to the page.
pub struct DetailPoller<A, V> {
    api: A,
    view: V,
    device_name: String,
}

impl<A: MonitorApi, V: DetailView> DetailPoller<A, V> {
    pub fn new(api: A, view: V, device_name: impl Into<String>) -> Self {
        Self {
            api,
            view,
            device_name: device_name.into(),
        }
    }

    /// Fetch the latest snapshot and apply it.
    ///
    /// Every snapshot carrying both a timestamp and a temperature adds one
    /// row on top of the table, even if the previous top row has the same
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the fetch; the page is left untouched.
    #[tracing::instrument(skip(self), fields(device = %self.device_name))]
    pub async fn poll_once(&self) -> Result<DetailUpdate, ApiError> {
        let snapshot = self.api.device_data(&self.device_name).await?;
        let mut update = DetailUpdate::default();

        if let Some(op_status) = snapshot.op_status {
            self.view.render_op_status(&op_status.badges());
            update.op_status_rendered = true;
        }

        if let Some(row) = snapshot.history_row() {
            self.view.prepend_history_row(&row);
            update.inserted_row = Some(row);
        }

        Ok(update)
    }
}

impl<A: MonitorApi, V: DetailView> PollTask for DetailPoller<A, V> {
    async fn tick(&self) {
        match self.poll_once().await {
            Ok(update) => tracing::debug!(
                device = %self.device_name,
                row = update.inserted_row.is_some(),
                "detail refreshed"
            ),
            Err(err) => tracing::warn!(
                device = %self.device_name,
                error = %err,
                "detail poll skipped"
            ),
        }
    }
}
