//! Dashboard poller: reconciles every card from one snapshot batch.

use frostwatch_domain::snapshot::DeviceSnapshot;

use crate::polling::PollTask;
use crate::ports::{ApiError, CardRegistry, CardView, MonitorApi};

/// Outcome of reconciling one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Devices whose card was repainted, in batch order.
    pub updated: Vec<String>,
    /// Devices without a complete card on the page.
    pub skipped: Vec<String>,
}

/// Polls `GET /api/latest_data` and repaints the matching cards.
pub struct DashboardPoller<A, R> {
    api: A,
    registry: R,
}

impl<A: MonitorApi, R: CardRegistry> DashboardPoller<A, R> {
    pub fn new(api: A, registry: R) -> Self {
        Self { api, registry }
    }

    /// Repaint the card of every snapshot that has one.
    ///
    /// A device whose card cannot be resolved is skipped; the rest of the
    /// batch is still applied.
    pub fn reconcile(&self, snapshots: &[DeviceSnapshot]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for snapshot in snapshots {
            let Some(card) = self.registry.resolve(&snapshot.device_name) else {
                report.skipped.push(snapshot.device_name.clone());
                continue;
            };
            card.paint(&snapshot.paint());
            report.updated.push(snapshot.device_name.clone());
        }
        report
    }

    /// Fetch the latest batch and reconcile it.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the fetch; no card is touched in that case.
    pub async fn poll_once(&self) -> Result<ReconcileReport, ApiError> {
        let snapshots = self.api.latest_data().await?;
        Ok(self.reconcile(&snapshots))
    }
}

impl<A: MonitorApi, R: CardRegistry> PollTask for DashboardPoller<A, R> {
    async fn tick(&self) {
        match self.poll_once().await {
            Ok(report) => tracing::debug!(
                updated = report.updated.len(),
                skipped = ?report.skipped,
                "dashboard reconciled"
            ),
            Err(err) => tracing::warn!(error = %err, "dashboard poll skipped"),
        }
    }
}
