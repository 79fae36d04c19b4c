//! Chart slot: the single owned chart instance of a detail page.

use frostwatch_domain::chart::{ChartSpec, HistoryPoint, Thresholds};

use crate::ports::{ChartBackend, ChartError};

/// Owns at most one drawn chart.
///
/// Every render disposes the current chart before anything new is drawn,
/// and dropping the slot disposes whatever is left.
pub struct ChartSlot<B: ChartBackend> {
    backend: B,
    current: Option<B::Chart>,
}

impl<B: ChartBackend> ChartSlot<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// Replace the chart with one drawn from `history`.
    ///
    /// Returns `Ok(false)` and leaves the slot empty when there is nothing to
    /// draw.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when the backend fails; the slot is empty then.
    pub fn render(
        &mut self,
        history: &[HistoryPoint],
        thresholds: Thresholds,
    ) -> Result<bool, ChartError> {
        self.clear();

        let Some(spec) = ChartSpec::build(history, thresholds) else {
            tracing::info!("history is empty, chart not drawn");
            return Ok(false);
        };
        if spec.skipped > 0 {
            tracing::warn!(skipped = spec.skipped, "dropped history points with unreadable timestamps");
        }

        self.current = Some(self.backend.draw(&spec)?);
        Ok(true)
    }

    /// Dispose the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(chart) = self.current.take() {
            self.backend.dispose(chart);
        }
    }

    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.current.is_some()
    }
}

impl<B: ChartBackend> Drop for ChartSlot<B> {
    fn drop(&mut self) {
        self.clear();
    }
}
