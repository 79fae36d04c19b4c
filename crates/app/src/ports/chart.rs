//! Chart port: draws a [`ChartSpec`] and disposes the result.

use frostwatch_domain::chart::ChartSpec;

/// The chart library refused to draw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to draw chart: {0}")]
pub struct ChartError(pub String);

/// A charting library bound to one drawing surface.
pub trait ChartBackend {
    /// Handle of a drawn chart; owns whatever the library allocated.
    type Chart;

    /// Draw a new chart on the surface.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when the surface is unavailable or drawing fails.
    fn draw(&self, spec: &ChartSpec) -> Result<Self::Chart, ChartError>;

    /// Release a chart previously returned by [`draw`](Self::draw).
    fn dispose(&self, chart: Self::Chart);
}
