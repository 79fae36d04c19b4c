//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the client core and the outside world:
//! the monitoring server, the page being driven, the chart library and the
//! timer source.

pub mod api;
pub mod chart;
pub mod clock;
pub mod view;

pub use api::{ApiError, ApiMessage, MonitorApi};
pub use chart::{ChartBackend, ChartError};
pub use clock::Sleeper;
pub use view::{CardRegistry, CardView, DetailView, SettingsView};
