pub mod alert;
pub mod chart;

pub use alert::AlertStack;
pub use chart::ChartistryBackend;
