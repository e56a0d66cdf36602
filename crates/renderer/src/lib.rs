//! # Renderer
//!
//! Telemetry rendering module.
//!
//! Responsibilities:
//! - Map raw metric values to display text and categorical style (`FormatRules`)
//! - Apply decoded records to the injected metric widgets as deltas
//! - Reset every widget to the placeholder on demand
//!
//! ## Usage Example
//!
//! ```ignore
//! use renderer::{FormatRules, TelemetryRenderer};
//!
//! let widgets = MetricKey::ALL.into_iter().map(|key| (key, dom_widget(key)));
//! let mut renderer = TelemetryRenderer::new(widgets, FormatRules::default());
//! renderer.reconcile(&record);
//! ```

mod format;
mod telemetry;

pub use format::{
    classify_fault, format_idle_duration, format_measurement, format_metric, DisplayText, FormatRules,
    FormattedMetric,
};
pub use telemetry::{ReconcileSummary, TelemetryRenderer};
