//! # Contracts
//!
//! Frozen interface contracts for the live dashboard: the data model, the
//! rendering capabilities injected into each subsystem, and the seams the
//! connection orchestrator drives.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Threading Model
//! - Everything runs on a single logical thread of control
//! - Each resource (widgets, camera stream, drawing surface) has exactly one owner

mod blueprint;
mod camera;
mod connection;
mod error;
mod metric;
mod record;
mod style;
mod subsystem;
mod surface;
mod widget;

pub use blueprint::*;
pub use camera::*;
pub use connection::*;
pub use error::*;
pub use metric::{MetricKey, MetricKind, MetricValue};
pub use record::{StreamMessage, TelemetryRecord};
pub use style::*;
pub use subsystem::*;
pub use surface::*;
pub use widget::*;
