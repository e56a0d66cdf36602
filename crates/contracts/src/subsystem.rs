//! Subsystem seams driven by the connection orchestrator
//!
//! The orchestrator fans remediation out through these traits instead of
//! each subsystem listening to the transport itself.

use crate::TelemetryRecord;

/// Metric widgets as seen by the orchestrator
pub trait MetricsView {
    /// Apply a record as a delta against the displayed state
    fn reconcile(&mut self, record: &TelemetryRecord);

    /// Put every widget back to its placeholder (idempotent)
    fn reset(&mut self);
}

/// Camera as seen by the orchestrator
pub trait CameraSwitch {
    /// System-initiated stop; no-op unless the camera is on
    fn force_stop(&mut self);
}

/// Identifier of one run of the animation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle(pub u64);

/// Point-cloud animation as seen by the orchestrator
pub trait AnimationLoop {
    /// (Re)start the loop, replacing any pending run
    fn start(&mut self) -> LoopHandle;

    /// Stop scheduling frames; safe when not running
    fn cancel(&mut self);

    /// True while a frame request is pending
    fn is_running(&self) -> bool;
}
