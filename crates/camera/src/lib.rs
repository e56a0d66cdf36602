//! # Camera
//!
//! Camera device lifecycle for the dashboard's camera region.
//!
//! Responsibilities:
//! - Off / Acquiring / On / Unavailable state machine driven by the user toggle
//! - Single in-flight acquisition slot (extra toggles while acquiring are ignored)
//! - Releasing every track on stop, including system-initiated force stops
//!
//! Acquisition failures stay inside this crate: they move the controller to
//! `Unavailable` and never reach the connection or point-cloud subsystems.

mod controller;

pub use controller::{AcquisitionTicket, CameraController, CameraSession, CameraState, ToggleAction};
