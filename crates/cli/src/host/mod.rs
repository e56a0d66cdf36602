//! Console-backed rendering targets
//!
//! Headless stand-ins for the page: widgets and the status slot keep their
//! visible state in memory, the camera device is simulated and the lidar
//! surface rasterises into a character grid.

mod camera;
mod canvas;
mod widgets;

pub use camera::{ConsoleCameraView, ReplayCamera, SimulatedStream};
pub use canvas::TextCanvas;
pub use widgets::{ConsoleStatus, ConsoleWidget};
