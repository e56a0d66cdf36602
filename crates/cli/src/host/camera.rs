//! Simulated camera device and console camera region

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::{CameraDevice, CameraError, CameraView, CaptureConstraints, MediaStream};
use tracing::debug;

use crate::cli::CameraMode;

/// Stream handed out by `ReplayCamera`
#[derive(Debug)]
pub struct SimulatedStream {
    id: String,
    stopped: bool,
}

impl MediaStream for SimulatedStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn stop_all_tracks(&mut self) {
        if !self.stopped {
            debug!(stream_id = %self.id, "Simulated camera tracks stopped");
        }
        self.stopped = true;
    }
}

/// Camera device used by `replay`
#[derive(Debug)]
pub enum ReplayCamera {
    /// Grants every request; the facing preference is honoured
    Granting { acquired: AtomicU64 },
    /// Denies every request
    Denying,
}

impl ReplayCamera {
    /// Device for a CLI camera mode; `None` when the camera stays untouched
    pub fn for_mode(mode: CameraMode) -> Option<Self> {
        match mode {
            CameraMode::Off => None,
            CameraMode::Simulated => Some(Self::Granting {
                acquired: AtomicU64::new(0),
            }),
            CameraMode::Unavailable => Some(Self::Denying),
        }
    }
}

impl CameraDevice for ReplayCamera {
    type Stream = SimulatedStream;

    async fn acquire(&self, constraints: CaptureConstraints) -> Result<SimulatedStream, CameraError> {
        match self {
            Self::Granting { acquired } => {
                let n = acquired.fetch_add(1, Ordering::Relaxed) + 1;
                let facing = constraints
                    .facing
                    .map_or("default".to_string(), |f| format!("{f:?}").to_lowercase());
                Ok(SimulatedStream {
                    id: format!("sim-{facing}-{n}"),
                    stopped: false,
                })
            }
            Self::Denying => Err(CameraError::PermissionDenied(
                "camera access denied by the replay host".to_string(),
            )),
        }
    }
}

/// Camera region state as the page would show it
#[derive(Debug, Default, Clone)]
pub struct ConsoleCameraView {
    sink: Option<String>,
    placeholder: Option<String>,
    toggle_label: String,
    toggle_enabled: bool,
    status: String,
}

impl ConsoleCameraView {
    /// Stream currently shown, if any
    pub fn sink(&self) -> Option<&str> {
        self.sink.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn toggle_label(&self) -> &str {
        &self.toggle_label
    }

    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl CameraView for ConsoleCameraView {
    fn bind_sink(&mut self, stream_id: &str) {
        self.sink = Some(stream_id.to_string());
        self.placeholder = None;
    }

    fn clear_sink(&mut self) {
        self.sink = None;
    }

    fn show_placeholder(&mut self, text: &str) {
        self.placeholder = Some(text.to_string());
    }

    fn set_toggle(&mut self, label: &str, enabled: bool) {
        self.toggle_label = label.to_string();
        self.toggle_enabled = enabled;
    }

    fn set_toggle_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
}
