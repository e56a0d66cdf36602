//! Camera capabilities - device access, stream handles and the camera UI region
//!
//! The device is asked for a stream; the stream is owned by the camera
//! controller until it is stopped. Nothing outside the controller sees it.

use serde::{Deserialize, Serialize};

use crate::CameraError;

/// Preferred camera facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Rear / forward-looking camera (road view)
    #[default]
    Environment,
    /// Front / selfie camera
    User,
    /// No preference, platform default
    Any,
}

/// Constraints sent with an acquisition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureConstraints {
    /// Facing preference (`None` means the platform default device)
    pub facing: Option<Facing>,
}

impl CaptureConstraints {
    /// Constraints for a facing preference; `Facing::Any` maps to no constraint
    pub fn facing(facing: Facing) -> Self {
        match facing {
            Facing::Any => Self::default_device(),
            other => Self {
                facing: Some(other),
            },
        }
    }

    /// Unconstrained request for the default device
    pub fn default_device() -> Self {
        Self { facing: None }
    }
}

/// An acquired device stream
pub trait MediaStream {
    /// Stable identifier used to bind the stream to a video sink
    fn id(&self) -> &str;

    /// Stop every track of the stream, releasing the device
    ///
    /// Must be idempotent.
    fn stop_all_tracks(&mut self);
}

/// Capture device access
///
/// Acquisition is the only operation in the dashboard that suspends.
#[trait_variant::make(CameraDevice: Send)]
pub trait LocalCameraDevice {
    /// Stream type produced by this device
    type Stream: MediaStream;

    /// Request a video stream matching `constraints`
    ///
    /// # Errors
    /// Permission denial, missing device, or an unsupported constraint.
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<Self::Stream, CameraError>;
}

/// The camera region of the page: video sink, placeholder, toggle and its status line
pub trait CameraView {
    /// Attach a live stream to the video sink and show it
    fn bind_sink(&mut self, stream_id: &str);

    /// Detach whatever stream the sink shows
    fn clear_sink(&mut self);

    /// Hide the feed and show the placeholder with `text`
    fn show_placeholder(&mut self, text: &str);

    /// Update the toggle control
    fn set_toggle(&mut self, label: &str, enabled: bool);

    /// Update the status line next to the toggle
    fn set_toggle_status(&mut self, text: &str);
}
