//! DashboardConfig - Config Loader output
//!
//! Describes the complete dashboard configuration: stream endpoint, display texts,
//! status messages, camera labels and point-cloud simulation parameters.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::{Facing, Rgba};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Inbound stream settings
    #[serde(default)]
    pub stream: StreamConfig,

    /// Metric widget texts
    #[serde(default)]
    pub display: DisplayConfig,

    /// Connection status messages
    #[serde(default)]
    pub status: StatusMessages,

    /// Camera region settings
    #[serde(default)]
    pub camera: CameraConfig,

    /// Point-cloud simulation settings
    #[serde(default)]
    pub lidar: LidarConfig,
}

/// Inbound stream settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Relay endpoint (informational; transport is owned by the host)
    #[serde(default = "default_stream_url")]
    pub url: String,
}

fn default_stream_url() -> String {
    "ws://localhost:8765".to_string()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: default_stream_url(),
        }
    }
}

/// Metric widget texts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text shown when a metric has no data
    pub placeholder: String,

    /// Value the relay sends when there is no fault code
    pub dtc_no_fault_sentinel: String,

    /// Text shown when there is no fault code
    pub dtc_no_fault_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: "---".to_string(),
            dtc_no_fault_sentinel: "None".to_string(),
            dtc_no_fault_label: "None".to_string(),
        }
    }
}

/// Connection status messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    pub connecting: String,
    pub connected: String,
    pub disconnected: String,
    pub connection_error: String,
    /// Prefix of the message shown when the vehicle side drops; the relay's error text is appended
    pub upstream_disconnected: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            connecting: "Status: Connecting to server...".to_string(),
            connected: "Status: Connected to server.".to_string(),
            disconnected:
                "Status: Disconnected from server. Please restart the telemetry server and refresh."
                    .to_string(),
            connection_error: "Status: Connection error. Is the telemetry server running?"
                .to_string(),
            upstream_disconnected: "Status: Vehicle disconnected".to_string(),
        }
    }
}

/// Camera region settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Preferred facing; falls back to the default device when unsupported
    pub facing: Facing,
    pub show_label: String,
    pub hide_label: String,
    pub on_status: String,
    pub off_status: String,
    pub acquiring_placeholder: String,
    pub paused_placeholder: String,
    pub unavailable_label: String,
    pub unavailable_placeholder: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: Facing::Environment,
            show_label: "Show Camera Feed".to_string(),
            hide_label: "Hide Camera Feed".to_string(),
            on_status: "Camera is ON".to_string(),
            off_status: "Camera is OFF".to_string(),
            acquiring_placeholder: "Starting camera...".to_string(),
            paused_placeholder: "Camera Paused".to_string(),
            unavailable_label: "Camera Unavailable".to_string(),
            unavailable_placeholder: "Camera not available.".to_string(),
        }
    }
}

/// Point-cloud simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LidarConfig {
    /// Points generated per frame
    pub point_count: u32,

    /// Width of the forward scan arc (degrees)
    pub arc_degrees: f64,

    /// Probability that a point is pulled into the obstacle band
    pub cluster_probability: f64,

    /// Obstacle band as fractions of the maximum distance
    pub cluster_band: BandConfig,

    /// Distance of the vehicle origin above the bottom edge (px)
    pub origin_offset_px: f64,

    pub point_radius_px: f64,
    pub marker_width_px: f64,
    pub marker_height_px: f64,

    pub background: Rgba,
    pub marker_color: Rgba,
    pub point_color: Rgba,
}

impl Default for LidarConfig {
    fn default() -> Self {
        Self {
            point_count: 200,
            arc_degrees: 180.0,
            cluster_probability: 0.05,
            cluster_band: BandConfig::default(),
            origin_offset_px: 20.0,
            point_radius_px: 2.0,
            marker_width_px: 20.0,
            marker_height_px: 10.0,
            background: Rgba::rgb(0, 0, 0),
            marker_color: Rgba::rgb(0, 123, 255),
            point_color: Rgba::rgb(0, 245, 212),
        }
    }
}

/// Fractional distance band `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub min: f64,
    pub max: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self { min: 0.2, max: 0.6 }
    }
}
