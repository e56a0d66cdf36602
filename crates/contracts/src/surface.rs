//! Drawing surface and frame scheduling capabilities for the point cloud

use serde::{Deserialize, Serialize};

/// Size of a surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Point in surface coordinates (origin top-left, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// RGBA colour, channels 0-255, alpha 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with a different alpha (clamped to 0..=1)
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// 2D drawing target exclusively owned by the point-cloud simulator
pub trait DrawingSurface {
    /// Current size of the containing element
    fn container_size(&self) -> SurfaceSize;

    /// Current drawing buffer size
    fn size(&self) -> SurfaceSize;

    /// Resize the drawing buffer
    fn resize(&mut self, size: SurfaceSize);

    /// Clear the whole surface and paint it with `background`
    fn clear(&mut self, background: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
}

/// Identifier of one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Host frame-presentation timer
///
/// The host calls back into the simulator with the request id when the frame is due.
pub trait FrameScheduler {
    /// Ask for one frame callback
    fn request_frame(&mut self) -> FrameRequestId;

    /// Withdraw a request; unknown or already fired ids are ignored
    fn cancel_frame(&mut self, id: FrameRequestId);
}
