//! Point-cloud frame generation and painting
//!
//! A frame is a pure function of the surface size, the config and the RNG.

use std::f64::consts::PI;

use contracts::{DrawingSurface, LidarConfig, Point, Rect, SurfaceSize};
use rand::Rng;

/// One simulated return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LidarPoint {
    /// Radians, 0 points left of the origin, PI/2 straight ahead
    pub angle: f64,
    /// Pixels from the origin
    pub distance: f64,
    /// Screen position
    pub position: Point,
    /// Opacity in `0.0..=1.0`, fading with distance
    pub intensity: f64,
    /// Distance was pulled into the obstacle band
    pub clustered: bool,
}

/// One generated frame
#[derive(Debug, Clone, PartialEq)]
pub struct LidarFrame {
    pub points: Vec<LidarPoint>,
    /// Vehicle position (bottom centre, raised by the origin offset)
    pub origin: Point,
    pub max_distance: f64,
}

impl LidarFrame {
    /// Number of points in the obstacle band
    pub fn clustered(&self) -> usize {
        self.points.iter().filter(|p| p.clustered).count()
    }
}

/// Scan radius for a surface: the largest distance that stays on screen
pub fn max_distance(size: SurfaceSize, origin_offset: f64) -> f64 {
    (size.width / 2.0).min(size.height - origin_offset).max(0.0)
}

/// Generate a fresh frame for a surface of `size`
pub fn generate_frame<R: Rng + ?Sized>(
    size: SurfaceSize,
    config: &LidarConfig,
    rng: &mut R,
) -> LidarFrame {
    let origin = Point {
        x: size.width / 2.0,
        y: size.height - config.origin_offset_px,
    };
    let max = max_distance(size, config.origin_offset_px);

    let arc = config.arc_degrees.to_radians();
    let arc_start = PI / 2.0 - arc / 2.0;
    let band_width = config.cluster_band.max - config.cluster_band.min;

    let points = (0..config.point_count)
        .map(|_| {
            let angle = arc_start + rng.random::<f64>() * arc;
            let mut distance = rng.random::<f64>() * max;
            let clustered = rng.random::<f64>() < config.cluster_probability;
            if clustered {
                distance = max * (config.cluster_band.min + rng.random::<f64>() * band_width);
            }
            let intensity = if max > 0.0 {
                (1.0 - distance / max).clamp(0.0, 1.0)
            } else {
                0.0
            };

            LidarPoint {
                angle,
                distance,
                position: Point {
                    x: origin.x - angle.cos() * distance,
                    y: origin.y - angle.sin() * distance,
                },
                intensity,
                clustered,
            }
        })
        .collect();

    LidarFrame {
        points,
        origin,
        max_distance: max,
    }
}

/// Paint `frame`: background, vehicle marker, then every point
pub fn paint<S: DrawingSurface + ?Sized>(frame: &LidarFrame, surface: &mut S, config: &LidarConfig) {
    surface.clear(config.background);
    surface.fill_rect(
        Rect {
            x: frame.origin.x - config.marker_width_px / 2.0,
            y: frame.origin.y - config.marker_height_px / 2.0,
            width: config.marker_width_px,
            height: config.marker_height_px,
        },
        config.marker_color,
    );
    for point in &frame.points {
        surface.fill_circle(
            point.position,
            config.point_radius_px,
            config.point_color.with_alpha(point.intensity),
        );
    }
}
