//! Replay driver - feeds a recorded stream through the full dashboard.
//!
//! The recording stands in for the transport: the driver emits Open, one
//! message per line on a fixed cadence, then Close or Error. A second timer
//! plays the host frame clock for the lidar animation.

use std::future::Future;
use std::time::{Duration, Instant};

use camera::CameraController;
use contracts::{DashboardConfig, MetricKey, SurfaceSize};
use lidar::{LidarFrame, LidarSimulator, ManualFrameScheduler};
use observability::DashboardStats;
use renderer::{FormatRules, TelemetryRenderer};
use session::{ConnectionState, MessageOutcome};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::ReplayStats;
use crate::cli::{CameraMode, EndWith};
use crate::error::CliError;
use crate::host::{
    ConsoleCameraView, ConsoleStatus, ConsoleWidget, ReplayCamera, SimulatedStream, TextCanvas,
};

/// The dashboard as wired by the console host
pub type Dashboard = ConnectionState<
    TelemetryRenderer<ConsoleWidget>,
    CameraController<SimulatedStream, ConsoleCameraView>,
    LidarSimulator<TextCanvas, ManualFrameScheduler>,
    ConsoleStatus,
>;

/// Replay configuration
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Loaded dashboard configuration
    pub dashboard: DashboardConfig,

    /// Delay between messages
    pub interval: Duration,

    /// Lidar frame period (None = no animation ticks)
    pub frame_interval: Option<Duration>,

    /// Transport event after the last message
    pub end_with: EndWith,

    /// Camera device to toggle on after connecting
    pub camera: CameraMode,

    /// Lidar surface size in pixels
    pub surface: SurfaceSize,

    /// Lidar seed (None = OS entropy)
    pub seed: Option<u64>,
}

/// Wire renderer, camera, lidar and status slot into a session
pub fn build_dashboard(config: &ReplayConfig) -> Dashboard {
    let dashboard = &config.dashboard;

    let widgets = MetricKey::ALL
        .iter()
        .map(|key| (*key, ConsoleWidget::default()));
    let renderer = TelemetryRenderer::new(widgets, FormatRules::from_config(&dashboard.display));

    let camera = CameraController::new(ConsoleCameraView::default(), dashboard.camera.clone());

    let canvas = TextCanvas::for_surface(config.surface);
    let scheduler = ManualFrameScheduler::new();
    let lidar = match config.seed {
        Some(seed) => LidarSimulator::seeded(canvas, scheduler, dashboard.lidar.clone(), seed),
        None => LidarSimulator::new(canvas, scheduler, dashboard.lidar.clone()),
    };

    ConnectionState::new(
        renderer,
        camera,
        lidar,
        ConsoleStatus::default(),
        dashboard.status.clone(),
    )
}

/// One replay run
pub struct Replay {
    config: ReplayConfig,
    lines: Vec<String>,
}

impl Replay {
    pub fn new(config: ReplayConfig, lines: Vec<String>) -> Self {
        Self { config, lines }
    }

    /// Run until the recording is exhausted or `shutdown` resolves
    ///
    /// An interrupted run ends with Close, like a page being navigated away.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(Dashboard, ReplayStats), CliError> {
        let start = Instant::now();
        let mut session = build_dashboard(&self.config);
        let mut stats = ReplayStats::default();

        session.on_open()?;
        count_painted(&session, &mut stats.dashboard);

        if let Some(device) = ReplayCamera::for_mode(self.config.camera) {
            let state = session.camera_mut().toggle(&device).await;
            info!(state = ?state, "Camera toggled");
        }

        let mut records = tokio::time::interval(self.config.interval);
        records.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let animate = self.config.frame_interval.is_some();
        let mut frames =
            tokio::time::interval(self.config.frame_interval.unwrap_or(Duration::from_secs(3600)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut lines = self.lines.iter();
        tokio::pin!(shutdown);

        let end = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, closing the stream");
                    stats.interrupted = true;
                    break EndWith::Close;
                }
                _ = records.tick() => {
                    match lines.next() {
                        Some(line) => dispatch(&mut session, line, &mut stats.dashboard),
                        None => break self.config.end_with,
                    }
                }
                _ = frames.tick(), if animate => {
                    pump_frames(&mut session, &mut stats.dashboard);
                }
            }
        };

        match end {
            EndWith::Close => session.on_close(),
            EndWith::Error => session.on_error("recording ended with a transport error"),
        }

        stats.duration = start.elapsed();
        info!(
            records = stats.dashboard.records,
            lidar_frames = stats.dashboard.lidar_frames,
            status = %session.status(),
            "Replay finished"
        );
        Ok((session, stats))
    }
}

fn dispatch(session: &mut Dashboard, line: &str, stats: &mut DashboardStats) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    match session.decode_and_dispatch(line) {
        MessageOutcome::Rendered { fields } => stats.record_rendered(fields),
        MessageOutcome::UpstreamDisconnected => stats.upstream_disconnected(),
        MessageOutcome::Dropped => stats.dropped_message(),
        MessageOutcome::Malformed => stats.malformed_frame(),
    }
}

/// Fire every due frame request, as a host frame clock would
fn pump_frames(session: &mut Dashboard, stats: &mut DashboardStats) {
    let lidar = session.animation_mut();
    for id in lidar.scheduler_mut().take_due() {
        if lidar.on_frame(id) {
            stats.lidar_frame(lidar.last_frame().map_or(0, LidarFrame::clustered));
        } else {
            debug!(frame = id.0, "Frame callback ignored");
        }
    }
}

fn count_painted(session: &Dashboard, stats: &mut DashboardStats) {
    if let Some(frame) = session.animation().last_frame() {
        stats.lidar_frame(frame.clustered());
    }
}
