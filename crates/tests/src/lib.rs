//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 端到端测试：真实的 renderer / camera / lidar / session 组合，
//!   宿主能力（widget、画布、摄像头设备）由内存替身提供

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;

    use contracts::{
        CameraDevice, CameraError, CameraView, CaptureConstraints, DrawingSurface, MediaStream,
        MetricWidget, Point, Rect, Rgba, Severity, StatusSlot, StyleClass, SurfaceSize,
    };

    #[derive(Debug, Default)]
    pub struct Widget {
        pub text: String,
        pub style: Option<StyleClass>,
    }

    impl MetricWidget for Widget {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn set_placeholder(&mut self, placeholder: &str) {
            self.text = placeholder.to_string();
        }

        fn set_style_class(&mut self, class: Option<StyleClass>) {
            self.style = class;
        }
    }

    #[derive(Debug, Default)]
    pub struct Status {
        pub history: Vec<(String, Severity)>,
    }

    impl Status {
        pub fn last(&self) -> Option<(&str, Severity)> {
            self.history.last().map(|(text, sev)| (text.as_str(), *sev))
        }
    }

    impl StatusSlot for Status {
        fn set_status(&mut self, message: &str, severity: Severity) {
            self.history.push((message.to_string(), severity));
        }
    }

    #[derive(Debug, Default)]
    pub struct View {
        pub sink: Option<String>,
        pub placeholder: Option<String>,
        pub toggle: (String, bool),
        pub status: String,
    }

    impl CameraView for View {
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
            self.toggle = (label.to_string(), enabled);
        }

        fn set_toggle_status(&mut self, text: &str) {
            self.status = text.to_string();
        }
    }

    #[derive(Debug)]
    pub struct Stream {
        id: String,
        stopped: Arc<AtomicBool>,
    }

    impl MediaStream for Stream {
        fn id(&self) -> &str {
            &self.id
        }

        fn stop_all_tracks(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    /// Device that grants every request and hands out a shared stop flag
    #[derive(Debug, Default)]
    pub struct Device {
        pub acquired: AtomicU64,
        pub stopped: Arc<AtomicBool>,
        pub deny: bool,
    }

    impl CameraDevice for Device {
        type Stream = Stream;

        async fn acquire(&self, _constraints: CaptureConstraints) -> Result<Stream, CameraError> {
            if self.deny {
                return Err(CameraError::PermissionDenied("blocked by user".to_string()));
            }
            let n = self.acquired.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Stream {
                id: format!("stream-{n}"),
                stopped: self.stopped.clone(),
            })
        }
    }

    /// Surface that only counts paints
    #[derive(Debug)]
    pub struct Canvas {
        pub container: SurfaceSize,
        pub size: SurfaceSize,
        pub clears: usize,
        pub circles: usize,
    }

    impl Canvas {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                container: SurfaceSize::new(width, height),
                size: SurfaceSize::default(),
                clears: 0,
                circles: 0,
            }
        }
    }

    impl DrawingSurface for Canvas {
        fn container_size(&self) -> SurfaceSize {
            self.container
        }

        fn size(&self) -> SurfaceSize {
            self.size
        }

        fn resize(&mut self, size: SurfaceSize) {
            self.size = size;
        }

        fn clear(&mut self, _background: Rgba) {
            self.clears += 1;
        }

        fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {}

        fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Rgba) {
            self.circles += 1;
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{MetricKey, StreamMessage};

    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_metric_keys_snapshot() {
        let keys: Vec<_> = MetricKey::ALL.iter().map(MetricKey::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "rpm",
                "speed",
                "coolantTemp",
                "engineLoad",
                "fuelLevel",
                "throttlePos",
                "mafAirFlow",
                "mpg",
                "batteryVoltage",
                "soc",
                "idlingTime",
                "acceleration",
                "tripDistance",
                "dtc",
                "ignitionState",
            ]
        );
    }

    #[test]
    fn test_disconnect_envelope_snapshot() {
        let message =
            StreamMessage::decode(r#"{"status": "disconnected", "error": "no ECU"}"#).unwrap();
        assert_eq!(
            message,
            StreamMessage::UpstreamDisconnected {
                error: "no ECU".to_string()
            }
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::Ordering;

    use camera::{CameraController, CameraState, ToggleAction};
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{
        ConnectionStatus, DashboardConfig, IgnitionState, MetricKey, Severity, StyleClass,
        SurfaceSize,
    };
    use lidar::{LidarSimulator, ManualFrameScheduler};
    use renderer::{FormatRules, TelemetryRenderer};
    use session::{ConnectionState, MessageOutcome, SessionError};

    use crate::support::{Canvas, Device, Status, Stream, View, Widget};

    type Dashboard = ConnectionState<
        TelemetryRenderer<Widget>,
        CameraController<Stream, View>,
        LidarSimulator<Canvas, ManualFrameScheduler>,
        Status,
    >;

    fn dashboard(config: &DashboardConfig) -> Dashboard {
        let widgets = MetricKey::ALL.iter().map(|key| (*key, Widget::default()));
        ConnectionState::new(
            TelemetryRenderer::new(widgets, FormatRules::from_config(&config.display)),
            CameraController::new(View::default(), config.camera.clone()),
            LidarSimulator::seeded(
                Canvas::new(400.0, 300.0),
                ManualFrameScheduler::new(),
                config.lidar.clone(),
                42,
            ),
            Status::default(),
            config.status.clone(),
        )
    }

    fn text(d: &Dashboard, key: MetricKey) -> &str {
        &d.metrics().widget(key).unwrap().text
    }

    fn style(d: &Dashboard, key: MetricKey) -> Option<StyleClass> {
        d.metrics().widget(key).unwrap().style
    }

    /// Connect -> stream -> vehicle drop -> resume -> close
    #[test]
    fn test_e2e_full_session() {
        let config = DashboardConfig::default();
        let mut d = dashboard(&config);
        assert_eq!(d.status(), ConnectionStatus::Connecting);
        assert_eq!(text(&d, MetricKey::Rpm), "---");

        d.on_open().unwrap();
        assert!(d.animation().is_running());
        assert_eq!(d.animation().frames_painted(), 1);
        assert_eq!(
            d.status_slot().last(),
            Some(("Status: Connected to server.", Severity::Success))
        );

        let outcome = d.decode_and_dispatch(
            r#"{"rpm": 2731, "speed": 42, "ignitionState": "Running", "dtc": "P0420", "idlingTime": 3725}"#,
        );
        assert_eq!(outcome, MessageOutcome::Rendered { fields: 5 });
        assert_eq!(text(&d, MetricKey::Rpm), "2731.0");
        assert_eq!(text(&d, MetricKey::Speed), "42.0");
        assert_eq!(text(&d, MetricKey::IdlingTime), "01:02:05");
        assert_eq!(
            style(&d, MetricKey::IgnitionState),
            Some(StyleClass::Ignition(IgnitionState::Running))
        );
        assert_eq!(style(&d, MetricKey::Dtc), Some(StyleClass::HasFault));

        // delta: rpm untouched, speed nulled, dtc cleared
        d.decode_and_dispatch(r#"{"speed": null, "dtc": "None"}"#);
        assert_eq!(text(&d, MetricKey::Rpm), "2731.0");
        assert_eq!(text(&d, MetricKey::Speed), "---");
        assert_eq!(text(&d, MetricKey::Dtc), "None");
        assert_eq!(style(&d, MetricKey::Dtc), Some(StyleClass::NoFault));

        // frame clock keeps the animation going
        for id in d.animation_mut().scheduler_mut().take_due() {
            assert!(d.animation_mut().on_frame(id));
        }
        assert_eq!(d.animation().frames_painted(), 2);

        let outcome =
            d.decode_and_dispatch(r#"{"status": "disconnected", "error": "ELM327 timeout"}"#);
        assert_eq!(outcome, MessageOutcome::UpstreamDisconnected);
        assert!(d.is_upstream_lost());
        assert_eq!(text(&d, MetricKey::Rpm), "---");
        assert_eq!(style(&d, MetricKey::IgnitionState), None);
        assert_eq!(
            d.status_slot().last(),
            Some(("Status: Vehicle disconnected: ELM327 timeout", Severity::Warning))
        );
        // transport still open, animation untouched
        assert_eq!(d.status(), ConnectionStatus::Open);
        assert!(d.animation().is_running());

        d.decode_and_dispatch(r#"{"rpm": 800}"#);
        assert!(!d.is_upstream_lost());
        assert_eq!(
            d.status_slot().last(),
            Some(("Status: Connected to server.", Severity::Success))
        );

        d.on_close();
        assert_eq!(d.status(), ConnectionStatus::Closed);
        assert!(!d.animation().is_running());
        assert_eq!(d.animation().scheduler().pending(), 0);
        assert!(d.metrics().widgets().all(|(_, w)| w.text == "---" && w.style.is_none()));
        assert_eq!(d.status_slot().last().map(|(_, sev)| sev), Some(Severity::Error));

        // nothing renders after the transport is gone
        assert_eq!(d.decode_and_dispatch(r#"{"rpm": 1}"#), MessageOutcome::Dropped);
        assert_eq!(text(&d, MetricKey::Rpm), "---");
    }

    #[test]
    fn test_e2e_reopen_rejected() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();
        d.on_error("socket reset");
        assert!(matches!(
            d.on_open(),
            Err(SessionError::InvalidTransition {
                from: ConnectionStatus::Errored,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_e2e_camera_released_on_error() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();

        let device = Device::default();
        let state = d.camera_mut().toggle(&device).await;
        assert_eq!(state, CameraState::On);
        assert_eq!(d.camera().view().sink.as_deref(), Some("stream-1"));

        d.on_error("relay crashed");
        assert_eq!(d.status(), ConnectionStatus::Errored);
        assert_eq!(d.camera().state(), CameraState::Off);
        assert!(device.stopped.load(Ordering::SeqCst));
        assert_eq!(d.camera().view().sink, None);
        assert_eq!(d.camera().view().status, "Camera is OFF");
        assert_eq!(d.camera().view().placeholder.as_deref(), Some("Camera Paused"));
    }

    #[tokio::test]
    async fn test_e2e_stale_acquisition_after_close() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();

        let ToggleAction::Acquire(ticket) = d.camera_mut().request_toggle() else {
            panic!("expected acquisition");
        };
        // close while the permission prompt is still up
        d.on_close();
        assert_eq!(d.camera().state(), CameraState::Acquiring);

        // the prompt resolves later; that result still belongs to the open ticket
        let device = Device::default();
        let stream = contracts::LocalCameraDevice::acquire(
            &device,
            d.camera().preferred_constraints(),
        )
        .await;
        let state = d.camera_mut().complete_acquisition(ticket, stream);
        assert_eq!(state, CameraState::On);

        // a second completion for the same ticket is stale and released
        let late = contracts::LocalCameraDevice::acquire(
            &device,
            d.camera().preferred_constraints(),
        )
        .await;
        let stopped = device.stopped.clone();
        assert_eq!(
            d.camera_mut().complete_acquisition(ticket, late),
            CameraState::On
        );
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_e2e_camera_denied_leaves_session_alone() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();

        let device = Device {
            deny: true,
            ..Default::default()
        };
        assert_eq!(d.camera_mut().toggle(&device).await, CameraState::Unavailable);
        assert_eq!(d.camera().view().toggle, ("Camera Unavailable".to_string(), false));
        assert_eq!(d.status(), ConnectionStatus::Open);

        d.on_close();
        assert_eq!(d.camera().state(), CameraState::Unavailable);
    }

    #[test]
    fn test_e2e_resize_restarts_lidar() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();
        let first = d.lidar_handle().unwrap();

        d.animation_mut().surface_mut().container = SurfaceSize::new(800.0, 200.0);
        let second = d.animation_mut().on_viewport_resize();
        assert_ne!(first, second);
        assert_eq!(d.animation().surface().size, SurfaceSize::new(800.0, 200.0));
        assert_eq!(d.animation().scheduler().pending(), 1);

        // the old handle no longer controls anything
        assert!(!d.animation_mut().cancel_handle(first));
        assert!(d.animation().is_running());
    }

    #[test]
    fn test_e2e_config_drives_rendering() {
        let config = ConfigLoader::load_from_str(
            r#"
[display]
placeholder = "n/a"
dtc_no_fault_sentinel = "OK"
dtc_no_fault_label = "All clear"

[status]
connected = "Live"

[lidar]
point_count = 12
"#,
            ConfigFormat::Toml,
        )
        .unwrap();

        let mut d = dashboard(&config);
        assert_eq!(text(&d, MetricKey::Soc), "n/a");

        d.on_open().unwrap();
        assert_eq!(d.status_slot().last(), Some(("Live", Severity::Success)));
        assert_eq!(d.animation().surface().circles, 12);
        assert_eq!(d.animation().surface().clears, 1);

        d.decode_and_dispatch(r#"{"dtc": "OK", "soc": 81.26}"#);
        assert_eq!(text(&d, MetricKey::Dtc), "All clear");
        assert_eq!(text(&d, MetricKey::Soc), "81.3");

        d.decode_and_dispatch(r#"{"dtc": "No DTC"}"#);
        assert_eq!(text(&d, MetricKey::Dtc), "No DTC");
        assert_eq!(style(&d, MetricKey::Dtc), Some(StyleClass::HasFault));
    }

    #[test]
    fn test_e2e_malformed_frames_are_not_fatal() {
        let mut d = dashboard(&DashboardConfig::default());
        d.on_open().unwrap();

        assert_eq!(d.decode_and_dispatch("{not json"), MessageOutcome::Malformed);
        assert_eq!(d.decode_and_dispatch("[1, 2]"), MessageOutcome::Malformed);
        assert_eq!(
            d.decode_and_dispatch(r#"{"rpm": 1000}"#),
            MessageOutcome::Rendered { fields: 1 }
        );
        assert_eq!(d.status(), ConnectionStatus::Open);
    }
}
