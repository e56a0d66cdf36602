//! CameraController - camera device lifecycle
//!
//! Acquisition is split into `request_toggle` (Off -> Acquiring, hands out a
//! ticket) and `complete_acquisition` (Acquiring -> On | Unavailable), so the
//! host can suspend on the device request while other events keep flowing.
//! `toggle` runs both halves for hosts that can simply await.

use contracts::{
    CameraConfig, CameraError, CameraSwitch, CameraView, CaptureConstraints, LocalCameraDevice,
    MediaStream,
};
use observability::record_camera_acquisition;
use tracing::{debug, info, instrument, warn};

/// Camera lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Off,
    Acquiring,
    On,
    /// Terminal for the session; the toggle is disabled
    Unavailable,
}

/// Identifies the single outstanding acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionTicket(u64);

/// What a toggle request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// An acquisition was started; complete it with this ticket
    Acquire(AcquisitionTicket),
    /// The live session was stopped
    Stopped,
    /// Nothing happened (acquisition in flight, or camera unavailable)
    Ignored,
}

/// A live, acquired camera stream
#[derive(Debug)]
pub struct CameraSession<S> {
    stream: S,
    ticket: AcquisitionTicket,
}

impl<S: MediaStream> CameraSession<S> {
    pub fn stream_id(&self) -> &str {
        self.stream.id()
    }

    pub fn ticket(&self) -> AcquisitionTicket {
        self.ticket
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }
}

/// Owns the camera stream and the camera region of the page
pub struct CameraController<S, V> {
    state: CameraState,
    session: Option<CameraSession<S>>,
    in_flight: Option<AcquisitionTicket>,
    next_ticket: u64,
    view: V,
    config: CameraConfig,
}

impl<S: MediaStream, V: CameraView> CameraController<S, V> {
    /// Create a controller in the `Off` state and paint the view accordingly
    pub fn new(view: V, config: CameraConfig) -> Self {
        let mut controller = Self {
            state: CameraState::Off,
            session: None,
            in_flight: None,
            next_ticket: 1,
            view,
            config,
        };
        controller.paint_off();
        controller
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn session(&self) -> Option<&CameraSession<S>> {
        self.session.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Constraints of the first acquisition attempt
    pub fn preferred_constraints(&self) -> CaptureConstraints {
        CaptureConstraints::facing(self.config.facing)
    }

    /// User toggle
    ///
    /// Off starts an acquisition, On stops the session. While acquiring, or
    /// once unavailable, the toggle does nothing.
    pub fn request_toggle(&mut self) -> ToggleAction {
        match self.state {
            CameraState::Off => {
                let ticket = AcquisitionTicket(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight = Some(ticket);
                self.state = CameraState::Acquiring;
                self.view.clear_sink();
                self.view.show_placeholder(&self.config.acquiring_placeholder);
                debug!(ticket = ticket.0, "Camera acquisition requested");
                ToggleAction::Acquire(ticket)
            }
            CameraState::On => {
                self.stop();
                ToggleAction::Stopped
            }
            CameraState::Acquiring => {
                debug!("Camera toggle ignored: acquisition already in flight");
                ToggleAction::Ignored
            }
            CameraState::Unavailable => {
                debug!("Camera toggle ignored: camera unavailable");
                ToggleAction::Ignored
            }
        }
    }

    /// Resolve the in-flight acquisition
    ///
    /// A ticket that is not the in-flight one is stale: its stream is released
    /// immediately and the state is left alone.
    #[instrument(name = "camera_complete_acquisition", skip(self, result), fields(ticket = ticket.0))]
    pub fn complete_acquisition(
        &mut self,
        ticket: AcquisitionTicket,
        result: Result<S, CameraError>,
    ) -> CameraState {
        if self.in_flight != Some(ticket) {
            warn!(in_flight = ?self.in_flight.map(|t| t.0), "Stale camera acquisition result dropped");
            if let Ok(mut stream) = result {
                stream.stop_all_tracks();
            }
            return self.state;
        }
        self.in_flight = None;

        match result {
            Ok(stream) => {
                self.view.bind_sink(stream.id());
                self.view.set_toggle(&self.config.hide_label, true);
                self.view.set_toggle_status(&self.config.on_status);
                info!(stream_id = %stream.id(), "Camera is on");
                self.session = Some(CameraSession { stream, ticket });
                self.state = CameraState::On;
                record_camera_acquisition("success");
            }
            Err(e) => {
                self.view.clear_sink();
                self.view.show_placeholder(&self.config.unavailable_placeholder);
                self.view.set_toggle(&self.config.unavailable_label, false);
                self.view.set_toggle_status(&e.to_string());
                warn!(error = %e, "Camera unavailable");
                self.state = CameraState::Unavailable;
                record_camera_acquisition("failure");
            }
        }
        self.state
    }

    /// Toggle, awaiting the device when an acquisition starts
    ///
    /// The facing preference is tried first; a device that does not support it
    /// is asked again for its default camera.
    pub async fn toggle<D>(&mut self, device: &D) -> CameraState
    where
        D: LocalCameraDevice<Stream = S>,
    {
        match self.request_toggle() {
            ToggleAction::Acquire(ticket) => {
                let preferred = self.preferred_constraints();
                let result = match device.acquire(preferred).await {
                    Err(CameraError::ConstraintUnsupported(reason)) if preferred.facing.is_some() => {
                        debug!(reason = %reason, "Facing constraint unsupported, using default camera");
                        record_camera_acquisition("fallback");
                        device.acquire(CaptureConstraints::default_device()).await
                    }
                    other => other,
                };
                self.complete_acquisition(ticket, result)
            }
            ToggleAction::Stopped | ToggleAction::Ignored => self.state,
        }
    }

    /// System-initiated stop: identical to a user toggle-off, and only when on
    pub fn force_stop(&mut self) {
        match self.state {
            CameraState::On => {
                info!("Camera force-stopped");
                self.stop();
            }
            state => debug!(state = ?state, "Camera force-stop is a no-op"),
        }
    }

    fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stream.stop_all_tracks();
            debug!(stream_id = %session.stream.id(), "Camera tracks stopped");
        }
        self.state = CameraState::Off;
        self.paint_off();
    }

    fn paint_off(&mut self) {
        self.view.clear_sink();
        self.view.show_placeholder(&self.config.paused_placeholder);
        self.view.set_toggle(&self.config.show_label, true);
        self.view.set_toggle_status(&self.config.off_status);
    }
}

impl<S: MediaStream, V: CameraView> CameraSwitch for CameraController<S, V> {
    fn force_stop(&mut self) {
        CameraController::force_stop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{CameraDevice, Facing};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct FakeStream {
        id: String,
        stopped: Arc<AtomicBool>,
        live: Arc<AtomicUsize>,
    }

    impl MediaStream for FakeStream {
        fn id(&self) -> &str {
            &self.id
        }

        fn stop_all_tracks(&mut self) {
            if !self.stopped.swap(true, Ordering::SeqCst) {
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    /// Device that replays scripted outcomes; `None` means success
    #[derive(Default)]
    struct FakeDevice {
        script: Mutex<VecDeque<Option<CameraError>>>,
        requests: Mutex<Vec<CaptureConstraints>>,
        live: Arc<AtomicUsize>,
        acquired: AtomicUsize,
    }

    impl FakeDevice {
        fn scripted(outcomes: impl IntoIterator<Item = Option<CameraError>>) -> Self {
            Self {
                script: Mutex::new(outcomes.into_iter().collect()),
                ..Default::default()
            }
        }

        fn live_streams(&self) -> usize {
            self.live.load(Ordering::SeqCst)
        }

        fn stream(&self) -> FakeStream {
            let n = self.acquired.fetch_add(1, Ordering::SeqCst) + 1;
            self.live.fetch_add(1, Ordering::SeqCst);
            FakeStream {
                id: format!("stream-{n}"),
                stopped: Arc::new(AtomicBool::new(false)),
                live: self.live.clone(),
            }
        }
    }

    impl CameraDevice for FakeDevice {
        type Stream = FakeStream;

        async fn acquire(&self, constraints: CaptureConstraints) -> Result<FakeStream, CameraError> {
            self.requests.lock().unwrap().push(constraints);
            let outcome = self.script.lock().unwrap().pop_front().flatten();
            match outcome {
                None => Ok(self.stream()),
                Some(e) => Err(e),
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        bound: Option<String>,
        placeholder: Option<String>,
        toggle_label: String,
        toggle_enabled: bool,
        status: String,
    }

    impl CameraView for RecordingView {
        fn bind_sink(&mut self, stream_id: &str) {
            self.bound = Some(stream_id.to_string());
            self.placeholder = None;
        }

        fn clear_sink(&mut self) {
            self.bound = None;
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

    fn controller() -> CameraController<FakeStream, RecordingView> {
        CameraController::new(RecordingView::default(), CameraConfig::default())
    }

    #[test]
    fn test_initial_state_is_off() {
        let cam = controller();
        assert_eq!(cam.state(), CameraState::Off);
        assert!(cam.session().is_none());
        assert_eq!(cam.view().toggle_label, "Show Camera Feed");
        assert_eq!(cam.view().status, "Camera is OFF");
        assert!(cam.view().toggle_enabled);
    }

    #[tokio::test]
    async fn test_toggle_on_binds_stream() {
        let device = FakeDevice::default();
        let mut cam = controller();

        assert_eq!(cam.toggle(&device).await, CameraState::On);
        assert_eq!(cam.session().unwrap().stream_id(), "stream-1");
        assert_eq!(cam.view().bound.as_deref(), Some("stream-1"));
        assert_eq!(cam.view().toggle_label, "Hide Camera Feed");
        assert_eq!(cam.view().status, "Camera is ON");
        assert_eq!(
            device.requests.lock().unwrap()[0],
            CaptureConstraints::facing(Facing::Environment)
        );
    }

    #[tokio::test]
    async fn test_on_off_on_leaves_one_live_session() {
        let device = FakeDevice::default();
        let mut cam = controller();

        cam.toggle(&device).await;
        assert_eq!(cam.toggle(&device).await, CameraState::Off);
        assert!(cam.session().is_none());
        assert_eq!(cam.view().bound, None);
        assert_eq!(cam.view().placeholder.as_deref(), Some("Camera Paused"));
        assert_eq!(device.live_streams(), 0);

        assert_eq!(cam.toggle(&device).await, CameraState::On);
        assert_eq!(device.live_streams(), 1);
        assert_eq!(cam.session().unwrap().stream_id(), "stream-2");
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        let device = FakeDevice::scripted([Some(CameraError::PermissionDenied(
            "user dismissed prompt".into(),
        ))]);
        let mut cam = controller();

        assert_eq!(cam.toggle(&device).await, CameraState::Unavailable);
        assert!(!cam.view().toggle_enabled);
        assert_eq!(cam.view().toggle_label, "Camera Unavailable");
        assert_eq!(cam.view().placeholder.as_deref(), Some("Camera not available."));

        // further toggles never reach the device
        assert_eq!(cam.toggle(&device).await, CameraState::Unavailable);
        assert_eq!(device.requests.lock().unwrap().len(), 1);

        cam.force_stop();
        assert_eq!(cam.state(), CameraState::Unavailable);
    }

    #[tokio::test]
    async fn test_unsupported_facing_falls_back_to_default() {
        let device = FakeDevice::scripted([
            Some(CameraError::ConstraintUnsupported("facingMode".into())),
            None,
        ]);
        let mut cam = controller();

        assert_eq!(cam.toggle(&device).await, CameraState::On);
        let requests = device.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], CaptureConstraints::default_device());
    }

    #[test]
    fn test_toggle_while_acquiring_is_ignored() {
        let mut cam = controller();
        let ToggleAction::Acquire(ticket) = cam.request_toggle() else {
            panic!("expected acquisition");
        };
        assert_eq!(cam.state(), CameraState::Acquiring);
        assert_eq!(cam.request_toggle(), ToggleAction::Ignored);
        assert_eq!(cam.request_toggle(), ToggleAction::Ignored);

        let device = FakeDevice::default();
        assert_eq!(
            cam.complete_acquisition(ticket, Ok(device.stream())),
            CameraState::On
        );
        assert_eq!(device.live_streams(), 1);
    }

    #[test]
    fn test_stale_ticket_releases_stream() {
        let device = FakeDevice::default();
        let mut cam = controller();
        let ToggleAction::Acquire(ticket) = cam.request_toggle() else {
            panic!("expected acquisition");
        };
        cam.complete_acquisition(ticket, Ok(device.stream()));

        // a duplicate completion must not replace the live session
        let state = cam.complete_acquisition(ticket, Ok(device.stream()));
        assert_eq!(state, CameraState::On);
        assert_eq!(device.live_streams(), 1);
        assert_eq!(cam.session().unwrap().stream_id(), "stream-1");
    }

    #[test]
    fn test_force_stop_when_off_or_acquiring_is_noop() {
        let mut cam = controller();
        cam.force_stop();
        assert_eq!(cam.state(), CameraState::Off);

        let ToggleAction::Acquire(_) = cam.request_toggle() else {
            panic!("expected acquisition");
        };
        cam.force_stop();
        assert_eq!(cam.state(), CameraState::Acquiring);
    }

    #[tokio::test]
    async fn test_force_stop_releases_tracks() {
        let device = FakeDevice::default();
        let mut cam = controller();
        cam.toggle(&device).await;

        CameraSwitch::force_stop(&mut cam);
        assert_eq!(cam.state(), CameraState::Off);
        assert_eq!(device.live_streams(), 0);
        assert_eq!(cam.view().status, "Camera is OFF");
        assert_eq!(cam.view().toggle_label, "Show Camera Feed");
    }
}
