//! ConnectionState - transport lifecycle orchestrator
//!
//! The only component that reacts to transport events. Close and error share
//! one remediation routine; they differ only in the status wording.

use contracts::{
    AnimationLoop, CameraSwitch, ConnectionStatus, LoopHandle, MetricsView, Severity,
    StatusMessages, StatusSlot, StreamMessage,
};
use observability::{record_connection_transition, record_malformed_frame, record_message};
use tracing::{debug, info, instrument, warn};

use crate::SessionError;

/// What happened to one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Metrics record applied to the widgets
    Rendered { fields: usize },
    /// Producer-side disconnect: widgets reset, connection still open
    UpstreamDisconnected,
    /// Arrived while the connection was not open
    Dropped,
    /// Frame could not be decoded
    Malformed,
}

/// Connection lifecycle plus the subsystems it coordinates
pub struct ConnectionState<M, C, A, S> {
    status: ConnectionStatus,
    upstream_lost: bool,
    lidar: Option<LoopHandle>,
    metrics: M,
    camera: C,
    animation: A,
    status_slot: S,
    messages: StatusMessages,
}

impl<M, C, A, S> ConnectionState<M, C, A, S>
where
    M: MetricsView,
    C: CameraSwitch,
    A: AnimationLoop,
    S: StatusSlot,
{
    /// Take ownership of the subsystems and enter `Connecting`
    pub fn new(metrics: M, camera: C, animation: A, status_slot: S, messages: StatusMessages) -> Self {
        let mut state = Self {
            status: ConnectionStatus::Idle,
            upstream_lost: false,
            lidar: None,
            metrics,
            camera,
            animation,
            status_slot,
            messages,
        };
        state.transition(ConnectionStatus::Connecting);
        state
            .status_slot
            .set_status(&state.messages.connecting, Severity::Info);
        state
    }

    /// Transport opened
    ///
    /// Only valid from `Connecting`; anything else is logged and ignored.
    #[instrument(name = "session_on_open", skip(self), fields(from = %self.status))]
    pub fn on_open(&mut self) -> Result<LoopHandle, SessionError> {
        if self.status != ConnectionStatus::Connecting {
            warn!("Open event ignored");
            return Err(SessionError::InvalidTransition {
                from: self.status,
                event: "open",
            });
        }

        self.transition(ConnectionStatus::Open);
        self.status_slot
            .set_status(&self.messages.connected, Severity::Success);
        let handle = self.animation.start();
        self.lidar = Some(handle);
        info!(lidar = handle.0, "Connected");
        Ok(handle)
    }

    /// One decoded inbound message
    pub fn on_message(&mut self, message: StreamMessage) -> MessageOutcome {
        if self.status != ConnectionStatus::Open {
            warn!(status = %self.status, "Message dropped: connection not open");
            record_message("dropped");
            return MessageOutcome::Dropped;
        }

        match message {
            StreamMessage::Metrics(record) => {
                if self.upstream_lost {
                    self.upstream_lost = false;
                    self.status_slot
                        .set_status(&self.messages.connected, Severity::Success);
                    info!("Upstream producer back");
                }
                let fields = record.len();
                debug!(fields, "Metrics record");
                self.metrics.reconcile(&record);
                record_message("metrics");
                MessageOutcome::Rendered { fields }
            }
            StreamMessage::UpstreamDisconnected { error } => {
                warn!(error = %error, "Upstream producer disconnected");
                self.upstream_lost = true;
                self.metrics.reset();
                let text = if error.is_empty() {
                    self.messages.upstream_disconnected.clone()
                } else {
                    format!("{}: {}", self.messages.upstream_disconnected, error)
                };
                self.status_slot.set_status(&text, Severity::Warning);
                record_message("upstream_disconnected");
                MessageOutcome::UpstreamDisconnected
            }
        }
    }

    /// Decode one text frame and dispatch it
    ///
    /// Undecodable frames are logged and counted, never fatal.
    pub fn decode_and_dispatch(&mut self, text: &str) -> MessageOutcome {
        match decode(text) {
            Ok(message) => self.on_message(message),
            Err(e) => {
                warn!(error = %e, len = text.len(), "Malformed frame dropped");
                record_malformed_frame();
                MessageOutcome::Malformed
            }
        }
    }

    /// Transport closed
    #[instrument(name = "session_on_close", skip(self), fields(from = %self.status))]
    pub fn on_close(&mut self) {
        self.transition(ConnectionStatus::Closed);
        self.status_slot
            .set_status(&self.messages.disconnected, Severity::Error);
        info!("Connection closed");
        self.remediate();
    }

    /// Transport error
    #[instrument(name = "session_on_error", skip(self), fields(from = %self.status))]
    pub fn on_error(&mut self, detail: &str) {
        self.transition(ConnectionStatus::Errored);
        self.status_slot
            .set_status(&self.messages.connection_error, Severity::Error);
        warn!(detail = %detail, "Connection error");
        self.remediate();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// True between an upstream disconnect envelope and the next metrics record
    pub fn is_upstream_lost(&self) -> bool {
        self.upstream_lost
    }

    /// Handle of the animation run started by the last open
    pub fn lidar_handle(&self) -> Option<LoopHandle> {
        self.lidar
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut M {
        &mut self.metrics
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn status_slot(&self) -> &S {
        &self.status_slot
    }

    /// Shared close/error cleanup; safe from any state
    fn remediate(&mut self) {
        self.upstream_lost = false;
        self.metrics.reset();
        self.camera.force_stop();
        self.animation.cancel();
        self.lidar = None;
        debug!("Remediation complete");
    }

    fn transition(&mut self, to: ConnectionStatus) {
        if self.status != to {
            debug!(from = %self.status, to = %to, "Connection transition");
        }
        self.status = to;
        record_connection_transition(to);
    }
}

fn decode(text: &str) -> Result<StreamMessage, SessionError> {
    Ok(StreamMessage::decode(text)?)
}
