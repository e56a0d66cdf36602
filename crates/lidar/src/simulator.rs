//! LidarSimulator - cancellable point-cloud animation loop
//!
//! At most one frame request is outstanding. Every (re)start withdraws the
//! previous request before issuing a new one, and a callback carrying any
//! other id is ignored, so two chains can never interleave.

use contracts::{
    AnimationLoop, DrawingSurface, FrameRequestId, FrameScheduler, LidarConfig, LoopHandle,
};
use observability::record_lidar_frame;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::frame::{generate_frame, paint, LidarFrame};

pub struct LidarSimulator<S, F, R = StdRng> {
    surface: S,
    scheduler: F,
    rng: R,
    config: LidarConfig,
    pending: Option<FrameRequestId>,
    current: Option<LoopHandle>,
    next_handle: u64,
    last_frame: Option<LidarFrame>,
    frames_painted: u64,
}

impl<S: DrawingSurface, F: FrameScheduler> LidarSimulator<S, F, StdRng> {
    /// Create a stopped simulator seeded from the OS
    pub fn new(surface: S, scheduler: F, config: LidarConfig) -> Self {
        Self::with_rng(surface, scheduler, config, StdRng::from_os_rng())
    }

    /// Create a stopped simulator with a deterministic seed
    pub fn seeded(surface: S, scheduler: F, config: LidarConfig, seed: u64) -> Self {
        Self::with_rng(surface, scheduler, config, StdRng::seed_from_u64(seed))
    }
}

impl<S: DrawingSurface, F: FrameScheduler, R: Rng> LidarSimulator<S, F, R> {
    pub fn with_rng(surface: S, scheduler: F, config: LidarConfig, rng: R) -> Self {
        Self {
            surface,
            scheduler,
            rng,
            config,
            pending: None,
            current: None,
            next_handle: 1,
            last_frame: None,
            frames_painted: 0,
        }
    }

    /// (Re)start the loop
    ///
    /// Withdraws any pending request, resizes the surface to its container,
    /// paints one frame immediately and requests the next.
    pub fn start(&mut self) -> LoopHandle {
        self.withdraw_pending();

        let size = self.surface.container_size();
        self.surface.resize(size);

        let handle = LoopHandle(self.next_handle);
        self.next_handle += 1;
        self.current = Some(handle);
        debug!(
            handle = handle.0,
            width = size.width,
            height = size.height,
            "Lidar loop started"
        );

        self.tick();
        handle
    }

    /// Host frame callback
    ///
    /// Returns `false` when `id` is not the pending request (stale or cancelled).
    pub fn on_frame(&mut self, id: FrameRequestId) -> bool {
        if self.pending != Some(id) {
            trace!(frame = id.0, pending = ?self.pending.map(|p| p.0), "Stale lidar frame ignored");
            return false;
        }
        self.pending = None;
        self.tick();
        true
    }

    /// Stop scheduling frames; safe to call repeatedly
    pub fn cancel(&mut self) {
        self.withdraw_pending();
        if let Some(handle) = self.current.take() {
            debug!(handle = handle.0, frames = self.frames_painted, "Lidar loop cancelled");
        }
    }

    /// Cancel only if `handle` is still the current run
    pub fn cancel_handle(&mut self, handle: LoopHandle) -> bool {
        if self.current == Some(handle) {
            self.cancel();
            true
        } else {
            false
        }
    }

    /// Viewport changed size: restart so the surface is re-measured
    pub fn on_viewport_resize(&mut self) -> LoopHandle {
        self.start()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending
    }

    pub fn current_handle(&self) -> Option<LoopHandle> {
        self.current
    }

    pub fn last_frame(&self) -> Option<&LidarFrame> {
        self.last_frame.as_ref()
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    pub fn config(&self) -> &LidarConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    fn tick(&mut self) {
        let frame = generate_frame(self.surface.size(), &self.config, &mut self.rng);
        paint(&frame, &mut self.surface, &self.config);
        self.frames_painted += 1;
        record_lidar_frame(frame.points.len(), frame.clustered());
        trace!(
            frame = self.frames_painted,
            points = frame.points.len(),
            clustered = frame.clustered(),
            "Lidar frame painted"
        );
        self.last_frame = Some(frame);
        self.pending = Some(self.scheduler.request_frame());
    }

    fn withdraw_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

impl<S: DrawingSurface, F: FrameScheduler, R: Rng> AnimationLoop for LidarSimulator<S, F, R> {
    fn start(&mut self) -> LoopHandle {
        LidarSimulator::start(self)
    }

    fn cancel(&mut self) {
        LidarSimulator::cancel(self)
    }

    fn is_running(&self) -> bool {
        LidarSimulator::is_running(self)
    }
}
