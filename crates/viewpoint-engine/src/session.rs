//! The mode supervisor: one session object owning the current mode and the
//! active controller.

use std::time::{Duration, Instant};

use log::{debug, error, warn};

use viewpoint_core::{
    FollowOptions, Mode, NodeId, ObjectId, ObjectStore, PoseGraph, Result, TrackViewOptions,
    ViewSurface, ViewpointError,
};

use crate::follow::FollowController;
use crate::timer::TickTimer;
use crate::track_view::TrackViewController;

/// Owns the engine-wide [`Mode`] and enforces mutual exclusion between the
/// two controllers.
///
/// At most one controller drives the camera at a time, and the only legal
/// mode transitions go through `Off`. Every failing operation logs, returns
/// an error, and leaves the session exactly as it was.
#[derive(Default)]
pub struct ViewpointSession {
    mode: Mode,
    track_view: Option<TrackViewController>,
    follow: Option<FollowController>,
    timer: Option<TickTimer>,
}

impl ViewpointSession {
    /// Creates a session with no active mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Starts Track View on the given tool node and performs an initial
    /// recompute.
    pub fn start_track_view(
        &mut self,
        graph: &dyn PoseGraph,
        objects: &mut dyn ObjectStore,
        view: &mut dyn ViewSurface,
        tool: NodeId,
        options: TrackViewOptions,
    ) -> Result<()> {
        self.guard_off(Mode::TrackView)?;

        let controller = match TrackViewController::new(graph, objects, tool, options) {
            Ok(c) => c,
            Err(e) => {
                warn!("cannot start track view: {e}");
                return Err(e);
            }
        };

        controller.activate(objects);
        controller.apply(graph, view);
        self.track_view = Some(controller);
        self.mode = Mode::TrackView;
        debug!("track view started on {tool:?}");
        Ok(())
    }

    /// Stops Track View, restoring the point-of-view visibility toggles and
    /// detaching the observed chain.
    pub fn stop_track_view(&mut self, objects: &mut dyn ObjectStore) -> Result<()> {
        if self.mode != Mode::TrackView {
            error!("cannot stop track view: active mode is {}", self.mode);
            return Err(ViewpointError::NotActive(Mode::TrackView));
        }
        if let Some(controller) = self.track_view.take() {
            controller.deactivate(objects);
        }
        self.mode = Mode::Off;
        debug!("track view stopped");
        Ok(())
    }

    /// Starts Follow on the given object. The host owns the timer loop and
    /// calls [`Self::on_timer_tick`]; the first tick measures from here.
    pub fn start_follow(
        &mut self,
        objects: &dyn ObjectStore,
        view: &dyn ViewSurface,
        watched: ObjectId,
        options: FollowOptions,
    ) -> Result<()> {
        self.guard_off(Mode::Follow)?;

        let interval = Duration::from_millis(options.tick_interval_ms);
        let controller = match FollowController::new(watched, options, objects, view) {
            Ok(c) => c,
            Err(e) => {
                warn!("cannot start follow: {e}");
                return Err(e);
            }
        };

        let mut timer = TickTimer::new(interval);
        timer.arm(Instant::now());
        self.timer = Some(timer);
        self.follow = Some(controller);
        self.mode = Mode::Follow;
        debug!("follow started on {watched:?}");
        Ok(())
    }

    /// Stops Follow. Any tick already queued by the host becomes a no-op.
    pub fn stop_follow(&mut self) -> Result<()> {
        if self.mode != Mode::Follow {
            error!("cannot stop follow: active mode is {}", self.mode);
            return Err(ViewpointError::NotActive(Mode::Follow));
        }
        self.follow = None;
        self.timer = None;
        self.mode = Mode::Off;
        debug!("follow stopped");
        Ok(())
    }

    /// Host notification that a transform node changed.
    ///
    /// Triggers a full Track View recompute when the node belongs to the
    /// observed chain; a no-op otherwise or in any other mode.
    pub fn on_transform_modified(
        &mut self,
        node: NodeId,
        graph: &dyn PoseGraph,
        view: &mut dyn ViewSurface,
    ) {
        if self.mode != Mode::TrackView {
            return;
        }
        if let Some(controller) = &self.track_view {
            if controller.observes(node) {
                controller.apply(graph, view);
            }
        }
    }

    /// Host-driven timer tick for the Follow mode.
    ///
    /// Measures the wall-clock delta since the previous tick, advances the
    /// state machine, and returns the deadline for the next tick (scheduled
    /// after this one completed). Returns `None` when Follow is not active,
    /// so a stale queued tick cannot corrupt state after a stop.
    pub fn on_timer_tick(
        &mut self,
        now: Instant,
        objects: &dyn ObjectStore,
        view: &mut dyn ViewSurface,
    ) -> Option<Instant> {
        if self.mode != Mode::Follow {
            debug!("ignoring timer tick: active mode is {}", self.mode);
            return None;
        }
        let timer = self.timer.as_mut()?;
        let dt = timer.fire(now);
        if let Some(controller) = &mut self.follow {
            controller.tick(dt.as_secs_f32(), objects, view);
        }
        Some(self.timer.as_ref()?.rearm(Instant::now()))
    }

    /// The active Track View controller, for live option setters.
    pub fn track_view_mut(&mut self) -> Option<&mut TrackViewController> {
        self.track_view.as_mut()
    }

    /// The active Follow controller, for live option setters.
    pub fn follow_mut(&mut self) -> Option<&mut FollowController> {
        self.follow.as_mut()
    }

    /// The follow tick interval, when Follow is active.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.timer.as_ref().map(TickTimer::interval)
    }

    /// Replaces the follow tick interval; applies from the next re-arm.
    pub fn set_tick_interval(&mut self, interval: Duration) {
        if let Some(timer) = &mut self.timer {
            timer.set_interval(interval);
        }
    }

    fn guard_off(&self, requested: Mode) -> Result<()> {
        if self.mode != Mode::Off {
            error!("cannot start {requested} while {} is active", self.mode);
            return Err(ViewpointError::ModeConflict {
                requested,
                active: self.mode,
            });
        }
        Ok(())
    }
}
