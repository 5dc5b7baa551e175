//! The Follow mode: re-centers the camera when the watched object drifts
//! out of the safe viewing region.

use glam::Vec3;
use log::{debug, warn};

use viewpoint_core::geometry::{self, Aabb};
use viewpoint_core::{
    AdjustAxes, FollowOptions, ObjectId, ObjectStore, Result, SafeZone, ViewSurface,
    ViewpointError,
};

/// Phase of the follow state machine. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    /// The watched object is inside the safe zone; membership is checked
    /// every tick.
    #[default]
    Safe,
    /// The object has left the zone; waiting out the dwell time before
    /// moving the camera.
    Unsafe,
    /// The camera is interpolating toward the frozen target translation.
    Adjusting,
    /// The move is done; resting before the zone is re-armed.
    Resting,
}

/// Timer-driven controller that watches one object and nudges the camera
/// back when it strays.
///
/// Membership sampling uses only the 8 corners of the object's bounding box,
/// and only on the axes enabled in [`AdjustAxes`]. While the camera is
/// adjusting or resting, membership is not evaluated at all, so object
/// motion during a camera move cannot re-trigger the machine.
#[derive(Debug)]
pub struct FollowController {
    watched: ObjectId,
    options: FollowOptions,
    state: FollowState,
    /// Dwell accumulated in the current state, seconds. Threshold excess is
    /// carried across transitions so behavior depends only on cumulative
    /// elapsed time, not tick alignment.
    dwell_secs: f32,
    /// Object center in camera space when the safe zone was last
    /// established.
    baseline: Vec3,
    move_base_position: Vec3,
    move_base_focal: Vec3,
    move_translation: Vec3,
}

impl FollowController {
    /// Creates a controller watching `watched`, capturing the camera-space
    /// baseline from the current view.
    pub fn new(
        watched: ObjectId,
        options: FollowOptions,
        objects: &dyn ObjectStore,
        view: &dyn ViewSurface,
    ) -> Result<Self> {
        if !objects.contains_object(watched) {
            return Err(ViewpointError::UnknownObject(watched));
        }
        let Some(center) = objects.center(watched) else {
            return Err(ViewpointError::NoBounds(watched));
        };

        Ok(Self {
            watched,
            options,
            state: FollowState::Safe,
            dwell_secs: 0.0,
            baseline: geometry::world_to_camera_point(view.camera(), center),
            move_base_position: Vec3::ZERO,
            move_base_focal: Vec3::ZERO,
            move_translation: Vec3::ZERO,
        })
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> FollowState {
        self.state
    }

    /// The watched object.
    #[must_use]
    pub fn watched(&self) -> ObjectId {
        self.watched
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &FollowOptions {
        &self.options
    }

    /// Replaces the safe zone; applies from the next tick.
    pub fn set_safe_zone(&mut self, zone: SafeZone) {
        self.options.safe_zone = zone;
    }

    /// Replaces the per-axis enables; applies from the next tick.
    pub fn set_adjust_axes(&mut self, axes: AdjustAxes) {
        self.options.adjust_axes = axes;
    }

    /// Sets the dwell thresholds, clamping negatives to zero.
    pub fn set_dwell_times(&mut self, unsafe_to_adjust: f32, adjust_to_rest: f32, rest_to_safe: f32) {
        self.options
            .set_dwell_times(unsafe_to_adjust, adjust_to_rest, rest_to_safe);
    }

    /// Advances the state machine by one tick of measured elapsed time.
    pub fn tick(&mut self, dt_secs: f32, objects: &dyn ObjectStore, view: &mut dyn ViewSurface) {
        let dt = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };

        match self.state {
            FollowState::Safe => {
                let Some(bounds) = objects.world_bounds(self.watched) else {
                    warn!("follow: watched object {:?} has no bounds, skipping tick", self.watched);
                    return;
                };
                if !inside_zone(view, &bounds, &self.options.safe_zone, self.options.adjust_axes) {
                    debug!("follow: object left the safe zone");
                    self.state = FollowState::Unsafe;
                    self.dwell_secs = 0.0;
                }
            }
            FollowState::Unsafe => {
                let Some(bounds) = objects.world_bounds(self.watched) else {
                    warn!("follow: watched object {:?} has no bounds, skipping tick", self.watched);
                    return;
                };
                if inside_zone(view, &bounds, &self.options.safe_zone, self.options.adjust_axes) {
                    debug!("follow: object returned to the safe zone");
                    self.enter_safe(0.0, objects, view);
                } else {
                    self.dwell_secs += dt;
                    if self.dwell_secs >= self.options.unsafe_to_adjust_secs {
                        let carry = self.dwell_secs - self.options.unsafe_to_adjust_secs;
                        self.begin_adjust(carry, objects, view);
                    }
                }
            }
            FollowState::Adjusting => {
                self.dwell_secs += dt;
                self.step_adjust(view);
            }
            FollowState::Resting => {
                self.dwell_secs += dt;
                if self.dwell_secs >= self.options.rest_to_safe_secs {
                    let carry = self.dwell_secs - self.options.rest_to_safe_secs;
                    debug!("follow: rest over, re-arming");
                    self.enter_safe(carry, objects, view);
                }
            }
        }
    }

    /// Transitions into Safe and recaptures the camera-space baseline.
    fn enter_safe(&mut self, carry: f32, objects: &dyn ObjectStore, view: &dyn ViewSurface) {
        self.state = FollowState::Safe;
        self.dwell_secs = carry;
        if let Some(center) = objects.center(self.watched) {
            self.baseline = geometry::world_to_camera_point(view.camera(), center);
        } else {
            warn!("follow: cannot recapture baseline, object {:?} has no bounds", self.watched);
        }
    }

    /// Captures the camera base and freezes the target translation, then
    /// applies the first interpolation step.
    fn begin_adjust(&mut self, carry: f32, objects: &dyn ObjectStore, view: &mut dyn ViewSurface) {
        let Some(center) = objects.center(self.watched) else {
            warn!("follow: cannot compute adjustment, object {:?} has no bounds", self.watched);
            return;
        };

        let camera = view.camera();
        let current = geometry::world_to_camera_point(camera, center);
        let mut delta = current - self.baseline;
        if !self.options.adjust_axes.x {
            delta.x = 0.0;
        }
        if !self.options.adjust_axes.y {
            delta.y = 0.0;
        }
        if !self.options.adjust_axes.z {
            delta.z = 0.0;
        }

        self.move_base_position = camera.position;
        self.move_base_focal = camera.focal_point;
        self.move_translation = geometry::camera_to_world_vector(camera, delta);
        self.state = FollowState::Adjusting;
        self.dwell_secs = carry;
        debug!("follow: adjusting by {:?} over {}s", self.move_translation, self.options.adjust_to_rest_secs);

        self.step_adjust(view);
    }

    /// One interpolation step; weight is clamped so the endpoint is exact.
    fn step_adjust(&mut self, view: &mut dyn ViewSurface) {
        let duration = self.options.adjust_to_rest_secs;
        let weight = if duration <= 0.0 {
            1.0
        } else {
            (self.dwell_secs / duration).min(1.0)
        };

        let camera = view.camera_mut();
        camera.position = self.move_base_position + self.move_translation * weight;
        camera.focal_point = self.move_base_focal + self.move_translation * weight;
        view.reset_clipping_range();

        if self.dwell_secs >= duration {
            self.state = FollowState::Resting;
            self.dwell_secs -= duration;
        }
    }
}

/// Whether every corner of `bounds` projects inside the zone on every
/// checked axis.
///
/// The Safe-state exit test is the negation of this, so both directions of
/// the check are conservative: any ambiguity keeps the machine in its
/// alert state.
fn inside_zone(
    view: &dyn ViewSurface,
    bounds: &Aabb,
    zone: &SafeZone,
    axes: AdjustAxes,
) -> bool {
    bounds.corners().iter().all(|&corner| {
        let v = view.world_to_view(corner);
        (0..3).all(|axis| {
            if !axes.enabled(axis) {
                return true;
            }
            let [lo, hi] = zone.axis_range(axis);
            v[axis] >= lo && v[axis] <= hi
        })
    })
}
