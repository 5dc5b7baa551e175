//! Configuration options for the two camera-control modes.
//!
//! All option structs are plain data with defaults; setters clamp to sane
//! ranges but never reject a value. Options changed while a mode is active
//! take effect on the next pose notification or timer tick.

use serde::{Deserialize, Serialize};

use crate::camera::{AxisDirection, ProjectionMode};
use crate::scene::ObjectId;

/// How many camera degrees of freedom are slaved to the tracked instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DofMode {
    /// Camera fully rigid with the tracked frame: no up correction, no fixed
    /// target.
    #[default]
    SixDof,
    /// Up vector forced to a fixed world direction; the camera still points
    /// wherever the tracked frame points.
    FiveDof,
    /// Up forced and focal point locked to the target object's center,
    /// regardless of where the tracked frame points.
    ThreeDof,
}

impl DofMode {
    /// Whether this mode forces the up vector to a fixed world direction.
    #[must_use]
    pub fn forces_up(self) -> bool {
        matches!(self, DofMode::FiveDof | DofMode::ThreeDof)
    }

    /// Whether this mode locks the focal point to the target object.
    #[must_use]
    pub fn forces_focal_point(self) -> bool {
        matches!(self, DofMode::ThreeDof)
    }
}

/// Look-ahead distance placed along the tracked frame's local -Z axis when
/// the focal point is not locked to a target, in millimeters.
pub const LOOK_AHEAD_MM: f32 = 200.0;

/// Options for the Track View mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackViewOptions {
    /// Degrees-of-freedom policy.
    pub dof: DofMode,
    /// World direction the up vector is corrected toward in forced-up modes.
    pub up_direction: AxisDirection,
    /// Camera projection.
    pub projection: ProjectionMode,
    /// View angle in degrees, used in perspective projection.
    pub view_angle_degrees: f32,
    /// Parallel scale, used in orthographic projection.
    pub parallel_scale: f32,
    /// Camera offset along the tracked frame's local X, in millimeters.
    pub x_offset_mm: f32,
    /// Camera offset along the tracked frame's local Y, in millimeters.
    pub y_offset_mm: f32,
    /// Camera offset along the tracked frame's local Z, in millimeters.
    pub z_offset_mm: f32,
    /// Object whose center becomes the focal point in three-DOF mode.
    pub target: Option<ObjectId>,
    /// Model shown only while the mode is active.
    pub show_while_active: Option<ObjectId>,
    /// Model shown only while the mode is inactive.
    pub show_while_inactive: Option<ObjectId>,
}

impl Default for TrackViewOptions {
    fn default() -> Self {
        Self {
            dof: DofMode::SixDof,
            up_direction: AxisDirection::PosZ,
            projection: ProjectionMode::Perspective,
            view_angle_degrees: 30.0,
            parallel_scale: 1.0,
            x_offset_mm: 0.0,
            y_offset_mm: 0.0,
            z_offset_mm: 0.0,
            target: None,
            show_while_active: None,
            show_while_inactive: None,
        }
    }
}

/// One normalized-view range [min, max] per viewport axis.
///
/// Coordinates use the engine-wide convention: x and y in [-1, +1], depth z
/// in [0, 1]. An object is inside the zone only when every sampled point is
/// inside the range on every checked axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    /// Horizontal range.
    pub x: [f32; 2],
    /// Vertical range.
    pub y: [f32; 2],
    /// Depth range.
    pub z: [f32; 2],
}

impl Default for SafeZone {
    fn default() -> Self {
        Self {
            x: [-0.8, 0.8],
            y: [-0.8, 0.8],
            z: [0.0, 1.0],
        }
    }
}

impl SafeZone {
    /// Returns the range for the given viewport axis (0 = x, 1 = y, 2 = z).
    #[must_use]
    pub fn axis_range(&self, axis: usize) -> [f32; 2] {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

/// Which camera-local axes the Follow mode checks and adjusts along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustAxes {
    /// Check and adjust along camera X.
    pub x: bool,
    /// Check and adjust along camera Y.
    pub y: bool,
    /// Check and adjust along camera Z (depth).
    pub z: bool,
}

impl Default for AdjustAxes {
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            z: false,
        }
    }
}

impl AdjustAxes {
    /// Whether the given viewport axis (0 = x, 1 = y, 2 = z) is checked.
    #[must_use]
    pub fn enabled(&self, axis: usize) -> bool {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

/// Options for the Follow mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowOptions {
    /// The safe viewing region.
    pub safe_zone: SafeZone,
    /// Per-axis check/adjust enables.
    pub adjust_axes: AdjustAxes,
    /// Dwell time outside the zone before an adjustment starts, seconds.
    pub unsafe_to_adjust_secs: f32,
    /// Duration of the camera move, seconds. Zero makes the move
    /// instantaneous.
    pub adjust_to_rest_secs: f32,
    /// Rest time after a move before the zone is re-armed, seconds.
    pub rest_to_safe_secs: f32,
    /// Timer tick interval, milliseconds. The next tick is scheduled after
    /// the previous one completes, so actual spacing also includes compute
    /// time.
    pub tick_interval_ms: u64,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            safe_zone: SafeZone::default(),
            adjust_axes: AdjustAxes::default(),
            unsafe_to_adjust_secs: 1.0,
            adjust_to_rest_secs: 0.5,
            rest_to_safe_secs: 1.0,
            tick_interval_ms: 100,
        }
    }
}

impl FollowOptions {
    /// Sets the three dwell thresholds, clamping negatives to zero.
    pub fn set_dwell_times(&mut self, unsafe_to_adjust: f32, adjust_to_rest: f32, rest_to_safe: f32) {
        self.unsafe_to_adjust_secs = unsafe_to_adjust.max(0.0);
        self.adjust_to_rest_secs = adjust_to_rest.max(0.0);
        self.rest_to_safe_secs = rest_to_safe.max(0.0);
    }
}
