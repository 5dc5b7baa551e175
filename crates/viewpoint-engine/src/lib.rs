//! Camera-control engine for viewpoint-rs.
//!
//! Two ways of driving a camera, mutually exclusive and supervised by a
//! [`ViewpointSession`]:
//! - **Track View**: the camera rigidly follows a tracked instrument pose,
//!   recomputed on every pose-chain modification.
//! - **Follow**: a timer-driven state machine gently re-centers the camera
//!   when a watched object drifts out of a configured safe viewing region.
//!
//! The engine is single-threaded and owns no scene data: the host calls
//! [`ViewpointSession::on_transform_modified`] and
//! [`ViewpointSession::on_timer_tick`] from its UI/render thread, passing
//! its own implementations of the `viewpoint-core` scene traits.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod follow;
pub mod pose_tracker;
pub mod session;
pub mod timer;
pub mod track_view;

pub use follow::{FollowController, FollowState};
pub use pose_tracker::PoseChain;
pub use session::ViewpointSession;
pub use timer::TickTimer;
pub use track_view::TrackViewController;

// Re-export the core vocabulary so hosts can depend on this crate alone
pub use viewpoint_core::{
    Aabb, AdjustAxes, AxisDirection, CameraState, DofMode, FollowOptions, Mode, NodeId, ObjectId,
    ObjectStore, PoseGraph, ProjectionMode, Result, SafeZone, TrackViewOptions, ViewSurface,
    ViewpointError,
};
