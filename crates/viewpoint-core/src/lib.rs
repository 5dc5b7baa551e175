//! Core abstractions for viewpoint-rs.
//!
//! This crate provides the fundamental types used throughout viewpoint-rs:
//! - [`CameraState`] and the view/projection math it carries
//! - [`geometry`] frame conversions with degenerate-case fallbacks
//! - [`PoseGraph`], [`ObjectStore`], and [`ViewSurface`] traits over the
//!   host application's scene
//! - Configuration options for the two camera-control modes

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod options;
pub mod scene;

pub use camera::{AxisDirection, CameraState, ProjectionMode, DEFAULT_ROLL_DEGREES};
pub use error::{Result, ViewpointError};
pub use geometry::{corrected_up, Aabb};
pub use mode::Mode;
pub use options::{AdjustAxes, DofMode, FollowOptions, SafeZone, TrackViewOptions, LOOK_AHEAD_MM};
pub use scene::{NodeId, ObjectId, ObjectStore, PoseGraph, ViewSurface};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Vec3, Vec4};
