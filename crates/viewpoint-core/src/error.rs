//! Error types for viewpoint-rs.

use thiserror::Error;

use crate::mode::Mode;
use crate::scene::{NodeId, ObjectId};

/// The main error type for viewpoint-rs operations.
///
/// Every failing operation also emits a log line and leaves the engine state
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewpointError {
    /// A mode is already active; stop it before starting another.
    #[error("cannot start {requested} while {active} is active - stop it first")]
    ModeConflict {
        /// The mode the caller tried to start.
        requested: Mode,
        /// The mode that is currently active.
        active: Mode,
    },

    /// The caller tried to stop a mode that is not the active one.
    #[error("{0} is not the active mode")]
    NotActive(Mode),

    /// A transform node handle did not resolve in the pose graph.
    #[error("transform node {0:?} not found in the pose graph")]
    UnknownNode(NodeId),

    /// An object handle did not resolve in the object store.
    #[error("object {0:?} not found in the object store")]
    UnknownObject(ObjectId),

    /// Three-DOF track view was requested without a target object.
    #[error("three-DOF track view requires a target object")]
    MissingTarget,

    /// The object exists but reports no spatial extent.
    #[error("object {0:?} has no spatial extent")]
    NoBounds(ObjectId),
}

/// A specialized Result type for viewpoint-rs operations.
pub type Result<T> = std::result::Result<T, ViewpointError>;
