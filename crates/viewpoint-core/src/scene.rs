//! Abstractions over the host application's scene.
//!
//! The engine never owns scene data. It reads poses through [`PoseGraph`],
//! reads bounds and toggles visibility through [`ObjectStore`], and mutates
//! the camera through [`ViewSurface`]. Handles are stable indices into the
//! host's storage, never references back into it.

use glam::{Mat4, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::geometry::{self, Aabb};

/// Stable handle to a transform node in the host's pose graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Stable handle to a spatial object in the host's object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Maximum parent-chain length walked before assuming a cycle.
const MAX_CHAIN_DEPTH: usize = 256;

/// A tree of parent-linked transforms, queried by handle.
pub trait PoseGraph {
    /// Returns whether the node handle resolves.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Returns the parent of a node, or `None` at the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Returns the node's transform relative to its parent.
    fn local_transform(&self, node: NodeId) -> Option<Mat4>;

    /// Composes the parent chain into a local-frame-to-world transform.
    ///
    /// Walks the chain at query time; nothing is cached between queries, so
    /// the result always reflects the tree's current state.
    fn transform_to_world(&self, node: NodeId) -> Option<Mat4> {
        let mut m = self.local_transform(node)?;
        let mut current = node;
        let mut depth = 0;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            if depth > MAX_CHAIN_DEPTH {
                warn!("transform_to_world: parent chain exceeds {MAX_CHAIN_DEPTH} nodes, assuming a cycle");
                break;
            }
            let Some(local) = self.local_transform(parent) else {
                break;
            };
            m = local * m;
            current = parent;
        }
        Some(m)
    }
}

/// Storage of renderable objects with world-space bounds and a visibility
/// flag.
pub trait ObjectStore {
    /// Returns whether the object handle resolves.
    fn contains_object(&self, id: ObjectId) -> bool;

    /// Returns the object's world-space axis-aligned bounding box, or `None`
    /// if it has no spatial extent.
    fn world_bounds(&self, id: ObjectId) -> Option<Aabb>;

    /// Returns the center of the object's bounding box.
    fn center(&self, id: ObjectId) -> Option<Vec3> {
        self.world_bounds(id).map(|b| b.center())
    }

    /// Returns whether the object is currently shown.
    fn is_visible(&self, id: ObjectId) -> bool;

    /// Shows or hides the object.
    fn set_visible(&mut self, id: ObjectId, visible: bool);
}

/// A render view: a camera plus projection to and from normalized view
/// coordinates.
///
/// The default projection methods go through the camera's view-projection
/// matrix; hosts with their own renderer can override them as long as they
/// keep the same normalized convention (x, y in [-1, 1], z in [0, 1]).
pub trait ViewSurface {
    /// The camera rendered by this view.
    fn camera(&self) -> &CameraState;

    /// Mutable access for the active controller.
    fn camera_mut(&mut self) -> &mut CameraState;

    /// Projects a world point into normalized view coordinates.
    fn world_to_view(&self, p: Vec3) -> Vec3 {
        geometry::world_to_view(self.camera(), p)
    }

    /// Maps a normalized view coordinate back to a world point.
    fn view_to_world(&self, p: Vec3) -> Vec3 {
        geometry::view_to_world(self.camera(), p)
    }

    /// Recomputes the clipping planes after a camera move.
    fn reset_clipping_range(&mut self) {
        self.camera_mut().reset_clipping_range();
    }
}
