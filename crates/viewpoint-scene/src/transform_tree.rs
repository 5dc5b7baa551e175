//! An arena-based transform tree implementing [`PoseGraph`].

use glam::Mat4;
use viewpoint_core::{NodeId, PoseGraph};

struct Node {
    parent: Option<NodeId>,
    local: Mat4,
}

/// A tree of parent-linked transform nodes stored in an arena.
///
/// Node handles are stable indices: nodes are never removed, so a handle
/// stays valid for the tree's lifetime. Hosts with a real scene graph
/// implement [`PoseGraph`] themselves; this tree exists for tests, demos,
/// and hosts without one.
#[derive(Default)]
pub struct TransformTree {
    nodes: Vec<Node>,
}

impl TransformTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given parent and local transform, returning its
    /// handle.
    pub fn add_node(&mut self, parent: Option<NodeId>, local: Mat4) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node { parent, local });
        id
    }

    /// Replaces a node's local transform.
    ///
    /// After changing a transform the host is expected to notify the engine
    /// via its `on_transform_modified` entry point.
    pub fn set_local_transform(&mut self, node: NodeId, local: Mat4) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.local = local;
        }
    }

    /// Reparents a node.
    ///
    /// Observers attached by an active mode are not re-walked; the observed
    /// chain stays stale until the mode is stopped and restarted.
    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.parent = parent;
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PoseGraph for TransformTree {
    fn contains_node(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.nodes.len()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0 as usize)?.parent
    }

    fn local_transform(&self, node: NodeId) -> Option<Mat4> {
        Some(self.nodes.get(node.0 as usize)?.local)
    }
}
