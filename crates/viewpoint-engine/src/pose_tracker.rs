//! Observation of a tracked pose's parent-transform chain.

use log::warn;
use viewpoint_core::{NodeId, PoseGraph, Result, ViewpointError};

/// The set of transform nodes whose modification re-triggers a recompute.
///
/// Built once at mode start by walking the tool node's parent chain; stored
/// as stable handles, detached simply by dropping. If the chain is
/// restructured after attachment (a node reparented) the set becomes stale
/// until the mode is stopped and restarted.
#[derive(Debug, Clone)]
pub struct PoseChain {
    nodes: Vec<NodeId>,
}

impl PoseChain {
    /// Walks the parent chain from `node` to the root and records every
    /// ancestor, the node itself included.
    pub fn from_node(graph: &dyn PoseGraph, node: NodeId) -> Result<Self> {
        if !graph.contains_node(node) {
            return Err(ViewpointError::UnknownNode(node));
        }

        let mut nodes = vec![node];
        let mut current = node;
        while let Some(parent) = graph.parent(current) {
            if nodes.contains(&parent) {
                warn!("pose chain contains a cycle at {parent:?}, truncating");
                break;
            }
            nodes.push(parent);
            current = parent;
        }
        Ok(Self { nodes })
    }

    /// Whether a modification of `node` concerns this chain.
    #[must_use]
    pub fn observes(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// The observed handles, leaf first.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of observed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a chain contains at least its own node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
