use std::fmt;

use serde::Serialize;

/// Stable handle of a node inside a [`FractalGraph`](crate::graph::FractalGraph).
///
/// Handles are never reused by the arena that issued them, so a handle kept
/// after [`purge`](crate::graph::FractalGraph::purge) simply resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId {
    pub(crate) internal: usize,
}

/// Stable handle of an arc inside a [`FractalGraph`](crate::graph::FractalGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArcId {
    pub(crate) internal: usize,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.internal
    }
}

impl ArcId {
    pub fn index(self) -> usize {
        self.internal
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.internal)
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arc#{}", self.internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_creation_index() {
        let first = NodeId { internal: 1 };
        let second = NodeId { internal: 2 };
        assert!(first < second);
        assert_eq!(second.index(), 2);
    }

    #[test]
    fn display_distinguishes_nodes_and_arcs() {
        assert_eq!(NodeId { internal: 3 }.to_string(), "node#3");
        assert_eq!(ArcId { internal: 3 }.to_string(), "arc#3");
    }
}
