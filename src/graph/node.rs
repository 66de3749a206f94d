use hashbrown::{HashMap, HashSet};

use crate::element::{ArcId, Element, ElementCore, NodeId};

/// Set of sibling nodes reachable over one arc.
///
/// The set records reachability only: two parallel arcs between the same
/// ordered pair contribute a single entry.
pub type NeighborSet = HashSet<NodeId>;

/// A node of the hierarchy, which is itself a graph over its children.
///
/// Children and arcs are kept twice: in insertion order, which drives export,
/// and in a label index used for lookups and uniqueness checks.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub(crate) core: ElementCore,
    children: Vec<NodeId>,
    child_labels: HashMap<String, NodeId>,
    arcs: Vec<ArcId>,
    arc_labels: HashMap<String, ArcId>,
    out_neighbors: NeighborSet,
    in_neighbors: NeighborSet,
}

impl NodeData {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        NodeData {
            core: ElementCore::new(label),
            children: Vec::new(),
            child_labels: HashMap::new(),
            arcs: Vec::new(),
            arc_labels: HashMap::new(),
            out_neighbors: NeighborSet::new(),
            in_neighbors: NeighborSet::new(),
        }
    }

    /// Direct children, in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Arcs among the direct children, in insertion order.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    pub fn child_by_label(&self, label: &str) -> Option<NodeId> {
        self.child_labels.get(label).copied()
    }

    pub fn arc_by_label(&self, label: &str) -> Option<ArcId> {
        self.arc_labels.get(label).copied()
    }

    /// Siblings this node has an outgoing arc to.
    pub fn out_neighbors(&self) -> &NeighborSet {
        &self.out_neighbors
    }

    /// Siblings this node has an incoming arc from.
    pub fn in_neighbors(&self) -> &NeighborSet {
        &self.in_neighbors
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, label: String, child: NodeId) {
        self.child_labels.insert(label, child);
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, label: &str, child: NodeId) {
        self.child_labels.remove(label);
        self.children.retain(|&c| c != child);
    }

    pub(crate) fn relabel_child(&mut self, old: &str, new: String, child: NodeId) {
        self.child_labels.remove(old);
        self.child_labels.insert(new, child);
    }

    pub(crate) fn push_arc(&mut self, label: String, arc: ArcId) {
        self.arc_labels.insert(label, arc);
        self.arcs.push(arc);
    }

    pub(crate) fn remove_arc(&mut self, label: &str, arc: ArcId) {
        self.arc_labels.remove(label);
        self.arcs.retain(|&a| a != arc);
    }

    pub(crate) fn relabel_arc(&mut self, old: &str, new: String, arc: ArcId) {
        self.arc_labels.remove(old);
        self.arc_labels.insert(new, arc);
    }

    pub(crate) fn out_neighbors_mut(&mut self) -> &mut NeighborSet {
        &mut self.out_neighbors
    }

    pub(crate) fn in_neighbors_mut(&mut self) -> &mut NeighborSet {
        &mut self.in_neighbors
    }
}

impl Element for NodeData {
    fn core(&self) -> &ElementCore {
        &self.core
    }
}
