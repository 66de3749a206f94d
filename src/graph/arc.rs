use crate::element::{Element, ElementCore, NodeId};

/// A directed, weighted relation between two sibling nodes.
#[derive(Debug, Clone)]
pub struct ArcData<T> {
    pub(crate) core: ElementCore,
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) value: T,
}

impl<T> ArcData<T> {
    pub(crate) fn new(label: impl Into<String>, source: NodeId, target: NodeId, value: T) -> Self {
        ArcData {
            core: ElementCore::new(label),
            source,
            target,
            value,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether this arc runs from `source` to `target`.
    pub fn connects(&self, source: NodeId, target: NodeId) -> bool {
        self.source == source && self.target == target
    }

    /// Whether `node` is either endpoint of this arc.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

impl<T> Element for ArcData<T> {
    fn core(&self) -> &ElementCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(i: usize) -> NodeId {
        NodeId { internal: i }
    }

    #[test]
    fn new_arc_is_detached() {
        let arc = ArcData::new("a1", node(0), node(1), 8);
        assert_eq!(arc.label(), "a1");
        assert!(arc.is_detached());
        assert_eq!(*arc.value(), 8);
    }

    #[test]
    fn connects_is_directional() {
        let arc = ArcData::new("a1", node(0), node(1), ());
        assert!(arc.connects(node(0), node(1)));
        assert!(!arc.connects(node(1), node(0)));
    }

    #[test]
    fn touches_either_endpoint() {
        let arc = ArcData::new("a1", node(0), node(1), ());
        assert!(arc.touches(node(0)));
        assert!(arc.touches(node(1)));
        assert!(!arc.touches(node(2)));
    }
}
