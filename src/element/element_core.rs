use crate::element::NodeId;

/// Label and parent back-reference carried by every node and arc.
///
/// No invariant is enforced here: uniqueness of labels and consistency of the
/// parent link are the container's job, which is why the setters are only
/// reachable from inside the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCore {
    label: String,
    parent: Option<NodeId>,
}

impl ElementCore {
    pub fn new(label: impl Into<String>) -> Self {
        ElementCore {
            label: label.into(),
            parent: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) fn clear_parent(&mut self) {
        self.parent = None;
    }
}

/// Common read access to the label and parent of nodes and arcs.
pub trait Element {
    fn core(&self) -> &ElementCore;

    fn label(&self) -> &str {
        self.core().label()
    }

    fn parent(&self) -> Option<NodeId> {
        self.core().parent()
    }

    /// An element without a parent is either a root node or a detached arc.
    fn is_detached(&self) -> bool {
        self.parent().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_core_has_no_parent() {
        let core = ElementCore::new("Sub1");
        assert_eq!(core.label(), "Sub1");
        assert_eq!(core.parent(), None);
    }

    #[test]
    fn parent_can_be_set_and_cleared() {
        let mut core = ElementCore::new("A");
        core.set_parent(NodeId { internal: 4 });
        assert_eq!(core.parent(), Some(NodeId { internal: 4 }));

        core.clear_parent();
        assert_eq!(core.parent(), None);
    }

    #[test]
    fn relabel_keeps_parent() {
        let mut core = ElementCore::new("A");
        core.set_parent(NodeId { internal: 0 });
        core.set_label("A2");
        assert_eq!(core.label(), "A2");
        assert_eq!(core.parent(), Some(NodeId { internal: 0 }));
    }
}
