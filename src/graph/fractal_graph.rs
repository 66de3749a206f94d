use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::{
    element::{ArcId, Element, NodeId},
    error::{ElementKind, FractalError, Result},
    graph::{ArcData, NodeData},
};

/// Arena owning every node and arc of one or more fractal graphs.
///
/// Elements are created detached (as roots, or as parentless arcs) and become
/// part of a hierarchy once added to a container node. The arena hands out
/// [`NodeId`]/[`ArcId`] handles that stay valid across relabeling and
/// re-parenting; equality and containment checks always go through them,
/// never through labels.
///
/// All mutations take `&mut self`. A mutation either succeeds with every
/// invariant restored, or returns an error and leaves the arena untouched.
#[derive(Debug, Clone)]
pub struct FractalGraph<T> {
    pub(crate) nodes: HashMap<NodeId, NodeData>,
    pub(crate) arcs: HashMap<ArcId, ArcData<T>>,
    next_node: usize,
    next_arc: usize,
}

impl<T> FractalGraph<T> {
    pub fn new() -> Self {
        FractalGraph {
            nodes: HashMap::new(),
            arcs: HashMap::new(),
            next_node: 0,
            next_arc: 0,
        }
    }

    /// Creates a standalone root node.
    pub fn create_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId {
            internal: self.next_node,
        };
        self.next_node += 1;
        let data = NodeData::new(label);
        debug!(node = %id, label = data.label(), "created node");
        self.nodes.insert(id, data);
        id
    }

    /// Creates a detached arc between two existing nodes.
    ///
    /// The endpoints are only required to exist; whether they are siblings is
    /// checked when the arc is added to a container.
    ///
    /// # Errors
    /// `NotFound` if either endpoint is unknown to this arena.
    pub fn create_arc(
        &mut self,
        label: impl Into<String>,
        source: NodeId,
        target: NodeId,
        value: T,
    ) -> Result<ArcId> {
        self.node_ref(source)?;
        self.node_ref(target)?;

        let id = ArcId {
            internal: self.next_arc,
        };
        self.next_arc += 1;
        let data = ArcData::new(label, source, target, value);
        debug!(arc = %id, label = data.label(), %source, %target, "created arc");
        self.arcs.insert(id, data);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    pub fn arc(&self, id: ArcId) -> Option<&ArcData<T>> {
        self.arcs.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Label of a node, if the node exists.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.label())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent())
    }

    /// Every parentless node, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, data)| data.is_detached())
            .map(|(&id, _)| id)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Looks up a direct child of `parent` by label.
    ///
    /// Never fails: an unknown parent simply has no children.
    pub fn node_by_label(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.nodes.get(&parent)?.child_by_label(label)
    }

    /// Looks up an arc of `parent` by label.
    pub fn arc_by_label(&self, parent: NodeId, label: &str) -> Option<ArcId> {
        self.nodes.get(&parent)?.arc_by_label(label)
    }

    /// Follows a slash-separated label path (e.g. `"Sub1/A/A1"`) downwards
    /// from `root`. An empty path resolves to `root` itself.
    pub fn resolve_path(&self, root: NodeId, path: &str) -> Option<NodeId> {
        self.nodes.get(&root)?;
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |current, segment| self.node_by_label(current, segment))
    }

    /// Changes the label of a node, keeping it unique among its siblings.
    ///
    /// # Errors
    /// `NotFound` for an unknown node, `DuplicateLabel` if a sibling already
    /// carries `label`.
    pub fn relabel_node(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        let old = self.node_ref(id)?.label().to_owned();
        if old == label {
            return Ok(());
        }

        if let Some(parent) = self.node_ref(id)?.parent() {
            let parent_data = self.node_ref(parent)?;
            if parent_data.child_by_label(&label).is_some() {
                return Err(FractalError::DuplicateLabel {
                    kind: ElementKind::Node,
                    label,
                    container: parent_data.label().to_owned(),
                });
            }
            self.node_mut(parent)?.relabel_child(&old, label.clone(), id);
        }

        debug!(node = %id, %old, new = %label, "relabeled node");
        self.node_mut(id)?.core.set_label(label);
        Ok(())
    }

    /// Changes the label of an arc, keeping it unique within its container.
    ///
    /// # Errors
    /// `NotFound` for an unknown arc, `DuplicateLabel` if another arc of the
    /// same container already carries `label`.
    pub fn relabel_arc(&mut self, id: ArcId, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        let old = self.arc_ref(id)?.label().to_owned();
        if old == label {
            return Ok(());
        }

        if let Some(parent) = self.arc_ref(id)?.parent() {
            let parent_data = self.node_ref(parent)?;
            if parent_data.arc_by_label(&label).is_some() {
                return Err(FractalError::DuplicateLabel {
                    kind: ElementKind::Arc,
                    label,
                    container: parent_data.label().to_owned(),
                });
            }
            self.node_mut(parent)?.relabel_arc(&old, label.clone(), id);
        }

        debug!(arc = %id, %old, new = %label, "relabeled arc");
        self.arc_mut(id)?.core.set_label(label);
        Ok(())
    }

    /// Drops a detached node, its entire subtree and every arc that refers to
    /// any of the removed nodes.
    ///
    /// # Errors
    /// `NotFound` for an unknown node, `InvalidArgument` if the node still has
    /// a parent (detach it first).
    pub fn purge(&mut self, root: NodeId) -> Result<()> {
        let data = self.node_ref(root)?;
        if let Some(parent) = data.parent() {
            return Err(FractalError::invalid_argument(format!(
                "cannot purge '{}': still attached to '{}'",
                data.label(),
                self.label(parent).unwrap_or_default()
            )));
        }

        let mut doomed = HashSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if doomed.insert(current) {
                if let Some(data) = self.nodes.get(&current) {
                    stack.extend_from_slice(data.children());
                }
            }
        }

        let before = self.arcs.len();
        self.arcs.retain(|_, arc| {
            let owned_inside = arc.parent().is_some_and(|p| doomed.contains(&p));
            let dangling = arc.is_detached()
                && (doomed.contains(&arc.source) || doomed.contains(&arc.target));
            !(owned_inside || dangling)
        });
        self.nodes.retain(|id, _| !doomed.contains(id));

        debug!(
            node = %root,
            nodes = doomed.len(),
            arcs = before - self.arcs.len(),
            "purged subtree"
        );
        Ok(())
    }

    /// Drops a detached arc from the arena.
    ///
    /// # Errors
    /// `NotFound` for an unknown arc, `InvalidArgument` if it still belongs
    /// to a container.
    pub fn discard_arc(&mut self, id: ArcId) -> Result<()> {
        let arc = self.arc_ref(id)?;
        if let Some(parent) = arc.parent() {
            return Err(FractalError::invalid_argument(format!(
                "cannot discard arc '{}': still attached to '{}'",
                arc.label(),
                self.label(parent).unwrap_or_default()
            )));
        }
        self.arcs.remove(&id);
        debug!(arc = %id, "discarded arc");
        Ok(())
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(&id)
            .ok_or_else(|| FractalError::unknown(ElementKind::Node, id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| FractalError::unknown(ElementKind::Node, id))
    }

    pub(crate) fn arc_ref(&self, id: ArcId) -> Result<&ArcData<T>> {
        self.arcs
            .get(&id)
            .ok_or_else(|| FractalError::unknown(ElementKind::Arc, id))
    }

    pub(crate) fn arc_mut(&mut self, id: ArcId) -> Result<&mut ArcData<T>> {
        self.arcs
            .get_mut(&id)
            .ok_or_else(|| FractalError::unknown(ElementKind::Arc, id))
    }

    /// Label used in error messages; falls back to the handle for stale ids.
    pub(crate) fn display_label(&self, id: NodeId) -> String {
        self.label(id)
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_string())
    }
}

impl<T> Default for FractalGraph<T> {
    fn default() -> Self {
        FractalGraph::new()
    }
}
