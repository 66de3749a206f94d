use hashbrown::HashSet;
use tracing::debug;

use crate::{
    element::{ArcId, Element, NodeId},
    error::{ElementKind, FractalError, Result},
    graph::FractalGraph,
};

impl<T> FractalGraph<T> {
    /// Adds `child` to the children of `parent`.
    ///
    /// If `child` already belongs to another container it is moved: it is
    /// first deleted from its previous parent (taking the arcs incident to it
    /// there along), then appended to `parent`. Every check runs before the
    /// move, so a rejected call leaves `child` where it was.
    ///
    /// # Errors
    /// - `NotFound` if either handle is unknown.
    /// - `DuplicateLabel` if `parent` already has a child with the same label
    ///   (including `child` itself).
    /// - `InvalidArgument` if `child` is `parent` or one of its ancestors.
    pub fn add_node(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_node_insertion(parent, child)?;
        self.attach_node(parent, child)
    }

    /// Adds several children at once. The whole batch is validated, including
    /// label clashes inside the batch, before any node is moved.
    ///
    /// # Errors
    /// Same as [`add_node`](Self::add_node), for the first offending entry.
    pub fn add_nodes(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        let mut batch_labels = HashSet::new();
        for &child in children {
            self.check_node_insertion(parent, child)?;
            let label = self.node_ref(child)?.label().to_owned();
            if !batch_labels.insert(label.clone()) {
                return Err(FractalError::DuplicateLabel {
                    kind: ElementKind::Node,
                    label,
                    container: self.display_label(parent),
                });
            }
        }

        for &child in children {
            self.attach_node(parent, child)?;
        }
        Ok(())
    }

    /// Removes `child` from `parent`, together with every arc of `parent`
    /// that starts or ends at `child`. The node itself survives as a root and
    /// keeps its own subtree.
    ///
    /// # Errors
    /// `NotFound` if `parent` is unknown or `child` is not one of its direct
    /// children.
    pub fn delete_node(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_node_membership(parent, child)?;
        self.detach_node_from(parent, child)
    }

    /// Deletes several children at once; nothing is removed unless every entry
    /// is a direct child of `parent`.
    ///
    /// # Errors
    /// Same as [`delete_node`](Self::delete_node), for the first offending
    /// entry. A node listed twice is reported as `NotFound` for the second
    /// occurrence.
    pub fn delete_nodes(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        let mut seen = HashSet::new();
        for &child in children {
            self.check_node_membership(parent, child)?;
            if !seen.insert(child) {
                return Err(self.missing_child(parent, child));
            }
        }

        for &child in children {
            self.detach_node_from(parent, child)?;
        }
        Ok(())
    }

    /// Turns `child` back into a root, whatever its current container.
    /// Detaching a root is a no-op.
    ///
    /// # Errors
    /// `NotFound` if the node is unknown.
    pub fn detach_node(&mut self, child: NodeId) -> Result<()> {
        match self.node_ref(child)?.parent() {
            Some(parent) => self.detach_node_from(parent, child),
            None => Ok(()),
        }
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn check_node_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_data = self.node_ref(parent)?;
        let child_data = self.node_ref(child)?;

        if parent_data.child_by_label(child_data.label()).is_some() {
            return Err(FractalError::DuplicateLabel {
                kind: ElementKind::Node,
                label: child_data.label().to_owned(),
                container: parent_data.label().to_owned(),
            });
        }

        if self.is_ancestor_or_self(child, parent) {
            return Err(FractalError::invalid_argument(format!(
                "cannot add '{}' beneath itself (via '{}')",
                child_data.label(),
                parent_data.label()
            )));
        }
        Ok(())
    }

    fn check_node_membership(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node_ref(parent)?;
        match self.nodes.get(&child) {
            Some(data) if data.parent() == Some(parent) => Ok(()),
            _ => Err(self.missing_child(parent, child)),
        }
    }

    fn missing_child(&self, parent: NodeId, child: NodeId) -> FractalError {
        FractalError::NotFound {
            kind: ElementKind::Node,
            label: self.display_label(child),
            container: self.display_label(parent),
        }
    }

    /// Moves a validated `child` under `parent`.
    fn attach_node(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if let Some(previous) = self.node_ref(child)?.parent() {
            self.detach_node_from(previous, child)?;
        }

        let child_data = self.node_mut(child)?;
        child_data.core.set_parent(parent);
        let label = child_data.label().to_owned();
        debug!(node = %child, %label, parent = %parent, "attached node");
        self.node_mut(parent)?.push_child(label, child);
        Ok(())
    }

    /// Cascading removal of a known child: incident arcs go first so that the
    /// neighbor sets of the opposite endpoints are repaired.
    fn detach_node_from(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let incident: Vec<ArcId> = self
            .node_ref(parent)?
            .arcs()
            .iter()
            .copied()
            .filter(|id| self.arcs.get(id).is_some_and(|arc| arc.touches(child)))
            .collect();
        for arc in &incident {
            self.detach_arc_from(parent, *arc)?;
        }

        let child_data = self.node_mut(child)?;
        child_data.core.clear_parent();
        let label = child_data.label().to_owned();
        self.node_mut(parent)?.remove_child(&label, child);
        debug!(
            node = %child,
            %label,
            parent = %parent,
            cascaded_arcs = incident.len(),
            "detached node"
        );
        Ok(())
    }
}
