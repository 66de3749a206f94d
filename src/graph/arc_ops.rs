use hashbrown::HashSet;
use tracing::debug;

use crate::{
    element::{ArcId, Element, NodeId},
    error::{ElementKind, Endpoint, FractalError, Result},
    graph::FractalGraph,
};

impl<T> FractalGraph<T> {
    /// Adds `arc` to the arcs of `parent` and registers the neighbor relation
    /// it induces between its endpoints.
    ///
    /// An arc that already belongs to another container is moved, after the
    /// destination has been validated. Adding a second arc between the same
    /// ordered pair is accepted; the neighbor sets stay unchanged since they
    /// record reachability, not multiplicity.
    ///
    /// # Errors
    /// - `NotFound` if either handle is unknown.
    /// - `DanglingReference` if the source (checked first) or the target is
    ///   not a direct child of `parent`.
    /// - `DuplicateLabel` if `parent` already has an arc with the same label.
    pub fn add_arc(&mut self, parent: NodeId, arc: ArcId) -> Result<()> {
        self.check_arc_insertion(parent, arc)?;
        self.attach_arc(parent, arc)
    }

    /// Adds several arcs at once. Nothing is attached unless the whole batch,
    /// including label clashes inside it, passes validation.
    ///
    /// # Errors
    /// Same as [`add_arc`](Self::add_arc), for the first offending entry.
    pub fn add_arcs(&mut self, parent: NodeId, arcs: &[ArcId]) -> Result<()> {
        let mut batch_labels = HashSet::new();
        for &arc in arcs {
            self.check_arc_insertion(parent, arc)?;
            let label = self.arc_ref(arc)?.label().to_owned();
            if !batch_labels.insert(label.clone()) {
                return Err(FractalError::DuplicateLabel {
                    kind: ElementKind::Arc,
                    label,
                    container: self.display_label(parent),
                });
            }
        }

        for &arc in arcs {
            self.attach_arc(parent, arc)?;
        }
        Ok(())
    }

    /// Removes `arc` from `parent`. The endpoints stop being neighbors unless
    /// another arc of `parent` still joins them in the same direction.
    ///
    /// # Errors
    /// `NotFound` if `parent` is unknown or does not own `arc`.
    pub fn delete_arc(&mut self, parent: NodeId, arc: ArcId) -> Result<()> {
        self.check_arc_membership(parent, arc)?;
        self.detach_arc_from(parent, arc)
    }

    /// Deletes several arcs at once; nothing is removed unless every entry
    /// belongs to `parent`.
    ///
    /// # Errors
    /// Same as [`delete_arc`](Self::delete_arc), for the first offending
    /// entry.
    pub fn delete_arcs(&mut self, parent: NodeId, arcs: &[ArcId]) -> Result<()> {
        let mut seen = HashSet::new();
        for &arc in arcs {
            self.check_arc_membership(parent, arc)?;
            if !seen.insert(arc) {
                return Err(self.missing_arc(parent, arc));
            }
        }

        for &arc in arcs {
            self.detach_arc_from(parent, arc)?;
        }
        Ok(())
    }

    /// Removes `arc` from whatever container owns it, leaving it parentless
    /// so it can be added elsewhere or discarded. No-op on a detached arc.
    ///
    /// # Errors
    /// `NotFound` if the arc is unknown.
    pub fn detach_arc(&mut self, arc: ArcId) -> Result<()> {
        match self.arc_ref(arc)?.parent() {
            Some(parent) => self.detach_arc_from(parent, arc),
            None => Ok(()),
        }
    }

    /// Replaces the weight of an arc. Allowed whether or not it is attached.
    ///
    /// # Errors
    /// `NotFound` if the arc is unknown.
    pub fn set_arc_value(&mut self, arc: ArcId, value: T) -> Result<()> {
        self.arc_mut(arc)?.value = value;
        Ok(())
    }

    /// Points an arc at new endpoints.
    ///
    /// A detached arc accepts any known nodes. An attached arc requires both
    /// endpoints to be children of its container, and the neighbor sets are
    /// repaired in the same step.
    ///
    /// # Errors
    /// `NotFound` for unknown handles, `DanglingReference` if the arc is
    /// attached and an endpoint is not a sibling.
    pub fn set_arc_endpoints(&mut self, arc: ArcId, source: NodeId, target: NodeId) -> Result<()> {
        self.node_ref(source)?;
        self.node_ref(target)?;
        let data = self.arc_ref(arc)?;
        let (old_source, old_target) = (data.source, data.target);

        let Some(parent) = data.parent() else {
            let data = self.arc_mut(arc)?;
            data.source = source;
            data.target = target;
            return Ok(());
        };

        self.check_endpoint(parent, arc, Endpoint::Source, source)?;
        self.check_endpoint(parent, arc, Endpoint::Target, target)?;

        let data = self.arc_mut(arc)?;
        data.source = source;
        data.target = target;

        if !self.pair_linked(parent, old_source, old_target) {
            self.unlink(old_source, old_target)?;
        }
        self.link(source, target)?;
        debug!(%arc, %source, %target, "retargeted arc");
        Ok(())
    }

    fn check_arc_insertion(&self, parent: NodeId, arc: ArcId) -> Result<()> {
        let parent_data = self.node_ref(parent)?;
        let arc_data = self.arc_ref(arc)?;

        self.check_endpoint(parent, arc, Endpoint::Source, arc_data.source)?;
        self.check_endpoint(parent, arc, Endpoint::Target, arc_data.target)?;

        if parent_data.arc_by_label(arc_data.label()).is_some() {
            return Err(FractalError::DuplicateLabel {
                kind: ElementKind::Arc,
                label: arc_data.label().to_owned(),
                container: parent_data.label().to_owned(),
            });
        }
        Ok(())
    }

    fn check_endpoint(
        &self,
        parent: NodeId,
        arc: ArcId,
        endpoint: Endpoint,
        node: NodeId,
    ) -> Result<()> {
        if self.parent(node) == Some(parent) {
            return Ok(());
        }
        Err(FractalError::DanglingReference {
            arc: self
                .arcs
                .get(&arc)
                .map(|a| a.label().to_owned())
                .unwrap_or_else(|| arc.to_string()),
            endpoint,
            label: self.display_label(node),
            container: self.display_label(parent),
        })
    }

    fn check_arc_membership(&self, parent: NodeId, arc: ArcId) -> Result<()> {
        self.node_ref(parent)?;
        match self.arcs.get(&arc) {
            Some(data) if data.parent() == Some(parent) => Ok(()),
            _ => Err(self.missing_arc(parent, arc)),
        }
    }

    fn missing_arc(&self, parent: NodeId, arc: ArcId) -> FractalError {
        FractalError::NotFound {
            kind: ElementKind::Arc,
            label: self
                .arcs
                .get(&arc)
                .map(|a| a.label().to_owned())
                .unwrap_or_else(|| arc.to_string()),
            container: self.display_label(parent),
        }
    }

    /// Moves a validated `arc` under `parent` and registers its endpoints.
    fn attach_arc(&mut self, parent: NodeId, arc: ArcId) -> Result<()> {
        if let Some(previous) = self.arc_ref(arc)?.parent() {
            self.detach_arc_from(previous, arc)?;
        }

        let data = self.arc_mut(arc)?;
        data.core.set_parent(parent);
        let (label, source, target) = (data.label().to_owned(), data.source, data.target);

        self.link(source, target)?;
        debug!(%arc, %label, %parent, %source, %target, "attached arc");
        self.node_mut(parent)?.push_arc(label, arc);
        Ok(())
    }

    /// Removes a known arc from `parent` and repairs the neighbor sets.
    pub(crate) fn detach_arc_from(&mut self, parent: NodeId, arc: ArcId) -> Result<()> {
        let data = self.arc_mut(arc)?;
        data.core.clear_parent();
        let (label, source, target) = (data.label().to_owned(), data.source, data.target);

        self.node_mut(parent)?.remove_arc(&label, arc);
        if !self.pair_linked(parent, source, target) {
            self.unlink(source, target)?;
        }
        debug!(%arc, %label, %parent, "detached arc");
        Ok(())
    }

    /// Whether some arc of `parent` still runs from `source` to `target`.
    fn pair_linked(&self, parent: NodeId, source: NodeId, target: NodeId) -> bool {
        self.nodes.get(&parent).is_some_and(|data| {
            data.arcs().iter().any(|id| {
                self.arcs
                    .get(id)
                    .is_some_and(|arc| arc.connects(source, target))
            })
        })
    }

    fn link(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        self.node_mut(source)?.out_neighbors_mut().insert(target);
        self.node_mut(target)?.in_neighbors_mut().insert(source);
        Ok(())
    }

    fn unlink(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        self.node_mut(source)?.out_neighbors_mut().remove(&target);
        self.node_mut(target)?.in_neighbors_mut().remove(&source);
        Ok(())
    }
}
