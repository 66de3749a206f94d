use tracing::trace;

use crate::{
    closure::Direction,
    element::NodeId,
    error::{FractalError, Result},
    graph::{FractalGraph, NeighborSet},
    statistics::Stats,
};

impl<T> FractalGraph<T> {
    /// Nodes reachable from `node` over 1 to `depth` outgoing arcs.
    ///
    /// # Errors
    /// `InvalidArgument` if `depth <= 0`, `NotFound` for an unknown node.
    pub fn out_neighbors(&self, node: NodeId, depth: i64) -> Result<NeighborSet> {
        self.neighbor_closure(node, depth, Direction::Outgoing, &mut Stats::new())
    }

    /// Nodes reachable from `node` over 1 to `depth` incoming arcs.
    ///
    /// # Errors
    /// `InvalidArgument` if `depth <= 0`, `NotFound` for an unknown node.
    pub fn in_neighbors(&self, node: NodeId, depth: i64) -> Result<NeighborSet> {
        self.neighbor_closure(node, depth, Direction::Incoming, &mut Stats::new())
    }

    /// Union of [`out_neighbors`](Self::out_neighbors) and
    /// [`in_neighbors`](Self::in_neighbors) at the same depth.
    ///
    /// # Errors
    /// `InvalidArgument` if `depth <= 0`, `NotFound` for an unknown node.
    pub fn all_neighbors(&self, node: NodeId, depth: i64) -> Result<NeighborSet> {
        self.neighbor_closure(node, depth, Direction::Both, &mut Stats::new())
    }

    /// Computes the depth-bounded closure of `node` in `direction`, recording
    /// the work done into `stats`.
    ///
    /// At depth 1 this is the node's direct neighbor set. At depth `k` it is
    /// the union, over every node reached within `k - 1` hops, of that node's
    /// direct neighbors. The origin only appears in the result when a cycle of
    /// length at most `depth` leads back to it.
    ///
    /// Only siblings are ever reached: arcs never cross container boundaries.
    ///
    /// # Errors
    /// `InvalidArgument` if `depth <= 0`, `NotFound` for an unknown node.
    pub fn neighbor_closure(
        &self,
        node: NodeId,
        depth: i64,
        direction: Direction,
        stats: &mut Stats,
    ) -> Result<NeighborSet> {
        if depth <= 0 {
            return Err(FractalError::invalid_argument(format!(
                "closure depth must be positive, got {depth}"
            )));
        }
        let origin = self.node_ref(node)?;
        stats.bump_closure_calls();

        let reached = match direction.step(origin) {
            Some(direct) => self.expand(direct, depth, direction, stats),
            None => {
                let mut reached =
                    self.expand(origin.out_neighbors(), depth, Direction::Outgoing, stats);
                reached.extend(self.expand(
                    origin.in_neighbors(),
                    depth,
                    Direction::Incoming,
                    stats,
                ));
                reached
            }
        };
        trace!(%node, depth, %direction, reached = reached.len(), "computed closure");
        Ok(reached)
    }

    /// Level-by-level expansion starting from the hop-1 set `direct`.
    fn expand(
        &self,
        direct: &NeighborSet,
        depth: i64,
        direction: Direction,
        stats: &mut Stats,
    ) -> NeighborSet {
        let mut reached = direct.clone();
        let mut frontier: Vec<NodeId> = direct.iter().copied().collect();

        for hop in 2..=depth {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for id in frontier {
                let Some(step) = self.nodes.get(&id).and_then(|data| direction.step(data)) else {
                    continue;
                };
                stats.bump_expansions(1);
                next.extend(step.iter().copied().filter(|&n| reached.insert(n)));
            }
            trace!(hop, frontier = next.len(), "expanded closure level");
            frontier = next;
        }
        reached
    }
}
