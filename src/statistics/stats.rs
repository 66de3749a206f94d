use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    closure_calls: usize,
    nodes_expanded: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            closure_calls: 0,
            nodes_expanded: 0,
        }
    }

    /// Record into the statistics object that a new closure has been computed
    pub fn bump_closure_calls(&mut self) {
        self.closure_calls += 1
    }

    /// Record into the statistics object that a bunch of nodes had their neighbor sets
    /// walked during a closure
    pub fn bump_expansions(&mut self, node_amount: usize) {
        self.nodes_expanded += node_amount
    }

    pub fn get_closure_calls(&self) -> usize {
        self.closure_calls
    }

    pub fn get_nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Combine two collectors, e.g. one per query batch.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            closure_calls: self.closure_calls + other.closure_calls,
            nodes_expanded: self.nodes_expanded + other.nodes_expanded,
        }
    }

    /// Write all contents of the stats object to the log.
    pub fn dump(&self) {
        info!(
            closure_calls = self.closure_calls,
            nodes_expanded = self.nodes_expanded,
            "closure statistics"
        );
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}
