use std::{fmt, str::FromStr};

use crate::{error::FractalError, graph::NeighborSet, graph::NodeData};

/// Which arcs a closure follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Against the arcs: predecessors.
    Incoming,
    /// Along the arcs: successors.
    Outgoing,
    /// Union of the incoming and outgoing closures, each walked on its own.
    Both,
}

impl Direction {
    /// The single-step neighbor set of `node` for a one-way direction.
    /// `Both` has no single set and yields `None`.
    pub(crate) fn step(self, node: &NodeData) -> Option<&NeighborSet> {
        match self {
            Direction::Incoming => Some(node.in_neighbors()),
            Direction::Outgoing => Some(node.out_neighbors()),
            Direction::Both => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => write!(f, "in"),
            Direction::Outgoing => write!(f, "out"),
            Direction::Both => write!(f, "all"),
        }
    }
}

impl FromStr for Direction {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Direction::Incoming),
            "out" => Ok(Direction::Outgoing),
            "all" | "both" => Ok(Direction::Both),
            _ => Err(FractalError::invalid_argument(format!(
                "unknown direction '{s}' (expected in, out or all)"
            ))),
        }
    }
}
