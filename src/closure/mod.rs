//! Depth-bounded neighbor discovery.
//!
//! The closure of a node at depth `k` is every node reachable by following
//! between 1 and `k` consecutive arcs in one direction. It is computed level
//! by level over the derived neighbor sets, expanding each node at most once.

mod direction;
mod neighbor_closure;

pub use direction::*;
