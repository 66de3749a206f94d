//! Ready-made graphs for the command line and for tests.
//!
//! These builders only use the public mutation API; they sit outside the
//! container logic.

mod demo;
mod random_graph;

pub use demo::*;
pub use random_graph::*;
