//! Hierarchical, self-similar graphs: every node is itself a graph whose
//! children are joined by directed, weighted arcs.
//!
//! Start from a [`graph::FractalGraph`], create nodes and arcs, assemble them
//! with `add_node`/`add_arc`, query depth-bounded neighborhoods and export the
//! result as DOT or JSON.

pub mod closure;
pub mod element;
pub mod error;
pub mod export;
pub mod generate;
pub mod graph;
pub mod statistics;

pub use error::{FractalError, Result};
