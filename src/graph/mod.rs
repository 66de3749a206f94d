//! The recursive container hierarchy.
//!
//! A [`FractalGraph`] is an arena owning every node and arc. Each node is
//! itself a graph: it owns an ordered list of child nodes and of the arcs
//! running between those children, and keeps the in/out neighbor sets that
//! those arcs induce on its children.
//!
//! # Invariants
//! - Child labels are unique within a node, and so are arc labels.
//! - Both endpoints of an arc are direct children of the arc's parent.
//! - `target ∈ source.out_neighbors()` and `source ∈ target.in_neighbors()`
//!   iff at least one arc `source -> target` exists in their common parent.
//! - Every node and arc has at most one parent, and containment is a tree.

mod arc;
mod arc_ops;
mod fractal_graph;
mod node;
mod node_ops;

pub use arc::*;
pub use fractal_graph::*;
pub use node::*;
