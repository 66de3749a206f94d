//! Identity and containment attributes shared by nodes and arcs.
//!
//! Every element is addressed by a stable handle ([`NodeId`] or [`ArcId`])
//! handed out by the arena. The label is a display attribute that must be
//! unique among siblings, and the parent link is a non-owning back-reference.

mod element_core;
mod ids;

pub use element_core::*;
pub use ids::*;
