//! Work counters for neighbor-closure queries.
//!
//! This module provides a small collector recording how many closures were
//! computed and how many nodes had to be expanded to answer them.

mod stats;
pub use stats::*;
