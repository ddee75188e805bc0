//! Fixed rule libraries appended to every compiled system.
//!
//! [`recursion`] splices the pseudo-stack back together when a network is
//! done; [`randomize`] orders the arcs of random nodes.

pub mod randomize;
pub mod recursion;
