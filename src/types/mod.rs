//! Graph model: networks of dialogue nodes joined by typed arcs.
//!
//! A [`System`] owns every [`Network`]; all edits go through it so node
//! kinds, names and recurrent arcs stay consistent.

mod dialogue_arc;
mod network;
#[cfg(test)]
mod network_test;
mod node;
mod node_kind;
#[cfg(test)]
mod node_kind_test;
mod system;
mod update;
#[cfg(test)]
mod update_test;

pub use dialogue_arc::{ArcKind, DialogueArc};
pub use network::{Network, NetworkId};
pub use node::Node;
pub use node_kind::{Interaction, NodeKind, Order, Position};
pub use system::System;
pub use update::{KindSwitch, Update, UpdateBuilder};
