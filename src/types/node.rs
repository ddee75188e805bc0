//! A node in a dialogue network.

use serde::{Deserialize, Serialize};

use super::{Interaction, Order};

/// A node in a dialogue network. Its [`NodeKind`](super::NodeKind) is derived
/// by the owning [`Network`](super::Network) from the current arcs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
  pub name: String,
  /// Editor placement only.
  pub x: u32,
  pub y: u32,
  pub interaction: Interaction,
  /// Used whenever the node has outgoing arcs.
  pub order: Order,
}

impl Node {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      x: 0,
      y: 0,
      interaction: Interaction::default(),
      order: Order::default(),
    }
  }

  pub fn at(mut self, x: u32, y: u32) -> Self {
    self.x = x;
    self.y = y;
    self
  }

  pub fn with_interaction(mut self, interaction: Interaction) -> Self {
    self.interaction = interaction;
    self
  }

  pub fn with_order(mut self, order: Order) -> Self {
    self.order = order;
    self
  }
}
