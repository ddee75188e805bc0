//! Behavioral classification of a dialogue node.
//!
//! A node's kind is the product of three closed axes. Position comes from the
//! node's degree and is never stored. Ordering only exists for positions that
//! have outgoing arcs, so `Exit` and `Isolated` carry no [`Order`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether evaluation continues on its own or waits for the next input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
  #[default]
  Processing,
  Input,
}

/// How outgoing arcs are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
  /// Descending priority, deterministic.
  #[default]
  Ordered,
  /// Weighted random permutation.
  Random,
}

/// Position of a node in its network, derived from in/out degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
  Isolated,
  Enter(Order),
  Exit,
  Inner(Order),
}

/// Full node kind: position (with ordering where it applies) and interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKind {
  pub position: Position,
  pub interaction: Interaction,
}

impl NodeKind {
  /// Derives the kind of a node with the given degrees and stored attributes.
  pub fn derive(incoming: usize, outgoing: usize, interaction: Interaction, order: Order) -> Self {
    let position = match (incoming, outgoing) {
      (0, 0) => Position::Isolated,
      (0, _) => Position::Enter(order),
      (_, 0) => Position::Exit,
      (_, _) => Position::Inner(order),
    };
    Self { position, interaction }
  }

  pub fn order(&self) -> Option<Order> {
    match self.position {
      Position::Enter(order) | Position::Inner(order) => Some(order),
      Position::Isolated | Position::Exit => None,
    }
  }

  pub fn is_enter(&self) -> bool {
    matches!(self.position, Position::Enter(_))
  }
}

impl fmt::Display for Interaction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Interaction::Processing => write!(f, "processing"),
      Interaction::Input => write!(f, "input"),
    }
  }
}

impl fmt::Display for Order {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Order::Ordered => write!(f, "ordered"),
      Order::Random => write!(f, "random"),
    }
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.position {
      Position::Isolated => write!(f, "isolated/{}", self.interaction),
      Position::Enter(order) => write!(f, "enter/{}/{}", order, self.interaction),
      Position::Exit => write!(f, "exit/{}", self.interaction),
      Position::Inner(order) => write!(f, "inner/{}/{}", order, self.interaction),
    }
  }
}

impl FromStr for Interaction {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "processing" => Ok(Interaction::Processing),
      "input" => Ok(Interaction::Input),
      other => Err(format!("unknown interaction '{other}'")),
    }
  }
}

impl FromStr for Order {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "ordered" => Ok(Order::Ordered),
      "random" => Ok(Order::Random),
      other => Err(format!("unknown order '{other}'")),
    }
  }
}
