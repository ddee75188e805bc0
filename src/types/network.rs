//! A named subgraph of the dialogue system.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DialogueArc, Node, NodeKind};

/// Unique network identifier, assigned by the owning [`System`](super::System).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(Uuid);

impl NetworkId {
  pub(crate) fn fresh() -> Self {
    NetworkId(Uuid::new_v4())
  }
}

impl fmt::Display for NetworkId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A named subgraph holding nodes and the arcs between them.
///
/// Every arc connects two nodes of this network. Nodes and arcs keep their
/// insertion order, which fixes the order of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
  id: NetworkId,
  name: String,
  nodes: Vec<Node>,
  arcs: Vec<DialogueArc>,
}

impl Network {
  pub(crate) fn new(id: NetworkId, name: impl Into<String>) -> Self {
    Self { id, name: name.into(), nodes: Vec::new(), arcs: Vec::new() }
  }

  pub fn id(&self) -> NetworkId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  pub fn arcs(&self) -> &[DialogueArc] {
    &self.arcs
  }

  pub fn node(&self, name: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.name == name)
  }

  pub fn arc(&self, name: &str) -> Option<&DialogueArc> {
    self.arcs.iter().find(|a| a.name == name)
  }

  pub fn outgoing(&self, node: &str) -> Vec<&DialogueArc> {
    self.arcs.iter().filter(|a| a.from == node).collect()
  }

  pub fn incoming(&self, node: &str) -> Vec<&DialogueArc> {
    self.arcs.iter().filter(|a| a.to == node).collect()
  }

  /// Node at the tail of `arc`.
  pub fn source(&self, arc: &DialogueArc) -> Option<&Node> {
    self.node(&arc.from)
  }

  /// Node at the head of `arc`.
  pub fn target(&self, arc: &DialogueArc) -> Option<&Node> {
    self.node(&arc.to)
  }

  /// Current kind of `node`, derived from its degree in this network.
  pub fn kind_of(&self, node: &Node) -> NodeKind {
    let incoming = self.arcs.iter().filter(|a| a.to == node.name).count();
    let outgoing = self.arcs.iter().filter(|a| a.from == node.name).count();
    NodeKind::derive(incoming, outgoing, node.interaction, node.order)
  }

  pub fn kind(&self, name: &str) -> Option<NodeKind> {
    self.node(name).map(|n| self.kind_of(n))
  }

  pub fn enter_nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.iter().filter(|n| self.kind_of(n).is_enter())
  }

  /// Largest out-degree of any node.
  pub fn max_branching(&self) -> usize {
    self.nodes.iter().map(|n| self.outgoing(&n.name).len()).max().unwrap_or(0)
  }

  pub(crate) fn push_node(&mut self, node: Node) {
    self.nodes.push(node);
  }

  pub(crate) fn push_arc(&mut self, arc: DialogueArc) {
    self.arcs.push(arc);
  }

  pub(crate) fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
    self.nodes.iter_mut().find(|n| n.name == name)
  }

  pub(crate) fn take_node(&mut self, name: &str) -> Option<Node> {
    let idx = self.nodes.iter().position(|n| n.name == name)?;
    Some(self.nodes.remove(idx))
  }

  pub(crate) fn take_arc(&mut self, name: &str) -> Option<DialogueArc> {
    let idx = self.arcs.iter().position(|a| a.name == name)?;
    Some(self.arcs.remove(idx))
  }
}
