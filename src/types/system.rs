//! Root container of all dialogue networks.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::{
  DialogueArc, Interaction, Network, NetworkId, Node, NodeKind, Order, Update, UpdateBuilder,
};
use crate::error::{Error, Result};
use crate::naming::NamingAuthority;

/// Root container: owns the networks, resolves nodes and arcs by their
/// globally unique names, and knows which enter nodes can be called as
/// subroutines.
///
/// Every structural edit is applied to a copy, completed with the side
/// effects it causes (kind switches, cascading invalidation of recurrent
/// arcs) and committed in one step. The returned [`Update`] lists those side
/// effects.
#[derive(Debug, Clone, Default)]
pub struct System {
  names: NamingAuthority,
  networks: Vec<Network>,
}

impl System {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn names(&self) -> &NamingAuthority {
    &self.names
  }

  pub fn networks(&self) -> &[Network] {
    &self.networks
  }

  pub fn network(&self, id: NetworkId) -> Option<&Network> {
    self.networks.iter().find(|n| n.id() == id)
  }

  pub fn network_named(&self, name: &str) -> Option<&Network> {
    self.networks.iter().find(|n| n.name() == name)
  }

  pub fn locate_node(&self, name: &str) -> Option<(&Network, &Node)> {
    self
      .networks
      .iter()
      .find_map(|net| net.node(name).map(|node| (net, node)))
  }

  pub fn locate_arc(&self, name: &str) -> Option<(&Network, &DialogueArc)> {
    self
      .networks
      .iter()
      .find_map(|net| net.arc(name).map(|arc| (net, arc)))
  }

  pub fn kind(&self, node: &str) -> Option<NodeKind> {
    self.locate_node(node).map(|(net, n)| net.kind_of(n))
  }

  /// Enter nodes available as subroutine entry points, in network order.
  pub fn enter_nodes(&self) -> Vec<(&Network, &Node)> {
    self
      .networks
      .iter()
      .flat_map(|net| net.enter_nodes().map(move |node| (net, node)))
      .collect()
  }

  pub fn is_enter_node(&self, name: &str) -> bool {
    self.kind(name).is_some_and(|k| k.is_enter())
  }

  /// Largest random weight of any arc (at least 1 when arcs exist).
  pub fn max_weight(&self) -> u32 {
    self
      .networks
      .iter()
      .flat_map(|net| net.arcs().iter().map(DialogueArc::weight))
      .max()
      .unwrap_or(0)
  }

  pub fn max_branching(&self) -> usize {
    self.networks.iter().map(Network::max_branching).max().unwrap_or(0)
  }

  #[instrument(level = "trace", skip(self))]
  pub fn add_network(&mut self, name: &str) -> Result<NetworkId> {
    self.names.reserve(name)?;
    let id = NetworkId::fresh();
    self.networks.push(Network::new(id, name));
    debug!(network = name, %id, "network added");
    Ok(id)
  }

  #[instrument(level = "trace", skip(self, node), fields(node = %node.name))]
  pub fn add_node(&mut self, network: NetworkId, node: Node) -> Result<Update> {
    let idx = self.network_index(network)?;
    self.edit(|sys, update| {
      sys.names.reserve(&node.name)?;
      sys.networks[idx].push_node(node);
      Ok(update)
    })
  }

  #[instrument(level = "trace", skip(self, arc), fields(arc = %arc.name))]
  pub fn add_arc(&mut self, network: NetworkId, arc: DialogueArc) -> Result<Update> {
    let idx = self.network_index(network)?;
    let net = &self.networks[idx];
    for end in [&arc.from, &arc.to] {
      if net.node(end).is_none() {
        return Err(if self.locate_node(end).is_some() {
          Error::CrossNetworkArc { arc: arc.name.clone(), network: net.name().to_string() }
        } else {
          Error::UnknownNode(end.clone())
        });
      }
    }
    if let Some(callee) = arc.callee()
      && !self.is_enter_node(callee)
    {
      return Err(Error::NotAnEnterNode { arc: arc.name.clone(), callee: callee.to_string() });
    }
    self.edit(|sys, update| {
      sys.names.reserve(&arc.name)?;
      sys.networks[idx].push_arc(arc);
      Ok(update)
    })
  }

  #[instrument(level = "trace", skip(self))]
  pub fn remove_arc(&mut self, name: &str) -> Result<Update> {
    let idx = self.arc_network_index(name)?;
    self.edit(|sys, update| {
      sys.networks[idx].take_arc(name);
      sys.names.release(name);
      Ok(update)
    })
  }

  /// Removes a node together with every arc touching it.
  #[instrument(level = "trace", skip(self))]
  pub fn remove_node(&mut self, name: &str) -> Result<Update> {
    let idx = self.node_network_index(name)?;
    self.edit(|sys, mut update| {
      let net = &mut sys.networks[idx];
      let incident: Vec<String> = net
        .arcs()
        .iter()
        .filter(|a| a.from == name || a.to == name)
        .map(|a| a.name.clone())
        .collect();
      for arc in incident {
        net.take_arc(&arc);
        sys.names.release(&arc);
        update = update.removed_arc(arc);
      }
      sys.networks[idx].take_node(name);
      sys.names.release(name);
      Ok(update)
    })
  }

  pub fn set_interaction(&mut self, node: &str, interaction: Interaction) -> Result<Update> {
    let idx = self.node_network_index(node)?;
    self.edit(|sys, update| {
      if let Some(n) = sys.networks[idx].node_mut(node) {
        n.interaction = interaction;
      }
      Ok(update)
    })
  }

  pub fn set_order(&mut self, node: &str, order: Order) -> Result<Update> {
    let idx = self.node_network_index(node)?;
    self.edit(|sys, update| {
      if let Some(n) = sys.networks[idx].node_mut(node) {
        n.order = order;
      }
      Ok(update)
    })
  }

  /// Moves a node; placement never affects behavior.
  pub fn move_node(&mut self, node: &str, x: u32, y: u32) -> Result<()> {
    let idx = self.node_network_index(node)?;
    if let Some(n) = self.networks[idx].node_mut(node) {
      n.x = x;
      n.y = y;
    }
    Ok(())
  }

  fn network_index(&self, id: NetworkId) -> Result<usize> {
    self
      .networks
      .iter()
      .position(|n| n.id() == id)
      .ok_or_else(|| Error::UnknownNetwork(id.to_string()))
  }

  fn node_network_index(&self, name: &str) -> Result<usize> {
    self
      .networks
      .iter()
      .position(|n| n.node(name).is_some())
      .ok_or_else(|| Error::UnknownNode(name.to_string()))
  }

  fn arc_network_index(&self, name: &str) -> Result<usize> {
    self
      .networks
      .iter()
      .position(|n| n.arc(name).is_some())
      .ok_or_else(|| Error::UnknownArc(name.to_string()))
  }

  fn kinds(&self) -> BTreeMap<String, NodeKind> {
    self
      .networks
      .iter()
      .flat_map(|net| net.nodes().iter().map(move |n| (n.name.clone(), net.kind_of(n))))
      .collect()
  }

  /// Recurrent arcs whose callee is not an enter node any more.
  fn stale_recurrent_arcs(&self) -> Vec<(usize, String)> {
    let mut stale = Vec::new();
    for (idx, net) in self.networks.iter().enumerate() {
      for arc in net.arcs() {
        if arc.callee().is_some_and(|callee| !self.is_enter_node(callee)) {
          stale.push((idx, arc.name.clone()));
        }
      }
    }
    stale
  }

  /// Applies `apply` to a copy, cascades the consequences and commits.
  fn edit<F>(&mut self, apply: F) -> Result<Update>
  where
    F: FnOnce(&mut System, UpdateBuilder) -> Result<UpdateBuilder>,
  {
    let before = self.kinds();
    let mut next = self.clone();
    let mut update = apply(&mut next, UpdateBuilder::new())?;

    // Dropping a recurrent arc can demote another enter node, so repeat.
    loop {
      let stale = next.stale_recurrent_arcs();
      if stale.is_empty() {
        break;
      }
      for (idx, arc) in stale {
        next.networks[idx].take_arc(&arc);
        next.names.release(&arc);
        debug!(arc = %arc, "recurrent arc invalidated");
        update = update.invalidated(arc);
      }
    }

    let after = next.kinds();
    for (node, to) in &after {
      if let Some(from) = before.get(node)
        && from != to
      {
        update = update.switched(node.clone(), *from, *to);
      }
      if to.is_enter() && !before.get(node).is_some_and(NodeKind::is_enter) {
        update = update.enter_added(node.clone());
      }
    }
    for (node, from) in &before {
      if from.is_enter() && !after.get(node).is_some_and(NodeKind::is_enter) {
        update = update.enter_removed(node.clone());
      }
    }

    *self = next;
    Ok(update.build())
  }
}
