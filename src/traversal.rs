//! Depth-first traversal with edge classification.
//!
//! One [`Traversal`] walks a [`System`] (or a single [`Network`]) once. Every
//! node moves FRESH -> OPEN on discovery and OPEN -> CLOSED on finish; both
//! events draw from one shared clock. Each outgoing arc of an open node is
//! examined and classified as exactly one of tree, back, forward or cross.
//! Only tree arcs descend further.
//!
//! Observers are told about every event in registration order. The first
//! observer error aborts the walk.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::types::{DialogueArc, Network, Node, System};

/// Walk state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeState {
  Fresh,
  Open,
  Closed,
}

/// Classification of an examined arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClass {
  /// Target was fresh; the walk descends through it.
  Tree,
  /// Target is an open ancestor: a cycle.
  Back,
  /// Target is a closed descendant reached another way.
  Forward,
  /// Target was closed before the source was discovered.
  Cross,
}

impl fmt::Display for EdgeClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      EdgeClass::Tree => "tree",
      EdgeClass::Back => "back",
      EdgeClass::Forward => "forward",
      EdgeClass::Cross => "cross",
    };
    f.write_str(s)
  }
}

/// Receives traversal events. Every method defaults to doing nothing.
pub trait DfsObserver {
  fn visit_system(&mut self, _system: &System) -> Result<()> {
    Ok(())
  }

  fn visit_network(&mut self, _network: &Network) -> Result<()> {
    Ok(())
  }

  fn discovery(&mut self, _network: &Network, _node: &Node) -> Result<()> {
    Ok(())
  }

  /// Called before the arc is classified.
  fn examination(&mut self, _network: &Network, _arc: &DialogueArc) -> Result<()> {
    Ok(())
  }

  fn tree(&mut self, _network: &Network, _arc: &DialogueArc) -> Result<()> {
    Ok(())
  }

  fn back(&mut self, _network: &Network, _arc: &DialogueArc) -> Result<()> {
    Ok(())
  }

  fn forward(&mut self, _network: &Network, _arc: &DialogueArc) -> Result<()> {
    Ok(())
  }

  fn cross(&mut self, _network: &Network, _arc: &DialogueArc) -> Result<()> {
    Ok(())
  }

  fn finish(&mut self, _network: &Network, _node: &Node) -> Result<()> {
    Ok(())
  }
}

/// Records the class of every examined arc, in examination order.
#[derive(Debug, Clone, Default)]
pub struct EdgeLog {
  pub edges: Vec<(String, EdgeClass)>,
}

impl EdgeLog {
  pub fn class_of(&self, arc: &str) -> Option<EdgeClass> {
    self.edges.iter().find(|(name, _)| name == arc).map(|(_, c)| *c)
  }

  /// Arcs closing a cycle.
  pub fn back_edges(&self) -> impl Iterator<Item = &str> {
    self
      .edges
      .iter()
      .filter(|(_, c)| *c == EdgeClass::Back)
      .map(|(name, _)| name.as_str())
  }

  fn record(&mut self, arc: &DialogueArc, class: EdgeClass) -> Result<()> {
    self.edges.push((arc.name.clone(), class));
    Ok(())
  }
}

impl DfsObserver for EdgeLog {
  fn tree(&mut self, _network: &Network, arc: &DialogueArc) -> Result<()> {
    self.record(arc, EdgeClass::Tree)
  }

  fn back(&mut self, _network: &Network, arc: &DialogueArc) -> Result<()> {
    self.record(arc, EdgeClass::Back)
  }

  fn forward(&mut self, _network: &Network, arc: &DialogueArc) -> Result<()> {
    self.record(arc, EdgeClass::Forward)
  }

  fn cross(&mut self, _network: &Network, arc: &DialogueArc) -> Result<()> {
    self.record(arc, EdgeClass::Cross)
  }
}

struct Frame<'n> {
  node: &'n Node,
  arcs: Vec<&'n DialogueArc>,
  next: usize,
}

/// Single-use depth-first walker.
#[derive(Debug, Default)]
pub struct Traversal {
  states: HashMap<String, NodeState>,
  discovered: HashMap<String, u64>,
  finished: HashMap<String, u64>,
  clock: u64,
  walked: bool,
}

impl Traversal {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self, node: &str) -> NodeState {
    self.states.get(node).copied().unwrap_or(NodeState::Fresh)
  }

  /// True once `node` has been discovered.
  pub fn visited(&self, node: &str) -> bool {
    self.state(node) != NodeState::Fresh
  }

  pub fn discovery_time(&self, node: &str) -> Option<u64> {
    self.discovered.get(node).copied()
  }

  pub fn finish_time(&self, node: &str) -> Option<u64> {
    self.finished.get(node).copied()
  }

  /// Walks every network of `system` in order. Within a network each fresh
  /// node, in insertion order, roots a new depth-first tree.
  #[instrument(level = "trace", skip_all, fields(networks = system.networks().len()))]
  pub fn walk_system(&mut self, system: &System, observers: &mut [&mut dyn DfsObserver]) -> Result<()> {
    self.begin()?;
    for o in observers.iter_mut() {
      o.visit_system(system)?;
    }
    for network in system.networks() {
      self.walk(network, observers)?;
    }
    Ok(())
  }

  /// Walks a single network.
  #[instrument(level = "trace", skip_all, fields(network = network.name()))]
  pub fn walk_network(&mut self, network: &Network, observers: &mut [&mut dyn DfsObserver]) -> Result<()> {
    self.begin()?;
    self.walk(network, observers)
  }

  fn begin(&mut self) -> Result<()> {
    if self.walked {
      return Err(Error::AlreadyWalked);
    }
    self.walked = true;
    Ok(())
  }

  fn walk(&mut self, network: &Network, observers: &mut [&mut dyn DfsObserver]) -> Result<()> {
    for o in observers.iter_mut() {
      o.visit_network(network)?;
    }
    for root in network.nodes() {
      if self.state(&root.name) == NodeState::Fresh {
        self.walk_from(network, root, observers)?;
      }
    }
    Ok(())
  }

  fn walk_from<'n>(
    &mut self,
    network: &'n Network,
    root: &'n Node,
    observers: &mut [&mut dyn DfsObserver],
  ) -> Result<()> {
    self.discover(network, root, observers)?;
    let mut stack = vec![Frame { node: root, arcs: network.outgoing(&root.name), next: 0 }];

    while let Some(frame) = stack.last_mut() {
      let Some(&arc) = frame.arcs.get(frame.next) else {
        let node = frame.node;
        stack.pop();
        self.finish(network, node, observers)?;
        continue;
      };
      frame.next += 1;

      if self.examine(network, arc, observers)? == EdgeClass::Tree {
        let target = network
          .target(arc)
          .ok_or_else(|| Error::MissingTarget(arc.name.clone()))?;
        self.discover(network, target, observers)?;
        stack.push(Frame { node: target, arcs: network.outgoing(&target.name), next: 0 });
      }
    }
    Ok(())
  }

  fn tick(&mut self) -> u64 {
    self.clock += 1;
    self.clock
  }

  fn discover(&mut self, network: &Network, node: &Node, observers: &mut [&mut dyn DfsObserver]) -> Result<()> {
    let time = self.tick();
    self.states.insert(node.name.clone(), NodeState::Open);
    self.discovered.insert(node.name.clone(), time);
    debug!(node = %node.name, time, "discovered");
    for o in observers.iter_mut() {
      o.discovery(network, node)?;
    }
    Ok(())
  }

  fn finish(&mut self, network: &Network, node: &Node, observers: &mut [&mut dyn DfsObserver]) -> Result<()> {
    let time = self.tick();
    self.states.insert(node.name.clone(), NodeState::Closed);
    self.finished.insert(node.name.clone(), time);
    trace!(node = %node.name, time, "finished");
    for o in observers.iter_mut() {
      o.finish(network, node)?;
    }
    Ok(())
  }

  fn examine(&mut self, network: &Network, arc: &DialogueArc, observers: &mut [&mut dyn DfsObserver]) -> Result<EdgeClass> {
    if self.state(&arc.from) != NodeState::Open {
      return Err(Error::SourceNotOpen(arc.name.clone()));
    }
    for o in observers.iter_mut() {
      o.examination(network, arc)?;
    }
    if network.target(arc).is_none() {
      return Err(Error::MissingTarget(arc.name.clone()));
    }

    let class = match self.state(&arc.to) {
      NodeState::Fresh => EdgeClass::Tree,
      NodeState::Open => EdgeClass::Back,
      NodeState::Closed => self.closed_class(arc)?,
    };
    trace!(arc = %arc.name, %class, "classified");

    for o in observers.iter_mut() {
      match class {
        EdgeClass::Tree => o.tree(network, arc)?,
        EdgeClass::Back => o.back(network, arc)?,
        EdgeClass::Forward => o.forward(network, arc)?,
        EdgeClass::Cross => o.cross(network, arc)?,
      }
    }
    Ok(class)
  }

  /// Forward when the source was discovered before the target finished.
  fn closed_class(&self, arc: &DialogueArc) -> Result<EdgeClass> {
    let tie = || Error::TimestampTie(arc.name.clone());
    let discovered = self.discovery_time(&arc.from).ok_or_else(tie)?;
    let finished = self.finish_time(&arc.to).ok_or_else(tie)?;
    match discovered.cmp(&finished) {
      std::cmp::Ordering::Less => Ok(EdgeClass::Forward),
      std::cmp::Ordering::Greater => Ok(EdgeClass::Cross),
      std::cmp::Ordering::Equal => Err(tie()),
    }
  }
}
