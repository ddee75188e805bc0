//! Tests for `Network` adjacency queries.

use super::{ArcKind, DialogueArc, Network, NetworkId, Node, Order, Position};

fn diamond() -> Network {
  let mut net = Network::new(NetworkId::fresh(), "diamond");
  for name in ["a", "b", "c", "d"] {
    net.push_node(Node::new(name));
  }
  net.push_arc(DialogueArc::new("ab", "a", "b", ArcKind::Transition));
  net.push_arc(DialogueArc::new("ad", "a", "d", ArcKind::Transition).with_priority(2));
  net.push_arc(DialogueArc::new("bc", "b", "c", ArcKind::Transition));
  net.push_arc(DialogueArc::new("dc", "d", "c", ArcKind::Transition));
  net
}

#[test]
fn adjacency_keeps_insertion_order() {
  let net = diamond();
  let out: Vec<&str> = net.outgoing("a").iter().map(|a| a.name.as_str()).collect();
  assert_eq!(out, vec!["ab", "ad"]);
  let inc: Vec<&str> = net.incoming("c").iter().map(|a| a.name.as_str()).collect();
  assert_eq!(inc, vec!["bc", "dc"]);
}

#[test]
fn arc_ends_resolve_to_nodes() {
  let net = diamond();
  let arc = net.arc("dc").unwrap();
  assert_eq!(net.source(arc).unwrap().name, "d");
  assert_eq!(net.target(arc).unwrap().name, "c");
}

#[test]
fn kinds_and_enter_nodes() {
  let mut net = diamond();
  net.node_mut("a").unwrap().order = Order::Random;
  assert_eq!(net.kind("a").unwrap().position, Position::Enter(Order::Random));
  assert_eq!(net.kind("c").unwrap().position, Position::Exit);
  let enters: Vec<&str> = net.enter_nodes().map(|n| n.name.as_str()).collect();
  assert_eq!(enters, vec!["a"]);
  assert_eq!(net.max_branching(), 2);
}

#[test]
fn take_removes_entries() {
  let mut net = diamond();
  assert!(net.take_arc("ab").is_some());
  assert!(net.take_arc("ab").is_none());
  assert_eq!(net.kind("b").unwrap().position, Position::Enter(Order::Ordered));
  assert_eq!(net.take_node("b").unwrap().name, "b");
  assert!(net.node("b").is_none());
}
