//! Dispatch: pushes the outgoing arcs onto the pseudo-stack.

use std::cmp::Reverse;

use tracing::instrument;

use crate::markers::Markers;
use crate::rules::syntax;
use crate::rules::{Element, Template};
use crate::types::{DialogueArc, NodeKind, Order, Position};

/// Ordered nodes push their arcs by descending priority so the highest is
/// tried first. Random nodes push a weighted random permutation of them.
#[instrument(level = "trace", skip(outgoing, markers), fields(arcs = outgoing.len()))]
pub fn dispatch(kind: NodeKind, outgoing: &[&DialogueArc], markers: &Markers) -> Template {
  let order = match kind.position {
    Position::Isolated | Position::Exit => return Vec::new(),
    Position::Enter(order) | Position::Inner(order) => order,
  };
  if outgoing.is_empty() {
    return Vec::new();
  }
  let head = match order {
    Order::Ordered => {
      let names: Vec<&str> = by_priority(outgoing).iter().map(|a| a.name.as_str()).collect();
      Element::text(syntax::join(names))
    }
    Order::Random => {
      let request = syntax::join(std::iter::once(markers.randomize.as_str()).chain(candidates(outgoing)));
      Element::srai(vec![Element::text(request)])
    }
  };
  vec![Element::set_topic(vec![
    head,
    Element::text(syntax::WORD_DELIMITER),
    Element::get_topic(),
  ])]
}

/// Arcs by descending priority; equal priorities keep their order.
pub fn by_priority<'a>(arcs: &[&'a DialogueArc]) -> Vec<&'a DialogueArc> {
  let mut sorted = arcs.to_vec();
  sorted.sort_by_key(|a| Reverse(a.priority));
  sorted
}

/// Arc names repeated by weight, in arc order.
pub fn candidates<'a>(arcs: &[&'a DialogueArc]) -> impl Iterator<Item = &'a str> {
  arcs
    .to_vec()
    .into_iter()
    .flat_map(|a| std::iter::repeat_n(a.name.as_str(), a.weight() as usize))
}
