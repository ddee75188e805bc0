//! Continuation: how a node rewrites the pseudo-stack it was reached with.

use tracing::instrument;

use crate::markers::Markers;
use crate::rules::{Element, Template, spaced};
use crate::types::{NodeKind, Position};

/// The node's own name is the top word of the topic; the rest is captured
/// by the first topic wildcard.
///
/// - Inner: drop the node name.
/// - Exit: replace it with the pull marker so the library unwinds.
/// - Enter: replace it with the pull-stop marker, the network's boundary.
/// - Isolated: leave the stack alone.
#[instrument(level = "trace", skip(markers))]
pub fn continuation(kind: NodeKind, markers: &Markers) -> Template {
  let rest = Element::topic_star(1);
  match kind.position {
    Position::Inner(_) => vec![Element::set_topic(vec![rest])],
    Position::Exit => vec![Element::set_topic(spaced([Element::text(&markers.pull), rest]))],
    Position::Enter(_) => vec![Element::set_topic(spaced([Element::text(&markers.pull_stop), rest]))],
    Position::Isolated => Vec::new(),
  }
}
