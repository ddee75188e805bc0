//! Node-kind processors. Each is a pure function of a node's kind (and, for
//! dispatch, its outgoing arcs) returning one fragment of the node's template.
//!
//! A node template is always continuation, then dispatch, then fallthrough.

pub mod dispatch;
pub mod proceed;
pub mod stack;

use crate::markers::Markers;
use crate::rules::Template;
use crate::types::{DialogueArc, NodeKind};

/// Full template of a node with the given kind and outgoing arcs.
pub fn node_template(kind: NodeKind, outgoing: &[&DialogueArc], markers: &Markers) -> Template {
  let mut template = stack::continuation(kind, markers);
  template.extend(dispatch::dispatch(kind, outgoing, markers));
  template.extend(proceed::fallthrough(kind));
  template
}
