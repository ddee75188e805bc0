//! Fallthrough: whether evaluation continues without new input.

use tracing::instrument;

use crate::rules::{Element, Template};
use crate::types::{Interaction, NodeKind};

/// Processing nodes re-submit the current input; input nodes stop and wait.
#[instrument(level = "trace")]
pub fn fallthrough(kind: NodeKind) -> Template {
  match kind.interaction {
    Interaction::Processing => vec![Element::srai(vec![Element::star(1)])],
    Interaction::Input => Vec::new(),
  }
}
