//! Side effects of one structural edit.

use serde::{Deserialize, Serialize};

use super::NodeKind;

/// A node whose kind changed because of an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSwitch {
  pub node: String,
  pub from: NodeKind,
  pub to: NodeKind,
}

/// Immutable record of everything an edit changed besides its direct target.
///
/// Built once per edit through [`UpdateBuilder`]; the editor reads it to
/// refresh whatever depends on node kinds, removed arcs or subroutine entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
  switched: Vec<KindSwitch>,
  removed_arcs: Vec<String>,
  enter_added: Vec<String>,
  enter_removed: Vec<String>,
  invalidated_recurrent: Vec<String>,
}

impl Update {
  pub fn switched(&self) -> &[KindSwitch] {
    &self.switched
  }

  /// Arcs removed as a consequence, e.g. the arcs of a removed node.
  pub fn removed_arcs(&self) -> &[String] {
    &self.removed_arcs
  }

  /// Nodes that became available as subroutine entry points.
  pub fn enter_added(&self) -> &[String] {
    &self.enter_added
  }

  pub fn enter_removed(&self) -> &[String] {
    &self.enter_removed
  }

  /// Recurrent arcs dropped because their callee is no longer an enter node.
  pub fn invalidated_recurrent(&self) -> &[String] {
    &self.invalidated_recurrent
  }

  pub fn is_empty(&self) -> bool {
    self.switched.is_empty()
      && self.removed_arcs.is_empty()
      && self.enter_added.is_empty()
      && self.enter_removed.is_empty()
      && self.invalidated_recurrent.is_empty()
  }
}

/// Accumulates the parts of an [`Update`].
#[derive(Debug, Default)]
pub struct UpdateBuilder {
  inner: Update,
}

impl UpdateBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn switched(mut self, node: impl Into<String>, from: NodeKind, to: NodeKind) -> Self {
    self.inner.switched.push(KindSwitch { node: node.into(), from, to });
    self
  }

  pub fn removed_arc(mut self, arc: impl Into<String>) -> Self {
    self.inner.removed_arcs.push(arc.into());
    self
  }

  pub fn enter_added(mut self, node: impl Into<String>) -> Self {
    self.inner.enter_added.push(node.into());
    self
  }

  pub fn enter_removed(mut self, node: impl Into<String>) -> Self {
    self.inner.enter_removed.push(node.into());
    self
  }

  pub fn invalidated(mut self, arc: impl Into<String>) -> Self {
    self.inner.invalidated_recurrent.push(arc.into());
    self
  }

  pub fn build(self) -> Update {
    self.inner
  }
}
