//! A directed, named arc between two nodes of one network.

use serde::{Deserialize, Serialize};

/// What an arc tests before it is followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ArcKind {
  /// Tests the input (and optionally the previous response) against patterns.
  Pattern { pattern: String, that: String },
  /// Tests a conversation variable against a pattern.
  PredicateTest { predicate: String, value: String },
  /// Tests the text produced by an embedded code fragment against a pattern.
  CodeTest { code: String, value: String },
  /// Always followed.
  Transition,
  /// Calls the enter node `callee` as a subroutine, then resumes at the arc's target.
  Recurrent { callee: String },
}

/// A directed, named arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueArc {
  pub name: String,
  pub from: String,
  pub to: String,
  pub priority: u32,
  pub kind: ArcKind,
  /// Output emitted when the arc is followed.
  pub code: String,
}

impl DialogueArc {
  pub fn new(
    name: impl Into<String>,
    from: impl Into<String>,
    to: impl Into<String>,
    kind: ArcKind,
  ) -> Self {
    Self {
      name: name.into(),
      from: from.into(),
      to: to.into(),
      priority: 1,
      kind,
      code: String::new(),
    }
  }

  pub fn with_priority(mut self, priority: u32) -> Self {
    self.priority = priority;
    self
  }

  pub fn with_code(mut self, code: impl Into<String>) -> Self {
    self.code = code.into();
    self
  }

  /// Number of candidate slots this arc takes in a random permutation.
  pub fn weight(&self) -> u32 {
    self.priority.max(1)
  }

  pub fn callee(&self) -> Option<&str> {
    match &self.kind {
      ArcKind::Recurrent { callee } => Some(callee),
      _ => None,
    }
  }
}

impl ArcKind {
  pub fn pattern(pattern: impl Into<String>) -> Self {
    ArcKind::Pattern { pattern: pattern.into(), that: "*".to_string() }
  }

  pub fn predicate(predicate: impl Into<String>, value: impl Into<String>) -> Self {
    ArcKind::PredicateTest { predicate: predicate.into(), value: value.into() }
  }

  pub fn code(code: impl Into<String>, value: impl Into<String>) -> Self {
    ArcKind::CodeTest { code: code.into(), value: value.into() }
  }

  pub fn recurrent(callee: impl Into<String>) -> Self {
    ArcKind::Recurrent { callee: callee.into() }
  }
}
