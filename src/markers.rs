//! Synthetic identifiers the compiler adds to the generated rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, NameError, Result};
use crate::naming::NamingAuthority;

pub const DEFAULT_PREFIX: &str = "TW";

/// Marker words threaded through the pseudo-stack and the library rules.
///
/// All nine must be single words, pairwise distinct and free in the
/// [`NamingAuthority`] of the compiled system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
  /// Unwinds a finished subroutine.
  pub pull: String,
  /// Entry boundary of a network on the pseudo-stack.
  pub pull_stop: String,
  /// Precedes the return node of a recurrent call.
  #[serde(rename = "return")]
  pub ret: String,
  pub success: String,
  pub fail: String,
  /// Head of a random permutation request.
  pub randomize: String,
  /// Head of a value removal request.
  pub filter: String,
  /// Head of a predicate or code test subject.
  pub test: String,
  /// Predicate keeping the input while a test subject is evaluated.
  pub scratch: String,
}

impl Default for Markers {
  fn default() -> Self {
    Self::with_prefix(DEFAULT_PREFIX)
  }
}

impl Markers {
  pub fn with_prefix(prefix: &str) -> Self {
    let m = |mnemonic: &str| format!("{prefix}{mnemonic}");
    Self {
      pull: m("PULL"),
      pull_stop: m("PULLSTOP"),
      ret: m("RETURN"),
      success: m("SUCCESS"),
      fail: m("FAIL"),
      randomize: m("RANDOMIZE"),
      filter: m("FILTER"),
      test: m("TEST"),
      scratch: m("SCRATCH"),
    }
  }

  pub fn all(&self) -> [&str; 9] {
    [
      &self.pull,
      &self.pull_stop,
      &self.ret,
      &self.success,
      &self.fail,
      &self.randomize,
      &self.filter,
      &self.test,
      &self.scratch,
    ]
  }

  pub fn contains(&self, name: &str) -> bool {
    self.all().contains(&name)
  }

  /// Checks that every marker is a well-formed word and that no two match.
  pub fn validate(&self) -> Result<()> {
    let mut seen = BTreeSet::new();
    for marker in self.all() {
      if !NamingAuthority::is_well_formed(marker) {
        return Err(Error::Marker {
          marker: marker.to_string(),
          source: NameError::Malformed(marker.to_string()),
        });
      }
      if !seen.insert(marker) {
        return Err(Error::DuplicateMarker(marker.to_string()));
      }
    }
    Ok(())
  }

  /// Validates and reserves every marker in `names`. On failure `names`
  /// may hold part of the set, so callers reserve into a copy.
  pub fn reserve(&self, names: &mut NamingAuthority) -> Result<()> {
    self.validate()?;
    for marker in self.all() {
      names
        .reserve(marker)
        .map_err(|source| Error::Marker { marker: marker.to_string(), source })?;
    }
    debug!(markers = ?self.all(), "markers reserved");
    Ok(())
  }
}
