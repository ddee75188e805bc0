//! Naming Authority: reserves identifiers for nodes, arcs, networks and
//! compiler markers so synthetic names never collide with authored ones.
//!
//! The rule engine matches words without regard to case, so two names that
//! differ only in case collide.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::NameError;

/// A name is one word of the rule language: no whitespace, no wildcard.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s*_][^\s*]*$").unwrap());

/// Registry of every identifier in use. Owned by one [`System`](crate::System);
/// a compilation clones it so marker reservations stay scoped to that pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingAuthority {
  used: BTreeSet<String>,
  /// Case-folded copy of `used`.
  folded: BTreeSet<String>,
}

fn fold(name: &str) -> String {
  name.to_uppercase()
}

impl NamingAuthority {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if `name` is a single word usable as an identifier.
  pub fn is_well_formed(name: &str) -> bool {
    WORD.is_match(name)
  }

  /// Reserves `name`. A collision leaves the registry unchanged.
  pub fn reserve(&mut self, name: &str) -> Result<(), NameError> {
    if !Self::is_well_formed(name) {
      return Err(NameError::Malformed(name.to_string()));
    }
    if self.contains(name) {
      return Err(NameError::Collision(name.to_string()));
    }
    trace!(name, "reserved");
    self.insert(name.to_string());
    Ok(())
  }

  /// Reserves and returns the first free name among `base`, `base1`, `base2`, ...
  pub fn allocate(&mut self, base: &str) -> Result<String, NameError> {
    if !Self::is_well_formed(base) {
      return Err(NameError::Malformed(base.to_string()));
    }
    let name = std::iter::once(base.to_string())
      .chain((1..).map(|i| format!("{base}{i}")))
      .find(|candidate| !self.contains(candidate))
      .unwrap_or_else(|| base.to_string());
    self.insert(name.clone());
    Ok(name)
  }

  /// Frees `name`. Returns whether it was reserved.
  pub fn release(&mut self, name: &str) -> bool {
    let removed = self.used.remove(name);
    if removed {
      self.folded.remove(&fold(name));
    }
    removed
  }

  /// True if `name`, in any case, is reserved.
  pub fn contains(&self, name: &str) -> bool {
    self.folded.contains(&fold(name))
  }

  fn insert(&mut self, name: String) {
    self.folded.insert(fold(&name));
    self.used.insert(name);
  }

  /// Every reserved name as written, in sorted order.
  pub fn all_used_names(&self) -> &BTreeSet<String> {
    &self.used
  }
}
