//! Two-part attribute index, written `first,second`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::syntax::INDEX_SEPARATOR;

/// Selects a captured value. `first` picks the wildcard; `second` picks a
/// sentence in history-aware elements. Both parts count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Index {
  pub first: u32,
  pub second: u32,
}

impl Index {
  pub fn new(first: u32) -> Self {
    Self { first, second: 1 }
  }

  pub fn with_second(mut self, second: u32) -> Self {
    self.second = second;
    self
  }
}

impl Default for Index {
  fn default() -> Self {
    Self::new(1)
  }
}

impl fmt::Display for Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.second == 1 {
      write!(f, "{}", self.first)
    } else {
      write!(f, "{}{}{}", self.first, INDEX_SEPARATOR, self.second)
    }
  }
}

impl FromStr for Index {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let part = |p: &str| -> Result<u32, String> {
      let p = p.trim();
      if p.is_empty() {
        return Ok(1);
      }
      match p.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("invalid index part '{p}' in '{s}'")),
        Ok(n) => Ok(n),
      }
    };
    match s.split_once(INDEX_SEPARATOR) {
      Some((first, second)) => Ok(Self { first: part(first)?, second: part(second)? }),
      None => Ok(Self::new(part(s)?)),
    }
  }
}

impl TryFrom<String> for Index {
  type Error = String;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<Index> for String {
  fn from(index: Index) -> Self {
    index.to_string()
  }
}
