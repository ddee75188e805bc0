//! Crate-wide error type.
//!
//! Errors fall into three groups: precondition violations (the caller asked
//! for something the graph cannot hold), invariant violations found while
//! walking (a defect in the walk or in the snapshot), and naming collisions.
//! Collisions are reported by the [`NamingAuthority`](crate::NamingAuthority)
//! as a [`NameError`] so callers can retry with another identifier.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected identifier reservation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
  #[error("name '{0}' is already in use")]
  Collision(String),
  #[error("name '{0}' is not a single word")]
  Malformed(String),
}

/// Errors raised by graph editing, traversal and compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Name(#[from] NameError),

  #[error("unknown network '{0}'")]
  UnknownNetwork(String),
  #[error("unknown node '{0}'")]
  UnknownNode(String),
  #[error("unknown arc '{0}'")]
  UnknownArc(String),
  #[error("arc '{arc}' connects nodes outside network '{network}'")]
  CrossNetworkArc { arc: String, network: String },
  #[error("recurrent arc '{arc}' calls '{callee}', which is not an available enter node")]
  NotAnEnterNode { arc: String, callee: String },

  #[error("marker '{0}' is configured more than once")]
  DuplicateMarker(String),
  #[error("marker '{marker}' is unusable: {source}")]
  Marker {
    marker: String,
    #[source]
    source: NameError,
  },

  #[error("arc '{0}' examined while its source node is not open")]
  SourceNotOpen(String),
  #[error("arc '{0}' points at a node the walk cannot see")]
  MissingTarget(String),
  #[error("discovery and finish times tie on arc '{0}'")]
  TimestampTie(String),
  #[error("traversal engine already walked a graph; use a fresh instance")]
  AlreadyWalked,
  #[error("no network has been visited yet")]
  NothingVisited,
}
