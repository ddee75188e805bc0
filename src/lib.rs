//! # topicweave
//!
//! Compiles directed dialogue graphs into topic/category rule sets for a
//! stateless pattern-matching rule engine.
//!
//! ## Architecture
//!
//! - [`types`]: the graph model. A [`System`] of [`Network`]s whose nodes
//!   are classified by position, interaction and ordering.
//! - [`traversal`]: one depth-first walk classifying every arc as tree,
//!   back, forward or cross and notifying observers.
//! - [`processors`]: per-node-kind template fragments.
//! - [`compiler`]: the translating observer and [`compile`].
//! - [`library`]: the stack-simulation and random-permutation rule sets.
//!
//! The rule engine has no call stack, so the compiled rules keep one as
//! words in the `topic` predicate.

pub mod compiler;
pub mod dot_parser;
pub mod error;
pub mod library;
pub mod markers;
pub mod naming;
pub mod processors;
pub mod rules;
pub mod traversal;
pub mod types;

pub use compiler::{CompiledSystem, NetworkTopics, TranslatingObserver, compile};
pub use error::{Error, NameError, Result};
pub use markers::Markers;
pub use naming::NamingAuthority;
pub use rules::{Category, Element, Index, Template, Topic};
pub use traversal::{DfsObserver, EdgeClass, Traversal};
pub use types::{
  ArcKind, DialogueArc, Interaction, Network, NetworkId, Node, NodeKind, Order, Position, System, Update,
};
