//! Template elements: the generated response and action of a category.

use serde::{Deserialize, Serialize};

use super::Index;
use super::syntax::{self, TOPIC_PREDICATE};

/// Ordered element sequence forming one template.
pub type Template = Vec<Element>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
  Text(String),
  /// Value captured by an input wildcard.
  Star(Index),
  /// Value captured by a topic wildcard.
  TopicStar(Index),
  Get(String),
  Set { name: String, content: Template },
  /// Evaluates the content and discards its output.
  Think(Template),
  /// Re-submits the content's output as new input.
  Srai(Template),
  /// Picks one alternative uniformly.
  Random(Vec<Template>),
  /// Author code, printed verbatim.
  Code(String),
}

impl Element {
  pub fn text(text: impl Into<String>) -> Self {
    Element::Text(text.into())
  }

  pub fn star(index: u32) -> Self {
    Element::Star(Index::new(index))
  }

  pub fn topic_star(index: u32) -> Self {
    Element::TopicStar(Index::new(index))
  }

  pub fn get(name: impl Into<String>) -> Self {
    Element::Get(name.into())
  }

  /// `<think><set name=..>content</set></think>`.
  pub fn assign(name: impl Into<String>, content: Template) -> Self {
    Element::Think(vec![Element::Set { name: name.into(), content }])
  }

  /// Replaces the pseudo-stack held in the topic predicate.
  pub fn set_topic(content: Template) -> Self {
    Self::assign(TOPIC_PREDICATE, content)
  }

  pub fn get_topic() -> Self {
    Self::get(TOPIC_PREDICATE)
  }

  pub fn srai(content: Template) -> Self {
    Element::Srai(content)
  }
}

/// Joins elements with a word delimiter between neighbours.
pub(crate) fn spaced(parts: impl IntoIterator<Item = Element>) -> Template {
  let mut out = Vec::new();
  for part in parts {
    if !out.is_empty() {
      out.push(Element::text(syntax::WORD_DELIMITER));
    }
    out.push(part);
  }
  out
}
