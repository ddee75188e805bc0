//! Topics and categories.

use serde::{Deserialize, Serialize};

use super::syntax::{self, WILDCARD_MANY};
use super::{Element, Template};

/// One pattern-matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub pattern: String,
  /// Test against the previous response.
  pub that: String,
  pub template: Template,
}

impl Category {
  pub fn new(pattern: impl AsRef<str>, template: Template) -> Self {
    Self { pattern: syntax::normalize(pattern.as_ref()), that: WILDCARD_MANY.to_string(), template }
  }

  pub fn with_that(mut self, that: impl AsRef<str>) -> Self {
    self.that = syntax::normalize(that.as_ref());
    self
  }

  /// Matches any input in any context.
  pub fn unconditional(template: Template) -> Self {
    Self::new(WILDCARD_MANY, template)
  }
}

/// A keyed group of categories. The key is matched against the topic
/// predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub pattern: String,
  pub categories: Vec<Category>,
}

impl Topic {
  pub fn new(pattern: impl AsRef<str>) -> Self {
    Self { pattern: syntax::normalize(pattern.as_ref()), categories: Vec::new() }
  }

  /// Topic keyed by `head` followed by anything.
  pub fn headed(head: &str) -> Self {
    Self::new(syntax::join([head, WILDCARD_MANY]))
  }

  pub fn with(mut self, category: Category) -> Self {
    self.categories.push(category);
    self
  }

  pub fn push(&mut self, category: Category) {
    self.categories.push(category);
  }

  /// Every template element of the topic, depth first.
  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.categories.iter().flat_map(|c| walk(&c.template))
  }
}

fn walk(template: &[Element]) -> Vec<&Element> {
  let mut out = Vec::new();
  for element in template {
    out.push(element);
    match element {
      Element::Set { content, .. } | Element::Think(content) | Element::Srai(content) => {
        out.extend(walk(content));
      }
      Element::Random(items) => {
        for item in items {
          out.extend(walk(item));
        }
      }
      Element::Text(_)
      | Element::Star(_)
      | Element::TopicStar(_)
      | Element::Get(_)
      | Element::Code(_) => {}
    }
  }
  out
}
