//! Random-permutation library.
//!
//! `RANDOMIZE v1 .. vk` answers with the values in a random order. Each
//! round picks one position uniformly, so a value listed twice is twice as
//! likely to come first. The rule language cannot compare two captured
//! values, so removing the picked value from the rest goes through four
//! `FILTER` entries per name that can appear as a value.

use tracing::{debug, instrument};

use crate::markers::Markers;
use crate::naming::NamingAuthority;
use crate::rules::syntax::{self, WILDCARD_MANY, WILDCARD_ONE};
use crate::rules::{Category, Element, Template, Topic, spaced};
use crate::types::System;

/// Largest candidate count a random node of `system` can request.
pub fn bound(system: &System) -> usize {
  system.max_weight().max(1) as usize * system.max_branching()
}

/// Permutation groups for 0..=`bound` values, then the filter entries for
/// every name in `names` that is not a marker.
#[instrument(level = "trace", skip(markers, names))]
pub fn topics(markers: &Markers, bound: usize, names: &NamingAuthority) -> Vec<Topic> {
  let mut topics: Vec<Topic> = (0..=bound.max(1)).map(|k| permutation(markers, k)).collect();
  let values: Vec<&String> = names
    .all_used_names()
    .iter()
    .filter(|n| !markers.contains(n))
    .collect();
  debug!(bound, values = values.len(), "randomize library");
  topics.extend(values.into_iter().map(|name| filter(markers, name)));
  topics
}

fn pattern(head: &str, tail: impl IntoIterator<Item = String>) -> String {
  let tail: Vec<String> = tail.into_iter().collect();
  syntax::join(std::iter::once(head).chain(tail.iter().map(String::as_str)))
}

fn permutation(markers: &Markers, k: usize) -> Topic {
  let request = pattern(&markers.randomize, (0..k).map(|_| WILDCARD_ONE.to_string()));
  let template = match k {
    0 => Vec::new(),
    1 => vec![Element::star(1)],
    _ => vec![Element::Random((1..=k as u32).map(|i| pick(markers, i, k as u32)).collect())],
  };
  Topic::new(WILDCARD_MANY).with(Category::new(request, template))
}

/// `v_i RANDOMIZE(FILTER v_i rest)`.
fn pick(markers: &Markers, i: u32, k: u32) -> Template {
  let others = (1..=k).filter(|&j| j != i).map(Element::star);
  let remove = spaced(
    [Element::text(&markers.filter), Element::star(i)]
      .into_iter()
      .chain(others),
  );
  let rest = vec![
    Element::text(&markers.randomize),
    Element::text(syntax::WORD_DELIMITER),
    Element::srai(remove),
  ];
  vec![Element::star(i), Element::text(syntax::WORD_DELIMITER), Element::srai(rest)]
}

/// Removes every occurrence of `name` from the values after it.
fn filter(markers: &Markers, name: &str) -> Topic {
  let head = syntax::join([markers.filter.as_str(), name]);
  let again = |rest: u32| {
    Element::srai(vec![
      Element::text(&head),
      Element::text(syntax::WORD_DELIMITER),
      Element::star(rest),
    ])
  };
  let entry = |tail: &[&str], template: Template| {
    Category::new(syntax::join(std::iter::once(head.as_str()).chain(tail.iter().copied())), template)
  };

  Topic::new(WILDCARD_MANY)
    .with(entry(&[name, WILDCARD_MANY], vec![again(1)]))
    .with(entry(
      &[WILDCARD_ONE, WILDCARD_MANY],
      vec![Element::star(1), Element::text(syntax::WORD_DELIMITER), again(2)],
    ))
    .with(entry(&[name], Vec::new()))
    .with(entry(&[WILDCARD_ONE], vec![Element::star(1)]))
}
