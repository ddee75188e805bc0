//! Compiles a dialogue [`System`] into topics.
//!
//! The [`TranslatingObserver`] rides one depth-first walk: every discovered
//! node becomes a topic keyed `NODE *`, every examined arc a topic keyed
//! `ARC *`. The libraries are appended afterwards.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::library::{randomize, recursion};
use crate::markers::Markers;
use crate::processors;
use crate::rules::syntax::{self, WILDCARD_MANY};
use crate::rules::{Category, Element, Template, Topic, spaced};
use crate::traversal::{DfsObserver, Traversal};
use crate::types::{ArcKind, DialogueArc, Network, NetworkId, Node, System};

/// Topics generated for one network, in walk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopics {
  pub id: NetworkId,
  pub network: String,
  pub topics: Vec<Topic>,
}

/// Output of one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSystem {
  pub markers: Markers,
  pub networks: Vec<NetworkTopics>,
  pub recursion: Vec<Topic>,
  pub randomize: Vec<Topic>,
  /// Largest candidate count the randomize library handles.
  pub randomize_bound: usize,
}

impl CompiledSystem {
  pub fn network(&self, name: &str) -> Option<&NetworkTopics> {
    self.networks.iter().find(|n| n.network == name)
  }

  /// Every topic: networks first, then the libraries.
  pub fn topics(&self) -> impl Iterator<Item = &Topic> {
    self
      .networks
      .iter()
      .flat_map(|n| n.topics.iter())
      .chain(self.recursion.iter())
      .chain(self.randomize.iter())
  }

  pub fn topic_count(&self) -> usize {
    self.topics().count()
  }
}

/// Compiles `system` with the given markers.
///
/// The markers are reserved in a copy of the system's names first; any
/// collision fails before a single topic is built. The walk either
/// completes or nothing is returned.
#[instrument(level = "trace", skip_all)]
pub fn compile(system: &System, markers: &Markers) -> Result<CompiledSystem> {
  info!(networks = system.networks().len(), "compiling dialogue system");
  let mut names = system.names().clone();
  markers.reserve(&mut names)?;

  let mut translator = TranslatingObserver::new(markers);
  Traversal::new().walk_system(system, &mut [&mut translator])?;
  let networks = translator.result()?;

  let randomize_bound = randomize::bound(system);
  let compiled = CompiledSystem {
    markers: markers.clone(),
    networks,
    recursion: recursion::topics(markers),
    randomize: randomize::topics(markers, randomize_bound, &names),
    randomize_bound,
  };
  info!(topics = compiled.topic_count(), randomize_bound, "compiled dialogue system");
  Ok(compiled)
}

/// Observer turning walk events into topics.
#[derive(Debug)]
pub struct TranslatingObserver<'m> {
  markers: &'m Markers,
  networks: Vec<NetworkTopics>,
}

impl<'m> TranslatingObserver<'m> {
  pub fn new(markers: &'m Markers) -> Self {
    Self { markers, networks: Vec::new() }
  }

  /// Topics per visited network. Fails if no network was visited.
  pub fn result(self) -> Result<Vec<NetworkTopics>> {
    if self.networks.is_empty() {
      return Err(Error::NothingVisited);
    }
    Ok(self.networks)
  }

  fn current(&mut self) -> Result<&mut Vec<Topic>> {
    self
      .networks
      .last_mut()
      .map(|n| &mut n.topics)
      .ok_or(Error::NothingVisited)
  }
}

impl DfsObserver for TranslatingObserver<'_> {
  fn visit_network(&mut self, network: &Network) -> Result<()> {
    self.networks.push(NetworkTopics {
      id: network.id(),
      network: network.name().to_string(),
      topics: Vec::new(),
    });
    Ok(())
  }

  fn discovery(&mut self, network: &Network, node: &Node) -> Result<()> {
    let kind = network.kind_of(node);
    let outgoing = network.outgoing(&node.name);
    let template = processors::node_template(kind, &outgoing, self.markers);
    debug!(node = %node.name, %kind, "node topic");
    let topic = Topic::headed(&node.name).with(Category::unconditional(template));
    self.current()?.push(topic);
    Ok(())
  }

  fn examination(&mut self, _network: &Network, arc: &DialogueArc) -> Result<()> {
    let topic = arc_topic(arc, self.markers);
    debug!(arc = %arc.name, categories = topic.categories.len(), "arc topic");
    self.current()?.push(topic);
    Ok(())
  }
}

/// Replaces the arc name on top of the stack with its target.
fn push(arc: &DialogueArc) -> Element {
  Element::set_topic(spaced([Element::text(&arc.to), Element::topic_star(1)]))
}

/// Drops the arc name; the next alternative is tried.
fn pop() -> Element {
  Element::set_topic(vec![Element::topic_star(1)])
}

fn resubmit() -> Element {
  Element::srai(vec![Element::star(1)])
}

/// Stack update, the arc's own output, then `next`.
fn follow(stack: Element, arc: &DialogueArc, next: Element) -> Template {
  let mut template = vec![stack];
  if !arc.code.trim().is_empty() {
    template.push(Element::Code(arc.code.clone()));
  }
  template.push(next);
  template
}

fn or_any(pattern: &str) -> String {
  let pattern = syntax::normalize(pattern);
  if pattern.is_empty() { WILDCARD_MANY.to_string() } else { pattern }
}

/// Rebuilds the matched input: literal words stay, each wildcard becomes
/// its captured value.
fn reconstruct(pattern: &str) -> Template {
  let mut star = 0;
  let parts = syntax::words(pattern).map(|word| {
    if syntax::is_wildcard(word) {
      star += 1;
      Element::star(star)
    } else {
      Element::text(word)
    }
  });
  spaced(parts.collect::<Vec<_>>())
}

fn arc_topic(arc: &DialogueArc, markers: &Markers) -> Topic {
  let mut topic = Topic::headed(&arc.name);
  match &arc.kind {
    ArcKind::Transition => {
      topic.push(Category::unconditional(follow(push(arc), arc, resubmit())));
    }
    ArcKind::Pattern { pattern, that } => {
      let (pattern, that) = (or_any(pattern), or_any(that));
      let hit = follow(push(arc), arc, Element::srai(reconstruct(&pattern)));
      topic.push(Category::new(&pattern, hit).with_that(&that));
      if pattern != WILDCARD_MANY || that != WILDCARD_MANY {
        topic.push(Category::unconditional(vec![pop(), resubmit()]));
      }
    }
    ArcKind::PredicateTest { predicate, value } => {
      test_categories(&mut topic, arc, markers, Element::get(predicate), value);
    }
    ArcKind::CodeTest { code, value } => {
      test_categories(&mut topic, arc, markers, Element::Code(code.clone()), value);
    }
    ArcKind::Recurrent { callee } => {
      let call = Element::set_topic(spaced([
        Element::text(callee),
        Element::text(&markers.ret),
        Element::text(&arc.to),
        Element::topic_star(1),
      ]));
      topic.push(Category::unconditional(follow(call, arc, resubmit())));
    }
  }
  topic
}

/// Stores the input, evaluates `subject` under the test marker, then
/// restores the input on either outcome.
fn test_categories(topic: &mut Topic, arc: &DialogueArc, markers: &Markers, subject: Element, value: &str) {
  let value = or_any(value);
  let restore = || Element::srai(vec![Element::get(&markers.scratch)]);

  topic.push(Category::unconditional(vec![
    Element::assign(&markers.scratch, vec![Element::star(1)]),
    Element::srai(vec![Element::text(&markers.test), Element::text(syntax::WORD_DELIMITER), subject]),
  ]));
  topic.push(Category::new(
    syntax::join([markers.test.as_str(), value.as_str()]),
    follow(push(arc), arc, restore()),
  ));
  if value != WILDCARD_MANY {
    topic.push(Category::new(
      syntax::join([markers.test.as_str(), WILDCARD_MANY]),
      vec![pop(), restore()],
    ));
  }
}
