//! Minimal rule evaluator used to execute compiled topics in tests.
//!
//! Categories are stored in a word trie over the path
//! `input <that> that <topic> topic`. At each word a literal beats `_`,
//! which beats `*`; a pattern ending with the input beats a trailing `*`
//! matching nothing.

use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use topicweave::rules::syntax::normalize;
use topicweave::{CompiledSystem, Element, Topic};

const THAT: &str = "<that>";
const TOPIC: &str = "<topic>";
const MAX_DEPTH: usize = 512;

#[derive(Default)]
struct Trie {
  children: HashMap<String, Trie>,
  template: Option<usize>,
}

#[derive(Default)]
struct Captures {
  stars: Vec<String>,
  topic_stars: Vec<String>,
}

pub struct Engine {
  root: Trie,
  templates: Vec<Vec<Element>>,
  predicates: HashMap<String, String>,
  that: String,
  rng: StdRng,
}

fn words(text: &str) -> Vec<String> {
  text.split_whitespace().map(str::to_string).collect()
}

fn is_separator(word: &str) -> bool {
  word == THAT || word == TOPIC
}

impl Engine {
  pub fn new(compiled: &CompiledSystem, seed: u64) -> Self {
    Self::from_topics(compiled.topics(), seed)
  }

  pub fn from_topics<'a>(topics: impl IntoIterator<Item = &'a Topic>, seed: u64) -> Self {
    let mut engine = Engine {
      root: Trie::default(),
      templates: Vec::new(),
      predicates: HashMap::new(),
      that: String::new(),
      rng: StdRng::seed_from_u64(seed),
    };
    for topic in topics {
      for category in &topic.categories {
        let mut path = words(&category.pattern);
        path.push(THAT.to_string());
        path.extend(words(&category.that));
        path.push(TOPIC.to_string());
        path.extend(words(&topic.pattern));

        let mut node = &mut engine.root;
        for word in path {
          node = node.children.entry(word).or_default();
        }
        if node.template.is_none() {
          node.template = Some(engine.templates.len());
          engine.templates.push(category.template.clone());
        }
      }
    }
    engine
  }

  pub fn topic(&self) -> String {
    self.get("topic")
  }

  pub fn set_topic(&mut self, topic: &str) {
    self.set("topic", topic);
  }

  pub fn get(&self, name: &str) -> String {
    self.predicates.get(name).cloned().unwrap_or_default()
  }

  pub fn set(&mut self, name: &str, value: &str) {
    self.predicates.insert(name.to_string(), normalize(value));
  }

  /// Evaluates one user input and remembers the answer as the next `that`.
  pub fn respond(&mut self, input: &str) -> String {
    let answer = normalize(&self.eval_input(input, 0));
    self.that = answer.clone();
    answer
  }

  /// Evaluates `input` without touching `that`.
  pub fn eval(&mut self, input: &str) -> String {
    normalize(&self.eval_input(input, 0))
  }

  fn eval_input(&mut self, input: &str, depth: usize) -> String {
    assert!(depth < MAX_DEPTH, "srai recursion too deep at input '{input}'");
    let mut path = words(input);
    path.push(THAT.to_string());
    path.extend(words(&self.that));
    path.push(TOPIC.to_string());
    path.extend(words(&self.topic()));

    let mut caps = Vec::new();
    let Some(template) = search(&self.root, &path, 0, 0, &mut caps) else {
      return String::new();
    };
    let mut captures = Captures::default();
    for (segment, value) in caps {
      match segment {
        0 => captures.stars.push(value),
        1 => {}
        _ => captures.topic_stars.push(value),
      }
    }
    let template = self.templates[template].clone();
    self.eval_template(&template, &captures, depth)
  }

  fn eval_template(&mut self, template: &[Element], caps: &Captures, depth: usize) -> String {
    let mut out = String::new();
    for element in template {
      let part = self.eval_element(element, caps, depth);
      out.push_str(&part);
    }
    out
  }

  fn eval_element(&mut self, element: &Element, caps: &Captures, depth: usize) -> String {
    let nth = |values: &Vec<String>, index: u32| {
      values.get(index as usize - 1).cloned().unwrap_or_default()
    };
    match element {
      Element::Text(text) => text.clone(),
      Element::Star(index) => nth(&caps.stars, index.first),
      Element::TopicStar(index) => nth(&caps.topic_stars, index.first),
      Element::Get(name) => self.get(name),
      Element::Set { name, content } => {
        let value = normalize(&self.eval_template(content, caps, depth));
        self.predicates.insert(name.clone(), value.clone());
        value
      }
      Element::Think(content) => {
        self.eval_template(content, caps, depth);
        String::new()
      }
      Element::Srai(content) => {
        let input = self.eval_template(content, caps, depth);
        self.eval_input(&input, depth + 1)
      }
      Element::Random(items) => {
        let pick = self.rng.gen_range(0..items.len());
        self.eval_template(&items[pick], caps, depth)
      }
      Element::Code(code) => code.clone(),
    }
  }
}

/// Depth-first trie search; `segment` is 0 for input, 1 for that, 2 for topic.
fn search(node: &Trie, path: &[String], pos: usize, segment: u8, caps: &mut Vec<(u8, String)>) -> Option<usize> {
  if pos == path.len() {
    if node.template.is_some() {
      return node.template;
    }
    return star(node, path, pos, segment, caps);
  }

  let word = path[pos].as_str();
  if let Some(child) = node.children.get(word) {
    let next = match word {
      THAT => 1,
      TOPIC => 2,
      _ => segment,
    };
    if let Some(found) = search(child, path, pos + 1, next, caps) {
      return Some(found);
    }
  }
  if is_separator(word) {
    return star(node, path, pos, segment, caps);
  }
  if let Some(child) = node.children.get("_") {
    caps.push((segment, word.to_string()));
    if let Some(found) = search(child, path, pos + 1, segment, caps) {
      return Some(found);
    }
    caps.pop();
  }
  star(node, path, pos, segment, caps)
}

/// Tries `*` consuming zero, one, two, .. words up to the next separator.
fn star(node: &Trie, path: &[String], pos: usize, segment: u8, caps: &mut Vec<(u8, String)>) -> Option<usize> {
  let child = node.children.get("*")?;
  let mut end = pos;
  loop {
    caps.push((segment, path[pos..end].join(" ")));
    if let Some(found) = search(child, path, end, segment, caps) {
      return Some(found);
    }
    caps.pop();
    if end >= path.len() || is_separator(&path[end]) {
      return None;
    }
    end += 1;
  }
}
