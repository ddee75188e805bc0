//! Minimal DOT reader for dialogue systems.
//!
//! Every `digraph NAME { .. }` block becomes one network. Node attributes:
//! `interaction`, `order`, `x`, `y`. Edge attributes: `name`, `kind`,
//! `pattern`, `that`, `predicate`, `test`, `value`, `callee`, `priority`,
//! `code`. Recurrent arcs are added after everything else so their callee's
//! enter status is settled.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::types::{ArcKind, DialogueArc, NetworkId, Node, System};

/// List of key-value attribute pairs from DOT `[key=value,...]` blocks.
type AttrList = Vec<(String, String)>;

#[derive(Debug, Default)]
struct RawGraph {
  name: String,
  nodes: Vec<(String, AttrList)>,
  edges: Vec<(String, String, AttrList)>,
}

impl RawGraph {
  /// Declares `id`, merging attributes into an earlier declaration.
  fn node(&mut self, id: &str, attrs: AttrList) {
    match self.nodes.iter_mut().find(|(n, _)| n == id) {
      Some((_, existing)) => existing.extend(attrs),
      None => self.nodes.push((id.to_string(), attrs)),
    }
  }
}

/// Parse DOT source holding one or more digraphs into a [`System`].
#[instrument(level = "trace", skip(source))]
pub fn parse_dot(source: &str) -> Result<System, String> {
  let source = strip_comments(source);
  let mut remaining = source.trim();
  if remaining.is_empty() {
    return Err("Expected 'digraph' at start".to_string());
  }

  let mut graphs = Vec::new();
  while !remaining.is_empty() {
    let (graph, rest) = parse_digraph(remaining)?;
    graphs.push(graph);
    remaining = rest.trim();
  }
  build_system(graphs)
}

fn parse_digraph(source: &str) -> Result<(RawGraph, &str), String> {
  let (keyword, rest) = parse_identifier(source).ok_or("Expected 'digraph' at start")?;
  if keyword != "digraph" {
    return Err(format!("Expected 'digraph' at start, found '{keyword}'"));
  }
  let (name, rest) = parse_identifier(rest).ok_or("Expected graph name")?;
  let mut remaining = rest
    .trim_start()
    .strip_prefix('{')
    .ok_or("Expected '{' after graph name")?
    .trim_start();

  let mut graph = RawGraph { name: name.to_string(), ..RawGraph::default() };
  while !remaining.is_empty() && !remaining.starts_with('}') {
    remaining = parse_statement(remaining, &mut graph)?.trim_start();
  }
  let rest = remaining
    .strip_prefix('}')
    .ok_or_else(|| format!("Unclosed digraph '{}'", graph.name))?;
  Ok((graph, rest))
}

fn build_system(graphs: Vec<RawGraph>) -> Result<System, String> {
  let mut system = System::new();
  let mut recurrent: Vec<(NetworkId, DialogueArc)> = Vec::new();

  for graph in &graphs {
    let network = system.add_network(&graph.name).map_err(|e| e.to_string())?;
    for (id, attrs) in &graph.nodes {
      let node = parse_node_attrs(id, attrs)?;
      system.add_node(network, node).map_err(|e| e.to_string())?;
    }
    for (from, to, attrs) in &graph.edges {
      let arc = parse_arc_attrs(from, to, attrs)?;
      if arc.callee().is_some() {
        recurrent.push((network, arc));
      } else {
        add_arc(&mut system, network, arc)?;
      }
    }
  }
  // A callee must stay an enter node once every arc is in place.
  let targets: BTreeSet<&str> = graphs
    .iter()
    .flat_map(|g| g.edges.iter().map(|(_, to, _)| to.as_str()))
    .collect();
  for (_, arc) in &recurrent {
    if let Some(callee) = arc.callee()
      && targets.contains(callee)
    {
      return Err(format!(
        "recurrent arc {} -> {} calls '{callee}', which has incoming arcs and is not an enter node",
        arc.from, arc.to
      ));
    }
  }
  for (network, arc) in recurrent {
    add_arc(&mut system, network, arc)?;
  }
  debug!(networks = system.networks().len(), "parsed dialogue system");
  Ok(system)
}

/// Adds `arc`, allocating `FROM_TO`, `FROM_TO1`, .. when it has no name.
fn add_arc(system: &mut System, network: NetworkId, mut arc: DialogueArc) -> Result<(), String> {
  if arc.name.is_empty() {
    let mut names = system.names().clone();
    arc.name = names
      .allocate(&format!("{}_{}", arc.from, arc.to))
      .map_err(|e| e.to_string())?;
  }
  let update = system.add_arc(network, arc).map_err(|e| e.to_string())?;
  let lost = update.invalidated_recurrent();
  if !lost.is_empty() {
    return Err(format!("adding an arc invalidated recurrent arcs: {}", lost.join(", ")));
  }
  Ok(())
}

/// Strips `//` and `/* */` comments outside quoted strings.
pub(crate) fn strip_comments(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars().peekable();
  let (mut in_string, mut escaped) = (false, false);
  while let Some(c) = chars.next() {
    if in_string {
      out.push(c);
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == '"' {
        in_string = false;
      }
      continue;
    }
    match (c, chars.peek().copied()) {
      ('/', Some('/')) => {
        if chars.by_ref().any(|c| c == '\n') {
          out.push('\n');
        }
      }
      ('/', Some('*')) => {
        chars.next();
        let mut prev = ' ';
        for c in chars.by_ref() {
          if prev == '*' && c == '/' {
            break;
          }
          prev = c;
        }
        out.push(' ');
      }
      _ => {
        in_string = c == '"';
        out.push(c);
      }
    }
  }
  out
}

/// Splits a leading identifier (letter or underscore, then alphanumerics)
/// off `s`.
pub(crate) fn parse_identifier(s: &str) -> Option<(&str, &str)> {
  let s = s.trim_start();
  let word = |c: char| c.is_ascii_alphanumeric() || c == '_';
  let first = s.chars().next()?;
  if !(first.is_ascii_alphabetic() || first == '_') {
    return None;
  }
  let end = s.find(|c: char| !word(c)).unwrap_or(s.len());
  Some(s.split_at(end))
}

fn end_statement(s: &str) -> &str {
  s.trim_start().trim_start_matches(';')
}

/// Parses one statement of a digraph body into `graph` and returns the rest.
fn parse_statement<'a>(s: &'a str, graph: &mut RawGraph) -> Result<&'a str, String> {
  let (id, rest) = parse_identifier(s).ok_or("Expected identifier")?;
  let rest = rest.trim_start();
  match id {
    "graph" | "node" | "edge" => return Ok(end_statement(skip_balanced(rest, '[', ']')?)),
    "subgraph" => return skip_balanced(rest, '{', '}'),
    _ => {}
  }

  // Graph attribute, e.g. `rankdir=LR`.
  if let Some(value) = rest.strip_prefix('=') {
    let (_, rest) = parse_value(value)?;
    return Ok(end_statement(rest));
  }
  if rest.starts_with("->") {
    return parse_edge_stmt(id, rest, graph);
  }
  let (attrs, rest) = if rest.starts_with('[') { parse_attr_block(rest)? } else { (Vec::new(), rest) };
  graph.node(id, attrs);
  Ok(end_statement(rest))
}

/// Last value given for `key`.
fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
  attrs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Parses `[key=value, ..]` and returns the attributes plus the remainder.
fn parse_attr_block(s: &str) -> Result<(AttrList, &str), String> {
  let mut remaining = s.trim_start().strip_prefix('[').ok_or("Expected '['")?.trim_start();
  let mut attrs = Vec::new();
  loop {
    if let Some(rest) = remaining.strip_prefix(']') {
      return Ok((attrs, rest.trim_start()));
    }
    if remaining.is_empty() {
      return Err("Unclosed attribute block".to_string());
    }
    let (key, rest) = parse_identifier(remaining).ok_or("Expected attribute key")?;
    let rest = rest.trim_start().strip_prefix('=').ok_or_else(|| format!("Expected '=' after '{key}'"))?;
    let (value, rest) = parse_value(rest)?;
    attrs.push((key.to_string(), value));
    remaining = rest.trim_start().trim_start_matches([',', ';']).trim_start();
  }
}

/// Resolves `\n`, `\t`, `\"` and `\\`; other escapes stay as written.
pub(crate) fn unescape_quoted_string(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some(c @ ('"' | '\\')) => out.push(c),
      Some(other) => {
        out.push('\\');
        out.push(other);
      }
      None => out.push('\\'),
    }
  }
  out
}

/// Parses a quoted string, a number or an identifier.
pub(crate) fn parse_value(s: &str) -> Result<(String, &str), String> {
  let s = s.trim_start();
  if let Some(body) = s.strip_prefix('"') {
    let mut escaped = false;
    let close = body
      .char_indices()
      .find(|&(_, c)| {
        let closes = c == '"' && !escaped;
        escaped = c == '\\' && !escaped;
        closes
      })
      .map(|(i, _)| i)
      .ok_or("Unterminated string")?;
    return Ok((unescape_quoted_string(&body[..close]), body[close + 1..].trim_start()));
  }
  if let Some(number) = parse_number(s) {
    return Ok(number);
  }
  parse_identifier(s)
    .map(|(id, rest)| (id.to_string(), rest))
    .ok_or_else(|| "Expected value".to_string())
}

/// Parses an optionally signed run of digits.
pub(crate) fn parse_number(s: &str) -> Option<(String, &str)> {
  let s = s.trim_start();
  let sign = usize::from(s.starts_with('-'));
  let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
  (digits > 0).then(|| (s[..sign + digits].to_string(), &s[sign + digits..]))
}

fn parse_unsigned(key: &str, v: &str) -> Result<u32, String> {
  v.parse()
    .map_err(|_| format!("'{key}' must be a non-negative integer, got '{v}'"))
}

/// Builds a [`Node`] from a node id and its attribute list.
pub(crate) fn parse_node_attrs(id: &str, attrs: &[(String, String)]) -> Result<Node, String> {
  let mut node = Node::new(id);
  for (k, v) in attrs {
    match k.as_str() {
      "interaction" => node.interaction = v.parse()?,
      "order" => node.order = v.parse()?,
      "x" => node.x = parse_unsigned(k, v)?,
      "y" => node.y = parse_unsigned(k, v)?,
      _ => {}
    }
  }
  Ok(node)
}

/// Builds a [`DialogueArc`] from an edge's attributes. The name stays empty when
/// the edge has none. Without `kind`, the present attributes decide.
pub(crate) fn parse_arc_attrs(from: &str, to: &str, attrs: &[(String, String)]) -> Result<DialogueArc, String> {
  let value = || attr(attrs, "value").unwrap_or("*").to_string();
  let required = |key: &str, kind: &str| {
    attr(attrs, key)
      .map(str::to_string)
      .ok_or_else(|| format!("{kind} arc {from} -> {to} needs '{key}'"))
  };

  let kind = match attr(attrs, "kind") {
    Some(kind) => kind,
    None if attr(attrs, "callee").is_some() => "recurrent",
    None if attr(attrs, "predicate").is_some() => "predicate",
    None if attr(attrs, "test").is_some() => "code",
    None if attr(attrs, "pattern").is_some() => "pattern",
    None => "transition",
  };
  let kind = match kind {
    "pattern" => ArcKind::Pattern {
      pattern: attr(attrs, "pattern").unwrap_or("*").to_string(),
      that: attr(attrs, "that").unwrap_or("*").to_string(),
    },
    "predicate" => ArcKind::PredicateTest { predicate: required("predicate", kind)?, value: value() },
    "code" => ArcKind::CodeTest { code: required("test", kind)?, value: value() },
    "transition" => ArcKind::Transition,
    "recurrent" => ArcKind::Recurrent { callee: required("callee", kind)? },
    other => return Err(format!("unknown arc kind '{other}'")),
  };

  let mut arc = DialogueArc::new(attr(attrs, "name").unwrap_or_default(), from, to, kind);
  if let Some(priority) = attr(attrs, "priority") {
    arc.priority = parse_unsigned("priority", priority)?;
  }
  if let Some(code) = attr(attrs, "code") {
    arc.code = code.to_string();
  }
  Ok(arc)
}

/// Parses the tail of `from -> a -> b [attrs]`; every hop gets the
/// same attributes, so a chain cannot carry a `name`.
fn parse_edge_stmt<'a>(from: &str, s: &'a str, graph: &mut RawGraph) -> Result<&'a str, String> {
  let mut chain = vec![from.to_string()];
  let mut rest = s;
  while let Some(next) = rest.trim_start().strip_prefix("->") {
    let (to, after) = parse_identifier(next).ok_or("Expected target node")?;
    chain.push(to.to_string());
    rest = after;
  }
  let rest = rest.trim_start();
  let (attrs, rest) = if rest.starts_with('[') { parse_attr_block(rest)? } else { (Vec::new(), rest) };
  if chain.len() > 2
    && let Some(name) = attr(&attrs, "name")
  {
    return Err(format!(
      "edge chain {} has {} hops but one name '{name}'; declare each named edge separately",
      chain.join(" -> "),
      chain.len() - 1
    ));
  }

  for id in &chain {
    graph.node(id, Vec::new());
  }
  for hop in chain.windows(2) {
    graph.edges.push((hop[0].clone(), hop[1].clone(), attrs.clone()));
  }
  Ok(end_statement(rest))
}

/// Skips past the `close` matching the first `open` in `s`.
fn skip_balanced(s: &str, open: char, close: char) -> Result<&str, String> {
  let start = s.find(open).ok_or_else(|| format!("Expected '{open}'"))?;
  let mut depth = 0usize;
  for (i, c) in s[start..].char_indices() {
    if c == open {
      depth += 1;
    } else if c == close {
      depth -= 1;
      if depth == 0 {
        return Ok(&s[start + i + c.len_utf8()..]);
      }
    }
  }
  Err(format!("Unclosed '{open}' block"))
}
