//! End-to-end dialogue tests: compiled topics are executed by the test
//! evaluator in `support::engine`.

mod support;

use proptest::prelude::*;
use support::engine::Engine;
use topicweave::library::{randomize, recursion};
use topicweave::{ArcKind, DialogueArc, Interaction, Markers, NamingAuthority, Node, Order, System, compile};

fn transition(name: &str, from: &str, to: &str, priority: u32) -> DialogueArc {
  DialogueArc::new(name, from, to, ArcKind::Transition).with_priority(priority)
}

/// START waits for input; HI and BYE match patterns, OTHER catches the rest.
fn greeting() -> System {
  let mut sys = System::new();
  let net = sys.add_network("greeting").unwrap();
  sys.add_node(net, Node::new("START").with_interaction(Interaction::Input)).unwrap();
  sys.add_node(net, Node::new("DONE")).unwrap();
  sys
    .add_arc(net, DialogueArc::new("HI", "START", "DONE", ArcKind::pattern("HELLO *")).with_priority(2).with_code("Hi there"))
    .unwrap();
  sys
    .add_arc(net, DialogueArc::new("BYE", "START", "DONE", ArcKind::pattern("BYE")).with_priority(1).with_code("Goodbye"))
    .unwrap();
  sys
    .add_arc(net, DialogueArc::new("OTHER", "START", "DONE", ArcKind::pattern("*")).with_code("Pardon"))
    .unwrap();
  sys
}

fn start(sys: &System, node: &str, seed: u64) -> Engine {
  let compiled = compile(sys, &Markers::default()).unwrap();
  let mut engine = Engine::new(&compiled, seed);
  engine.set_topic(node);
  engine
}

#[test]
fn input_node_waits_then_matches_pattern() {
  let sys = greeting();
  let mut engine = start(&sys, "START", 0);
  assert_eq!(engine.respond("ANYTHING"), "");
  assert_eq!(engine.topic(), "HI BYE OTHER TWPULLSTOP");
  assert_eq!(engine.respond("HELLO WORLD"), "Hi there");
  assert_eq!(engine.topic(), "TWSUCCESS");
}

#[test]
fn failed_patterns_fall_through_to_catch_all() {
  let sys = greeting();
  let mut engine = start(&sys, "START", 0);
  engine.respond("ANYTHING");
  assert_eq!(engine.respond("WHAT IS THIS"), "Pardon");
  assert_eq!(engine.topic(), "TWSUCCESS");

  let mut engine = start(&sys, "START", 0);
  engine.respond("ANYTHING");
  assert_eq!(engine.respond("BYE"), "Goodbye");
}

#[test]
fn exhausted_alternatives_fail() {
  let mut sys = System::new();
  let net = sys.add_network("n").unwrap();
  sys.add_node(net, Node::new("A")).unwrap();
  sys.add_node(net, Node::new("B")).unwrap();
  sys.add_arc(net, DialogueArc::new("YES", "A", "B", ArcKind::pattern("YES")).with_code("ok")).unwrap();
  let mut engine = start(&sys, "A", 0);
  assert_eq!(engine.respond("NO"), "");
  assert_eq!(engine.topic(), "TWFAIL");
}

fn moods() -> System {
  let mut sys = System::new();
  let net = sys.add_network("moods").unwrap();
  for node in ["A", "B", "C"] {
    sys.add_node(net, Node::new(node)).unwrap();
  }
  sys
    .add_arc(net, DialogueArc::new("MOOD", "A", "B", ArcKind::predicate("mood", "HAPPY")).with_priority(1).with_code("glad"))
    .unwrap();
  sys.add_arc(net, transition("ELSE", "A", "C", 0).with_code("sorry")).unwrap();
  sys
}

#[test]
fn predicate_test_selects_branch_and_keeps_input() {
  let sys = moods();
  let mut engine = start(&sys, "A", 0);
  engine.set("mood", "HAPPY");
  assert_eq!(engine.respond("HOW ARE YOU"), "glad");
  assert_eq!(engine.topic(), "TWSUCCESS");
  assert_eq!(engine.get("TWSCRATCH"), "HOW ARE YOU");

  let mut engine = start(&sys, "A", 0);
  engine.set("mood", "SAD");
  assert_eq!(engine.respond("HOW ARE YOU"), "sorry");
  assert_eq!(engine.topic(), "TWSUCCESS");
}

/// `main` calls `sub` from M1 and continues at M2; ALT is the fallback.
fn with_subroutine(sub_pattern: &str) -> System {
  let mut sys = System::new();
  let sub = sys.add_network("sub").unwrap();
  sys.add_node(sub, Node::new("S1")).unwrap();
  sys.add_node(sub, Node::new("S2")).unwrap();
  sys
    .add_arc(sub, DialogueArc::new("SA", "S1", "S2", ArcKind::pattern(sub_pattern)).with_code("in sub"))
    .unwrap();

  let main = sys.add_network("main").unwrap();
  for node in ["M1", "M2", "M3"] {
    sys.add_node(main, Node::new(node)).unwrap();
  }
  sys.add_arc(main, DialogueArc::new("CALL", "M1", "M2", ArcKind::recurrent("S1")).with_priority(2)).unwrap();
  sys.add_arc(main, transition("MB", "M2", "M3", 0).with_code("back in main")).unwrap();
  sys.add_arc(main, transition("ALT", "M1", "M3", 1).with_code("fallback")).unwrap();
  sys
}

#[test]
fn recurrent_call_returns_to_caller() {
  let sys = with_subroutine("*");
  let mut engine = start(&sys, "M1", 0);
  assert_eq!(engine.respond("GO"), "in sub back in main");
  assert_eq!(engine.topic(), "TWSUCCESS");
}

#[test]
fn failed_call_backtracks_in_caller() {
  let sys = with_subroutine("NEVER");
  let mut engine = start(&sys, "M1", 0);
  assert_eq!(engine.respond("GO"), "fallback");
  assert_eq!(engine.topic(), "TWSUCCESS");
}

fn weighted() -> System {
  let mut sys = System::new();
  let net = sys.add_network("coin").unwrap();
  sys.add_node(net, Node::new("A").with_order(Order::Random)).unwrap();
  sys.add_node(net, Node::new("B")).unwrap();
  sys.add_node(net, Node::new("C")).unwrap();
  sys.add_arc(net, transition("X", "A", "B", 3).with_code("x")).unwrap();
  sys.add_arc(net, transition("Y", "A", "C", 1).with_code("y")).unwrap();
  sys
}

#[test]
fn random_dispatch_follows_weights() {
  let sys = weighted();
  let mut heads = 0;
  for seed in 0..400 {
    let mut engine = start(&sys, "A", seed);
    let answer = engine.respond("FLIP");
    assert!(answer == "x" || answer == "y", "{answer}");
    assert_eq!(engine.topic(), "TWSUCCESS");
    if answer == "x" {
      heads += 1;
    }
  }
  // Expected 300 of 400.
  assert!((250..=350).contains(&heads), "{heads}");
}

#[test]
fn recursion_library_unwinds_stack() {
  let markers = Markers::default();
  let cases = [
    ("TWPULL TWPULLSTOP TWRETURN NEXT REST", "NEXT REST"),
    ("TWPULL A B TWPULLSTOP", "TWSUCCESS"),
    ("TWPULL A", "TWFAIL"),
    ("TWPULLSTOP", "TWFAIL"),
    ("TWPULLSTOP TWRETURN M ALT TWPULLSTOP", "ALT TWPULLSTOP"),
  ];
  for (stack, expected) in cases {
    let topics = recursion::topics(&markers);
    let mut engine = Engine::from_topics(&topics, 0);
    engine.set_topic(stack);
    engine.eval("INPUT");
    assert_eq!(engine.topic(), expected, "from {stack}");
  }
}

fn randomizer(values: &[&str]) -> Engine {
  let markers = Markers::default();
  let mut names = NamingAuthority::new();
  for value in values {
    let _ = names.reserve(value);
  }
  let topics = randomize::topics(&markers, values.len(), &names);
  Engine::from_topics(&topics, 0)
}

#[test]
fn randomize_removes_duplicates() {
  let mut engine = randomizer(&["X", "X", "Y"]);
  for _ in 0..20 {
    let answer = engine.eval("TWRANDOMIZE X X Y");
    assert!(answer == "X Y" || answer == "Y X", "{answer}");
  }
  assert_eq!(engine.eval("TWRANDOMIZE"), "");
  assert_eq!(engine.eval("TWRANDOMIZE Y"), "Y");
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(32))]

  #[test]
  fn randomize_yields_each_value_once(picks in proptest::collection::vec(0usize..4, 1..6)) {
    let alphabet = ["P", "Q", "R", "S"];
    let values: Vec<&str> = picks.iter().map(|&i| alphabet[i]).collect();
    let mut engine = randomizer(&values);
    let request = format!("TWRANDOMIZE {}", values.join(" "));

    let answer = engine.eval(&request);
    let mut got: Vec<&str> = answer.split(' ').collect();
    got.sort();
    let mut expected = values.clone();
    expected.sort();
    expected.dedup();
    prop_assert_eq!(got, expected);
  }
}
