//! Stack-simulation library.
//!
//! The pseudo-stack lives in the topic, top word first. Every network a
//! conversation enters leaves its pull-stop marker below the arcs it still
//! has to try; a recurrent call additionally leaves `RETURN node` below
//! that. An exit node pushes the pull marker, and these topics unwind:
//!
//! | topic                        | effect                                   |
//! |------------------------------|------------------------------------------|
//! | `PULL PULLSTOP RETURN *`     | call done, resume at the return node     |
//! | `PULL PULLSTOP *`            | top-level network done, success          |
//! | `PULL _ *`                   | discard one untried alternative          |
//! | `PULL *`                     | nothing to unwind into, fail             |
//! | `PULLSTOP RETURN _ *`        | call exhausted, backtrack in the caller  |
//! | `PULLSTOP *`                 | top-level network exhausted, fail        |

use tracing::instrument;

use crate::markers::Markers;
use crate::rules::syntax::{self, WILDCARD_MANY, WILDCARD_ONE};
use crate::rules::{Category, Element, Topic, spaced};

fn topic(words: &[&str], template: Vec<Element>) -> Topic {
  Topic::new(syntax::join(words.iter().copied())).with(Category::unconditional(template))
}

fn resubmit() -> Element {
  Element::srai(vec![Element::star(1)])
}

#[instrument(level = "trace", skip_all)]
pub fn topics(markers: &Markers) -> Vec<Topic> {
  let pull = markers.pull.as_str();
  let stop = markers.pull_stop.as_str();
  let ret = markers.ret.as_str();
  let marked = |marker: &str, rest: u32| {
    Element::set_topic(spaced([Element::text(marker), Element::topic_star(rest)]))
  };

  vec![
    topic(
      &[pull, stop, ret, WILDCARD_MANY],
      vec![Element::set_topic(vec![Element::topic_star(1)]), resubmit()],
    ),
    topic(&[pull, stop, WILDCARD_MANY], vec![marked(&markers.success, 1)]),
    topic(&[pull, WILDCARD_ONE, WILDCARD_MANY], vec![marked(pull, 2), resubmit()]),
    topic(&[pull, WILDCARD_MANY], vec![marked(&markers.fail, 1)]),
    topic(
      &[stop, ret, WILDCARD_ONE, WILDCARD_MANY],
      vec![Element::set_topic(vec![Element::topic_star(2)]), resubmit()],
    ),
    topic(&[stop, WILDCARD_MANY], vec![marked(&markers.fail, 1)]),
  ]
}
