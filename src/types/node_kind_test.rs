//! Tests for `NodeKind`.

use super::{Interaction, NodeKind, Order, Position};

#[test]
fn derive_covers_all_positions() {
  let k = |i, o| NodeKind::derive(i, o, Interaction::Input, Order::Random).position;
  assert_eq!(k(0, 0), Position::Isolated);
  assert_eq!(k(0, 2), Position::Enter(Order::Random));
  assert_eq!(k(3, 0), Position::Exit);
  assert_eq!(k(1, 1), Position::Inner(Order::Random));
}

#[test]
fn exit_and_isolated_have_no_order() {
  assert_eq!(NodeKind::derive(1, 0, Interaction::Processing, Order::Random).order(), None);
  assert_eq!(NodeKind::derive(0, 0, Interaction::Processing, Order::Random).order(), None);
  assert_eq!(
    NodeKind::derive(0, 1, Interaction::Processing, Order::Random).order(),
    Some(Order::Random)
  );
}

#[test]
fn display_names_each_axis() {
  let kind = NodeKind::derive(1, 2, Interaction::Input, Order::Ordered);
  assert_eq!(kind.to_string(), "inner/ordered/input");
  let kind = NodeKind::derive(1, 0, Interaction::Processing, Order::Ordered);
  assert_eq!(kind.to_string(), "exit/processing");
}

#[test]
fn parse_axes() {
  assert_eq!("Input".parse::<Interaction>(), Ok(Interaction::Input));
  assert_eq!("random".parse::<Order>(), Ok(Order::Random));
  assert!("sideways".parse::<Order>().is_err());
}
