//! Tests for `Update` construction.

use super::{Interaction, NodeKind, Position, UpdateBuilder};

#[test]
fn empty_builder_gives_empty_update() {
  assert!(UpdateBuilder::new().build().is_empty());
}

#[test]
fn builder_keeps_each_part() {
  let exit = NodeKind { position: Position::Exit, interaction: Interaction::Processing };
  let isolated = NodeKind { position: Position::Isolated, interaction: Interaction::Processing };
  let update = UpdateBuilder::new()
    .switched("c", exit, isolated)
    .removed_arc("bc")
    .enter_removed("a")
    .invalidated("call")
    .build();
  assert!(!update.is_empty());
  assert_eq!(update.switched()[0].from, exit);
  assert_eq!(update.removed_arcs(), ["bc".to_string()]);
  assert_eq!(update.enter_removed(), ["a".to_string()]);
  assert_eq!(update.invalidated_recurrent(), ["call".to_string()]);
  assert!(update.enter_added().is_empty());
}
