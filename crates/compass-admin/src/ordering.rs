//! Drag-ordering state machine for the admin card list.
//!
//! The controller mediates a drag gesture into a committed reorder call.
//! On drop, the local list is respliced immediately (optimistic update) and
//! the full id sequence is handed back for an asynchronous reorder request;
//! the pre-drag snapshot is kept until the server confirms, so a failed
//! commit restores the confirmed order instead of leaving a silent
//! discrepancy on screen.
//!
//! The controller is deliberately free of HTTP: the caller owns the
//! [`crate::client::ApiClient`] round-trip and reports its outcome via
//! [`OrderingController::confirm`] / [`OrderingController::rollback`].

use compass_core::card::{Card, CardId};

// ─── Phase ───────────────────────────────────────────────────────────────────

/// Where the view is in the drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Server-confirmed order displayed.
  Viewing,
  /// A drag gesture is in flight from `source`.
  Dragging { source: usize },
  /// The local list was respliced on drop; the reorder call is not yet
  /// confirmed.
  Pending,
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// Local ordering state for one tenant's card list.
pub struct OrderingController {
  cards:    Vec<Card>,
  phase:    Phase,
  /// The confirmed order as of drag start; restored on commit failure.
  snapshot: Option<Vec<Card>>,
}

impl OrderingController {
  pub fn new(cards: Vec<Card>) -> Self {
    Self {
      cards,
      phase: Phase::Viewing,
      snapshot: None,
    }
  }

  pub fn cards(&self) -> &[Card] {
    &self.cards
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// Start a drag from `source`. Returns `false` (and stays in `Viewing`)
  /// when the index is out of bounds or a commit is still pending.
  pub fn begin_drag(&mut self, source: usize) -> bool {
    if self.phase != Phase::Viewing || source >= self.cards.len() {
      return false;
    }
    self.phase = Phase::Dragging { source };
    true
  }

  /// Finish the drag. `destination = None` models a drop outside the
  /// droppable area; a destination past the end of the list lands on the
  /// last position.
  ///
  /// Returns the full id sequence to send to the server when the drop
  /// actually moved something; `None` is a no-op transition back to
  /// `Viewing` with the list untouched.
  pub fn drop_at(&mut self, destination: Option<usize>) -> Option<Vec<CardId>> {
    let Phase::Dragging { source } = self.phase else {
      return None;
    };
    self.phase = Phase::Viewing;

    let destination = destination?.min(self.cards.len() - 1);
    if destination == source {
      return None;
    }

    // Splice: remove from source, insert at destination. Stable for every
    // other element.
    self.snapshot = Some(self.cards.clone());
    let dragged = self.cards.remove(source);
    self.cards.insert(destination, dragged);
    self.phase = Phase::Pending;

    Some(self.cards.iter().map(|c| c.id).collect())
  }

  /// The server accepted the reorder; the optimistic order is now the
  /// confirmed order.
  pub fn confirm(&mut self) {
    self.snapshot = None;
    self.phase = Phase::Viewing;
  }

  /// The reorder call failed: restore the pre-drag snapshot.
  pub fn rollback(&mut self) {
    if let Some(snapshot) = self.snapshot.take() {
      self.cards = snapshot;
    }
    self.phase = Phase::Viewing;
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use compass_core::{
    TenantId,
    card::{Card, CardKind},
  };

  use super::*;

  fn card(id: i64) -> Card {
    Card {
      id,
      tenant_id: TenantId::from("biz_1"),
      order: id,
      kind: CardKind::Text,
      title: Some(format!("card {id}")),
      content: None,
      media_url: None,
      media_mime_type: None,
      created_at: Utc::now(),
      updated_at: Utc::now(),
      created_by: None,
    }
  }

  fn controller() -> OrderingController {
    OrderingController::new(vec![card(1), card(2), card(3), card(4)])
  }

  fn ids(c: &OrderingController) -> Vec<i64> {
    c.cards().iter().map(|c| c.id).collect()
  }

  #[test]
  fn drop_splices_and_returns_full_id_list() {
    let mut c = controller();
    assert!(c.begin_drag(0));
    let committed = c.drop_at(Some(2)).unwrap();

    assert_eq!(committed, vec![2, 3, 1, 4]);
    assert_eq!(ids(&c), vec![2, 3, 1, 4]);
    assert_eq!(c.phase(), Phase::Pending);
  }

  #[test]
  fn splice_is_stable_for_untouched_elements() {
    let mut c = controller();
    c.begin_drag(3);
    let committed = c.drop_at(Some(1)).unwrap();
    // 1 stays first, 2 and 3 shift right in their original relative order.
    assert_eq!(committed, vec![1, 4, 2, 3]);
  }

  #[test]
  fn drop_outside_droppable_is_a_noop() {
    let mut c = controller();
    c.begin_drag(1);
    assert!(c.drop_at(None).is_none());
    assert_eq!(ids(&c), vec![1, 2, 3, 4]);
    assert_eq!(c.phase(), Phase::Viewing);
  }

  #[test]
  fn drop_on_source_index_is_a_noop() {
    let mut c = controller();
    c.begin_drag(2);
    assert!(c.drop_at(Some(2)).is_none());
    assert_eq!(ids(&c), vec![1, 2, 3, 4]);
  }

  #[test]
  fn drop_past_the_end_lands_on_the_last_position() {
    let mut c = controller();
    c.begin_drag(0);
    let committed = c.drop_at(Some(99)).unwrap();
    assert_eq!(committed, vec![2, 3, 4, 1]);
    assert_eq!(c.phase(), Phase::Pending);
  }

  #[test]
  fn drop_past_the_end_from_the_last_position_is_a_noop() {
    let mut c = controller();
    c.begin_drag(3);
    assert!(c.drop_at(Some(99)).is_none());
    assert_eq!(ids(&c), vec![1, 2, 3, 4]);
    assert_eq!(c.phase(), Phase::Viewing);
  }

  #[test]
  fn begin_drag_out_of_bounds_is_rejected() {
    let mut c = controller();
    assert!(!c.begin_drag(4));
    assert_eq!(c.phase(), Phase::Viewing);
  }

  #[test]
  fn confirm_discards_the_snapshot() {
    let mut c = controller();
    c.begin_drag(0);
    c.drop_at(Some(3)).unwrap();
    c.confirm();

    assert_eq!(c.phase(), Phase::Viewing);
    assert_eq!(ids(&c), vec![2, 3, 4, 1]);
    // A later rollback must not resurrect the old order.
    c.rollback();
    assert_eq!(ids(&c), vec![2, 3, 4, 1]);
  }

  #[test]
  fn rollback_restores_the_pre_drag_order() {
    let mut c = controller();
    c.begin_drag(0);
    c.drop_at(Some(3)).unwrap();
    assert_eq!(ids(&c), vec![2, 3, 4, 1]);

    c.rollback();
    assert_eq!(ids(&c), vec![1, 2, 3, 4]);
    assert_eq!(c.phase(), Phase::Viewing);
  }

  #[test]
  fn no_new_drag_while_commit_is_pending() {
    let mut c = controller();
    c.begin_drag(0);
    c.drop_at(Some(1)).unwrap();
    assert!(!c.begin_drag(0));
  }
}
