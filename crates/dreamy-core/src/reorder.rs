use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::todo::TodoItem;
use crate::view::TodoQuery;

/// Why a drag was rejected. Reordering is only meaningful against the full
/// manually-ordered list, so any active derivation blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderBlocked {
    SortOverride,
    PriorityFilter,
    SearchActive,
}

impl ReorderBlocked {
    pub fn message(self) -> &'static str {
        "Reordering is only available in the default view (no filters or alternate sorts)."
    }
}

pub fn check_reorder_allowed(query: &TodoQuery) -> Result<(), ReorderBlocked> {
    if query.sort != crate::view::SortMode::Manual {
        return Err(ReorderBlocked::SortOverride);
    }
    if query.priority.is_some() {
        return Err(ReorderBlocked::PriorityFilter);
    }
    if !query.search.trim().is_empty() {
        return Err(ReorderBlocked::SearchActive);
    }
    Ok(())
}

/// One `PATCH /todos/{id}/` body, `{ "position": n }`, plus the id to route
/// it with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: i64,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan {
    /// The full list in its new order, positions renumbered 1..N.
    pub ordered: Vec<TodoItem>,
    /// Only the items whose position actually changed.
    pub updates: Vec<PositionUpdate>,
}

/// Computes the array move for a drop. Works by identifier, not visual
/// index, so a stale render cannot move the wrong item. Unknown ids and
/// self-drops are no-ops. Positions are renumbered densely across the whole
/// list, which also repairs any gaps the server handed us.
pub fn plan_move(todos: &[TodoItem], dragged_id: i64, target_id: i64) -> Option<ReorderPlan> {
    if dragged_id == target_id {
        return None;
    }

    let mut ordered = todos.to_vec();
    ordered.sort_by_key(|todo| todo.position);

    let old_index = ordered.iter().position(|todo| todo.id == dragged_id)?;
    let new_index = ordered.iter().position(|todo| todo.id == target_id)?;

    let moved = ordered.remove(old_index);
    ordered.insert(new_index, moved);

    let mut updates = Vec::new();
    for (index, todo) in ordered.iter_mut().enumerate() {
        let next = index as i64 + 1;
        if todo.position != next {
            todo.position = next;
            updates.push(PositionUpdate {
                id: todo.id,
                position: next,
            });
        }
    }

    debug!(
        dragged_id,
        target_id,
        changed = updates.len(),
        "planned reorder"
    );

    Some(ReorderPlan { ordered, updates })
}

/// Serialized persistence for reorders. The collaborator has no atomic
/// reorder endpoint, only per-item position PATCHes, so this queue keeps a
/// committed/optimistic duality: at most one batch is in flight, rapid
/// successive drags collapse onto the newest target ordering, and a failed
/// batch yields the last committed ordering back to the caller for revert.
#[derive(Debug, Default)]
pub struct ReorderQueue {
    committed: Vec<TodoItem>,
    in_flight: Option<Vec<TodoItem>>,
    queued: Option<Vec<TodoItem>>,
}

impl ReorderQueue {
    pub fn new(committed: Vec<TodoItem>) -> Self {
        Self {
            committed,
            in_flight: None,
            queued: None,
        }
    }

    /// Replaces the committed baseline after a full reload. Drops anything
    /// pending; the reload already reflects server truth.
    pub fn reset(&mut self, committed: Vec<TodoItem>) {
        self.committed = committed;
        self.in_flight = None;
        self.queued = None;
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queued.is_none()
    }

    /// True while any batch is unacknowledged; drives the "reordering"
    /// indicator.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Offers a new target ordering. Returns the batch to send now, or
    /// `None` when a batch is already in flight, in which case the ordering
    /// is parked and overwrites any previously parked one (last write wins).
    pub fn submit(&mut self, target: Vec<TodoItem>) -> Option<Vec<PositionUpdate>> {
        if self.in_flight.is_some() {
            debug!("reorder batch in flight, collapsing onto newest ordering");
            self.queued = Some(target);
            return None;
        }

        let batch = diff_positions(&self.committed, &target);
        self.in_flight = Some(target);
        Some(batch)
    }

    /// Acknowledges the in-flight batch. Returns the next batch to send if a
    /// drag was parked while this one was out.
    pub fn complete_success(&mut self) -> Option<Vec<PositionUpdate>> {
        if let Some(acknowledged) = self.in_flight.take() {
            self.committed = acknowledged;
        }

        let next = self.queued.take()?;
        // Diff against the freshly committed ordering: positions the parked
        // drag inherited from an optimistic state may already match server
        // truth, or may differ from it in items the optimistic diff skipped.
        let batch = diff_positions(&self.committed, &next);
        if batch.is_empty() {
            self.committed = next;
            return None;
        }
        self.in_flight = Some(next);
        Some(batch)
    }

    /// Drops everything pending and returns the last committed ordering so
    /// the caller can revert its optimistic state.
    pub fn complete_failure(&mut self) -> Vec<TodoItem> {
        self.in_flight = None;
        self.queued = None;
        self.committed.clone()
    }

    pub fn committed(&self) -> &[TodoItem] {
        &self.committed
    }
}

fn diff_positions(committed: &[TodoItem], target: &[TodoItem]) -> Vec<PositionUpdate> {
    let baseline: BTreeMap<i64, i64> = committed
        .iter()
        .map(|todo| (todo.id, todo.position))
        .collect();

    target
        .iter()
        .filter(|todo| baseline.get(&todo.id) != Some(&todo.position))
        .map(|todo| PositionUpdate {
            id: todo.id,
            position: todo.position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::todo::Priority;
    use crate::view::SortMode;

    fn todo(id: i64, position: i64) -> TodoItem {
        TodoItem {
            id,
            title: format!("todo {id}"),
            description: String::new(),
            priority: Priority::Moderate,
            is_completed: false,
            position,
            todo_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("date"),
            created_at: None,
            updated_at: None,
        }
    }

    fn positions(todos: &[TodoItem]) -> Vec<(i64, i64)> {
        todos.iter().map(|t| (t.id, t.position)).collect()
    }

    #[test]
    fn guard_rejects_every_non_default_view() {
        let mut query = TodoQuery::default();
        assert_eq!(check_reorder_allowed(&query), Ok(()));

        query.sort = SortMode::DateDesc;
        assert_eq!(
            check_reorder_allowed(&query),
            Err(ReorderBlocked::SortOverride)
        );

        query.sort = SortMode::Manual;
        query.priority = Some(Priority::Low);
        assert_eq!(
            check_reorder_allowed(&query),
            Err(ReorderBlocked::PriorityFilter)
        );

        query.priority = None;
        query.search = "rent".to_string();
        assert_eq!(
            check_reorder_allowed(&query),
            Err(ReorderBlocked::SearchActive)
        );
    }

    #[test]
    fn drag_last_onto_first_renumbers_everything() {
        let todos = vec![todo(1, 1), todo(2, 2), todo(3, 3)];

        let plan = plan_move(&todos, 3, 1).expect("plan");
        assert_eq!(positions(&plan.ordered), vec![(3, 1), (1, 2), (2, 3)]);
        assert_eq!(
            plan.updates,
            vec![
                PositionUpdate { id: 3, position: 1 },
                PositionUpdate { id: 1, position: 2 },
                PositionUpdate { id: 2, position: 3 },
            ]
        );
    }

    #[test]
    fn move_down_only_touches_the_affected_range() {
        let todos = vec![todo(1, 1), todo(2, 2), todo(3, 3), todo(4, 4)];

        let plan = plan_move(&todos, 1, 2).expect("plan");
        assert_eq!(
            positions(&plan.ordered),
            vec![(2, 1), (1, 2), (3, 3), (4, 4)]
        );
        assert_eq!(
            plan.updates,
            vec![
                PositionUpdate { id: 2, position: 1 },
                PositionUpdate { id: 1, position: 2 },
            ]
        );
    }

    #[test]
    fn renumbering_is_dense_even_with_gappy_input() {
        let todos = vec![todo(1, 10), todo(2, 20), todo(3, 45)];

        let plan = plan_move(&todos, 2, 3).expect("plan");
        let mut got: Vec<i64> = plan.ordered.iter().map(|t| t.position).collect();
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3]);
        // Every item changed: the move plus the gap repair.
        assert_eq!(plan.updates.len(), 3);
    }

    #[test]
    fn unknown_ids_and_self_drops_are_noops() {
        let todos = vec![todo(1, 1), todo(2, 2)];
        assert!(plan_move(&todos, 1, 1).is_none());
        assert!(plan_move(&todos, 9, 1).is_none());
        assert!(plan_move(&todos, 1, 9).is_none());
    }

    #[test]
    fn moves_resolve_by_id_not_visual_index() {
        // Position order differs from vec order; the plan must follow ids
        // through the position sort.
        let todos = vec![todo(7, 3), todo(8, 1), todo(9, 2)];

        let plan = plan_move(&todos, 7, 8).expect("plan");
        assert_eq!(positions(&plan.ordered), vec![(7, 1), (8, 2), (9, 3)]);
    }

    #[test]
    fn queue_sends_first_batch_immediately() {
        let initial = vec![todo(1, 1), todo(2, 2), todo(3, 3)];
        let mut queue = ReorderQueue::new(initial.clone());

        let plan = plan_move(&initial, 3, 1).expect("plan");
        let batch = queue.submit(plan.ordered.clone()).expect("batch");
        assert_eq!(batch, plan.updates);
        assert!(queue.is_syncing());

        assert!(queue.complete_success().is_none());
        assert!(queue.is_idle());
        assert_eq!(positions(queue.committed()), vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn rapid_drags_collapse_to_last_write() {
        let initial = vec![todo(1, 1), todo(2, 2), todo(3, 3)];
        let mut queue = ReorderQueue::new(initial.clone());

        let first = plan_move(&initial, 3, 1).expect("plan");
        queue.submit(first.ordered.clone()).expect("first batch");

        // Two more drags land while the first batch is out; only the newest
        // ordering survives.
        let second = plan_move(&first.ordered, 1, 2).expect("plan");
        assert!(queue.submit(second.ordered.clone()).is_none());
        let third = plan_move(&second.ordered, 2, 3).expect("plan");
        assert!(queue.submit(third.ordered.clone()).is_none());

        let follow_up = queue.complete_success().expect("follow-up batch");
        // The follow-up is diffed against the committed ordering, not the
        // optimistic one the drag was planned against.
        let committed: BTreeMap<i64, i64> = queue
            .committed()
            .iter()
            .map(|t| (t.id, t.position))
            .collect();
        for update in &follow_up {
            assert_ne!(committed.get(&update.id), Some(&update.position));
        }

        assert!(queue.complete_success().is_none());
        assert_eq!(
            positions(queue.committed()),
            positions(&third.ordered)
        );
    }

    #[test]
    fn failure_reverts_to_committed_ordering() {
        let initial = vec![todo(1, 1), todo(2, 2), todo(3, 3)];
        let mut queue = ReorderQueue::new(initial.clone());

        let plan = plan_move(&initial, 2, 1).expect("plan");
        queue.submit(plan.ordered).expect("batch");

        let reverted = queue.complete_failure();
        assert_eq!(positions(&reverted), positions(&initial));
        assert!(queue.is_idle());
    }

    #[test]
    fn undo_drag_still_goes_out_after_ack() {
        let initial = vec![todo(1, 1), todo(2, 2)];
        let mut queue = ReorderQueue::new(initial.clone());

        let swapped = plan_move(&initial, 2, 1).expect("plan");
        queue.submit(swapped.ordered.clone()).expect("batch");

        // Drag back to the original ordering while the swap is in flight.
        // Once the swap commits, the parked ordering differs from the new
        // committed baseline, so it still has to be persisted.
        let restored = plan_move(&swapped.ordered, 2, 1).expect("plan");
        assert!(queue.submit(restored.ordered.clone()).is_none());

        let follow_up = queue.complete_success().expect("follow-up");
        assert!(!follow_up.is_empty());
        assert!(queue.complete_success().is_none());
        assert_eq!(positions(queue.committed()), positions(&initial));
    }

    #[test]
    fn parked_ordering_matching_committed_is_swallowed() {
        let initial = vec![todo(1, 1), todo(2, 2)];
        let mut queue = ReorderQueue::new(initial.clone());

        let swapped = plan_move(&initial, 2, 1).expect("plan");
        queue.submit(swapped.ordered.clone()).expect("batch");

        // Two collapsing drags: away and back to the in-flight ordering.
        let away = plan_move(&swapped.ordered, 2, 1).expect("plan");
        assert!(queue.submit(away.ordered.clone()).is_none());
        let back = plan_move(&away.ordered, 2, 1).expect("plan");
        assert_eq!(positions(&back.ordered), positions(&swapped.ordered));
        assert!(queue.submit(back.ordered.clone()).is_none());

        // The parked ordering equals what just committed, so no follow-up
        // batch is issued and the queue settles.
        assert!(queue.complete_success().is_none());
        assert!(queue.is_idle());
        assert_eq!(positions(queue.committed()), positions(&swapped.ordered));
    }
}
