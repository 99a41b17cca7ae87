use crate::Cell;
use std::collections::HashMap;

/// Walk parent pointers from `goal` back to `start` and return the path in
/// start-to-goal order.
///
/// # Panics
///
/// Panics if the chain breaks or loops before reaching `start`. Discovery
/// records a parent for every cell it enqueues, so this only happens if the
/// engine's bookkeeping is wrong.
pub fn reconstruct(parent_of: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        let parent = match parent_of.get(&current) {
            Some(&p) => p,
            None => panic!("internal invariant violated: {current} has no parent on the way to {start}"),
        };
        path.push(parent);
        if path.len() > parent_of.len() + 1 {
            panic!("internal invariant violated: parent chain from {goal} loops");
        }
        current = parent;
    }

    path.reverse();
    path
}
