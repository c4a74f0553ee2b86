//! Pre-filled task queue shared by the worker pool.
//!
//! The queue is fully populated before any worker starts, so a worker
//! only ever observes "non-empty, claim one task" or "empty, exit" and
//! never waits on a producer. Each task is claimed by exactly one
//! `next()` call across every clone of the queue.

use crossbeam_channel::{bounded, Receiver};
use metaflux_core::EntityId;

/// Thread-safe queue of entities to perturb.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    receiver: Receiver<EntityId>,
}

impl TaskQueue {
    /// Builds a queue pre-filled with the given entities. The sending
    /// side is dropped here, so the queue can only drain.
    pub fn prefilled(entities: impl IntoIterator<Item = EntityId>) -> Self {
        let items: Vec<EntityId> = entities.into_iter().collect();
        let (sender, receiver) = bounded(items.len());
        for entity in items {
            // Capacity equals the task count; this cannot block.
            sender
                .send(entity)
                .expect("pre-filling a queue sized to its task count");
        }
        TaskQueue { receiver }
    }

    /// Claims the next task, or `None` when the queue is drained.
    pub fn next(&self) -> Option<EntityId> {
        self.receiver.try_recv().ok()
    }

    /// Number of tasks not yet claimed.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if every task has been claimed.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
