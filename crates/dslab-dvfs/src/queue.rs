//! EDF ready queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::task::Task;

struct QueuedTask {
    task: Task,
}

impl Eq for QueuedTask {}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.task.deadline() == other.task.deadline() && self.task.id() == other.task.id()
    }
}

// BinaryHeap is a max-heap, so the comparison is reversed to pop the earliest deadline first.
// Equal deadlines are resolved by the smaller task id.
impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .task
            .deadline()
            .cmp(&self.task.deadline())
            .then_with(|| other.task.id().cmp(&self.task.id()))
    }
}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Queue of ready tasks ordered by (deadline, id).
#[derive(Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<QueuedTask>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.heap.push(QueuedTask { task });
    }

    /// Removes and returns the task with the earliest deadline.
    ///
    /// Panics if the queue is empty.
    pub fn pop_min_deadline(&mut self) -> Task {
        self.pop().expect("pop from empty ready queue")
    }

    /// Removes and returns the task with the earliest deadline, if any.
    pub fn pop(&mut self) -> Option<Task> {
        self.heap.pop().map(|entry| entry.task)
    }

    pub fn peek(&self) -> Option<&Task> {
        self.heap.peek().map(|entry| &entry.task)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u32, deadline: u64) -> Task {
        Task::new(id, 5, 100, deadline).unwrap()
    }

    #[test]
    fn test_earliest_deadline_first() {
        let mut queue = ReadyQueue::new();
        queue.push(task(1, 900));
        queue.push(task(2, 300));
        queue.push(task(3, 600));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek().map(|t| t.id()), Some(2));
        assert_eq!(queue.pop_min_deadline().id(), 2);
        assert_eq!(queue.pop_min_deadline().id(), 3);
        assert_eq!(queue.pop_min_deadline().id(), 1);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_tie_broken_by_id() {
        let mut queue = ReadyQueue::new();
        queue.push(task(5, 500));
        queue.push(task(2, 500));
        queue.push(task(9, 100));
        queue.push(task(1, 500));
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop()).map(|t| t.id()).collect();
        assert_eq!(order, vec![9, 1, 2, 5]);
    }

    #[test]
    #[should_panic(expected = "pop from empty ready queue")]
    fn test_pop_from_empty_queue() {
        ReadyQueue::new().pop_min_deadline();
    }
}
