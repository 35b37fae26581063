//! Scheduled task and its admission rules.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Task identifier, unique within a batch.
pub type TaskId = u32;

/// Lowest allowed task priority.
pub const MIN_PRIORITY: u8 = 1;
/// Highest allowed task priority.
pub const MAX_PRIORITY: u8 = 10;

/// Reason for rejecting a task at admission.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// Task ids start from 1.
    ZeroId,
    /// Priority is outside of `MIN_PRIORITY..=MAX_PRIORITY`.
    PriorityOutOfRange { id: TaskId, priority: u8 },
    /// Task requires no work.
    ZeroBurstTime { id: TaskId },
    /// Task has an empty deadline.
    ZeroDeadline { id: TaskId },
    /// Another task in the batch has the same id.
    DuplicateId { id: TaskId },
}

impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionError::ZeroId => write!(f, "task id must be positive"),
            AdmissionError::PriorityOutOfRange { id, priority } => write!(
                f,
                "task {id}: priority {priority} is not in range [{MIN_PRIORITY}, {MAX_PRIORITY}]"
            ),
            AdmissionError::ZeroBurstTime { id } => write!(f, "task {id}: burst time must be positive"),
            AdmissionError::ZeroDeadline { id } => write!(f, "task {id}: deadline must be positive"),
            AdmissionError::DuplicateId { id } => write!(f, "task {id} is specified more than once"),
        }
    }
}

impl std::error::Error for AdmissionError {}

/// Represents a unit of work submitted to the scheduler.
///
/// All tasks of a batch arrive at the batch start (time 0) and are immutable after admission,
/// except for the completion flag which is maintained by the scheduler.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    priority: u8,
    burst_time: u64,
    deadline: u64,
    completed: bool,
    arrival_time: f64,
}

impl Task {
    /// Creates a new task checking the admission rules.
    pub fn new(id: TaskId, priority: u8, burst_time: u64, deadline: u64) -> Result<Self, AdmissionError> {
        if id == 0 {
            return Err(AdmissionError::ZeroId);
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(AdmissionError::PriorityOutOfRange { id, priority });
        }
        if burst_time == 0 {
            return Err(AdmissionError::ZeroBurstTime { id });
        }
        if deadline == 0 {
            return Err(AdmissionError::ZeroDeadline { id });
        }
        Ok(Self {
            id,
            priority,
            burst_time,
            deadline,
            completed: false,
            arrival_time: 0.,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Recorded for reporting only, does not affect the execution order.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// CPU time required by the task in ms.
    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    /// Deadline in ms relative to the batch start.
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Simulated time at which the task entered the system (in seconds).
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub(crate) fn admit(&mut self, arrival_time: f64) {
        self.completed = false;
        self.arrival_time = arrival_time;
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }

    /// Returns the ratio of burst time to deadline.
    ///
    /// Can exceed 1 if the task cannot finish before its deadline even when started immediately.
    pub fn tightness(&self) -> f64 {
        self.burst_time as f64 / self.deadline as f64
    }

    /// Returns the task execution time in seconds.
    pub fn execution_time(&self) -> f64 {
        self.burst_time as f64 / 1000.
    }
}

/// A batch of admitted tasks with unique ids.
#[derive(Debug, Clone, Default)]
pub struct TaskBatch {
    tasks: Vec<Task>,
}

impl TaskBatch {
    /// Creates a batch from admitted tasks, rejecting duplicate ids.
    ///
    /// Tasks can only be obtained through [`Task::new`], so a batch always satisfies the admission rules.
    pub fn new(tasks: Vec<Task>) -> Result<Self, AdmissionError> {
        let mut ids = FxHashSet::default();
        for task in tasks.iter() {
            if !ids.insert(task.id) {
                return Err(AdmissionError::DuplicateId { id: task.id });
            }
        }
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_rules() {
        assert!(Task::new(1, 5, 100, 1000).is_ok());
        assert_eq!(Task::new(0, 5, 100, 1000), Err(AdmissionError::ZeroId));
        assert_eq!(
            Task::new(2, 0, 100, 1000),
            Err(AdmissionError::PriorityOutOfRange { id: 2, priority: 0 })
        );
        assert_eq!(
            Task::new(2, 11, 100, 1000),
            Err(AdmissionError::PriorityOutOfRange { id: 2, priority: 11 })
        );
        assert_eq!(Task::new(3, 1, 0, 1000), Err(AdmissionError::ZeroBurstTime { id: 3 }));
        assert_eq!(Task::new(4, 10, 100, 0), Err(AdmissionError::ZeroDeadline { id: 4 }));
    }

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new(7, 3, 250, 1000).unwrap();
        assert!(!task.is_completed());
        assert_eq!(task.arrival_time(), 0.);
        assert_eq!((task.id(), task.priority(), task.burst_time(), task.deadline()), (7, 3, 250, 1000));
        assert_eq!(task.tightness(), 0.25);
        assert_eq!(task.execution_time(), 0.25);
    }

    #[test]
    fn test_duplicate_ids() {
        let tasks = vec![
            Task::new(1, 5, 100, 1000).unwrap(),
            Task::new(2, 5, 100, 1000).unwrap(),
            Task::new(1, 2, 300, 500).unwrap(),
        ];
        assert_eq!(TaskBatch::new(tasks).unwrap_err(), AdmissionError::DuplicateId { id: 1 });
        assert!(TaskBatch::new(Vec::new()).unwrap().is_empty());
    }
}
