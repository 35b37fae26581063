//! System utilization estimate.

use crate::task::Task;

/// Returns the total utilization of tasks which are not completed yet, clamped to 1.
///
/// Utilization of a task is the ratio of its burst time to its deadline.
pub fn system_utilization<'a, I>(tasks: I) -> f64
where
    I: IntoIterator<Item = &'a Task>,
{
    let total: f64 = tasks
        .into_iter()
        .filter(|task| !task.is_completed())
        .map(|task| task.tightness())
        .sum();
    total.min(1.)
}
