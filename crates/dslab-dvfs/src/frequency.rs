//! DVFS frequency selection.

use dyn_clone::{clone_trait_object, DynClone};

use crate::task::Task;

/// Lowest frequency (in MHz) the CPU can be switched to.
pub const MIN_FREQUENCY: u32 = 500;
/// Highest frequency (in MHz) the CPU can be switched to.
pub const MAX_FREQUENCY: u32 = 2000;
/// Frequency (in MHz) the CPU runs at before the first task is dispatched.
pub const DEFAULT_FREQUENCY: u32 = 1000;

/// Chooses CPU frequency for the dispatched task.
pub trait FrequencySelector: DynClone {
    /// Returns the frequency in MHz to run `task` at.
    ///
    /// * `system_utilization` - utilization of not yet completed tasks (including `task`) in 0.0-1.0 range.
    fn select_frequency(&self, task: &Task, system_utilization: f64) -> u32;
}

clone_trait_object!(FrequencySelector);

/// Open-loop selector picking one of three frequencies by the task's own tightness
/// (ratio of burst time to deadline).
///
/// The system utilization is ignored.
#[derive(Clone, Debug)]
pub struct SlackFrequencySelector {
    low_threshold: f64,
    high_threshold: f64,
    low_frequency: u32,
    medium_frequency: u32,
    high_frequency: u32,
}

impl SlackFrequencySelector {
    /// Creates a selector using `low_frequency` below `low_threshold`,
    /// `high_frequency` from `high_threshold` and `medium_frequency` in between.
    pub fn new(
        low_threshold: f64,
        high_threshold: f64,
        low_frequency: u32,
        medium_frequency: u32,
        high_frequency: u32,
    ) -> Self {
        Self {
            low_threshold,
            high_threshold,
            low_frequency,
            medium_frequency,
            high_frequency,
        }
    }
}

impl Default for SlackFrequencySelector {
    fn default() -> Self {
        Self::new(0.3, 0.7, 800, 1200, 1800)
    }
}

impl FrequencySelector for SlackFrequencySelector {
    fn select_frequency(&self, task: &Task, _system_utilization: f64) -> u32 {
        let ratio = task.tightness();
        if ratio < self.low_threshold {
            self.low_frequency
        } else if ratio < self.high_threshold {
            self.medium_frequency
        } else {
            self.high_frequency
        }
    }
}

/// Selects frequency using the default [`SlackFrequencySelector`].
pub fn select_frequency(task: &Task, system_utilization: f64) -> u32 {
    SlackFrequencySelector::default().select_frequency(task, system_utilization)
}

/// Checks whether the CPU can be switched to `frequency`.
pub fn is_supported(frequency: u32) -> bool {
    (MIN_FREQUENCY..=MAX_FREQUENCY).contains(&frequency)
}
