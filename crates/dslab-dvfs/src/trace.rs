//! Execution trace.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Describes the execution of a single task.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub id: TaskId,
    pub priority: u8,
    /// Burst time in ms.
    pub burst_time: u64,
    /// Deadline in ms.
    pub deadline: u64,
    /// CPU frequency in MHz.
    pub frequency: u32,
    /// System utilization at dispatch time.
    pub utilization: f64,
    /// CPU power in W.
    pub power: f64,
    /// Energy consumed by the task in J.
    pub energy: f64,
    /// Simulated start time in seconds.
    pub start_time: f64,
    /// Simulated finish time in seconds.
    pub finish_time: f64,
}

/// Point of the cumulative energy series.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct EnergySample {
    /// Simulated time in seconds.
    pub time: f64,
    /// Energy consumed since the batch start in J.
    pub energy: f64,
}

/// Append-only log of executed tasks and the cumulative energy series.
///
/// Both series have the same length and order: the i-th sample corresponds to the i-th executed task.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Trace {
    records: Vec<ExecutionRecord>,
    energy_series: Vec<EnergySample>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the record of an executed task along with the energy sample taken at its completion.
    pub fn log_execution(&mut self, record: ExecutionRecord, total_energy: f64) {
        debug_assert!(self
            .energy_series
            .last()
            .map_or(true, |last| last.time <= record.finish_time && last.energy <= total_energy));
        self.energy_series.push(EnergySample {
            time: record.finish_time,
            energy: total_energy,
        });
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn energy_series(&self) -> &[EnergySample] {
        &self.energy_series
    }

    /// Returns the energy consumed by all executed tasks in J.
    pub fn total_energy(&self) -> f64 {
        self.energy_series.last().map_or(0., |sample| sample.energy)
    }

    /// Returns the ids of executed tasks in execution order.
    pub fn execution_order(&self) -> Vec<TaskId> {
        self.records.iter().map(|record| record.id).collect()
    }

    /// Returns the finish time of the last executed task.
    pub fn makespan(&self) -> f64 {
        self.records.last().map_or(0., |record| record.finish_time)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
