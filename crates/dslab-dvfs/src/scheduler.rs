//! EDF scheduler with DVFS and energy accounting.

use std::thread;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::frequency::{is_supported, FrequencySelector, SlackFrequencySelector, DEFAULT_FREQUENCY};
use crate::power::{CmosCpuPowerModel, CpuPowerModel};
use crate::queue::ReadyQueue;
use crate::task::{TaskBatch, TaskId};
use crate::trace::{EnergySample, ExecutionRecord, Trace};
use crate::utilization::system_utilization;
use crate::{log_debug, log_info};

/// Scheduler configuration.
#[derive(Clone, Debug, Default)]
pub struct SchedulerConfig {
    /// Wall-clock delay after each executed task, used to pace demonstrations.
    /// Does not affect the simulated time.
    pub pacing: Option<Duration>,
}

/// State of a single simulation run.
#[derive(Clone, Debug)]
pub struct SchedulerState {
    /// Current CPU frequency in MHz.
    pub current_frequency: u32,
    /// Energy consumed since the run start in J.
    pub total_energy: f64,
    /// Origin of the simulated timeline.
    pub start_time: f64,
    /// Current simulated time in seconds.
    pub time: f64,
    pub trace: Trace,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self {
            current_frequency: DEFAULT_FREQUENCY,
            total_energy: 0.,
            start_time: 0.,
            time: 0.,
            trace: Trace::new(),
        }
    }
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-preemptive uniprocessor scheduler executing tasks in EDF order.
///
/// CPU frequency is chosen for each task by the frequency selector and the consumed energy
/// is computed using the CPU power model. Tasks are executed back-to-back starting from time 0,
/// each task takes exactly its burst time regardless of the chosen frequency.
pub struct EnergyScheduler {
    name: String,
    state: SchedulerState,
    power_model: Box<dyn CpuPowerModel>,
    frequency_selector: Box<dyn FrequencySelector>,
    config: SchedulerConfig,
}

impl EnergyScheduler {
    /// Creates scheduler with default CMOS power model and slack-based frequency selector.
    pub fn new() -> Self {
        Self::with_models(
            Box::new(CmosCpuPowerModel::default()),
            Box::new(SlackFrequencySelector::default()),
            SchedulerConfig::default(),
        )
    }

    pub fn with_models(
        power_model: Box<dyn CpuPowerModel>,
        frequency_selector: Box<dyn FrequencySelector>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            name: "scheduler".to_string(),
            state: SchedulerState::new(),
            power_model,
            frequency_selector,
            config,
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.state.time - self.state.start_time
    }

    pub fn current_frequency(&self) -> u32 {
        self.state.current_frequency
    }

    pub fn total_energy(&self) -> f64 {
        self.state.total_energy
    }

    pub fn energy_series(&self) -> &[EnergySample] {
        self.state.trace.energy_series()
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Switches CPU to the specified frequency in MHz.
    ///
    /// Frequencies outside of the supported range are ignored.
    pub fn adjust_frequency(&mut self, frequency: u32) {
        if is_supported(frequency) {
            self.state.current_frequency = frequency;
            log_info!(self, "Adjusted CPU frequency to {} MHz", frequency);
        } else {
            log_debug!(self, "Ignored unsupported CPU frequency {} MHz", frequency);
        }
    }

    /// Executes all tasks and returns the execution trace.
    ///
    /// The scheduler state is reset at the beginning of each run.
    /// Tasks in the batch have unique ids and positive deadlines, so all computed values are finite.
    pub fn run(&mut self, batch: &TaskBatch) -> Trace {
        self.state = SchedulerState::new();

        let mut tasks = batch.tasks().to_vec();
        let mut positions: FxHashMap<TaskId, usize> = FxHashMap::default();
        let mut queue = ReadyQueue::new();
        for (pos, task) in tasks.iter_mut().enumerate() {
            task.admit(self.state.start_time);
            positions.insert(task.id(), pos);
            queue.push(task.clone());
        }

        while !queue.is_empty() {
            let task = queue.pop_min_deadline();
            // the dispatched task is not completed yet and contributes to its own utilization
            let utilization = system_utilization(&tasks);
            let frequency = self.frequency_selector.select_frequency(&task, utilization);
            self.adjust_frequency(frequency);
            let frequency = self.state.current_frequency;
            log_info!(
                self,
                "Executing Task {} (Priority: {}, Burst: {}ms, Deadline: {}ms) at {} MHz",
                task.id(),
                task.priority(),
                task.burst_time(),
                task.deadline(),
                frequency
            );

            let time_ratio = task.tightness().min(1.);
            let power = self.power_model.get_power(frequency as f64, time_ratio);
            let execution_time = task.execution_time();
            let energy = power * execution_time;
            log_debug!(
                self,
                "Task {}: utilization {:.3}, time ratio {:.3}, power {:.6} W",
                task.id(),
                utilization,
                time_ratio,
                power
            );

            let start_time = self.time();
            self.state.total_energy += energy;
            self.state.time += execution_time;
            let record = ExecutionRecord {
                id: task.id(),
                priority: task.priority(),
                burst_time: task.burst_time(),
                deadline: task.deadline(),
                frequency,
                utilization,
                power,
                energy,
                start_time,
                finish_time: self.time(),
            };
            self.state.trace.log_execution(record, self.state.total_energy);
            if let Some(&pos) = positions.get(&task.id()) {
                tasks[pos].complete();
            }
            log_info!(self, "Completed Task {}. Energy used: {:.6} J", task.id(), energy);

            if let Some(pacing) = self.config.pacing {
                thread::sleep(pacing);
            }
        }

        log_info!(self, "Total energy consumed: {:.6} J", self.state.total_energy);
        self.state.trace.clone()
    }
}

impl Default for EnergyScheduler {
    fn default() -> Self {
        Self::new()
    }
}
