#![doc = include_str!("../README.md")]

pub mod config;
pub mod frequency;
pub mod log;
pub mod power;
pub mod queue;
pub mod scheduler;
pub mod task;
pub mod trace;
pub mod utilization;

pub use colored;
pub use config::{ConfigError, SimulationConfig, TaskConfig};
pub use frequency::{select_frequency, FrequencySelector, SlackFrequencySelector};
pub use power::{power, CmosCpuPowerModel, CpuPowerModel};
pub use queue::ReadyQueue;
pub use scheduler::{EnergyScheduler, SchedulerConfig, SchedulerState};
pub use task::{AdmissionError, Task, TaskBatch, TaskId};
pub use trace::{EnergySample, ExecutionRecord, Trace};
pub use utilization::system_utilization;
