//! Simulation configuration loaded from YAML or JSON files.
//!
//! ```yaml
//! pacing_ms: 100
//! tasks:
//!   - priority: 5
//!     burst_time: 100
//!     deadline: 1000
//!   - id: 7
//!     priority: 2
//!     burst_time: 800
//!     deadline: 1000
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scheduler::SchedulerConfig;
use crate::task::{AdmissionError, Task, TaskBatch, TaskId};

/// Error which occurred while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    UnsupportedFormat(String),
    Admission(AdmissionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "can't parse config: {err}"),
            ConfigError::UnsupportedFormat(ext) => write!(f, "unsupported config format: {ext:?}"),
            ConfigError::Admission(err) => write!(f, "invalid task: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Admission(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<AdmissionError> for ConfigError {
    fn from(err: AdmissionError) -> Self {
        ConfigError::Admission(err)
    }
}

/// Task parameters as specified in the configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskConfig {
    /// Defaults to the 1-based position of the task in the list.
    #[serde(default)]
    pub id: Option<TaskId>,
    pub priority: u8,
    /// Burst time in ms.
    pub burst_time: u64,
    /// Deadline in ms.
    pub deadline: u64,
}

/// Simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SimulationConfig {
    /// Wall-clock delay after each task in ms, disabled if absent or zero.
    #[serde(default)]
    pub pacing_ms: Option<u64>,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

impl SimulationConfig {
    /// Loads config from a YAML (`.yaml`, `.yml`) or JSON (`.json`) file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let data = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&data),
            "json" => Self::from_json(&data),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }

    pub fn from_yaml(data: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(data).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(data).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Admits the configured tasks.
    pub fn batch(&self) -> Result<TaskBatch, ConfigError> {
        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(pos, task)| {
                let id = task.id.unwrap_or(pos as TaskId + 1);
                Task::new(id, task.priority, task.burst_time, task.deadline)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TaskBatch::new(tasks)?)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            pacing: self.pacing_ms.filter(|&ms| ms > 0).map(Duration::from_millis),
        }
    }
}
