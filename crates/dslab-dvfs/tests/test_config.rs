use std::io::Write;
use std::time::Duration;

use dslab_dvfs::config::{ConfigError, SimulationConfig};
use dslab_dvfs::scheduler::EnergyScheduler;
use dslab_dvfs::task::AdmissionError;

const YAML_CONFIG: &str = "
pacing_ms: 100
tasks:
  - priority: 5
    burst_time: 100
    deadline: 900
  - priority: 3
    burst_time: 100
    deadline: 300
  - id: 10
    priority: 1
    burst_time: 100
    deadline: 600
";

#[test]
fn test_yaml_config() {
    let config = SimulationConfig::from_yaml(YAML_CONFIG).unwrap();
    assert_eq!(config.pacing_ms, Some(100));
    assert_eq!(config.scheduler_config().pacing, Some(Duration::from_millis(100)));

    let batch = config.batch().unwrap();
    let ids: Vec<u32> = batch.tasks().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![1, 2, 10]);

    let trace = EnergyScheduler::new().run(&batch);
    assert_eq!(trace.execution_order(), vec![2, 10, 1]);
}

#[test]
fn test_json_config() {
    let config = SimulationConfig::from_json(
        r#"{"tasks": [{"priority": 5, "burst_time": 800, "deadline": 1000}, {"priority": 5, "burst_time": 10, "deadline": 20}]}"#,
    )
    .unwrap();
    assert_eq!(config.pacing_ms, None);
    assert_eq!(config.scheduler_config().pacing, None);
    assert_eq!(config.batch().unwrap().len(), 2);
}

#[test]
fn test_zero_pacing_is_disabled() {
    let config = SimulationConfig::from_yaml("pacing_ms: 0\ntasks: []").unwrap();
    assert_eq!(config.scheduler_config().pacing, None);
    assert!(config.batch().unwrap().is_empty());
}

#[test]
fn test_invalid_tasks() {
    let config = SimulationConfig::from_yaml("tasks:\n  - {priority: 11, burst_time: 10, deadline: 20}").unwrap();
    match config.batch() {
        Err(ConfigError::Admission(AdmissionError::PriorityOutOfRange { id: 1, priority: 11 })) => {}
        other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
    }

    let config = SimulationConfig::from_yaml(
        "tasks:\n  - {priority: 1, burst_time: 10, deadline: 20}\n  - {id: 1, priority: 1, burst_time: 10, deadline: 20}",
    )
    .unwrap();
    match config.batch() {
        Err(ConfigError::Admission(AdmissionError::DuplicateId { id: 1 })) => {}
        other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
    }

    assert!(matches!(
        SimulationConfig::from_yaml("tasks:\n  - {priority: 1, burst_time: -5, deadline: 20}"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_file() {
    let dir = std::env::temp_dir().join(format!("dslab-dvfs-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let yaml_path = dir.join("tasks.yaml");
    std::fs::File::create(&yaml_path)
        .unwrap()
        .write_all(YAML_CONFIG.as_bytes())
        .unwrap();
    assert_eq!(SimulationConfig::from_file(&yaml_path).unwrap().tasks.len(), 3);

    let txt_path = dir.join("tasks.txt");
    std::fs::File::create(&txt_path).unwrap().write_all(b"tasks: []").unwrap();
    assert!(matches!(
        SimulationConfig::from_file(&txt_path),
        Err(ConfigError::UnsupportedFormat(ext)) if ext == "txt"
    ));

    assert!(matches!(
        SimulationConfig::from_file(dir.join("missing.yaml")),
        Err(ConfigError::Io(_))
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}
