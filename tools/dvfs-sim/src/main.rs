mod chart;
mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use env_logger::Builder;
use log::{error, LevelFilter};

use dslab_dvfs::config::{ConfigError, SimulationConfig};
use dslab_dvfs::scheduler::{EnergyScheduler, SchedulerConfig};
use dslab_dvfs::task::TaskBatch;

use crate::chart::{render_chart, CHART_WIDTH};

/// Energy-efficient CPU scheduler simulation (EDF with DVFS).
#[derive(Parser, Debug)]
#[command(long_about = None)]
struct Args {
    /// YAML or JSON file with tasks, tasks are entered interactively if not specified
    #[arg(short, long)]
    tasks: Option<PathBuf>,

    /// Wall-clock delay in ms after each task (0 disables pacing)
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Print the execution trace as JSON
    #[arg(long)]
    json: bool,

    /// Do not print the energy chart
    #[arg(long)]
    no_chart: bool,
}

fn load_tasks(args: &Args) -> Result<(TaskBatch, SchedulerConfig), ConfigError> {
    match &args.tasks {
        Some(path) => {
            let config = SimulationConfig::from_file(path)?;
            Ok((config.batch()?, config.scheduler_config()))
        }
        None => {
            println!("Energy-Efficient CPU Scheduler Simulation");
            let stdin = io::stdin();
            let tasks = prompt::read_tasks(&mut stdin.lock(), &mut io::stdout())?;
            Ok((TaskBatch::new(tasks)?, SchedulerConfig::default()))
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let (tasks, mut config) = match load_tasks(&args) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(pace_ms) = args.pace_ms {
        config.pacing = Some(Duration::from_millis(pace_ms)).filter(|pacing| !pacing.is_zero());
    }

    println!("\nStarting simulation...");
    let trace = EnergyScheduler::new().with_config(config).run(&tasks);

    if !args.no_chart && !trace.is_empty() {
        println!("\n{}", render_chart(trace.energy_series(), CHART_WIDTH));
    }
    if args.json {
        match serde_json::to_string_pretty(&trace) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                error!("Can't serialize trace: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
