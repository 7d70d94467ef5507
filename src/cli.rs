use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "trainwatch",
    about = "Auto-stop supervisor for ML-Agents training runs",
    version
)]
pub struct Cli {
    /// Path to the trainer YAML config file.
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,

    /// Run identifier passed to the trainer as --run-id.
    #[arg(value_name = "RUN_ID")]
    pub run_id: String,

    /// Mean reward at which training is stopped.
    #[arg(value_name = "TARGET_REWARD", default_value_t = 0.95)]
    pub target_reward: f64,

    /// Log monitoring cadence in seconds (informational; lines are
    /// consumed as they arrive).
    #[arg(long, default_value_t = 30)]
    pub check_interval: u64,
}
