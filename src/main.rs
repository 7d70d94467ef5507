mod cli;

use anyhow::Result;
use clap::Parser;
use trainwatch::commands::watch::{self, WatchConfig};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = watch::watch(
        WatchConfig {
            config_path: cli.config_path,
            run_id: cli.run_id,
            target_reward: cli.target_reward,
            check_interval: cli.check_interval,
        },
        &mut std::io::stdout(),
    )
    .await?;

    // propagate the trainer's own exit status
    std::process::exit(code);
}
