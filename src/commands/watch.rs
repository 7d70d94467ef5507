use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use tokio::sync::mpsc;

use crate::display;
use crate::session::event_loop::{self, GracePeriods};
use crate::session::runner::{TrainerConfig, TrainerRunner};
use crate::session::state::Session;

pub struct WatchConfig {
    pub config_path: PathBuf,
    pub run_id: String,
    pub target_reward: f64,
    pub check_interval: u64,
}

/// Launch the trainer and supervise it until a stop condition fires, the
/// trainer exits on its own, or the operator interrupts.
///
/// Returns the trainer's exit code. Fails without spawning anything when
/// the config file does not exist.
pub async fn watch<W: Write>(config: WatchConfig, writer: &mut W) -> Result<i32> {
    if !config.config_path.exists() {
        bail!("Config file not found: {}", config.config_path.display());
    }

    let trainer = TrainerConfig {
        config_path: config.config_path,
        run_id: config.run_id,
    };
    display::render_start(
        writer,
        &trainer.command_line(),
        config.target_reward,
        config.check_interval,
    )?;

    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    let mut runner = TrainerRunner::spawn(trainer.command(), line_tx)?;
    let mut session = Session::new(config.target_reward);

    event_loop::supervise(
        &mut runner,
        &mut line_rx,
        &mut session,
        writer,
        GracePeriods::default(),
    )
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_config_fails_before_spawning() {
        let mut out = Vec::new();
        let err = watch(
            WatchConfig {
                config_path: PathBuf::from("/nonexistent/config.yaml"),
                run_id: "test".to_string(),
                target_reward: 0.95,
                check_interval: 30,
            },
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Config file not found"));
        // nothing was launched, so no banner was printed either
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn existing_config_reaches_the_spawn_step() {
        let config_file = tempfile::NamedTempFile::new().unwrap();
        let mut out = Vec::new();
        let err = watch(
            WatchConfig {
                config_path: config_file.path().to_path_buf(),
                run_id: "test".to_string(),
                target_reward: 0.95,
                check_interval: 30,
            },
            &mut out,
        )
        .await
        .unwrap_err();

        // mlagents-learn is not installed in the test environment; the
        // precondition passed and the failure came from the spawn itself
        assert!(err.to_string().contains("Failed to spawn trainer process"));
        let banner = String::from_utf8(out).unwrap();
        assert!(banner.contains("Starting training: mlagents-learn"));
    }
}
