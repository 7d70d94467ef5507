use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

/// Command-line shape of a supervised training run.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub config_path: PathBuf,
    pub run_id: String,
}

impl TrainerConfig {
    /// The trainer invocation: `mlagents-learn <config> --run-id=<id>`.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("mlagents-learn");
        cmd.arg(&self.config_path)
            .arg(format!("--run-id={}", self.run_id));
        cmd
    }

    /// Human-readable form of the invocation, for the startup banner.
    pub fn command_line(&self) -> String {
        format!(
            "mlagents-learn {} --run-id={}",
            self.config_path.display(),
            self.run_id
        )
    }
}

/// Manages a spawned trainer process and its merged text-line stream.
///
/// Stdout and stderr are both piped and read by background tasks that feed
/// a single channel, so the consumer sees one interleaved line stream. The
/// channel closes when both pipes reach end-of-stream.
pub struct TrainerRunner {
    child: Child,
}

impl TrainerRunner {
    /// Spawn `cmd` and start streaming its output lines to `line_tx`.
    pub fn spawn(mut cmd: Command, line_tx: mpsc::UnboundedSender<String>) -> Result<Self> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().context("Failed to spawn trainer process")?;

        let stdout = child.stdout.take().context("stdout should be piped")?;
        let stderr = child.stderr.take().context("stderr should be piped")?;
        Self::spawn_reader(stdout, line_tx.clone());
        Self::spawn_reader(stderr, line_tx);

        Ok(Self { child })
    }

    /// Request graceful shutdown (SIGTERM). No-op once the process has
    /// been reaped and its pid is gone.
    pub fn terminate(&self) {
        if let Some(pid) = self.child.id() {
            unsafe { libc::kill(pid.cast_signed(), libc::SIGTERM) };
        }
    }

    /// Force-kill the trainer (SIGKILL) and reap it.
    pub async fn kill(&mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }

    /// Wait for the trainer to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().await?;
        Ok(status)
    }

    fn spawn_reader<R>(stream: R, line_tx: mpsc::UnboundedSender<String>)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(async move {
            let reader = BufReader::new(stream);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line_tx.send(line).is_err() {
                    break;
                }
            }
            // pipe closed — dropping line_tx lets the channel end once
            // the other reader finishes too
        });
    }
}

/// Map an exit status to the code reported to the caller.
///
/// A signal death has no exit code of its own; use the shell convention
/// of 128 plus the signal number so a SIGKILLed trainer is still
/// distinguishable from a clean exit.
pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}
