use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::detect::{self, Verdict};
use crate::display;
use crate::session::runner::{self, TrainerRunner};
use crate::session::state::{Session, SessionStatus};

/// How long to wait after SIGTERM before escalating to SIGKILL.
#[derive(Debug, Clone, Copy)]
pub struct GracePeriods {
    /// After a detector-triggered stop.
    pub stop: Duration,
    /// After an operator interrupt.
    pub interrupt: Duration,
}

impl Default for GracePeriods {
    fn default() -> Self {
        Self {
            stop: Duration::from_secs(10),
            interrupt: Duration::from_secs(5),
        }
    }
}

/// How the line-consumption loop ended.
enum LoopEnd {
    Stopped(Verdict),
    StreamClosed,
    Interrupted,
}

/// Consume the trainer's line stream until a stop condition fires, the
/// stream ends, or the operator interrupts, then bring the process down
/// and reap it.
///
/// Every line is echoed to `writer` as it is consumed. On every exit path
/// the trainer handle is waited on and a summary is rendered; the returned
/// value is the trainer's exit code (or the signal-death sentinel).
pub async fn supervise<W: Write>(
    runner: &mut TrainerRunner,
    line_rx: &mut mpsc::UnboundedReceiver<String>,
    session: &mut Session,
    writer: &mut W,
    grace: GracePeriods,
) -> Result<i32> {
    session.status = SessionStatus::Running;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let end = loop {
        tokio::select! {
            maybe_line = line_rx.recv() => match maybe_line {
                Some(line) => {
                    writeln!(writer, "{line}")?;
                    writer.flush()?;
                    let verdict = detect::observe(session, &line);
                    if verdict.is_stop() {
                        break LoopEnd::Stopped(verdict);
                    }
                }
                None => break LoopEnd::StreamClosed,
            },
            _ = &mut ctrl_c => break LoopEnd::Interrupted,
        }
    };

    let status = match end {
        LoopEnd::Stopped(verdict) => {
            session.status = SessionStatus::StoppedByDetector;
            display::render_stop(writer, verdict, session.target_reward)?;
            shut_down(runner, grace.stop).await?
        }
        LoopEnd::StreamClosed => {
            session.status = SessionStatus::ExitedNaturally;
            runner.wait().await?
        }
        LoopEnd::Interrupted => {
            session.status = SessionStatus::CancelledExternally;
            display::render_interrupted(writer)?;
            shut_down(runner, grace.interrupt).await?
        }
    };

    let code = runner::exit_code(status);
    session.exit_code = Some(code);
    session.status = SessionStatus::Terminated;
    display::render_summary(writer, session.last_mean_reward, code)?;
    Ok(code)
}

/// Graceful-then-forced shutdown. SIGTERM first; if the trainer has not
/// exited within the grace period, SIGKILL and wait unconditionally so no
/// zombie is left behind.
async fn shut_down(runner: &mut TrainerRunner, grace: Duration) -> Result<std::process::ExitStatus> {
    runner.terminate();
    match timeout(grace, runner.wait()).await {
        Ok(status) => status,
        Err(_elapsed) => {
            runner.kill().await?;
            runner.wait().await
        }
    }
}
