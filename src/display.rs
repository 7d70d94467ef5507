use std::io::Write;

use anyhow::Result;

use crate::detect::{IDLE_LIMIT, Verdict};

const RULE: &str = "============================================================";

/// Startup banner: the command about to run and the stop criteria.
pub fn render_start<W: Write>(
    writer: &mut W,
    command_line: &str,
    target_reward: f64,
    check_interval: u64,
) -> Result<()> {
    writeln!(writer, "Starting training: {command_line}")?;
    writeln!(writer, "Target reward: {target_reward}")?;
    writeln!(writer, "Monitoring logs every {check_interval} seconds...")?;
    writeln!(writer, "{}", "-".repeat(60))?;
    Ok(())
}

/// Banner for the stop condition that ended line consumption.
pub fn render_stop<W: Write>(writer: &mut W, verdict: Verdict, target_reward: f64) -> Result<()> {
    writeln!(writer, "\n{RULE}")?;
    match verdict {
        Verdict::StopIdle => {
            writeln!(
                writer,
                "'Not Training' detected {IDLE_LIMIT} times consecutively!"
            )?;
            writeln!(writer, "Training has completed. Stopping process...")?;
        }
        Verdict::StopReward(value) => {
            writeln!(writer, "Target reward {target_reward} reached!")?;
            writeln!(writer, "Current Mean Reward: {value}")?;
            writeln!(writer, "Stopping training...")?;
        }
        Verdict::StopMarker => {
            writeln!(writer, "Training completed successfully!")?;
        }
        Verdict::Continue => {}
    }
    writeln!(writer, "{RULE}")?;
    Ok(())
}

pub fn render_interrupted<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "\n{RULE}")?;
    writeln!(writer, "Training interrupted by user (Ctrl+C)")?;
    writeln!(writer, "{RULE}")?;
    Ok(())
}

/// Final summary, printed on every exit path.
pub fn render_summary<W: Write>(
    writer: &mut W,
    last_mean_reward: f64,
    exit_code: i32,
) -> Result<()> {
    writeln!(writer, "\n{RULE}")?;
    writeln!(writer, "Training session ended.")?;
    writeln!(writer, "Final Mean Reward: {last_mean_reward}")?;
    writeln!(writer, "Trainer exit status: {exit_code}")?;
    writeln!(writer, "{RULE}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_reports_reward_and_exit() {
        let out = rendered(|buf| render_summary(buf, 0.97, 0).unwrap());
        insta::assert_snapshot!(out.trim(), @r"
        ============================================================
        Training session ended.
        Final Mean Reward: 0.97
        Trainer exit status: 0
        ============================================================
        ");
    }

    #[test]
    fn reward_stop_banner() {
        let out = rendered(|buf| render_stop(buf, Verdict::StopReward(0.97), 0.95).unwrap());
        insta::assert_snapshot!(out.trim(), @r"
        ============================================================
        Target reward 0.95 reached!
        Current Mean Reward: 0.97
        Stopping training...
        ============================================================
        ");
    }

    #[test]
    fn start_banner_shows_invocation() {
        let out = rendered(|buf| {
            render_start(buf, "mlagents-learn cfg.yaml --run-id=t1", 0.95, 30).unwrap();
        });
        assert!(out.contains("Starting training: mlagents-learn cfg.yaml --run-id=t1"));
        assert!(out.contains("Target reward: 0.95"));
    }
}
