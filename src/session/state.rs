/// Running state for one supervised training run.
///
/// Owned by the watch command and mutated only inside the line-consumption
/// loop; the detector updates the bookkeeping fields, the event loop drives
/// the status transitions.
#[derive(Debug)]
pub struct Session {
    /// Mean reward at which the run is considered done.
    pub target_reward: f64,
    /// Consecutive lines containing the idle marker.
    pub idle_streak: u32,
    /// Most recently parsed mean reward. Replaced, never accumulated;
    /// survives lines that fail to parse.
    pub last_mean_reward: f64,
    pub status: SessionStatus,
    /// Final exit code of the trainer, set once the handle is reaped.
    pub exit_code: Option<i32>,
}

impl Session {
    pub fn new(target_reward: f64) -> Self {
        Self {
            target_reward,
            idle_streak: 0,
            last_mean_reward: 0.0,
            status: SessionStatus::NotStarted,
            exit_code: None,
        }
    }
}

/// Lifecycle of a supervised run. Lines are consumed only in `Running`;
/// the three ways out of `Running` all converge on `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Running,
    /// A stop condition fired and the trainer was told to shut down.
    StoppedByDetector,
    /// The trainer's output stream ended on its own.
    ExitedNaturally,
    /// The operator interrupted the run (Ctrl+C).
    CancelledExternally,
    Terminated,
}
