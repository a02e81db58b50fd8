//! Data model for the supervised process and its restart schedule

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The supervised OS process.
///
/// Re-acquired with a fresh pid after every relaunch; the scheduler owns
/// the current value exclusively and the old one is never read again once
/// a replacement is confirmed started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProcess {
    /// OS process identifier
    pub pid: u32,

    /// Process name as reported by the OS, trimmed
    pub name: String,

    /// Path to the process executable
    pub exe: PathBuf,

    /// Working directory derived from the executable path
    pub working_dir: PathBuf,
}

impl TargetProcess {
    pub fn new(pid: u32, name: impl Into<String>, exe: PathBuf) -> Self {
        let working_dir = working_dir_of(&exe);
        Self {
            pid,
            name: name.into(),
            exe,
            working_dir,
        }
    }
}

/// Working directory for an executable: its parent directory, falling back
/// to the path's root when there is no parent.
pub fn working_dir_of(exe: &Path) -> PathBuf {
    match exe.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => exe
            .ancestors()
            .last()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR.to_string())),
    }
}

/// The configured restart interval and the instant of the next restart.
///
/// Operator input supplies whole hours; tests construct schedules from
/// seconds directly, which is the supported acceleration mode.
#[derive(Debug, Clone)]
pub struct RestartSchedule {
    interval: Duration,
    next_restart: Instant,
}

/// Longest accepted restart interval, in whole hours (a little over a
/// century). Keeps every deadline representable as an `Instant`, so an
/// absurd operator value cannot overflow the schedule arithmetic.
pub const MAX_INTERVAL_HOURS: u64 = 1_000_000;

impl RestartSchedule {
    /// Create a schedule armed for one full interval from now.
    /// Intervals beyond [`MAX_INTERVAL_HOURS`] are clamped.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.min(Duration::from_secs(MAX_INTERVAL_HOURS * 3_600));
        Self {
            interval,
            next_restart: Instant::now() + interval,
        }
    }

    /// Create a schedule from an interval in whole hours
    pub fn from_hours(hours: u64) -> Self {
        Self::new(Duration::from_secs(hours.min(MAX_INTERVAL_HOURS) * 3_600))
    }

    /// The configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Remaining time until the next restart, saturating at zero
    pub fn remaining(&self) -> Duration {
        self.next_restart.saturating_duration_since(Instant::now())
    }

    /// Re-arm the schedule for one full interval from now
    pub fn reset(&mut self) {
        self.next_restart = Instant::now() + self.interval;
    }

    /// Wall-clock time of the next restart, for display
    pub fn next_restart_at(&self) -> DateTime<Local> {
        let remaining =
            chrono::Duration::from_std(self.remaining()).unwrap_or_else(|_| chrono::Duration::zero());
        Local::now() + remaining
    }
}
