//! Restart scheduler
//!
//! Owns the supervision loop: wait out the interval, verify the target is
//! still alive, kill it, relaunch it, repeat. Every suspension is a
//! `select!` race against the shared cancellation token, so shutdown never
//! waits for a timer to elapse.

pub mod relaunch;


use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::core::config::RelaunchConfig;
use crate::core::error::{AppRestartError, Result};
use crate::core::types::{RestartSchedule, TargetProcess};
use crate::process::ProcessLocator;

/// Why the scheduler loop ended.
///
/// A vanished target is a clean, expected stop; only `Faulted` carries an
/// actual error.
#[derive(Debug)]
pub enum SchedulerOutcome {
    /// The shared cancellation signal fired
    Cancelled,
    /// The target could not be re-resolved at verification time
    TargetVanished,
    /// Verification or relaunch failed
    Faulted(AppRestartError),
}

/// One restart cycle's result
enum Cycle {
    Continue,
    Vanished,
    Cancelled,
}

/// The supervision loop.
///
/// States: awaiting the next restart, verifying the target, relaunching,
/// back to awaiting; cancellation is terminal from any of them. The
/// scheduler exclusively owns the current [`TargetProcess`] and replaces it
/// only after the old process was killed and its exit confirmed.
pub struct RestartScheduler {
    locator: ProcessLocator,
    target: TargetProcess,
    schedule: RestartSchedule,
    config: RelaunchConfig,
    token: CancellationToken,
    /// Replacement child from a previous cycle, kept so its exit can be
    /// awaited through the handle instead of polled
    spawned: Option<tokio::process::Child>,
}

impl RestartScheduler {
    pub fn new(
        locator: ProcessLocator,
        target: TargetProcess,
        schedule: RestartSchedule,
        config: RelaunchConfig,
        token: CancellationToken,
    ) -> Self {
        Self {
            locator,
            target,
            schedule,
            config,
            token,
            spawned: None,
        }
    }

    /// Run the supervision loop to completion.
    ///
    /// Cancels the shared token itself when it stops for any reason other
    /// than cancellation, so the countdown and the control loop unwind too.
    pub async fn run(mut self) -> SchedulerOutcome {
        loop {
            tokio::select! {
                _ = self.token.cancelled() => return SchedulerOutcome::Cancelled,
                _ = sleep(self.schedule.remaining()) => {}
            }

            match self.cycle().await {
                Ok(Cycle::Continue) => self.schedule.reset(),
                Ok(Cycle::Vanished) => {
                    self.token.cancel();
                    return SchedulerOutcome::TargetVanished;
                }
                Ok(Cycle::Cancelled) => return SchedulerOutcome::Cancelled,
                Err(err) => {
                    tracing::error!("restart cycle failed: {err}");
                    self.token.cancel();
                    return SchedulerOutcome::Faulted(err);
                }
            }
        }
    }

    /// Verify the target, then kill and relaunch it.
    ///
    /// Verification is separate from relaunch so a vanished target never
    /// triggers a spurious kill or spawn.
    async fn cycle(&mut self) -> Result<Cycle> {
        let Some(pid) = self.locator.find_id(&self.target.name) else {
            println!("Program {} isn't running.", self.target.name);
            return Ok(Cycle::Vanished);
        };
        // Adopt the pid in case the target was restarted behind our back
        self.target.pid = pid;

        let plan = relaunch::plan(&self.target, &self.config);

        if !self.locator.kill(self.target.pid) {
            tracing::warn!(pid = self.target.pid, "kill signal not delivered");
        }
        if !self.await_exit().await {
            return Ok(Cycle::Cancelled);
        }
        println!(
            "{} was killed, a new instance is starting...",
            self.target.name
        );

        let child = relaunch::spawn(&plan)?;
        self.adopt_replacement(child).await;
        Ok(Cycle::Continue)
    }

    /// Wait for the current target to leave the process table.
    ///
    /// Returns false if cancellation fired mid-wait. A child the scheduler
    /// spawned itself is awaited through its handle (which also reaps it);
    /// a foreign process is polled by pid. On the vendor path the stored
    /// child is the updater, not the target; if it has already exited it
    /// is reaped here instead of being carried into the next cycle.
    async fn await_exit(&mut self) -> bool {
        if let Some(mut child) = self.spawned.take() {
            if child.id() == Some(self.target.pid) {
                tokio::select! {
                    _ = self.token.cancelled() => return false,
                    _ = child.wait() => return true,
                }
            }
            self.spawned = reap_if_exited(child);
        }

        loop {
            if !self.locator.is_alive(self.target.pid) {
                return true;
            }
            tokio::select! {
                _ = self.token.cancelled() => return false,
                _ = sleep(self.config.exit_poll()) => {}
            }
        }
    }

    /// Publish the replacement as the new target.
    ///
    /// Re-resolves by name for up to the respawn grace window (the vendor
    /// path starts the real target indirectly, so the pid of interest is
    /// not the spawned child's). Falls back to the child pid; the next
    /// verification sorts out liveness either way.
    async fn adopt_replacement(&mut self, child: tokio::process::Child) {
        let deadline = tokio::time::Instant::now() + self.config.respawn_grace();
        let child_pid = child.id();
        self.spawned = Some(child);

        loop {
            if let Ok(Some(next)) = self.locator.find(&self.target.name) {
                tracing::info!(pid = next.pid, "replacement instance is up");
                self.target = next;
                return;
            }
            if tokio::time::Instant::now() >= deadline {
                break;
            }
            tokio::select! {
                _ = self.token.cancelled() => return,
                _ = sleep(self.config.exit_poll()) => {}
            }
        }

        tracing::warn!(
            "could not re-resolve {} after relaunch",
            self.target.name
        );
        if let Some(pid) = child_pid {
            self.target.pid = pid;
        }
    }
}

/// Hand back a child that is still running; one that has already exited is
/// reaped here and dropped.
fn reap_if_exited(mut child: tokio::process::Child) -> Option<tokio::process::Child> {
    match child.try_wait() {
        Ok(Some(_)) => None,
        _ => Some(child),
    }
}
