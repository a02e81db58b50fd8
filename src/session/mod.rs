//! Supervisor session
//!
//! The composition root: starts the scheduler and the countdown under one
//! shared cancellation token, polls the command reader with a bounded
//! timeout, and reacts to whichever finishes first.

pub mod input;


use tokio_util::sync::CancellationToken;

use crate::core::config::AppConfig;
use crate::core::types::{RestartSchedule, TargetProcess};
use crate::countdown::CountdownDisplay;
use crate::process::ProcessLocator;
use crate::reader::CommandReader;
use crate::scheduler::{RestartScheduler, SchedulerOutcome};

/// One supervision session, alive from the first successful lookup until
/// both concurrent activities have stopped.
pub struct Session {
    config: AppConfig,
    locator: ProcessLocator,
    target: TargetProcess,
    schedule: RestartSchedule,
    token: CancellationToken,
}

/// Why the control loop exited
enum LoopExit {
    Scheduler(Result<SchedulerOutcome, tokio::task::JoinError>),
    Operator,
}

impl Session {
    pub fn new(
        config: AppConfig,
        locator: ProcessLocator,
        target: TargetProcess,
        schedule: RestartSchedule,
    ) -> Self {
        Self {
            config,
            locator,
            target,
            schedule,
            token: CancellationToken::new(),
        }
    }

    /// The session's cancellation signal; cancelling it from anywhere ends
    /// the session.
    pub fn cancellation(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run the control loop until the operator exits or the scheduler
    /// stops. Always leaves the token cancelled and both activities
    /// stopped.
    pub async fn run(self, reader: &mut CommandReader) {
        let Session {
            config,
            locator,
            target,
            schedule,
            token,
        } = self;

        println!("Application: {}", target.name);
        println!(
            "Restart occurs at: {}",
            schedule.next_restart_at().format("%H:%M:%S")
        );
        println!("1. Exit");
        println!();

        let countdown = CountdownDisplay::new(schedule.interval(), token.clone());
        let countdown_handle = tokio::spawn(countdown.run());

        let scheduler = RestartScheduler::new(
            locator,
            target,
            schedule,
            config.relaunch.clone(),
            token.clone(),
        );
        let mut scheduler_handle = tokio::spawn(scheduler.run());

        let poll_timeout = config.session.poll_timeout();
        let exit = loop {
            if scheduler_handle.is_finished() {
                break LoopExit::Scheduler((&mut scheduler_handle).await);
            }
            match reader.read_line(poll_timeout).await {
                Some(line) => {
                    let line = line.trim();
                    if line == config.session.exit_command {
                        println!("Exiting program...");
                        break LoopExit::Operator;
                    }
                    if !line.is_empty() {
                        println!("Invalid option {line}. Please select a valid option.");
                        println!("1. Exit");
                    }
                }
                // Poll timeout: go around and check the scheduler again
                None => {}
            }
        };

        token.cancel();

        match exit {
            LoopExit::Scheduler(Ok(SchedulerOutcome::Faulted(err))) => {
                println!("Monitor task faulted with message: {err}");
            }
            LoopExit::Scheduler(Ok(_)) => {
                println!("Exiting program. Monitor task is stopped.");
            }
            LoopExit::Scheduler(Err(join_err)) => {
                println!("Monitor task faulted with message: {join_err}");
            }
            LoopExit::Operator => {
                let _ = scheduler_handle.await;
            }
        }

        let _ = countdown_handle.await;
    }
}
