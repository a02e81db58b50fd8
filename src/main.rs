//! AppRestart - scheduled kill-and-relaunch supervisor
//!
//! Main entry point: operator prompts, the supervision session, and the
//! final teardown prompt. The program always ends by asking for a key
//! press and exiting successfully; the reason it stopped is reported as
//! console text only.

use std::io::{self, Write};

use app_restart::core::types::RestartSchedule;
use app_restart::logging::{self, LoggingConfig};
use app_restart::session::input;
use app_restart::{AppConfig, CommandReader, ProcessLocator, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(&LoggingConfig::default())?;

    let config = AppConfig::default();
    let mut reader = CommandReader::spawn();

    if let Err(err) = run_session(&config, &mut reader).await {
        tracing::error!("session ended with error: {err}");
    }

    println!("Press any key to exit...");
    let _ = reader.read_line_unbounded().await;
    Ok(())
}

/// Gather operator input and run one supervision session.
///
/// Both "process not found" and an unreadable process table end the
/// session before any concurrent activity starts; neither is fatal to the
/// program itself.
async fn run_session(config: &AppConfig, reader: &mut CommandReader) -> anyhow::Result<()> {
    let mut locator = ProcessLocator::new();

    // The command reader thread stays idle until its first request, so the
    // startup prompts can read stdin directly.
    let (target, hours) = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();

        let name = input::prompt_process_name(&mut stdin, &mut stdout)?;
        let target = match locator.find(&name) {
            Ok(Some(target)) => target,
            Ok(None) => {
                println!("Process not found.");
                return Ok(());
            }
            Err(err) => {
                tracing::warn!("initial lookup failed: {err}");
                println!("Process not found.");
                return Ok(());
            }
        };

        let hours = input::prompt_interval_hours(&mut stdin, &mut stdout)?;
        stdout.flush()?;
        (target, hours)
    };

    let schedule = RestartSchedule::from_hours(hours);
    let session = Session::new(config.clone(), locator, target, schedule);
    session.run(reader).await;
    Ok(())
}
