//! AppRestart - scheduled kill-and-relaunch supervisor
//!
//! This crate supervises a single named OS process:
//! - Process lookup by name with a cheap pid-only liveness probe
//! - A restart scheduler that kills and relaunches the target on an interval
//! - A live once-per-second countdown rendered in place on the console
//! - A timeout-bounded console command reader that never stalls the session
//! - One shared cancellation signal coordinating all three activities

pub mod core;
pub mod countdown;
pub mod logging;
pub mod process;
pub mod reader;
pub mod scheduler;
pub mod session;

// Re-export commonly used items
pub use crate::core::config::AppConfig;
pub use crate::core::error::{AppRestartError, Result};
pub use crate::core::types::{RestartSchedule, TargetProcess};
pub use crate::process::ProcessLocator;
pub use crate::reader::CommandReader;
pub use crate::scheduler::{RestartScheduler, SchedulerOutcome};
pub use crate::session::Session;
