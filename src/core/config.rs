//! Configuration for the supervisor session
//!
//! Tuning knobs for the control loop and the relaunch policy. Defaults
//! match normal operation; tests shrink the timing values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Control loop settings
    pub session: SessionConfig,

    /// Relaunch policy settings
    pub relaunch: RelaunchConfig,
}

/// Control loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long one command poll waits for operator input, in milliseconds
    pub poll_timeout_ms: u64,

    /// The in-session command that ends the supervisor
    pub exit_command: String,
}

/// Relaunch policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaunchConfig {
    /// Case-insensitive substrings of the process name that select the
    /// vendor-mediated relaunch path instead of a direct respawn
    pub vendor_patterns: Vec<String>,

    /// File name of the vendor updater executable, expected one directory
    /// above the target's working directory
    pub updater_file_name: String,

    /// Polling period while waiting for the killed target to exit,
    /// in milliseconds
    pub exit_poll_ms: u64,

    /// How long to keep re-resolving the replacement process by name
    /// after spawning it, in milliseconds
    pub respawn_grace_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 30_000,
            exit_command: "1".to_string(),
        }
    }
}

impl Default for RelaunchConfig {
    fn default() -> Self {
        Self {
            vendor_patterns: vec!["discord".to_string()],
            updater_file_name: "Update.exe".to_string(),
            exit_poll_ms: 250,
            respawn_grace_ms: 10_000,
        }
    }
}

impl SessionConfig {
    /// Poll timeout as a `Duration`
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

impl RelaunchConfig {
    /// Exit poll period as a `Duration`
    pub fn exit_poll(&self) -> Duration {
        Duration::from_millis(self.exit_poll_ms)
    }

    /// Respawn grace window as a `Duration`
    pub fn respawn_grace(&self) -> Duration {
        Duration::from_millis(self.respawn_grace_ms)
    }
}
