//! Name-based process lookup backed by sysinfo
//!
//! All queries refresh the process table at call time. `find` resolves the
//! full metadata needed for a relaunch; `find_id` only resolves pids so it
//! stays cheap enough for a per-second liveness cadence.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::core::error::{AppRestartError, Result};
use crate::core::types::TargetProcess;

/// Live process lookup by name.
///
/// Matching is case-insensitive against trimmed process names, first match
/// wins. Processes that vanish between enumeration and inspection are
/// treated as not found, never as an error.
pub struct ProcessLocator {
    system: System,
}

impl ProcessLocator {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// Find the first live process matching `name` and resolve its full
    /// metadata.
    ///
    /// Returns `Ok(None)` when nothing matches. Returns an error only when
    /// a match exists but its executable path cannot be read, which callers
    /// treat as fatal for the initial search.
    pub fn find(&mut self, name: &str) -> Result<Option<TargetProcess>> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new().with_exe(UpdateKind::Always),
        );

        let wanted = name.trim().to_lowercase();
        let mut matched = false;
        for process in self.system.processes().values() {
            let candidate = process.name().to_string_lossy();
            let candidate = candidate.trim();
            if candidate.to_lowercase() != wanted {
                continue;
            }
            matched = true;
            if let Some(exe) = process.exe() {
                return Ok(Some(TargetProcess::new(
                    process.pid().as_u32(),
                    candidate,
                    exe.to_path_buf(),
                )));
            }
        }

        if matched {
            // Matches existed but none exposed an executable path
            Err(AppRestartError::ProcessLookup(name.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// Liveness probe: pid of the first process matching `name`, without
    /// resolving executable metadata.
    pub fn find_id(&mut self, name: &str) -> Option<u32> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new(),
        );

        let wanted = name.trim().to_lowercase();
        self.system
            .processes()
            .iter()
            .find(|(_, process)| {
                process.name().to_string_lossy().trim().to_lowercase() == wanted
            })
            .map(|(pid, _)| pid.as_u32())
    }

    /// Whether the process with this pid is still alive
    pub fn is_alive(&mut self, pid: u32) -> bool {
        let pid = Pid::from_u32(pid);
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::new(),
        );
        self.system.process(pid).is_some()
    }

    /// Forcefully terminate the process with this pid.
    ///
    /// Returns true if the kill signal was delivered; false when the
    /// process is already gone or the signal could not be sent.
    pub fn kill(&mut self, pid: u32) -> bool {
        let pid = Pid::from_u32(pid);
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::new(),
        );
        self.system.process(pid).map(|p| p.kill()).unwrap_or(false)
    }
}

impl Default for ProcessLocator {
    fn default() -> Self {
        Self::new()
    }
}
