//! Relaunch policy
//!
//! Planning is a pure function over the target's metadata so it can be
//! tested without touching the OS; spawning applies the plan.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::core::config::RelaunchConfig;
use crate::core::error::{AppRestartError, Result};
use crate::core::types::TargetProcess;

/// How to start the replacement process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Choose the relaunch plan for a target.
///
/// When the process name contains one of the configured vendor patterns,
/// the target must be restarted through its updater: one directory above
/// the working directory, invoked with `--processStart <exe name>`.
/// Everything else is relaunched directly from its own executable path.
pub fn plan(target: &TargetProcess, config: &RelaunchConfig) -> RelaunchPlan {
    let name = target.name.to_lowercase();
    let vendor_mediated = config
        .vendor_patterns
        .iter()
        .any(|pattern| name.contains(&pattern.to_lowercase()));

    if vendor_mediated {
        let base = target
            .working_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| target.working_dir.clone());
        let exe_name = target
            .exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.name.clone());

        RelaunchPlan {
            program: base.join(&config.updater_file_name),
            args: vec!["--processStart".to_string(), exe_name],
            working_dir: base,
        }
    } else {
        RelaunchPlan {
            program: target.exe.clone(),
            args: Vec::new(),
            working_dir: target.working_dir.clone(),
        }
    }
}

/// Start the replacement process.
///
/// Standard output is redirected away so the replacement cannot write into
/// the supervisor's console; no shell is involved.
pub fn spawn(plan: &RelaunchPlan) -> Result<Child> {
    Command::new(&plan.program)
        .args(&plan.args)
        .current_dir(&plan.working_dir)
        .stdout(Stdio::null())
        .spawn()
        .map_err(|source| AppRestartError::SpawnFailed {
            path: plan.program.clone(),
            source,
        })
}
