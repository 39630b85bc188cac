//! Out-of-process engine driven through its command line and exit status

use crate::engine::SynthesisEngine;
use crate::engine::invocation::Invocation;
use crate::io::configuration::{
    DEFAULT_ENGINE_TIMEOUT_SECS, ENGINE_EXECUTABLE_NAME, ENGINE_POLL_INTERVAL_MS,
};
use crate::io::error::{Result, WangError, WithPath};
use clap::ValueEnum;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Build profile whose engine executable should be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuildProfile {
    /// Optimised build under `target/release`
    #[default]
    Release,
    /// Debug build under `target/debug`
    Debug,
}

impl BuildProfile {
    /// Directory name of the profile inside the target directory
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Debug => "debug",
        }
    }
}

/// Find the engine next to the running executable
///
/// # Errors
///
/// Returns an error if the current executable path cannot be determined
pub fn locate_engine(profile: BuildProfile) -> Result<PathBuf> {
    let exe = std::env::current_exe().with_path("<current executable>", "locate executable")?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(engine_path_from(dir, profile))
}

/// Engine path relative to a front end directory
///
/// Inside a cargo target directory the sibling profile directory is used;
/// anywhere else the engine is expected beside the front end.
pub fn engine_path_from(dir: &Path, profile: BuildProfile) -> PathBuf {
    let name = format!("{ENGINE_EXECUTABLE_NAME}{}", std::env::consts::EXE_SUFFIX);
    let in_profile_dir = dir
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == BuildProfile::Release.dir_name() || n == BuildProfile::Debug.dir_name());

    match dir.parent() {
        Some(target) if in_profile_dir => target.join(profile.dir_name()).join(name),
        _ => dir.join(name),
    }
}

/// Engine executable run as a child process per invocation
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    executable: PathBuf,
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl ProcessEngine {
    /// Engine at `executable` with the default timeout
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: Some(Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS)),
            poll_interval: Duration::from_millis(ENGINE_POLL_INTERVAL_MS),
        }
    }

    /// Replace the timeout; `None` waits indefinitely
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the interval between exit status polls
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Path of the engine executable
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Configured timeout
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait(&self, mut child: Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child.wait().with_path(&self.executable, "wait for engine");
        };

        let start = Instant::now();
        loop {
            if let Some(status) = child
                .try_wait()
                .with_path(&self.executable, "wait for engine")?
            {
                return Ok(status);
            }
            if start.elapsed() > timeout {
                if let Err(e) = child.kill() {
                    warn!("failed to kill engine process: {e}");
                }
                if let Err(e) = child.wait() {
                    warn!("failed to reap engine process: {e}");
                }
                return Err(WangError::EngineTimeout {
                    timeout_ms: timeout.as_millis(),
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

impl SynthesisEngine for ProcessEngine {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let args = invocation.to_args();
        debug!("spawning {} {args:?}", self.executable.display());

        let child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| WangError::EngineSpawn {
                path: self.executable.clone(),
                source,
            })?;

        let status = self.wait(child)?;
        if status.success() {
            Ok(())
        } else {
            Err(WangError::EngineFailure {
                code: status.code(),
            })
        }
    }
}
