//! Bounded execution of a single shell command.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::FsError;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Inclusive bounds for a caller-supplied timeout.
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Arguments for a command run.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub command: String,
    pub working_dir: PathBuf,
    pub timeout_secs: u64,
    pub capture_stderr: bool,
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub capture_stderr: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Check a timeout against the accepted range; out-of-range values are
/// rejected, never clamped.
pub fn validate_timeout(secs: u64) -> Result<(), FsError> {
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(FsError::InvalidArgument(format!(
            "Timeout must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds (got {secs})"
        )))
    }
}

/// Run `request.command` through the system shell and wait for it.
pub fn run(request: &CommandRequest) -> Result<CommandOutput, FsError> {
    if request.command.trim().is_empty() {
        return Err(FsError::MissingArgument("command".to_string()));
    }
    validate_timeout(request.timeout_secs)?;
    require_dir(&request.working_dir)?;

    log::debug!(
        "running '{}' in {} (timeout {}s)",
        request.command,
        request.working_dir.display(),
        request.timeout_secs
    );

    let mut command = Command::new(shell());
    command
        .arg("-c")
        .arg(&request.command)
        .current_dir(&request.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    // own process group so a timeout can take down backgrounded children too
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    let mut child = command
        .spawn()
        .map_err(|e| FsError::from_io(e, Path::new(shell()), "executing"))?;

    let start = Instant::now();
    let deadline = start + Duration::from_secs(request.timeout_secs);

    // drain both pipes while waiting so a chatty child cannot block on a full pipe
    let (tx, rx) = mpsc::channel();
    let mut open_pipes = 0;
    if let Some(pipe) = child.stdout.take() {
        drain(pipe, Stream::Stdout, tx.clone());
        open_pipes += 1;
    }
    if let Some(pipe) = child.stderr.take() {
        drain(pipe, Stream::Stderr, tx.clone());
        open_pipes += 1;
    }
    drop(tx);

    let exit_code = match wait_until(&mut child, deadline)? {
        Some(code) => code,
        None => return Err(timed_out(&mut child, request.timeout_secs)),
    };

    // a background job may still hold the pipes after the shell exits
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    while open_pipes > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, bytes)) => stdout = bytes,
            Ok((Stream::Stderr, bytes)) => stderr = bytes,
            Err(RecvTimeoutError::Timeout) => {
                return Err(timed_out(&mut child, request.timeout_secs))
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
        open_pipes -= 1;
    }

    let output = CommandOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
        duration: start.elapsed(),
        capture_stderr: request.capture_stderr,
    };
    log::debug!(
        "command exited with {:?} after {:?}",
        output.exit_code,
        output.duration
    );
    Ok(output)
}

fn shell() -> &'static str {
    if Path::new("/bin/bash").exists() {
        "/bin/bash"
    } else {
        "/bin/sh"
    }
}

fn require_dir(dir: &Path) -> Result<(), FsError> {
    if !dir.exists() {
        return Err(FsError::PathNotFound {
            path: dir.display().to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.display().to_string(),
        });
    }
    Ok(())
}

/// Poll the shell until it exits or `deadline` passes.
///
/// `Ok(None)` means the deadline passed; the outer `Option` of the exit code
/// is `None` for a signal-terminated process.
fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<Option<i32>>, FsError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status.code())),
            Ok(None) if Instant::now() >= deadline => return Ok(None),
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(FsError::Io {
                    path: shell().to_string(),
                    source: e,
                })
            }
        }
    }
}

fn timed_out(child: &mut Child, secs: u64) -> FsError {
    kill_group(child);
    log::warn!("command killed after {secs}s timeout");
    FsError::Timeout { secs }
}

/// Kill the shell and everything left in its process group.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: `pgid` is the group this child leads (`process_group(0)`);
            // killpg only sends a signal.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, buf));
    });
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self
            .exit_code
            .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string());
        let stdout = self.stdout.trim_end();
        let stderr = if self.capture_stderr {
            self.stderr.trim_end()
        } else {
            ""
        };

        if stdout.is_empty() && stderr.is_empty() {
            let headline = if self.success() {
                "Command completed successfully (no output)"
            } else {
                "Command failed with no output"
            };
            return write!(f, "{headline}\nExit Code: {code}");
        }

        let mut parts = Vec::new();
        if !stdout.is_empty() {
            parts.push(format!("STDOUT:\n{stdout}"));
        }
        if !stderr.is_empty() {
            parts.push(format!("STDERR:\n{stderr}"));
        }
        parts.push(format!("Exit Code: {code}"));
        write!(f, "{}", parts.join("\n\n"))
    }
}
