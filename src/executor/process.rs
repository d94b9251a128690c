//! System process runner with timeout and cancellation.
//!
//! On unix the child leads its own process group. `gcloud` is a shell launcher
//! around a Python process, so stopping the command means signalling the whole
//! group rather than the launcher alone.

use super::{CancelToken, ExecutionResult, ProcessRunner};
use crate::error::AssistError;
use crate::invocation::Invocation;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use wait_timeout::ChildExt;

/// How often a running child is checked for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Owns a spawned child. Until [`ChildGuard::release`] is called, dropping the guard
/// kills the child's process group and reaps the child.
struct ChildGuard {
    child: Child,
    reaped: bool,
    released: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
            released: false,
        }
    }

    fn wait_slice(&mut self, slice: Duration) -> std::io::Result<Option<ExitStatus>> {
        let status = self.child.wait_timeout(slice)?;
        if status.is_some() {
            self.reaped = true;
        }
        Ok(status)
    }

    /// Kill everything the command started, then reap the child if still needed.
    fn terminate(&mut self) {
        self.kill_group();
        if !self.reaped {
            if let Err(e) = self.child.kill() {
                warn!(pid = self.child.id(), error = %e, "Failed to kill child process");
            }
            let _ = self.child.wait();
            self.reaped = true;
        }
    }

    /// The command finished on its own and its pipes are closed.
    fn release(&mut self) {
        self.released = true;
    }

    #[cfg(unix)]
    fn kill_group(&self) {
        // Spawned with process_group(0): the child's pid is the group id. The id stays
        // reserved while any member is alive, even after the leader is reaped.
        let pgid = self.child.id() as libc::pid_t;
        if unsafe { libc::killpg(pgid, libc::SIGKILL) } == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() != Some(libc::ESRCH) {
                warn!(pgid, error = %err, "Failed to kill process group");
            }
        }
    }

    #[cfg(not(unix))]
    fn kill_group(&self) {}
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.released {
            self.terminate();
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Drain `pipe` on its own thread and send the bytes once it reaches EOF.
fn spawn_reader<R: Read + Send + 'static>(
    pipe: Option<R>,
    which: Pipe,
    done: Sender<(Pipe, Vec<u8>)>,
) {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = done.send((which, buf));
    });
}

/// Time left for one command, shared by the wait and the output drain.
struct Budget<'a> {
    invocation: &'a Invocation,
    timeout: Duration,
    deadline: Instant,
    cancel: &'a CancelToken,
}

impl Budget<'_> {
    /// Next wait slice, or the error to return after the process group is killed.
    fn next_slice(&self, guard: &mut ChildGuard) -> Result<Duration, AssistError> {
        if self.cancel.is_cancelled() {
            guard.terminate();
            warn!(command = %self.invocation, "External command cancelled");
            return Err(AssistError::Cancelled);
        }
        let now = Instant::now();
        if now >= self.deadline {
            guard.terminate();
            warn!(
                command = %self.invocation,
                timeout_ms = self.timeout.as_millis() as u64,
                "External command timed out"
            );
            return Err(AssistError::ExecutionTimeout(self.timeout));
        }
        Ok(POLL_INTERVAL.min(self.deadline - now))
    }
}

/// Runs invocations as real child processes. stdin is closed and interactive prompts
/// are disabled; stdout and stderr are drained on reader threads.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .env("CLOUDSDK_CORE_DISABLE_PROMPTS", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        command
    }
}

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> Result<ExecutionResult, AssistError> {
        let started = Instant::now();
        info!(command = %invocation, "Spawning external command");

        let child = Self::command(invocation)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AssistError::Internal(format!(
                    "Executable not found: {}",
                    invocation.program.display()
                )),
                _ => AssistError::Internal(format!(
                    "Failed to spawn {}: {}",
                    invocation.program.display(),
                    e
                )),
            })?;

        let mut guard = ChildGuard::new(child);
        let (done, finished) = mpsc::channel();
        spawn_reader(guard.child.stdout.take(), Pipe::Stdout, done.clone());
        spawn_reader(guard.child.stderr.take(), Pipe::Stderr, done);
        let budget = Budget {
            invocation,
            timeout,
            deadline: started + timeout,
            cancel,
        };

        let status = loop {
            let slice = budget.next_slice(&mut guard)?;
            if let Some(status) = guard.wait_slice(slice)? {
                break status;
            }
        };

        // Anything the child left in the background may still hold a pipe open.
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut open_pipes = 2;
        while open_pipes > 0 {
            let slice = budget.next_slice(&mut guard)?;
            match finished.recv_timeout(slice) {
                Ok((Pipe::Stdout, bytes)) => {
                    stdout = bytes;
                    open_pipes -= 1;
                }
                Ok((Pipe::Stderr, bytes)) => {
                    stderr = bytes;
                    open_pipes -= 1;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        guard.release();

        let result = ExecutionResult {
            // Killed by a signal: no exit code.
            exit_code: status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        };
        info!(
            exit_code = result.exit_code,
            duration_ms = started.elapsed().as_millis() as u64,
            "External command finished"
        );
        Ok(result)
    }
}
