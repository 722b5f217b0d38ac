//! The simulator process and its line stream.

use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::DriverError;

/// How the simulator process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// The exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

/// Output of a running simulator, one line at a time.
///
/// Single-use: once the simulator closes its output (or a read fails) the
/// iterator yields `None` forever. Dropping a stream whose process is still
/// running kills and reaps the process.
#[derive(Debug)]
pub struct LineStream {
    child: Child,
    lines: Option<Lines<BufReader<ChildStdout>>>,
    executable: String,
    lines_read: u64,
}

impl LineStream {
    /// Launch `executable` with `config_path` as its only argument.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Launch`] if the process cannot be started.
    /// No line is produced in that case.
    pub fn start(executable: &Path, config_path: &Path) -> Result<Self, DriverError> {
        let executable_name = executable.display().to_string();

        let mut child = Command::new(executable)
            .arg(config_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DriverError::Launch {
                executable: executable_name.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(DriverError::Launch {
                executable: executable_name,
                source: std::io::Error::other("simulator stdout was not captured"),
            });
        };

        info!(
            executable = %executable_name,
            config = %config_path.display(),
            pid = child.id(),
            "simulator started"
        );

        Ok(Self {
            child,
            lines: Some(BufReader::new(stdout).lines()),
            executable: executable_name,
            lines_read: 0,
        })
    }

    /// OS process id of the simulator.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Number of lines yielded so far.
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Whether the stream has ended.
    pub const fn is_exhausted(&self) -> bool {
        self.lines.is_none()
    }

    /// Wait for the simulator to exit and report its status.
    ///
    /// Any output not yet read is discarded. A non-zero exit is logged as a
    /// warning and returned with `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Wait`] if the exit status cannot be collected.
    pub fn finish(mut self) -> Result<ProcessExit, DriverError> {
        if self.lines.take().is_some() {
            debug!(
                executable = %self.executable,
                lines_read = self.lines_read,
                "closing simulator output before end of stream"
            );
        }

        let status = self.child.wait()?;
        let exit = ProcessExit {
            success: status.success(),
            code: status.code(),
        };

        if exit.success {
            info!(
                executable = %self.executable,
                lines_read = self.lines_read,
                "simulator exited"
            );
        } else {
            warn!(
                executable = %self.executable,
                code = ?exit.code,
                lines_read = self.lines_read,
                "simulator exited with non-zero status"
            );
        }

        Ok(exit)
    }

    /// Stop the simulator now and reap it.
    pub fn terminate(mut self) {
        self.lines = None;
        info!(
            executable = %self.executable,
            pid = self.child.id(),
            lines_read = self.lines_read,
            "terminating simulator"
        );
        reap(&mut self.child);
    }
}

impl Iterator for LineStream {
    type Item = Result<String, DriverError>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines.as_mut()?;
        match lines.next() {
            Some(Ok(line)) => {
                self.lines_read = self.lines_read.saturating_add(1);
                Some(Ok(line))
            }
            Some(Err(source)) => {
                self.lines = None;
                Some(Err(DriverError::Read {
                    line_number: self.lines_read.saturating_add(1),
                    source,
                }))
            }
            None => {
                self.lines = None;
                debug!(
                    executable = %self.executable,
                    lines_read = self.lines_read,
                    "simulator output closed"
                );
                None
            }
        }
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            warn!(
                executable = %self.executable,
                pid = self.child.id(),
                "simulator still running when its stream was dropped, killing it"
            );
            reap(&mut self.child);
        }
    }
}

/// Kill a child process if it is still running, then collect its status.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "simulator already exited");
    }
    if let Err(e) = child.wait() {
        warn!(error = %e, "failed to reap simulator process");
    }
}
