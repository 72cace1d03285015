//! Process execution for [`Invocation`]s.
//!
//! [`Executor`] is the seam between command construction and the operating
//! system. [`ProcessExecutor`] spawns the real process; tests and dry runs
//! substitute their own implementation to capture argv instead.
//!
//! Execution is synchronous: the calling thread blocks until the child exits.
//! There is no timeout, so a hung `VBoxManage` hangs the caller.

use std::process::Stdio;

use tracing::debug;

use super::command::Invocation;
use super::error::ExecutionError;

/// Outcome of a process that was started successfully.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationResult {
    /// Standard output followed by standard error.
    pub output: Vec<u8>,

    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl InvocationResult {
    /// A zero exit with the given output.
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            code: Some(0),
        }
    }

    /// A non-zero (or signal) exit with the given output.
    pub fn failure(code: Option<i32>, output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an [`Invocation`] to completion.
///
/// Implementations return `Err` only when the process could not be started;
/// a non-zero exit is reported through [`InvocationResult::code`].
pub trait Executor {
    fn execute(&self, invocation: &Invocation) -> Result<InvocationResult, ExecutionError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, invocation: &Invocation) -> Result<InvocationResult, ExecutionError> {
        (**self).execute(invocation)
    }
}

/// Spawns the invocation as a child process and captures its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<InvocationResult, ExecutionError> {
        let mut cmd = invocation.to_command();
        cmd.stdin(Stdio::null());

        // `output()` owns both pipes and the child handle; they are closed on
        // every return path, including a failed spawn.
        let output = cmd.output().map_err(|source| ExecutionError::Spawn {
            program: invocation.program().to_string(),
            source,
        })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        debug!(
            subcommand = invocation.subcommand(),
            code = ?output.status.code(),
            bytes = combined.len(),
            "process exited"
        );

        Ok(InvocationResult {
            output: combined,
            code: output.status.code(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
