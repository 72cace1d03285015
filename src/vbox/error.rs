use thiserror::Error;

/// Failure of a single `VBoxManage` invocation.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The process could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but did not exit with status 0.
    #[error("`{command}` exited with {}", describe_code(.code))]
    Exited {
        command: String,
        code: Option<i32>,
        output: Vec<u8>,
    },
}

impl ExecutionError {
    /// Combined stdout/stderr captured from the failed process.
    ///
    /// Empty for [`ExecutionError::Spawn`].
    pub fn output(&self) -> &[u8] {
        match self {
            ExecutionError::Spawn { .. } => &[],
            ExecutionError::Exited { output, .. } => output,
        }
    }

    /// Exit code of the failed process, when it reported one.
    pub fn code(&self) -> Option<i32> {
        match self {
            ExecutionError::Spawn { .. } => None,
            ExecutionError::Exited { code, .. } => *code,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
