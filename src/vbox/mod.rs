//! VirtualBox management via the `VBoxManage` command-line tool.
//!
//! Typed calls are translated 1:1 into `VBoxManage` invocations. Nothing is
//! parsed, tracked, or retried: each call spawns one process, waits for it,
//! and turns a non-zero exit into an [`ExecutionError`].
//!
//! ## Architecture
//!
//! ```text
//! VBoxManage::create_vm(..)
//!     └─► command::create_vm   →  Invocation ["VBoxManage", "createvm", ...]
//!             └─► Executor::execute   →  InvocationResult { output, code }
//!                     └─► code != 0   →  ExecutionError::Exited
//! ```

pub mod command;
pub mod error;
pub mod manage;
pub mod process;

/// Program name used when no override is configured.
#[cfg(target_os = "windows")]
pub const DEFAULT_PROGRAM: &str = "VBoxManage.exe";

/// Program name used when no override is configured.
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PROGRAM: &str = "VBoxManage";

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use command::Invocation;
pub use error::ExecutionError;
pub use manage::{VBoxManage, VmManager};
pub use process::{Executor, InvocationResult, ProcessExecutor};
