//! The manager façade: one method per `VBoxManage` subcommand.
//!
//! Each call builds an [`Invocation`], hands it to the [`Executor`], and maps
//! a non-zero exit to [`ExecutionError::Exited`]. Output is discarded on
//! success. `create_medium` alone copies the captured output of a failed run
//! to the diagnostic sink before returning the error.

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::DEFAULT_PROGRAM;
use super::command::{self, Invocation};
use super::error::ExecutionError;
use super::process::{Executor, ProcessExecutor};

/// The operations exposed over `VBoxManage`.
pub trait VmManager {
    /// `VBoxManage createvm`.
    fn create_vm(
        &self,
        name: &str,
        os_type: &str,
        base_folder: &str,
        should_register: bool,
    ) -> Result<(), ExecutionError>;

    /// `VBoxManage startvm`.
    fn start_vm(&self, name: &str) -> Result<(), ExecutionError>;

    /// `VBoxManage storagectl ... --add`.
    fn add_storage_ctl(
        &self,
        vm_name: &str,
        name: &str,
        ctl_type: &str,
        controller: &str,
    ) -> Result<(), ExecutionError>;

    /// `VBoxManage storageattach`.
    fn attach_storage(
        &self,
        vm_name: &str,
        controller_name: &str,
        port: i32,
        device: i32,
        storage_type: &str,
        medium: &str,
    ) -> Result<(), ExecutionError>;

    /// `VBoxManage createmedium`.
    fn create_medium(
        &self,
        medium_type: &str,
        file_path: &str,
        size: i32,
        format: &str,
    ) -> Result<(), ExecutionError>;
}

type DiagnosticSink = Box<dyn Write + Send>;

/// `VBoxManage` driven through an [`Executor`].
///
/// Holds no state between calls apart from the diagnostic sink, so a single
/// value can be shared across threads when `E` allows it.
pub struct VBoxManage<E = ProcessExecutor> {
    program: String,
    executor: E,
    diagnostics: Mutex<DiagnosticSink>,
}

impl VBoxManage<ProcessExecutor> {
    /// Run the platform's default `VBoxManage` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Run `program` (a name resolved via `PATH`, or a full path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self::with_executor(program, ProcessExecutor)
    }
}

impl Default for VBoxManage<ProcessExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Executor> VBoxManage<E> {
    pub fn with_executor(program: impl Into<String>, executor: E) -> Self {
        Self {
            program: program.into(),
            executor,
            diagnostics: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Replace the diagnostic sink (stderr by default).
    pub fn diagnostics(mut self, sink: impl Write + Send + 'static) -> Self {
        self.diagnostics = Mutex::new(Box::new(sink));
        self
    }

    /// The program token every invocation starts with.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn run(&self, invocation: Invocation) -> Result<Vec<u8>, ExecutionError> {
        debug!(command = %invocation, "running VBoxManage");

        let result = self.executor.execute(&invocation).inspect_err(|e| {
            warn!(subcommand = invocation.subcommand(), error = %e, "VBoxManage did not start");
        })?;

        if result.is_success() {
            return Ok(result.output);
        }

        warn!(
            subcommand = invocation.subcommand(),
            code = ?result.code,
            "VBoxManage failed"
        );
        Err(ExecutionError::Exited {
            command: invocation.to_string(),
            code: result.code,
            output: result.output,
        })
    }

    fn report(&self, output: &[u8]) {
        let mut sink = self
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(output);
        let _ = sink.write_all(b"\n");
        let _ = sink.flush();
    }
}

impl<E: Executor> VmManager for VBoxManage<E> {
    fn create_vm(
        &self,
        name: &str,
        os_type: &str,
        base_folder: &str,
        should_register: bool,
    ) -> Result<(), ExecutionError> {
        self.run(command::create_vm(
            &self.program,
            name,
            os_type,
            base_folder,
            should_register,
        ))?;
        Ok(())
    }

    fn start_vm(&self, name: &str) -> Result<(), ExecutionError> {
        self.run(command::start_vm(&self.program, name))?;
        Ok(())
    }

    fn add_storage_ctl(
        &self,
        vm_name: &str,
        name: &str,
        ctl_type: &str,
        controller: &str,
    ) -> Result<(), ExecutionError> {
        self.run(command::add_storage_ctl(
            &self.program,
            vm_name,
            name,
            ctl_type,
            controller,
        ))?;
        Ok(())
    }

    fn attach_storage(
        &self,
        vm_name: &str,
        controller_name: &str,
        port: i32,
        device: i32,
        storage_type: &str,
        medium: &str,
    ) -> Result<(), ExecutionError> {
        self.run(command::attach_storage(
            &self.program,
            vm_name,
            controller_name,
            port,
            device,
            storage_type,
            medium,
        ))?;
        Ok(())
    }

    fn create_medium(
        &self,
        medium_type: &str,
        file_path: &str,
        size: i32,
        format: &str,
    ) -> Result<(), ExecutionError> {
        self.run(command::create_medium(
            &self.program,
            medium_type,
            file_path,
            size,
            format,
        ))
        .inspect_err(|e| self.report(e.output()))?;
        Ok(())
    }
}

impl<E: fmt::Debug> fmt::Debug for VBoxManage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VBoxManage")
            .field("program", &self.program)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::vbox::process::InvocationResult;

    /// Replies with a fixed result and remembers the last argv.
    struct Canned {
        reply: InvocationResult,
        last: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: InvocationResult) -> Self {
            Self {
                reply,
                last: Mutex::new(Vec::new()),
            }
        }
    }

    impl Executor for Canned {
        fn execute(&self, invocation: &Invocation) -> Result<InvocationResult, ExecutionError> {
            *self.last.lock().unwrap() = invocation.tokens().iter().map(|t| t.to_string()).collect();
            Ok(self.reply.clone())
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn default_program_is_vboxmanage() {
        let manager = VBoxManage::new();
        assert!(manager.program().starts_with("VBoxManage"));
    }

    #[test]
    fn exited_error_carries_command_and_output() {
        let manager = VBoxManage::with_executor(
            "VBoxManage",
            Canned::new(InvocationResult::failure(Some(1), "no such vm")),
        );

        let err = manager.start_vm("ghost").unwrap_err();

        match err {
            ExecutionError::Exited { command, code, output } => {
                assert_eq!(command, "VBoxManage startvm ghost");
                assert_eq!(code, Some(1));
                assert_eq!(output, b"no such vm");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_medium_failure_reports_output() {
        let sink = SharedBuf::default();
        let manager = VBoxManage::with_executor(
            "VBoxManage",
            Canned::new(InvocationResult::failure(Some(1), "VERR_ALREADY_EXISTS")),
        )
        .diagnostics(sink.clone());

        assert!(manager.create_medium("disk", "/vms/a.vdi", 1024, "VDI").is_err());

        assert_eq!(sink.0.lock().unwrap().as_slice(), b"VERR_ALREADY_EXISTS\n");
    }

    #[test]
    fn create_medium_success_reports_nothing() {
        let sink = SharedBuf::default();
        let manager = VBoxManage::with_executor(
            "VBoxManage",
            Canned::new(InvocationResult::success("0%...100%")),
        )
        .diagnostics(sink.clone());

        manager.create_medium("disk", "/vms/a.vdi", 1024, "VDI").unwrap();

        assert!(sink.0.lock().unwrap().is_empty());
        assert_eq!(manager.executor().last.lock().unwrap()[1], "createmedium");
    }

    #[test]
    fn other_operations_never_report() {
        let sink = SharedBuf::default();
        let manager = VBoxManage::with_executor(
            "VBoxManage",
            Canned::new(InvocationResult::failure(Some(1), "boom")),
        )
        .diagnostics(sink.clone());

        assert!(manager.create_vm("vm", "Ubuntu_64", "/vms", true).is_err());
        assert!(manager.start_vm("vm").is_err());
        assert!(manager.add_storage_ctl("vm", "SATA", "sata", "IntelAhci").is_err());
        assert!(manager.attach_storage("vm", "SATA", 0, 0, "hdd", "/vms/a.vdi").is_err());

        assert!(sink.0.lock().unwrap().is_empty());
    }
}
