//! Typed wrapper around the `VBoxManage` command-line tool.
//!
//! ```no_run
//! use vbox_manage::{VBoxManage, VmManager};
//!
//! let vbox = VBoxManage::new();
//! vbox.create_vm("test-vm", "Ubuntu_64", "/vms", true)?;
//! vbox.create_medium("disk", "/vms/test-vm/disk.vdi", 10240, "VDI")?;
//! vbox.add_storage_ctl("test-vm", "SATA", "sata", "IntelAhci")?;
//! vbox.attach_storage("test-vm", "SATA", 0, 0, "hdd", "/vms/test-vm/disk.vdi")?;
//! vbox.start_vm("test-vm")?;
//! # Ok::<(), vbox_manage::ExecutionError>(())
//! ```

pub mod config;
pub mod logging;
pub mod paths;
pub mod vbox;

pub use vbox::{
    ExecutionError, Executor, Invocation, InvocationResult, ProcessExecutor, VBoxManage, VmManager,
};
