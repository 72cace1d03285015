//! Command-line construction for `VBoxManage`.
//!
//! An [`Invocation`] is the ordered token list handed to the executor:
//! program name first, then the subcommand, then positional values and
//! `--flag value` pairs in exactly the order `VBoxManage` expects. The
//! tool parses its arguments positionally, so the builders below are the
//! single source of truth for argument order.
//!
//! ```text
//! VBoxManage createvm --name <name> --ostype <os> --basefolder <dir> [--register]
//! VBoxManage startvm <name>
//! VBoxManage storagectl <vm> --name <name> --add <type> --controller <chipset>
//! VBoxManage storageattach <vm> --storagectl <ctl> --port <n> --device <n> --type <t> --medium <m>
//! VBoxManage createmedium <type> --filename <path> --size <n> --format <fmt>
//! ```

use std::fmt;
use std::process::Command;

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// A single command line for the external executable.
///
/// Built fresh for every call and consumed by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Start a command line for `program` running `subcommand`.
    pub fn new(program: impl Into<String>, subcommand: &str) -> Self {
        Self {
            program: program.into(),
            args: vec![subcommand.to_string()],
        }
    }

    /// Append a bare positional token.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append a `--flag value` pair.
    pub fn flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.args.push(name.to_string());
        self.args.push(value.into());
        self
    }

    /// Append a valueless switch when `enabled` is true.
    pub fn switch(mut self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.args.push(name.to_string());
        }
        self
    }

    /// The program token (first element of [`Invocation::tokens`]).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Everything after the program token.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The subcommand (`createvm`, `startvm`, ...).
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// The full token sequence: program followed by its arguments.
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Translate into a `std::process::Command` ready to spawn.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

// ---------------------------------------------------------------------------
// Per-operation builders
// ---------------------------------------------------------------------------

/// `createvm --name <name> --ostype <os_type> --basefolder <base_folder> [--register]`
pub fn create_vm(
    program: &str,
    name: &str,
    os_type: &str,
    base_folder: &str,
    should_register: bool,
) -> Invocation {
    Invocation::new(program, "createvm")
        .flag("--name", name)
        .flag("--ostype", os_type)
        .flag("--basefolder", base_folder)
        .switch("--register", should_register)
}

/// `startvm <name>`
pub fn start_vm(program: &str, name: &str) -> Invocation {
    Invocation::new(program, "startvm").arg(name)
}

/// `storagectl <vm_name> --name <name> --add <ctl_type> --controller <controller>`
pub fn add_storage_ctl(
    program: &str,
    vm_name: &str,
    name: &str,
    ctl_type: &str,
    controller: &str,
) -> Invocation {
    Invocation::new(program, "storagectl")
        .arg(vm_name)
        .flag("--name", name)
        .flag("--add", ctl_type)
        .flag("--controller", controller)
}

/// `storageattach <vm_name> --storagectl <ctl> --port <port> --device <device> --type <type> --medium <medium>`
pub fn attach_storage(
    program: &str,
    vm_name: &str,
    controller_name: &str,
    port: i32,
    device: i32,
    storage_type: &str,
    medium: &str,
) -> Invocation {
    Invocation::new(program, "storageattach")
        .arg(vm_name)
        .flag("--storagectl", controller_name)
        .flag("--port", port.to_string())
        .flag("--device", device.to_string())
        .flag("--type", storage_type)
        .flag("--medium", medium)
}

/// `createmedium <medium_type> --filename <file_path> --size <size> --format <format>`
pub fn create_medium(
    program: &str,
    medium_type: &str,
    file_path: &str,
    size: i32,
    format: &str,
) -> Invocation {
    Invocation::new(program, "createmedium")
        .arg(medium_type)
        .flag("--filename", file_path)
        .flag("--size", size.to_string())
        .flag("--format", format)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_vm_with_register_appends_switch_last() {
        let inv = create_vm("VBoxManage", "test-vm", "Ubuntu_64", "/vms", true);

        assert_eq!(
            inv.tokens(),
            vec![
                "VBoxManage",
                "createvm",
                "--name",
                "test-vm",
                "--ostype",
                "Ubuntu_64",
                "--basefolder",
                "/vms",
                "--register",
            ]
        );
    }

    #[test]
    fn create_vm_without_register_omits_switch() {
        let inv = create_vm("VBoxManage", "test-vm", "Ubuntu_64", "/vms", false);

        assert!(!inv.args().iter().any(|a| a == "--register"));
        assert_eq!(inv.args().last().map(String::as_str), Some("/vms"));
    }

    #[test]
    fn start_vm_is_positional() {
        let inv = start_vm("VBoxManage", "test-vm");
        assert_eq!(inv.tokens(), vec!["VBoxManage", "startvm", "test-vm"]);
    }

    #[test]
    fn attach_storage_renders_decimal_numbers() {
        let inv = attach_storage("VBoxManage", "vm", "SATA", 10, 1024, "hdd", "disk.vdi");
        let args = inv.args();

        assert_eq!(args[4], "--port");
        assert_eq!(args[5], "10");
        assert_eq!(args[6], "--device");
        assert_eq!(args[7], "1024");
    }

    #[test]
    fn negative_numbers_pass_through_unvalidated() {
        let inv = attach_storage("VBoxManage", "vm", "SATA", -1, -2, "hdd", "disk.vdi");
        assert!(inv.tokens().contains(&"-1"));
        assert!(inv.tokens().contains(&"-2"));
    }

    #[test]
    fn subcommand_and_program_accessors() {
        let inv = create_medium("/opt/vbox/VBoxManage", "disk", "/vms/a.vdi", 1024, "VDI");
        assert_eq!(inv.program(), "/opt/vbox/VBoxManage");
        assert_eq!(inv.subcommand(), "createmedium");
    }

    #[test]
    fn display_joins_tokens_with_spaces() {
        let inv = start_vm("VBoxManage", "test-vm");
        assert_eq!(inv.to_string(), "VBoxManage startvm test-vm");
    }

    #[test]
    fn to_command_carries_program_and_args() {
        let inv = add_storage_ctl("VBoxManage", "vm", "SATA", "sata", "IntelAhci");
        let cmd = inv.to_command();

        assert_eq!(cmd.get_program(), "VBoxManage");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec!["storagectl", "vm", "--name", "SATA", "--add", "sata", "--controller", "IntelAhci"]
        );
    }
}
