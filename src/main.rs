//! vboxctl: run single `VBoxManage` operations from the shell.
//!
//! Each subcommand maps to exactly one façade call. `--dry-run` prints the
//! command line that would be executed instead of running it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use vbox_manage::config::{Config, PROGRAM_ENV};
use vbox_manage::paths::VBoxPaths;
use vbox_manage::{
    ExecutionError, Executor, Invocation, InvocationResult, ProcessExecutor, VBoxManage, VmManager,
};

#[derive(Parser, Debug)]
#[command(name = "vboxctl", version, about = "Typed front-end for VBoxManage")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the VBoxManage command line instead of running it
    #[arg(long, global = true)]
    dry_run: bool,

    /// VBoxManage program to run (overrides VBOXMANAGE_PATH and config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    vboxmanage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a virtual machine
    #[command(name = "createvm")]
    CreateVm(CreateVmArgs),

    /// Start a registered virtual machine
    #[command(name = "startvm")]
    StartVm {
        name: String,
    },

    /// Add a storage controller to a virtual machine
    #[command(name = "storagectl")]
    StorageCtl(StorageCtlArgs),

    /// Attach a medium to a storage controller
    #[command(name = "storageattach")]
    StorageAttach(StorageAttachArgs),

    /// Create a new medium (disk image)
    #[command(name = "createmedium")]
    CreateMedium(CreateMediumArgs),
}

#[derive(Args, Debug)]
struct CreateVmArgs {
    #[arg(long)]
    name: String,
    #[arg(long = "ostype")]
    os_type: String,
    #[arg(long = "basefolder")]
    base_folder: String,
    /// Register the VM with VirtualBox after creation
    #[arg(long)]
    register: bool,
}

#[derive(Args, Debug)]
struct StorageCtlArgs {
    vm_name: String,
    #[arg(long)]
    name: String,
    /// Controller bus type (ide, sata, scsi, ...)
    #[arg(long = "add")]
    ctl_type: String,
    /// Controller chipset (PIIX4, IntelAhci, ...)
    #[arg(long)]
    controller: String,
}

#[derive(Args, Debug)]
struct StorageAttachArgs {
    vm_name: String,
    #[arg(long = "storagectl")]
    controller_name: String,
    #[arg(long, allow_negative_numbers = true)]
    port: i32,
    #[arg(long, allow_negative_numbers = true)]
    device: i32,
    #[arg(long = "type")]
    storage_type: String,
    #[arg(long)]
    medium: String,
}

#[derive(Args, Debug)]
struct CreateMediumArgs {
    /// Medium type (disk, dvd, floppy)
    medium_type: String,
    #[arg(long = "filename")]
    file_path: String,
    /// Size in megabytes
    #[arg(long, allow_negative_numbers = true)]
    size: i32,
    #[arg(long)]
    format: String,
}

/// Prints each invocation to stdout and reports success without running it.
#[derive(Debug)]
struct DryRun;

impl Executor for DryRun {
    fn execute(&self, invocation: &Invocation) -> Result<InvocationResult, ExecutionError> {
        println!("{invocation}");
        Ok(InvocationResult::success(Vec::new()))
    }
}

impl Command {
    fn run(&self, vbox: &dyn VmManager) -> Result<(), ExecutionError> {
        match self {
            Command::CreateVm(a) => {
                vbox.create_vm(&a.name, &a.os_type, &a.base_folder, a.register)
            }
            Command::StartVm { name } => vbox.start_vm(name),
            Command::StorageCtl(a) => {
                vbox.add_storage_ctl(&a.vm_name, &a.name, &a.ctl_type, &a.controller)
            }
            Command::StorageAttach(a) => vbox.attach_storage(
                &a.vm_name,
                &a.controller_name,
                a.port,
                a.device,
                &a.storage_type,
                &a.medium,
            ),
            Command::CreateMedium(a) => {
                vbox.create_medium(&a.medium_type, &a.file_path, a.size, &a.format)
            }
        }
    }
}

fn load_config() -> Result<Config> {
    match VBoxPaths::resolve() {
        Some(paths) => Config::load(&paths.config_file()),
        None => Ok(Config::default()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config()?;
    let env = std::env::var(PROGRAM_ENV).ok();
    let program = config.program(cli.vboxmanage.as_deref(), env.as_deref());
    info!(program = %program, dry_run = cli.dry_run, "resolved VBoxManage");

    let result = if cli.dry_run {
        cli.command.run(&VBoxManage::with_executor(program, DryRun))
    } else {
        cli.command
            .run(&VBoxManage::with_executor(program, ProcessExecutor))
    };

    result.context("VBoxManage operation failed")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = vbox_manage::logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
