//! Logging initialisation for vboxctl.
//!
//! Stderr output is filtered by `RUST_LOG`, or by the `-v` count when
//! `RUST_LOG` is unset. When `VBOXCTL_LOG=1`, logs are also written to
//! `vboxctl.log` in the log directory from [`VBoxPaths`].
//!
//! Returns a guard that must be kept alive for the duration of the process
//! so that buffered log lines are flushed on exit.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::paths::VBoxPaths;

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialise the global tracing subscriber.
///
/// Call once from `main`, store the returned `LogGuard` in a local variable
/// for the duration of the process.
pub fn init(verbosity: u8) -> LogGuard {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)))
    };

    let log_dir = if std::env::var("VBOXCTL_LOG").as_deref() == Ok("1") {
        VBoxPaths::resolve()
            .filter(|paths| paths.ensure_logs().is_ok())
            .map(|paths| paths.logs)
    } else {
        None
    };

    let file_guard = match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "vboxctl.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

            tracing_subscriber::registry()
                .with(filter())
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(file_layer)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter())
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();

            None
        }
    };

    LogGuard {
        _file_guard: file_guard,
    }
}
