//! Directory layout for vboxctl.
//!
//! - Config: `~/.config/vboxctl/`  (human-editable, XDG-style on every platform)
//! - Logs:   `~/Library/Logs/vboxctl/` on macOS, `$XDG_DATA_HOME/vboxctl/logs/`
//!   elsewhere
//!
//! Nothing is created until [`VBoxPaths::ensure_logs`] is called.

use std::path::{Path, PathBuf};

use tracing::debug;

const APP_NAME: &str = "vboxctl";

/// Resolved application directories.
#[derive(Debug, Clone)]
pub struct VBoxPaths {
    /// Directory holding `config.toml`.
    pub config: PathBuf,
    /// Directory for the optional log file.
    pub logs: PathBuf,
}

impl VBoxPaths {
    /// Resolve from `HOME` and the XDG variables. Returns `None` without `HOME`.
    pub fn resolve() -> Option<Self> {
        let home = std::env::var("HOME").ok().map(PathBuf::from)?;

        Some(Self {
            config: resolve_config_dir(&home),
            logs: resolve_log_dir(&home),
        })
    }

    /// Path of the config file inside [`VBoxPaths::config`].
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    /// Create the log directory if it does not exist yet.
    pub fn ensure_logs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.logs)?;
        debug!("ensured directory: {}", self.logs.display());
        Ok(())
    }
}

fn resolve_config_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(APP_NAME)
    } else {
        home.join(".config").join(APP_NAME)
    }
}

#[cfg(target_os = "macos")]
fn resolve_log_dir(home: &Path) -> PathBuf {
    home.join("Library").join("Logs").join(APP_NAME)
}

#[cfg(not(target_os = "macos"))]
fn resolve_log_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join(APP_NAME).join("logs")
    } else {
        home.join(".local").join("share").join(APP_NAME).join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_produces_app_scoped_paths() {
        let paths = VBoxPaths::resolve().expect("HOME should be set in tests");
        assert!(paths.config.ends_with(APP_NAME));
        assert!(paths.logs.to_string_lossy().contains(APP_NAME));
        assert!(paths.config_file().ends_with("config.toml"));
    }

    #[test]
    fn ensure_logs_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = VBoxPaths {
            config: tmp.path().join("config"),
            logs: tmp.path().join("data/logs"),
        };

        paths.ensure_logs().expect("ensure_logs should succeed");

        assert!(paths.logs.is_dir());
        assert!(!paths.config.exists());
    }
}
