//! Optional operator configuration, read from `config.toml`.
//!
//! ```toml
//! # ~/.config/vboxctl/config.toml
//! vboxmanage = "/usr/local/bin/VBoxManage"
//! ```
//!
//! The file is only ever read. Precedence for the program to run is:
//! `--vboxmanage` flag, then `VBOXMANAGE_PATH`, then this file, then
//! [`DEFAULT_PROGRAM`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::vbox::DEFAULT_PROGRAM;

/// Environment variable overriding the `VBoxManage` program.
pub const PROGRAM_ENV: &str = "VBOXMANAGE_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program to run instead of `VBoxManage` from `PATH`.
    pub vboxmanage: Option<PathBuf>,
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("read config {}", path.display()));
            }
        };

        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Resolve the program, consulting `flag` and `env` before the file.
    pub fn program(&self, flag: Option<&Path>, env: Option<&str>) -> String {
        if let Some(path) = flag {
            return path.display().to_string();
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return value.to_string();
        }
        match &self.vboxmanage {
            Some(path) => path.display().to_string(),
            None => DEFAULT_PROGRAM.to_string(),
        }
    }
}
