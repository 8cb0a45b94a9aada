use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct PythonConfig {
    pub(crate) program: String,
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub(crate) dist_dir: &'static str,
}

#[derive(Debug, Clone)]
pub struct Config {
    python: PythonConfig,
    publish: PublishConfig,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        let program = snapshot
            .var("PYSHIP_PYTHON")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_python())
            .to_string();
        Self {
            python: PythonConfig { program },
            publish: PublishConfig { dist_dir: "dist" },
        }
    }

    #[must_use]
    pub fn python(&self) -> &PythonConfig {
        &self.python
    }

    #[must_use]
    pub fn publish(&self) -> &PublishConfig {
        &self.publish
    }
}

fn default_python() -> &'static str {
    if cfg!(unix) {
        "python3"
    } else {
        "python"
    }
}

#[derive(Debug)]
pub struct CommandContext {
    config: Config,
    cwd: PathBuf,
}

impl CommandContext {
    /// Captures configuration and the working directory for one invocation.
    ///
    /// # Errors
    /// Returns an error when the current working directory cannot be resolved.
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().context("resolving current working directory")?;
        Ok(Self {
            config: Config::from_env(),
            cwd,
        })
    }

    #[must_use]
    pub fn new(config: Config, cwd: PathBuf) -> Self {
        Self { config, cwd }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}
