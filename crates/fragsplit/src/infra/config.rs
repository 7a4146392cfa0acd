//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::PathPolicy;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".fragsplit/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: Output,
}

/// Where and how fragments are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default)]
    path_policy: Option<PathPolicy>,
    #[serde(default)]
    strict: Option<bool>,
}

impl Output {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }

    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(Self::default_dir)
    }

    pub fn path_policy(&self) -> PathPolicy {
        self.path_policy.unwrap_or_default()
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            dir: Some(Self::default_dir()),
            path_policy: Some(PathPolicy::default()),
            strict: Some(false),
        }
    }
}

/// Environment overrides for output settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output_dir: Option<String>,
    path_policy: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output_dir: env::var("FRAGSPLIT_OUTPUT_DIR").ok(),
            path_policy: env::var("FRAGSPLIT_PATH_POLICY").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output_dir: &str, path_policy: &str) -> Self {
        Self {
            output_dir: Some(output_dir.to_owned()),
            path_policy: Some(path_policy.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            output: merge_output(self.output, other.output),
        }
    }
}

fn merge_output(mut base: Output, overlay: Output) -> Output {
    if let Some(value) = overlay.dir {
        base.dir = Some(value);
    }
    if let Some(value) = overlay.path_policy {
        base.path_policy = Some(value);
    }
    if let Some(value) = overlay.strict {
        base.strict = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("fragsplit/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(dir) = env.output_dir.filter(|dir| !dir.is_empty()) {
        config.output.dir = Some(PathBuf::from(dir));
    }
    if let Some(policy) = env.path_policy {
        let policy = policy
            .parse::<PathPolicy>()
            .context("invalid FRAGSPLIT_PATH_POLICY")?;
        config.output.path_policy = Some(policy);
    }
    Ok(config)
}
