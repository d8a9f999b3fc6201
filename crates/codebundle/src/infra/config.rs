//! Configuration management utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::{DEFAULT_OUTPUT, ScanDepth};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".codebundle/config.toml";

/// Layered configuration loaded from defaults, user, and workspace files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bundle: BundleDefaults,
    #[serde(default)]
    pub scan: Scan,
}

/// Fallback values for `bundle` options not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BundleDefaults {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    note: Option<bool>,
    #[serde(default)]
    remove_empty_lines: Option<bool>,
    #[serde(default)]
    author: Option<String>,
}

impl BundleDefaults {
    pub fn output(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_owned())
    }

    /// Left raw so the validator reports a bad configured value like a bad flag.
    pub fn sort(&self) -> Option<String> {
        self.sort.clone()
    }

    pub fn note(&self) -> bool {
        self.note.unwrap_or(false)
    }

    pub fn remove_empty_lines(&self) -> bool {
        self.remove_empty_lines.unwrap_or(false)
    }

    pub fn author(&self) -> Option<String> {
        self.author.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scan {
    #[serde(default)]
    depth: Option<ScanDepth>,
}

impl Scan {
    pub fn depth(&self) -> ScanDepth {
        self.depth.unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from defaults, the user config, and `root`'s workspace config.
    pub fn load(root: &Path) -> Result<Self> {
        let global = global_config_path();
        let workspace = Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace)
    }

    fn load_with_layers(global: Option<PathBuf>, workspace: Option<PathBuf>) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        Ok(layers.into_iter().reduce(Config::merge).unwrap_or_default())
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
            bundle: merge_bundle(self.bundle, other.bundle),
            scan: Scan {
                depth: other.scan.depth.or(self.scan.depth),
            },
        }
    }
}

fn merge_bundle(base: BundleDefaults, overlay: BundleDefaults) -> BundleDefaults {
    BundleDefaults {
        output: overlay.output.or(base.output),
        sort: overlay.sort.or(base.sort),
        note: overlay.note.or(base.note),
        remove_empty_lines: overlay.remove_empty_lines.or(base.remove_empty_lines),
        author: overlay.author.or(base.author),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("codebundle/config.toml"))
}
