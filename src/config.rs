use anyhow::{Context, Result};
use std::{
  collections::HashMap,
  hash::Hash,
  path::{Path, PathBuf},
};

use crate::api::{
  layout::{RepoLayout, absolutize_path},
  template::Values,
};

pub const CONFIG_FILE_NAME: &str = "envstamp.toml";

#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StampConfig {
  pub version_file: Option<PathBuf>,
  pub env_file: Option<PathBuf>,

  /// Extra placeholder values, alongside `build_version`.
  pub values: Option<Values>,
}

fn merge_maps<K: Eq + Hash + Clone, V: Clone>(
  base: &Option<HashMap<K, V>>,
  overlay: &Option<HashMap<K, V>>,
) -> Option<HashMap<K, V>> {
  match (base, overlay) {
    (None, None) => None,
    (Some(values), None) | (None, Some(values)) => Some(values.clone()),
    (Some(base_values), Some(overlay_values)) => {
      let mut merged = base_values.clone();
      merged.extend(overlay_values.clone());
      Some(merged)
    }
  }
}

impl StampConfig {
  pub fn from_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: StampConfig = toml::from_str(&content)?;
    Ok(config.absolutize_paths(path.parent()))
  }

  pub fn merge(base: &StampConfig, overlay: &StampConfig) -> StampConfig {
    StampConfig {
      version_file: overlay
        .version_file
        .clone()
        .or_else(|| base.version_file.clone()),
      env_file: overlay.env_file.clone().or_else(|| base.env_file.clone()),
      values: merge_maps(&base.values, &overlay.values),
    }
  }

  fn absolutize_paths(mut self, base_dir: Option<&Path>) -> Self {
    let Some(base_dir) = base_dir else {
      return self;
    };

    self.version_file = self
      .version_file
      .map(|path| absolutize_path(path, base_dir));
    self.env_file = self.env_file.map(|path| absolutize_path(path, base_dir));

    self
  }

  /// Apply the configured file overrides on top of `layout`.
  pub fn apply_to(&self, mut layout: RepoLayout) -> RepoLayout {
    if let Some(path) = &self.version_file {
      layout = layout.with_version_file(path.clone());
    }
    if let Some(path) = &self.env_file {
      layout = layout.with_env_file(path.clone());
    }
    layout
  }
}

/// Load the config named on the command line, or `envstamp.toml` at the
/// repository root if there is one.
pub fn load(config_path: Option<PathBuf>, root: &Path) -> Result<StampConfig> {
  if let Some(path) = config_path {
    let path = std::env::current_dir()?.join(path);
    return StampConfig::from_file(&path)
      .with_context(|| format!("Failed to load config {:?}", path));
  }

  let local_config_path = root.join(CONFIG_FILE_NAME);
  if !local_config_path.is_file() {
    log::debug!("No config at {:?}, using defaults", local_config_path);
    return Ok(StampConfig::default());
  }

  log::debug!("Loading config {:?}", local_config_path);
  StampConfig::from_file(&local_config_path)
    .with_context(|| format!("Failed to load config {:?}", local_config_path))
}
