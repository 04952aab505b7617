use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{
  api::{
    layout::RepoLayout,
    render::{self, RenderReport, VERSION_KEY},
    template::Values,
  },
  cli::GlobalOpts,
  config::{self, StampConfig},
};

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
  /// Repository root. Defaults to the directory above the one holding this executable
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// Version file, relative to the root
  #[arg(long)]
  pub version_file: Option<PathBuf>,

  /// File to render in place, relative to the root
  #[arg(long)]
  pub env_file: Option<PathBuf>,
}

impl RenderArgs {
  fn as_config(&self) -> StampConfig {
    StampConfig {
      version_file: self.version_file.clone(),
      env_file: self.env_file.clone(),
      values: None,
    }
  }
}

/// Mapping for a render: configured values plus the reserved `build_version`.
pub fn build_values(version: &str, configured: Option<&Values>) -> Values {
  let mut values = configured.cloned().unwrap_or_default();
  if let Some(previous) = values.insert(VERSION_KEY.to_string(), version.to_string()) {
    log::warn!("Ignoring configured value {VERSION_KEY:?} = {previous:?}, using the version file");
  }
  values
}

pub fn run(layout: &RepoLayout, stamp_config: &StampConfig) -> Result<RenderReport> {
  log::debug!("Version file: {:?}", layout.version_file);
  log::debug!("Env file: {:?}", layout.env_file);

  let version = render::load_version(&layout.version_file)
    .with_context(|| format!("Failed to read version from {:?}", layout.version_file))?;
  log::info!("build number: {version}");

  let values = build_values(&version, stamp_config.values.as_ref());

  log::info!("templating {} file", layout.env_file.display());
  let report = render::render(&layout.env_file, &values)
    .with_context(|| format!("Failed to render {:?}", layout.env_file))?;

  Ok(report)
}

pub fn handle(args: RenderArgs, global: GlobalOpts) -> Result<()> {
  log::info!("Start templating");

  let layout = match &args.root {
    Some(root) => RepoLayout::new(std::env::current_dir()?.join(root)),
    None => RepoLayout::discover()?,
  };

  let file_config = config::load(global.config, &layout.root)?;
  let stamp_config = StampConfig::merge(&file_config, &args.as_config());
  let layout = stamp_config.apply_to(layout);

  run(&layout, &stamp_config)?;

  log::info!("finished");
  Ok(())
}
