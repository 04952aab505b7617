use std::path::PathBuf;

use crate::commands::render::RenderArgs;

#[derive(Debug, clap::Args)]
pub struct GlobalOpts {
  #[clap(long, global = true)]
  pub log_level: Option<log::LevelFilter>,

  /// Config file to use instead of `envstamp.toml` at the repository root
  #[arg(long, global = true)]
  pub config: Option<PathBuf>,
}

/// Stamp the version from VERSION into .env.production
#[derive(clap::Parser, Debug)]
#[command(name = "envstamp", version = env!("ENVSTAMP_VERSION"))]
pub struct Cli {
  #[clap(flatten)]
  pub global_opts: GlobalOpts,

  #[clap(flatten)]
  pub render: RenderArgs,
}
