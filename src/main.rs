use anyhow::Result;
use clap::Parser as ClapParser;

use envstamp::{cli, commands};

fn main() -> Result<()> {
  let cli = cli::Cli::parse();

  let mut log_builder = env_logger::builder();
  log_builder
    .format_timestamp(None)
    .format_target(false)
    .target(env_logger::Target::Stdout)
    .filter_module(
      "envstamp",
      cli.global_opts.log_level.unwrap_or(log::LevelFilter::Info),
    )
    .filter_level(log::LevelFilter::Off);

  log_builder.init();

  commands::render::handle(cli.render, cli.global_opts)?;

  Ok(())
}
