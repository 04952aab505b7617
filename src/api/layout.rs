use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const VERSION_FILE_NAME: &str = "VERSION";
pub const ENV_FILE_NAME: &str = ".env.production";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
  pub root: PathBuf,
  pub version_file: PathBuf,
  pub env_file: PathBuf,
}

impl RepoLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    Self {
      version_file: root.join(VERSION_FILE_NAME),
      env_file: root.join(ENV_FILE_NAME),
      root,
    }
  }

  /// Layout rooted one directory above the directory holding the running
  /// executable.
  pub fn discover() -> Result<Self> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let root = repo_root_for(&exe)
      .with_context(|| format!("Executable {:?} has no parent directory to use as root", exe))?;
    Ok(Self::new(root))
  }

  pub fn with_version_file(mut self, path: PathBuf) -> Self {
    self.version_file = absolutize_path(path, &self.root);
    self
  }

  pub fn with_env_file(mut self, path: PathBuf) -> Self {
    self.env_file = absolutize_path(path, &self.root);
    self
  }
}

fn repo_root_for(exe: &Path) -> Option<PathBuf> {
  exe.parent()?.parent().map(PathBuf::from)
}

pub fn absolutize_path(path: PathBuf, base_dir: &Path) -> PathBuf {
  if path.is_absolute() {
    path
  } else {
    base_dir.join(path)
  }
}
