use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
  api::template::{Template, Values},
  error::{RenderError, Result},
};

pub const VERSION_KEY: &str = "build_version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
  pub path: PathBuf,
  pub substitutions: usize,
}

pub fn load_version(path: &Path) -> Result<String> {
  let content = fs::read_to_string(path).map_err(|err| RenderError::from_io(path, err))?;
  let version = content.trim();
  if version.is_empty() {
    return Err(RenderError::EmptyVersion {
      path: path.to_path_buf(),
    });
  }
  Ok(version.to_string())
}

/// Substitute `values` into the file at `path`, replacing it in place.
///
/// The new content is fully rendered before anything touches the disk, and is
/// then swapped in with a rename so the file is never left half written.
pub fn render(path: &Path, values: &Values) -> Result<RenderReport> {
  let source = fs::read_to_string(path).map_err(|err| RenderError::from_io(path, err))?;
  let template = Template::new(&source);
  log::debug!(
    "Placeholders in {}: {:?}",
    path.display(),
    template.placeholders()
  );
  let (rendered, substitutions) = template.substitute_counted(values)?;

  replace_contents(path, rendered.as_bytes())?;

  log::debug!(
    "Replaced {substitutions} placeholder(s) in {}",
    path.display()
  );

  Ok(RenderReport {
    path: path.to_path_buf(),
    substitutions,
  })
}

fn replace_contents(path: &Path, data: &[u8]) -> Result<()> {
  let io_err = |err: io::Error| RenderError::from_io(path, err);

  // Swap the file a symlink points at, not the link itself.
  let target = fs::canonicalize(path).map_err(io_err)?;
  let dir = target.parent().unwrap_or(Path::new("."));

  // The rename would otherwise succeed on a file we may not write to.
  fs::OpenOptions::new().write(true).open(&target).map_err(io_err)?;
  let permissions = fs::metadata(&target).map_err(io_err)?.permissions();

  // Dropping the temp file before `persist` removes it.
  let mut temp = NamedTempFile::new_in(dir).map_err(|err| RenderError::from_io(dir, err))?;
  temp.write_all(data).map_err(io_err)?;
  temp.flush().map_err(io_err)?;
  temp.as_file().sync_all().map_err(io_err)?;
  fs::set_permissions(temp.path(), permissions).map_err(io_err)?;

  temp.persist(&target).map_err(|err| io_err(err.error))?;
  Ok(())
}

