use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("File not found: {}", path.display())]
  FileNotFound { path: PathBuf },

  #[error("Permission denied: {}", path.display())]
  PermissionDenied { path: PathBuf },

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Missing value for placeholder '{name}' at line {line}, col {column}")]
  MissingKey {
    name: String,
    line: usize,
    column: usize,
  },

  #[error("Invalid placeholder at line {line}, col {column}")]
  InvalidPlaceholder { line: usize, column: usize },

  #[error("Version file {} is empty", path.display())]
  EmptyVersion { path: PathBuf },
}

impl RenderError {
  /// Classify an I/O failure against the file it happened on.
  pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    let path = path.into();
    match source.kind() {
      io::ErrorKind::NotFound => RenderError::FileNotFound { path },
      io::ErrorKind::PermissionDenied => RenderError::PermissionDenied { path },
      _ => RenderError::Io { path, source },
    }
  }
}

pub type Result<T> = std::result::Result<T, RenderError>;
