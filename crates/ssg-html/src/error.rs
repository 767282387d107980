use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain convertible content for a single source file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
}

impl ContentError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Empty { path } | Self::Unreadable { path, .. } => path,
        }
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
