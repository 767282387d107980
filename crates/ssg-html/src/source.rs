use std::path::{Path, PathBuf};

use crate::error::{ContentError, ContentResult};

const UNTITLED: &str = "untitled";

/// Raw text of one input file together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    content: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content that is safe to convert, or [`ContentError::Empty`].
    pub(crate) fn require_content(&self) -> ContentResult<&str> {
        if self.content.is_empty() {
            return Err(ContentError::Empty {
                path: self.path.clone(),
            });
        }
        Ok(&self.content)
    }

    /// Last path segment, extension included.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Last path segment without its extension.
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| self.file_name())
    }
}
