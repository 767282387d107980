//! Builds a site: resolves inputs, converts every page concurrently and
//! writes the index.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ssg_html::{
    page_stem, render_index, ContentError, Converter, ConverterRegistry, MarkdownConverter,
    PlainTextConverter, RenderOptions, SourceDocument,
};
use ssg_html_config::DispatchMode;
use thiserror::Error;
use tokio::task::{Id, JoinSet};

use crate::fs::write_atomic;

const INDEX_STEM: &str = "index";

/// Errors produced while building a site.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("cannot access {}: {source}", path.display())]
    Filesystem { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{} is reserved for the index page", path.display())]
    IndexCollision { path: PathBuf },

    #[error("conversion task did not finish: {message}")]
    Task { message: String },
}

/// Everything needed to build one site.
pub struct BuildPlan {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub render: RenderOptions,
    pub dispatch: DispatchMode,
    pub index_title: String,
    pub registry: ConverterRegistry,
}

impl BuildPlan {
    fn converter_for(&self, path: &Path) -> Arc<dyn Converter> {
        match self.dispatch {
            DispatchMode::Extension => self.registry.for_path(path),
            DispatchMode::InputArgument => {
                let name = if self.input.to_string_lossy().contains(".md") {
                    MarkdownConverter::NAME
                } else {
                    PlainTextConverter::NAME
                };
                self.registry
                    .get(name)
                    .unwrap_or_else(|| self.registry.for_path(path))
            }
        }
    }
}

/// Result of producing one output file.
#[derive(Debug)]
pub struct PageOutcome {
    /// Source file, or `None` for the index page.
    pub source: Option<PathBuf>,
    pub target: PathBuf,
    pub result: Result<(), SiteError>,
}

impl PageOutcome {
    fn pending(source: Option<PathBuf>, target: PathBuf) -> Self {
        Self {
            source,
            target,
            result: Err(SiteError::Task {
                message: "no result reported".to_string(),
            }),
        }
    }

    pub fn is_written(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of every page plus the index, pages in input order.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: Vec<PageOutcome>,
    pub index: PageOutcome,
}

impl BuildReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages.iter().chain(std::iter::once(&self.index))
    }

    pub fn written(&self) -> usize {
        self.outcomes().filter(|outcome| outcome.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes().filter(|outcome| !outcome.is_written()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Convert every input and write the pages plus `index.html`.
///
/// Fails as a whole only when the input cannot be listed or the output
/// directory cannot be created. Per-page failures are recorded in the
/// report and never stop sibling pages.
pub async fn build_site(plan: &BuildPlan) -> Result<BuildReport, SiteError> {
    let sources = resolve_sources(&plan.input).await?;
    ensure_output_dir(&plan.output_dir).await?;

    let mut tasks = JoinSet::new();
    let mut slots: HashMap<Id, Slot> = HashMap::new();
    let mut pages = Vec::with_capacity(sources.len());
    let mut stems = Vec::with_capacity(sources.len());
    let mut seen = HashSet::new();

    for path in sources {
        let stem = page_stem(&path);
        if !seen.insert(stem.clone()) {
            tracing::warn!(stem = %stem, path = %path.display(), "duplicate page name, later write wins");
        }

        let target = plan.output_dir.join(format!("{stem}.html"));
        if stem == INDEX_STEM {
            tracing::warn!(path = %path.display(), "page name collides with the index page, skipping");
            let mut outcome = PageOutcome::pending(Some(path), target.clone());
            outcome.result = Err(SiteError::IndexCollision { path: target });
            pages.push(outcome);
            continue;
        }

        let converter = plan.converter_for(&path);
        tracing::debug!(path = %path.display(), converter = converter.name(), "scheduling page");

        let handle = tasks.spawn(convert_page(
            path.clone(),
            target.clone(),
            converter,
            plan.render.clone(),
        ));
        slots.insert(handle.id(), Slot::Page(pages.len()));
        pages.push(PageOutcome::pending(Some(path), target));
        stems.push(stem);
    }

    let index_target = plan.output_dir.join(format!("{INDEX_STEM}.html"));
    let index_html = render_index(
        &plan.index_title,
        &plan.input.to_string_lossy(),
        &stems,
        &plan.render,
    );
    let handle = tasks.spawn(write_page(index_target.clone(), index_html));
    slots.insert(handle.id(), Slot::Index);
    let mut index = PageOutcome::pending(None, index_target);

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, result) = match joined {
            Ok(finished) => finished,
            Err(err) => (
                err.id(),
                Err(SiteError::Task {
                    message: err.to_string(),
                }),
            ),
        };
        let outcome = match slots.get(&id) {
            Some(Slot::Page(idx)) => &mut pages[*idx],
            Some(Slot::Index) => &mut index,
            None => continue,
        };
        outcome.result = result;
    }

    Ok(BuildReport { pages, index })
}

enum Slot {
    Page(usize),
    Index,
}

/// Files to convert for `input`: the file itself, or the regular files
/// directly inside a directory (dot-files skipped), sorted by name.
pub async fn resolve_sources(input: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let metadata = tokio::fs::metadata(input)
        .await
        .map_err(|source| filesystem(input, source))?;
    if !metadata.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut entries = tokio::fs::read_dir(input)
        .await
        .map_err(|source| filesystem(input, source))?;
    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| filesystem(input, source))?
    {
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => tracing::debug!(path = %path.display(), "skipping non-file entry"),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry"),
        }
    }

    files.sort();
    Ok(files)
}

async fn ensure_output_dir(dir: &Path) -> Result<(), SiteError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| filesystem(dir, source))
}

async fn convert_page(
    source_path: PathBuf,
    target: PathBuf,
    converter: Arc<dyn Converter>,
    options: RenderOptions,
) -> Result<(), SiteError> {
    let content = tokio::fs::read_to_string(&source_path)
        .await
        .map_err(|source| ContentError::Unreadable {
            path: source_path.clone(),
            source,
        })?;
    let document = SourceDocument::new(source_path, content);
    let html = converter.convert(&document, &options)?;
    write_page(target, html.into_string()).await
}

async fn write_page(target: PathBuf, html: String) -> Result<(), SiteError> {
    write_atomic(&target, &html)
        .await
        .map_err(|source| SiteError::Write {
            path: target,
            source,
        })
}

fn filesystem(path: &Path, source: io::Error) -> SiteError {
    SiteError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}
