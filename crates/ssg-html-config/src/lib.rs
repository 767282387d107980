//! Configuration loader for ssg-html.
//!
//! Settings are resolved from built-in defaults, then a `.ssg-html.toml` in
//! the working directory, then an explicit override file. Command-line flags
//! are applied on top by the CLI.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".ssg-html.toml";

const DEFAULT_OUTPUT: &str = "dist";
const DEFAULT_INDEX_TITLE: &str = "ssg-html";
const DEFAULT_MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub output: PathBuf,
    pub stylesheet: Option<String>,
    pub line_ending: LineEndingSetting,
    pub dispatch: DispatchMode,
    pub index_title: String,
    pub markdown_extensions: Vec<String>,
    pub sources: ConfigSources,
}

/// Requested separator for generated HTML.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEndingSetting {
    #[default]
    Native,
    Lf,
    Crlf,
}

/// How each input file is matched to a converter.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchMode {
    /// Pick a converter per file from its extension.
    #[default]
    Extension,
    /// Use Markdown for every file when the input argument contains `.md`,
    /// plain text otherwise.
    InputArgument,
}

/// Where the configuration came from.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut config = Config::defaults(working_dir.clone());

        let local_path = working_dir.join(CONFIG_FILE_NAME);
        if local_path.is_file() && Some(&local_path) != override_path.as_ref() {
            config.apply_file(&local_path, ConfigSourceKind::Local)?;
        }

        if let Some(path) = override_path {
            config.apply_file(&path, ConfigSourceKind::Override)?;
        }

        Ok(config)
    }

    fn defaults(working_dir: PathBuf) -> Self {
        Config {
            output: working_dir.join(DEFAULT_OUTPUT),
            stylesheet: None,
            line_ending: LineEndingSetting::default(),
            dispatch: DispatchMode::default(),
            index_title: DEFAULT_INDEX_TITLE.to_string(),
            markdown_extensions: DEFAULT_MARKDOWN_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            sources: ConfigSources {
                working_directory: working_dir,
                layers: vec![ConfigSource {
                    kind: ConfigSourceKind::Default,
                    path: None,
                }],
            },
        }
    }

    fn apply_file(&mut self, path: &Path, kind: ConfigSourceKind) -> Result<(), ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.into(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        self.merge(raw, &base_dir)
            .map_err(|message| ConfigError::Validation {
                path: path.into(),
                message,
            })?;

        tracing::debug!(path = %path.display(), %kind, "applied config layer");
        self.sources.layers.push(ConfigSource {
            kind,
            path: Some(path.to_path_buf()),
        });
        Ok(())
    }

    fn merge(&mut self, raw: RawConfig, base_dir: &Path) -> Result<(), String> {
        if let Some(output) = raw.output {
            self.output = make_absolute(&output, base_dir);
        }
        if let Some(stylesheet) = raw.stylesheet {
            self.stylesheet = Some(stylesheet).filter(|url| !url.is_empty());
        }
        if let Some(line_ending) = raw.line_ending {
            self.line_ending = line_ending;
        }
        if let Some(dispatch) = raw.dispatch {
            self.dispatch = dispatch;
        }
        if let Some(title) = raw.index_title {
            if title.trim().is_empty() {
                return Err("index_title must not be empty".to_string());
            }
            self.index_title = title;
        }
        if let Some(extensions) = raw.markdown_extensions {
            let normalized: Vec<String> = extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect();
            if normalized.iter().any(String::is_empty) {
                return Err("markdown_extensions entries must not be empty".to_string());
            }
            self.markdown_extensions = normalized;
        }
        Ok(())
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    stylesheet: Option<String>,
    #[serde(default)]
    line_ending: Option<LineEndingSetting>,
    #[serde(default)]
    dispatch: Option<DispatchMode>,
    #[serde(default)]
    index_title: Option<String>,
    #[serde(default)]
    markdown_extensions: Option<Vec<String>>,
}
