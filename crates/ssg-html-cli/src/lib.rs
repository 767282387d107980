//! Command-line front end: turns a file or a directory of notes into a set of
//! HTML pages plus an index.

pub mod console;
mod fs;
pub mod site;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use ssg_html::{ConverterRegistry, LineEnding, MarkdownConverter, RenderOptions};
use ssg_html_config::{Config, DispatchMode, LineEndingSetting, LoadOptions};
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::site::{build_site, BuildPlan};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SSG_HTML_LOG";

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing();

    let mut load = LoadOptions::default();
    if let Some(path) = &cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load).context("failed to load configuration")?;
    let mut console = Console::new(cli.no_color);
    let plan = build_plan(cli, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    match runtime.block_on(build_site(&plan)) {
        Ok(report) => {
            console.report(&report)?;
            Ok(if report.is_success() { 0 } else { 1 })
        }
        Err(err) => {
            tracing::error!(input = %plan.input.display(), "site build aborted");
            console.error(&err)?;
            Ok(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Combine command-line flags with loaded configuration; flags win.
fn build_plan(cli: Cli, config: Config) -> BuildPlan {
    let line_ending = match cli
        .line_ending
        .map(LineEndingSetting::from)
        .unwrap_or(config.line_ending)
    {
        LineEndingSetting::Native => LineEnding::native(),
        LineEndingSetting::Lf => LineEnding::Lf,
        LineEndingSetting::Crlf => LineEnding::CrLf,
    };

    let mut render = RenderOptions::default().with_line_ending(line_ending);
    if let Some(url) = cli
        .stylesheet
        .filter(|url| !url.is_empty())
        .or(config.stylesheet)
    {
        render = render.with_stylesheet(url);
    }

    let mut registry = ConverterRegistry::new();
    registry.register_as(MarkdownConverter, &config.markdown_extensions);

    BuildPlan {
        input: cli.input,
        output_dir: cli.output.unwrap_or(config.output),
        render,
        dispatch: cli.dispatch.map(DispatchMode::from).unwrap_or(config.dispatch),
        index_title: cli.index_title.unwrap_or(config.index_title),
        registry,
    }
}

#[derive(Parser)]
#[command(
    name = "ssg-html",
    version,
    about = "Convert text and Markdown files into a static HTML site",
    disable_version_flag = true
)]
struct Cli {
    /// Input file or directory
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output directory [default: dist]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Stylesheet URL linked from every page
    #[arg(short, long, value_name = "URL")]
    stylesheet: Option<String>,

    /// Line ending written between HTML blocks
    #[arg(long, value_enum)]
    line_ending: Option<LineEndingValue>,

    /// How input files are matched to a converter
    #[arg(long, value_enum)]
    dispatch: Option<DispatchValue>,

    /// Title of the generated index page
    #[arg(long, value_name = "TITLE")]
    index_title: Option<String>,

    /// Read configuration from this file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
}

#[derive(Clone, Copy, ValueEnum)]
enum LineEndingValue {
    Native,
    Lf,
    Crlf,
}

impl From<LineEndingValue> for LineEndingSetting {
    fn from(value: LineEndingValue) -> Self {
        match value {
            LineEndingValue::Native => LineEndingSetting::Native,
            LineEndingValue::Lf => LineEndingSetting::Lf,
            LineEndingValue::Crlf => LineEndingSetting::Crlf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DispatchValue {
    /// Choose a converter from each file's extension
    Extension,
    /// Use Markdown for every file when the input path contains ".md"
    InputArgument,
}

impl From<DispatchValue> for DispatchMode {
    fn from(value: DispatchValue) -> Self {
        match value {
            DispatchValue::Extension => DispatchMode::Extension,
            DispatchValue::InputArgument => DispatchMode::InputArgument,
        }
    }
}
