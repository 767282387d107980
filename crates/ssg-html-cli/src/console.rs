use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::site::{BuildReport, SiteError};

/// Colored status lines for the user: successes on stdout, failures on stderr.
pub struct Console {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl Console {
    pub fn new(no_color: bool) -> Self {
        let choice = |is_terminal: bool| {
            if no_color || !is_terminal {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            }
        };
        Self {
            stdout: StandardStream::stdout(choice(io::stdout().is_terminal())),
            stderr: StandardStream::stderr(choice(io::stderr().is_terminal())),
        }
    }

    pub fn created(&mut self, path: &Path) -> io::Result<()> {
        let line = format!("created {}", path.display());
        ignore_broken_pipe(emit(&mut self.stdout, Color::Green, &line))
    }

    pub fn error(&mut self, err: &dyn Display) -> io::Result<()> {
        let line = format!("error: {err}");
        ignore_broken_pipe(emit(&mut self.stderr, Color::Red, &line))
    }

    /// Print one line per output file followed by a summary.
    pub fn report(&mut self, report: &BuildReport) -> io::Result<()> {
        for outcome in report.outcomes() {
            match &outcome.result {
                Ok(()) => self.created(&outcome.target)?,
                Err(err @ SiteError::Task { .. }) => {
                    self.error(&format!("{}: {err}", outcome.target.display()))?
                }
                Err(err) => self.error(err)?,
            }
        }

        let summary = format!("{} written, {} failed", report.written(), report.failed());
        let color = if report.is_success() {
            Color::Green
        } else {
            Color::Red
        };
        ignore_broken_pipe(emit(&mut self.stdout, color, &summary))
    }
}

fn emit(stream: &mut StandardStream, color: Color, line: &str) -> io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(color)))?;
    writeln!(stream, "{line}")?;
    stream.reset()?;
    stream.flush()
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
