use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Separator written after every rendered block and envelope line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The line ending conventional for the target platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn blank_line() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\r?\n\r?\n").expect("blank line pattern is valid"))
}

/// Split `content` into blocks at every blank line, accepting both `\n\n` and
/// `\r\n\r\n` separators.
///
/// Blocks are returned untrimmed: a run of three line breaks leaves the third
/// at the start of the following block, and a trailing separator yields a
/// final empty block.
pub fn split_blocks(content: &str) -> Vec<&str> {
    blank_line().split(content).collect()
}

/// Drop a single leading line break (`\r\n` or `\n`) from `block`.
pub fn strip_leading_break(block: &str) -> &str {
    block
        .strip_prefix("\r\n")
        .or_else(|| block.strip_prefix('\n'))
        .unwrap_or(block)
}
