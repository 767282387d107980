use std::fmt;

use crate::block::LineEnding;

/// Settings shared by every page rendered in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub stylesheet: Option<String>,
    pub line_ending: LineEnding,
}

impl RenderOptions {
    pub fn with_stylesheet(mut self, url: impl Into<String>) -> Self {
        self.stylesheet = Some(url.into());
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref().filter(|url| !url.is_empty())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stylesheet: None,
            line_ending: LineEnding::native(),
        }
    }
}

/// Build the HTML envelope around page content.
///
/// Returns the header (doctype through the opening `<body>`) and the footer
/// closing the document. `title` and `stylesheet` are inserted verbatim, so
/// callers are responsible for anything that needs escaping. The stylesheet
/// link is emitted only for a non-empty URL.
pub fn wrap(title: &str, stylesheet: Option<&str>, line_ending: LineEnding) -> (String, String) {
    let mut lines = vec![
        "<!doctype html>".to_string(),
        r#"<html lang="en">"#.to_string(),
        "<head>".to_string(),
        r#"<meta charset="utf-8">"#.to_string(),
        format!("<title>{title}</title>"),
    ];
    if let Some(url) = stylesheet.filter(|url| !url.is_empty()) {
        lines.push(format!(r#"<link rel="stylesheet" href="{url}">"#));
    }
    lines.extend([
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string(),
        "</head>".to_string(),
        "<body>".to_string(),
        "<!-- generated content -->".to_string(),
    ]);

    let eol = line_ending.as_str();
    let mut header = lines.join(eol);
    header.push_str(eol);
    let footer = format!("</body>{eol}</html>{eol}");
    (header, footer)
}

/// A block after tag wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    Heading { level: u8, text: String },
    Paragraph(String),
}

impl RenderedBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        debug_assert!((1..=6).contains(&level));
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    pub fn render(&self, line_ending: LineEnding) -> String {
        match self {
            Self::Heading { level, text } => format!("<h{level}>{text}</h{level}>{line_ending}"),
            Self::Paragraph(text) => format!("<p>{text}</p>{line_ending}"),
        }
    }
}

/// A finished page: envelope plus rendered blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    title: String,
    blocks: Vec<RenderedBlock>,
    html: String,
}

impl HtmlDocument {
    pub(crate) fn assemble(
        title: String,
        blocks: Vec<RenderedBlock>,
        options: &RenderOptions,
    ) -> Self {
        let (header, footer) = wrap(&title, options.stylesheet(), options.line_ending);
        let mut html = header;
        for block in &blocks {
            html.push_str(&block.render(options.line_ending));
        }
        html.push_str(&footer);

        Self {
            title,
            blocks,
            html,
        }
    }

    /// The text placed in `<title>`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
