use std::path::Path;

use crate::document::{wrap, RenderOptions};

/// Name a page is published under: the file name up to its first dot.
///
/// `notes.v2.txt` becomes `notes`. Names with nothing before the first dot
/// (dot-files) are kept whole.
pub fn page_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

/// Render the landing page that links every generated page.
///
/// `input_label` is echoed in the page heading and each stem is linked as
/// `./{stem}.html`, in the order given.
pub fn render_index(
    title: &str,
    input_label: &str,
    stems: &[String],
    options: &RenderOptions,
) -> String {
    let eol = options.line_ending.as_str();
    let stylesheet = options.stylesheet.as_deref();
    let (header, footer) = wrap(title, stylesheet, options.line_ending);

    let mut html = header;
    html.push_str(&format!("<h1>{input_label} - Information Page</h1>{eol}"));
    for stem in stems {
        html.push_str(&format!(r#"<a href="./{stem}.html">{stem}</a><br>{eol}"#));
    }
    html.push_str(&footer);
    html
}
