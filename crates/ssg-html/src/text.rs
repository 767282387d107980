use crate::block::{split_blocks, strip_leading_break};
use crate::document::{HtmlDocument, RenderOptions, RenderedBlock};
use crate::error::ContentResult;
use crate::source::SourceDocument;

/// Convert a plain-text note into a page.
///
/// The first block becomes an `<h1>`, every later block a paragraph. The
/// first block is also taken as the document title, but only when the second
/// block begins with the output line ending (an extra blank line after the
/// title); otherwise the page is titled by its file name.
pub fn convert_plain_text(
    source: &SourceDocument,
    options: &RenderOptions,
) -> ContentResult<HtmlDocument> {
    let content = source.require_content()?;
    let blocks = split_blocks(content);

    let mut title = blocks.first().copied().unwrap_or_default();
    if let Some(second) = blocks.get(1) {
        if !second.starts_with(options.line_ending.as_str()) {
            title = "";
        }
    }

    let rendered: Vec<RenderedBlock> = blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            if idx == 0 {
                RenderedBlock::heading(1, *block)
            } else {
                RenderedBlock::paragraph(strip_leading_break(block))
            }
        })
        .collect();

    tracing::debug!(
        path = %source.path().display(),
        blocks = rendered.len(),
        inferred_title = !title.is_empty(),
        "converted plain text"
    );

    let title = if title.is_empty() {
        source.file_name()
    } else {
        title.to_string()
    };

    Ok(HtmlDocument::assemble(title, rendered, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::LineEnding;
    use pretty_assertions::assert_eq;

    fn lf() -> RenderOptions {
        RenderOptions::default().with_line_ending(LineEnding::Lf)
    }

    #[test]
    fn first_block_is_heading_and_rest_paragraphs() {
        let doc = SourceDocument::new("notes.txt", "Title Line\n\nBody text");
        let html = convert_plain_text(&doc, &lf()).unwrap();
        assert_eq!(
            html.blocks(),
            &[
                RenderedBlock::heading(1, "Title Line"),
                RenderedBlock::paragraph("Body text"),
            ]
        );
        assert!(html
            .as_str()
            .contains("<h1>Title Line</h1>\n<p>Body text</p>\n</body>"));
    }

    #[test]
    fn title_kept_when_followed_by_extra_blank_line() {
        let doc = SourceDocument::new("notes.txt", "Silver Blaze\n\n\nI am afraid.");
        let html = convert_plain_text(&doc, &lf()).unwrap();
        assert_eq!(html.title(), "Silver Blaze");
        assert_eq!(html.blocks()[1], RenderedBlock::paragraph("I am afraid."));
    }

    #[test]
    fn title_falls_back_to_file_name() {
        let doc = SourceDocument::new("dir/notes.txt", "Title Line\n\nBody text");
        let html = convert_plain_text(&doc, &lf()).unwrap();
        assert_eq!(html.title(), "notes.txt");
        assert!(html.as_str().contains("<h1>Title Line</h1>"));
    }

    #[test]
    fn single_block_is_its_own_title() {
        let doc = SourceDocument::new("one.txt", "Just one block");
        let html = convert_plain_text(&doc, &lf()).unwrap();
        assert_eq!(html.title(), "Just one block");
        assert_eq!(html.blocks(), &[RenderedBlock::heading(1, "Just one block")]);
    }

    #[test]
    fn title_check_uses_configured_line_ending() {
        let doc = SourceDocument::new("win.txt", "Heading\r\n\r\n\r\nBody");
        let crlf = RenderOptions::default().with_line_ending(LineEnding::CrLf);
        let html = convert_plain_text(&doc, &crlf).unwrap();
        assert_eq!(html.title(), "Heading");
        assert_eq!(html.blocks()[1], RenderedBlock::paragraph("Body"));
        assert!(html.as_str().contains("<h1>Heading</h1>\r\n<p>Body</p>\r\n"));
    }
}
