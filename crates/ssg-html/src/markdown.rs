use crate::block::split_blocks;
use crate::document::{HtmlDocument, RenderOptions, RenderedBlock};
use crate::error::ContentResult;
use crate::source::SourceDocument;

const MAX_HEADING_LEVEL: usize = 6;
const CODE_FENCE: &str = "```";

/// Convert a Markdown note into a page titled by its file stem.
///
/// Blocks opening with one to six `#` followed by a space become headings of
/// that level with the marker removed. Every other block is a paragraph with
/// its first code fence marker dropped.
pub fn convert_markdown(
    source: &SourceDocument,
    options: &RenderOptions,
) -> ContentResult<HtmlDocument> {
    let content = source.require_content()?;

    let rendered: Vec<RenderedBlock> = split_blocks(content)
        .into_iter()
        .map(classify_block)
        .collect();

    tracing::debug!(
        path = %source.path().display(),
        blocks = rendered.len(),
        "converted markdown"
    );

    Ok(HtmlDocument::assemble(source.file_stem(), rendered, options))
}

fn classify_block(block: &str) -> RenderedBlock {
    match detect_heading(block) {
        Some((level, text)) => RenderedBlock::heading(level, text),
        None => RenderedBlock::paragraph(block.replacen(CODE_FENCE, "", 1)),
    }
}

/// Heading level and text for a block opening with an ATX marker.
///
/// Only the exact `#{1,6} ` prefix counts: `#Title` and `####### x` are
/// paragraphs, and nothing after the marker is trimmed.
pub fn detect_heading(block: &str) -> Option<(u8, &str)> {
    let pound_count = block.bytes().take_while(|byte| *byte == b'#').count();
    if pound_count == 0 || pound_count > MAX_HEADING_LEVEL {
        return None;
    }

    let text = block[pound_count..].strip_prefix(' ')?;
    Some((pound_count as u8, text))
}
