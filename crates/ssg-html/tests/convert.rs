use pretty_assertions::assert_eq;
use ssg_html::{
    convert_markdown, convert_plain_text, split_blocks, ContentError, LineEnding, RenderOptions,
    RenderedBlock, SourceDocument,
};

fn lf_options() -> RenderOptions {
    RenderOptions::default().with_line_ending(LineEnding::Lf)
}

#[test]
fn should_render_plain_text_title_and_body() {
    // Given
    let source = SourceDocument::new("notes/intro.txt", "Title Line\n\nBody text");

    // When
    let html = convert_plain_text(&source, &lf_options()).unwrap();

    // Then
    let body = html.as_str();
    let heading = body.find("<h1>Title Line</h1>").unwrap();
    let paragraph = body.find("<p>Body text</p>").unwrap();
    assert!(heading < paragraph);
}

#[test]
fn should_always_open_plain_text_with_h1() {
    let inputs = [
        "a",
        "a\n\nb",
        "a\n\n\nb\n\nc",
        "\n\nleading blank",
        "x\r\n\r\ny",
    ];

    for input in inputs {
        let source = SourceDocument::new("p.txt", input);
        let html = convert_plain_text(&source, &lf_options()).unwrap();
        assert!(
            matches!(html.blocks()[0], RenderedBlock::Heading { level: 1, .. }),
            "first block of {input:?} was not an h1"
        );
    }
}

#[test]
fn should_title_markdown_by_file_stem() {
    // Given
    let source = SourceDocument::new("./docs/guide.md", "# Heading\n\nSome text");

    // When
    let html = convert_markdown(&source, &lf_options()).unwrap();

    // Then
    assert_eq!(html.title(), "guide");
    assert!(html.as_str().contains("<title>guide</title>"));
    assert!(html
        .as_str()
        .contains("<h1>Heading</h1>\n<p>Some text</p>\n"));
}

#[test]
fn should_render_every_heading_level() {
    // Given
    let content = "# One\n\n## Two\n\n### Three\n\n#### Four\n\n##### Five\n\n###### Six\n\n####### Seven";
    let source = SourceDocument::new("levels.md", content);

    // When
    let html = convert_markdown(&source, &lf_options()).unwrap();

    // Then
    assert_eq!(
        html.blocks(),
        &[
            RenderedBlock::heading(1, "One"),
            RenderedBlock::heading(2, "Two"),
            RenderedBlock::heading(3, "Three"),
            RenderedBlock::heading(4, "Four"),
            RenderedBlock::heading(5, "Five"),
            RenderedBlock::heading(6, "Six"),
            RenderedBlock::paragraph("####### Seven"),
        ]
    );
}

#[test]
fn should_render_subheading_then_paragraph() {
    let source = SourceDocument::new("sub.md", "### Sub\n\nMore");
    let html = convert_markdown(&source, &lf_options()).unwrap();
    assert!(html.as_str().contains("<h3>Sub</h3>\n<p>More</p>\n"));
}

#[test]
fn should_keep_one_rendered_block_per_source_block() {
    let content = "Intro\n\n# Heading\r\n\r\n```\ncode\n```\n\n\nTail\n\n";
    let expected = split_blocks(content).len();

    let text = convert_plain_text(&SourceDocument::new("a.txt", content), &lf_options()).unwrap();
    let markdown = convert_markdown(&SourceDocument::new("a.md", content), &lf_options()).unwrap();

    assert_eq!(text.blocks().len(), expected);
    assert_eq!(markdown.blocks().len(), expected);
}

#[test]
fn should_produce_identical_output_on_repeat() {
    let options = lf_options().with_stylesheet("https://cdn.example/water.css");
    let source = SourceDocument::new("again.md", "# Again\n\nSame every time");

    let first = convert_markdown(&source, &options).unwrap();
    let second = convert_markdown(&source, &options).unwrap();

    assert_eq!(first.as_str(), second.as_str());
    assert!(first
        .as_str()
        .contains(r#"<link rel="stylesheet" href="https://cdn.example/water.css">"#));
}

#[test]
fn should_reject_empty_content() {
    let source = SourceDocument::new("empty.md", "");

    let markdown_err = convert_markdown(&source, &lf_options()).unwrap_err();
    let text_err = convert_plain_text(&source, &lf_options()).unwrap_err();

    assert!(matches!(markdown_err, ContentError::Empty { .. }));
    assert!(matches!(text_err, ContentError::Empty { .. }));
    assert_eq!(markdown_err.to_string(), "empty.md is empty");
}

#[test]
fn should_separate_blocks_with_configured_line_ending() {
    let options = RenderOptions::default().with_line_ending(LineEnding::CrLf);
    let source = SourceDocument::new("win.md", "# Title\r\n\r\nBody");

    let html = convert_markdown(&source, &options).unwrap();

    assert!(html.as_str().contains("<h1>Title</h1>\r\n<p>Body</p>\r\n</body>\r\n"));
}
