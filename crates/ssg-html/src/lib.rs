//! Conversion engine turning plain-text and Markdown notes into standalone
//! HTML pages.
//!
//! Both converters split their input into blocks at blank lines and wrap each
//! block in a heading or paragraph tag inside a shared HTML envelope. They are
//! pure functions of the [`SourceDocument`] and [`RenderOptions`]; reading and
//! writing files is left to the caller.

mod block;
mod document;
mod error;
mod index;
mod markdown;
mod registry;
mod source;
mod text;

pub use block::{split_blocks, strip_leading_break, LineEnding};
pub use document::{wrap, HtmlDocument, RenderOptions, RenderedBlock};
pub use error::{ContentError, ContentResult};
pub use index::{page_stem, render_index};
pub use markdown::{convert_markdown, detect_heading};
pub use registry::{Converter, ConverterRegistry, MarkdownConverter, PlainTextConverter};
pub use source::SourceDocument;
pub use text::convert_plain_text;
