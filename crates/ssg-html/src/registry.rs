//! Converter lookup by name or file extension.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::document::{HtmlDocument, RenderOptions};
use crate::error::ContentResult;
use crate::markdown::convert_markdown;
use crate::source::SourceDocument;
use crate::text::convert_plain_text;

/// A source format that can be turned into a page.
pub trait Converter: Send + Sync {
    /// Unique registry key.
    fn name(&self) -> &'static str;

    /// Extensions (without the dot) routed to this converter by default.
    fn extensions(&self) -> &'static [&'static str];

    fn convert(&self, source: &SourceDocument, options: &RenderOptions)
        -> ContentResult<HtmlDocument>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl PlainTextConverter {
    pub const NAME: &'static str = "plain-text";
}

impl Converter for PlainTextConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    fn convert(
        &self,
        source: &SourceDocument,
        options: &RenderOptions,
    ) -> ContentResult<HtmlDocument> {
        convert_plain_text(source, options)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub const NAME: &'static str = "markdown";
}

impl Converter for MarkdownConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn convert(
        &self,
        source: &SourceDocument,
        options: &RenderOptions,
    ) -> ContentResult<HtmlDocument> {
        convert_markdown(source, options)
    }
}

/// Registry of converters keyed by name, with an extension index.
///
/// Paths whose extension is not mapped are handled by the plain-text
/// converter, which is always registered.
pub struct ConverterRegistry {
    converters: HashMap<&'static str, Arc<dyn Converter>>,
    extensions: HashMap<String, &'static str>,
}

impl ConverterRegistry {
    /// A registry holding only the plain-text fallback.
    pub fn new() -> Self {
        let mut registry = Self {
            converters: HashMap::new(),
            extensions: HashMap::new(),
        };
        registry.register(PlainTextConverter);
        registry
    }

    /// Register `converter` under its name and default extensions.
    ///
    /// A converter with the same name is replaced.
    pub fn register<C: Converter + 'static>(&mut self, converter: C) {
        let name = converter.name();
        for extension in converter.extensions() {
            self.extensions.insert(normalize_extension(extension), name);
        }
        self.converters.insert(name, Arc::new(converter));
    }

    /// Register `converter` for exactly `extensions`, ignoring its defaults.
    pub fn register_as<C, S>(&mut self, converter: C, extensions: &[S])
    where
        C: Converter + 'static,
        S: AsRef<str>,
    {
        let name = converter.name();
        for extension in extensions {
            self.extensions
                .insert(normalize_extension(extension.as_ref()), name);
        }
        self.converters.insert(name, Arc::new(converter));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Converter>> {
        self.converters.get(name).cloned()
    }

    /// Converter responsible for `path`, chosen by its extension.
    pub fn for_path(&self, path: &Path) -> Arc<dyn Converter> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extensions.get(&normalize_extension(ext)))
            .and_then(|name| self.converters.get(name))
            .unwrap_or_else(|| self.fallback())
            .clone()
    }

    #[cfg(test)]
    fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.converters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn fallback(&self) -> &Arc<dyn Converter> {
        // `new` registers the plain-text converter and `register` can only
        // replace it with another converter of the same name.
        &self.converters[PlainTextConverter::NAME]
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownConverter);
        registry
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_knows_both_formats() {
        let registry = ConverterRegistry::default();
        assert_eq!(registry.names(), vec!["markdown", "plain-text"]);
    }

    #[test]
    fn selects_by_extension_case_insensitively() {
        let registry = ConverterRegistry::default();
        assert_eq!(registry.for_path(Path::new("a.md")).name(), "markdown");
        assert_eq!(registry.for_path(Path::new("b.MARKDOWN")).name(), "markdown");
        assert_eq!(registry.for_path(Path::new("c.txt")).name(), "plain-text");
    }

    #[test]
    fn unknown_extensions_fall_back_to_plain_text() {
        let registry = ConverterRegistry::default();
        assert_eq!(registry.for_path(Path::new("notes.rst")).name(), "plain-text");
        assert_eq!(registry.for_path(Path::new("README")).name(), "plain-text");
    }

    #[test]
    fn registers_with_explicit_extensions() {
        let mut registry = ConverterRegistry::new();
        registry.register_as(MarkdownConverter, &["mkd", "MDown"]);
        assert_eq!(registry.for_path(Path::new("x.mdown")).name(), "markdown");
        assert_eq!(registry.for_path(Path::new("x.md")).name(), "plain-text");
        assert_eq!(registry.names(), vec!["markdown", "plain-text"]);
    }
}
