//! Markdown to theme-call pipeline.

use mdpdf_ast::{AstRenderer, Node, decode};
use pulldown_cmark::{Options, Parser};

use crate::error::ConvertError;
use crate::generator::Generator;
use crate::lexer::MarkdownLexer;
use crate::theme::Theme;

/// Converts markdown by encoding it into a token stream, decoding the tree
/// and walking it with a theme.
///
/// # Example
///
/// ```
/// use mdpdf_renderer::{MarkdownConverter, TextLayout, TextTheme};
///
/// let mut theme = TextTheme::new(TextLayout::default());
/// MarkdownConverter::new()
///     .convert("# Hello\n\n**Bold** text", &mut theme)
///     .unwrap();
/// assert!(theme.render().starts_with("Hello\n=====\n"));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
    smart_punctuation: bool,
}

impl MarkdownConverter {
    /// Create a converter with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            smart_punctuation: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown (tables, strikethrough,
    /// task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable typographic quotes and dashes.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.smart_punctuation = enabled;
        self
    }

    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Encode markdown into a token stream.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ReservedCharacter`] if the document contains a
    /// sentinel code point.
    pub fn tokens(&self, markdown: &str) -> Result<String, ConvertError> {
        let tokens = MarkdownLexer::new(&AstRenderer)
            .render(self.create_parser(markdown).into_offset_iter())?;
        tracing::debug!(
            source = markdown.len(),
            tokens = tokens.len(),
            "Encoded markdown"
        );
        Ok(tokens)
    }

    /// Encode and decode markdown into a document tree.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the token stream is malformed.
    pub fn tree(&self, markdown: &str) -> Result<Node, ConvertError> {
        let tokens = self.tokens(markdown)?;
        Ok(decode(&tokens)?)
    }

    /// Run the whole pipeline, ending with [`Theme::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails; the theme then receives no
    /// hook calls.
    pub fn convert<T: Theme + ?Sized>(&self, markdown: &str, theme: &mut T) -> Result<(), ConvertError> {
        let root = self.tree(markdown)?;
        Generator::new(theme).generate(&root)
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}
