//! Adapter driving [`Renderer`] callbacks from `pulldown-cmark` events.
//!
//! `pulldown-cmark` emits a flat start/end event sequence while the renderer
//! contract is bottom-up: a construct is rendered only once all of its
//! children are. The lexer keeps a stack of open frames, collects the rendered
//! fragments of each frame's children and invokes the matching callback when
//! the frame closes.

use std::ops::Range;

use mdpdf_ast::sentinel::find_sentinel;
use mdpdf_ast::{Alignment, CellFlags, Renderer};
use pulldown_cmark::{Alignment as ColumnAlignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::error::ConvertError;

/// Open container waiting for its children.
#[derive(Debug)]
enum FrameKind {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock { language: String },
    HtmlBlock,
    List { ordered: bool, start: u64 },
    Item,
    Table { header: String },
    TableHead,
    TableRow,
    TableCell { flags: CellFlags },
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: String },
    Image { href: String, title: String },
    /// Container without a renderer callback; children pass through.
    Transparent,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    content: String,
}

/// Column alignments and cursor of the table being lexed.
#[derive(Debug, Default)]
struct TableState {
    alignments: Vec<Option<Alignment>>,
    column: usize,
    in_head: bool,
}

impl TableState {
    fn current_flags(&self) -> CellFlags {
        CellFlags {
            header: self.in_head,
            align: self.alignments.get(self.column).copied().flatten(),
        }
    }
}

/// Markdown lexer adapter rendering through a [`Renderer`].
///
/// # Example
///
/// ```
/// use mdpdf_ast::{AstRenderer, dump_tokens};
/// use mdpdf_renderer::MarkdownLexer;
/// use pulldown_cmark::Parser;
///
/// let tokens = MarkdownLexer::new(&AstRenderer)
///     .render(Parser::new("Hi *there*").into_offset_iter())
///     .unwrap();
/// assert_eq!(dump_tokens(&tokens), "{{1::paragraph::Hi {{0::em::there}}}}");
/// ```
pub struct MarkdownLexer<'r, R: Renderer + ?Sized> {
    renderer: &'r R,
    output: String,
    stack: Vec<Frame>,
    table: TableState,
    heading_raw: Option<String>,
}

impl<'r, R: Renderer + ?Sized> MarkdownLexer<'r, R> {
    #[must_use]
    pub fn new(renderer: &'r R) -> Self {
        Self {
            renderer,
            output: String::with_capacity(4096),
            stack: Vec::new(),
            table: TableState::default(),
            heading_raw: None,
        }
    }

    /// Render an offset-annotated event sequence into one string.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ReservedCharacter`] when any literal piece of
    /// the document contains a sentinel code point.
    pub fn render<'a, I>(mut self, events: I) -> Result<String, ConvertError>
    where
        I: IntoIterator<Item = (Event<'a>, Range<usize>)>,
    {
        for (event, range) in events {
            self.process_event(event, &range)?;
        }

        // Unbalanced frames cannot come out of the parser, but keep their
        // content rather than dropping it.
        while let Some(frame) = self.stack.pop() {
            self.push(&frame.content);
        }

        Ok(self.output)
    }

    fn process_event(&mut self, event: Event<'_>, range: &Range<usize>) -> Result<(), ConvertError> {
        match event {
            Event::Start(tag) => self.start_tag(tag, range)?,
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                check_literal(&text, range.start)?;
                self.text(&text);
            }
            Event::Code(code) => {
                check_literal(&code, range.start)?;
                self.record_heading_text(&code);
                let fragment = self.renderer.codespan(&self.renderer.text(&code));
                self.push(&fragment);
            }
            Event::Html(html) => {
                check_literal(&html, range.start)?;
                if self.in_html_block() {
                    self.push(&html);
                } else {
                    let fragment = self.renderer.html(&html);
                    self.push(&fragment);
                }
            }
            // Inline tags stay part of the surrounding text run.
            Event::InlineHtml(html) => {
                check_literal(&html, range.start)?;
                self.text(&html);
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                check_literal(&math, range.start)?;
                self.text(&math);
            }
            Event::FootnoteReference(label) => {
                check_literal(&label, range.start)?;
                self.text(&format!("[^{label}]"));
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => {
                let fragment = self.renderer.br();
                self.push(&fragment);
            }
            Event::Rule => {
                let fragment = self.renderer.hr();
                self.push(&fragment);
            }
            Event::TaskListMarker(checked) => {
                self.text(if checked { "[x] " } else { "[ ] " });
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>, range: &Range<usize>) -> Result<(), ConvertError> {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => {
                self.heading_raw = Some(String::new());
                FrameKind::Heading(heading_level_to_num(level))
            }
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        check_literal(&info, range.start)?;
                        info.split_whitespace().next().unwrap_or_default().to_owned()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                FrameKind::CodeBlock { language }
            }
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            Tag::List(start) => FrameKind::List {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
            },
            Tag::Item => FrameKind::Item,
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments: alignments.into_iter().map(column_alignment).collect(),
                    column: 0,
                    in_head: false,
                };
                FrameKind::Table {
                    header: String::new(),
                }
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.column = 0;
                FrameKind::TableHead
            }
            Tag::TableRow => {
                self.table.column = 0;
                FrameKind::TableRow
            }
            Tag::TableCell => FrameKind::TableCell {
                flags: self.table.current_flags(),
            },
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => {
                check_literal(&dest_url, range.start)?;
                check_literal(&title, range.start)?;
                FrameKind::Link {
                    href: dest_url.into_string(),
                    title: title.into_string(),
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                check_literal(&dest_url, range.start)?;
                check_literal(&title, range.start)?;
                FrameKind::Image {
                    href: dest_url.into_string(),
                    title: title.into_string(),
                }
            }
            Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {
                tracing::debug!(offset = range.start, "Passing through unsupported block");
                FrameKind::Transparent
            }
            Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => FrameKind::Transparent,
        };

        self.stack.push(Frame {
            kind,
            content: String::new(),
        });
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) {
        let Some(Frame { kind, content }) = self.stack.pop() else {
            tracing::warn!(?tag, "End tag without matching start");
            return;
        };

        let r = self.renderer;
        let fragment = match kind {
            FrameKind::Paragraph => r.paragraph(&content),
            FrameKind::Heading(level) => {
                let raw = self.heading_raw.take().unwrap_or_default();
                r.heading(&content, level, &raw)
            }
            FrameKind::BlockQuote => r.blockquote(&content),
            FrameKind::CodeBlock { language } => r.code(&content, &language, false),
            FrameKind::HtmlBlock => r.html(&content),
            FrameKind::List { ordered, start } => r.list(&content, ordered, start),
            FrameKind::Item => r.listitem(&content),
            FrameKind::Table { header } => r.table(&header, &content),
            FrameKind::TableHead => {
                self.table.in_head = false;
                let row = r.tablerow(&content);
                if let Some(Frame {
                    kind: FrameKind::Table { header },
                    ..
                }) = self.stack.last_mut()
                {
                    header.push_str(&row);
                    return;
                }
                row
            }
            FrameKind::TableRow => r.tablerow(&content),
            FrameKind::TableCell { flags } => {
                self.table.column += 1;
                r.tablecell(&content, flags)
            }
            FrameKind::Emphasis => r.em(&content),
            FrameKind::Strong => r.strong(&content),
            FrameKind::Strikethrough => r.del(&content),
            FrameKind::Link { href, title } => r.link(&href, &title, &content),
            FrameKind::Image { href, title } => r.image(&href, &title, &content),
            FrameKind::Transparent => content,
        };
        self.push(&fragment);
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block() {
            self.push(text);
            return;
        }
        self.record_heading_text(text);
        let fragment = self.renderer.text(text);
        self.push(&fragment);
    }

    fn record_heading_text(&mut self, text: &str) {
        if let Some(raw) = &mut self.heading_raw {
            raw.push_str(text);
        }
    }

    fn in_code_block(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame {
                kind: FrameKind::CodeBlock { .. },
                ..
            })
        )
    }

    fn in_html_block(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame {
                kind: FrameKind::HtmlBlock,
                ..
            })
        )
    }

    fn push(&mut self, fragment: &str) {
        match self.stack.last_mut() {
            Some(frame) => frame.content.push_str(fragment),
            None => self.output.push_str(fragment),
        }
    }
}

/// Reject literal text containing a sentinel code point.
fn check_literal(text: &str, source_offset: usize) -> Result<(), ConvertError> {
    match find_sentinel(text) {
        Some((index, character)) => Err(ConvertError::ReservedCharacter {
            character,
            offset: source_offset + index,
        }),
        None => Ok(()),
    }
}

fn column_alignment(alignment: ColumnAlignment) -> Option<Alignment> {
    match alignment {
        ColumnAlignment::None => None,
        ColumnAlignment::Left => Some(Alignment::Left),
        ColumnAlignment::Center => Some(Alignment::Center),
        ColumnAlignment::Right => Some(Alignment::Right),
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
