//! Visitor contract between the generator and presentation.
//!
//! The generator guarantees which hook is called, in what order and with what
//! arguments. What a hook does with them belongs to the theme.

use std::fmt;

use mdpdf_ast::{Alignment, NodeKind};

/// Position of a node within its parent's child sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based index among siblings.
    pub index: usize,
    /// Number of siblings, the node included.
    pub count: usize,
}

impl Position {
    #[must_use]
    pub fn new(index: usize, count: usize) -> Self {
        Self { index, count }
    }

    #[must_use]
    pub fn is_first(self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self.index + 1 >= self.count
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.count)
    }
}

/// Summary of a list passed to [`Theme::enter_list`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListInfo {
    pub ordered: bool,
    /// Nesting depth, `0` for a list outside any other list.
    pub depth: usize,
    pub start: u64,
    pub num_items: usize,
}

/// Summary of a list item passed to [`Theme::enter_list_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListItemInfo {
    pub ordered: bool,
    pub depth: usize,
    /// Running number: list start plus item index.
    pub number: u64,
}

/// Shape of a table passed to [`Theme::enter_table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableShape {
    pub columns: usize,
    pub header_rows: usize,
    pub body_rows: usize,
}

/// Inline style opened by `strong`, `em`, `del` and `codespan` nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Strikethrough,
    Monospace,
}

impl InlineStyle {
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::Strikethrough, Self::Monospace];

    /// Style a node kind opens, if any.
    #[must_use]
    pub fn for_kind(kind: &NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Strong { .. } => Some(Self::Bold),
            NodeKind::Em { .. } => Some(Self::Italic),
            NodeKind::Del { .. } => Some(Self::Strikethrough),
            NodeKind::Codespan { .. } => Some(Self::Monospace),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Monospace => "monospace",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Italic => 1 << 1,
            Self::Strikethrough => 1 << 2,
            Self::Monospace => 1 << 3,
        }
    }
}

/// Inline styles in effect for a text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleSet(u8);

impl StyleSet {
    #[must_use]
    pub fn with(self, style: InlineStyle) -> Self {
        Self(self.0 | style.bit())
    }

    #[must_use]
    pub fn contains(self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = InlineStyle> {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("plain");
        }
        for (i, style) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(style.as_str())?;
        }
        Ok(())
    }
}

/// Visitor hooks invoked by the [`Generator`](crate::Generator).
///
/// Container kinds get an `enter_*`/`leave_*` pair around their children and
/// leaf kinds a single call. Every hook receives the node's [`Position`]
/// among its siblings. Hooks for constructs a theme may not care about have
/// empty default bodies.
pub trait Theme {
    fn enter_paragraph(&mut self, position: Position);
    fn leave_paragraph(&mut self, position: Position);

    fn enter_heading(&mut self, level: u8, position: Position);
    fn leave_heading(&mut self, level: u8, position: Position);

    fn enter_list(&mut self, list: &ListInfo, position: Position);
    fn leave_list(&mut self, list: &ListInfo, position: Position);

    /// The position comes from the list's running counter rather than the
    /// raw child sequence.
    fn enter_list_item(&mut self, item: &ListItemInfo, position: Position);
    fn leave_list_item(&mut self, item: &ListItemInfo, position: Position);

    /// Called before any row or cell hook of the table.
    fn enter_table(&mut self, shape: TableShape, position: Position);
    fn leave_table(&mut self, shape: TableShape, position: Position);

    /// `header` is the header flag of the row's last cell.
    fn enter_table_row(&mut self, cells: usize, header: bool, position: Position);
    fn leave_table_row(&mut self, cells: usize, header: bool, position: Position);

    fn enter_table_cell(&mut self, header: bool, align: Alignment, position: Position);
    fn leave_table_cell(&mut self, header: bool, align: Alignment, position: Position);

    fn enter_style(&mut self, style: InlineStyle, position: Position);
    fn leave_style(&mut self, style: InlineStyle, position: Position);

    fn text(&mut self, text: &str, styles: StyleSet, position: Position);
    fn linebreak(&mut self, position: Position);
    fn ruler(&mut self, position: Position);

    fn enter_blockquote(&mut self, _position: Position) {}
    fn leave_blockquote(&mut self, _position: Position) {}

    fn code_block(&mut self, _code: &str, _language: &str, _position: Position) {}

    fn html(&mut self, _html: &str, _position: Position) {}

    fn enter_link(&mut self, _href: &str, _title: &str, _position: Position) {}
    fn leave_link(&mut self, _href: &str, _title: &str, _position: Position) {}

    fn image(&mut self, _href: &str, _title: &str, _alt: &str, _position: Position) {}

    /// Called exactly once, after the whole tree has been walked.
    fn finish(&mut self) {}
}
