//! Theme recording every hook invocation.

use std::fmt;

use mdpdf_ast::Alignment;

use crate::theme::{InlineStyle, ListInfo, ListItemInfo, Position, StyleSet, TableShape, Theme};

/// One recorded hook invocation with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeCall {
    EnterParagraph {
        position: Position,
    },
    LeaveParagraph {
        position: Position,
    },
    EnterHeading {
        level: u8,
        position: Position,
    },
    LeaveHeading {
        level: u8,
        position: Position,
    },
    EnterList {
        list: ListInfo,
        position: Position,
    },
    LeaveList {
        list: ListInfo,
        position: Position,
    },
    EnterListItem {
        item: ListItemInfo,
        position: Position,
    },
    LeaveListItem {
        item: ListItemInfo,
        position: Position,
    },
    EnterTable {
        shape: TableShape,
        position: Position,
    },
    LeaveTable {
        shape: TableShape,
        position: Position,
    },
    EnterTableRow {
        cells: usize,
        header: bool,
        position: Position,
    },
    LeaveTableRow {
        cells: usize,
        header: bool,
        position: Position,
    },
    EnterTableCell {
        header: bool,
        align: Alignment,
        position: Position,
    },
    LeaveTableCell {
        header: bool,
        align: Alignment,
        position: Position,
    },
    EnterStyle {
        style: InlineStyle,
        position: Position,
    },
    LeaveStyle {
        style: InlineStyle,
        position: Position,
    },
    Text {
        text: String,
        styles: StyleSet,
        position: Position,
    },
    Linebreak {
        position: Position,
    },
    Ruler {
        position: Position,
    },
    EnterBlockquote {
        position: Position,
    },
    LeaveBlockquote {
        position: Position,
    },
    CodeBlock {
        code: String,
        language: String,
        position: Position,
    },
    Html {
        html: String,
        position: Position,
    },
    EnterLink {
        href: String,
        title: String,
        position: Position,
    },
    LeaveLink {
        href: String,
        title: String,
        position: Position,
    },
    Image {
        href: String,
        title: String,
        alt: String,
        position: Position,
    },
    Finish,
}

impl fmt::Display for ThemeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnterParagraph { position } => write!(f, "enter_paragraph @{position}"),
            Self::LeaveParagraph { position } => write!(f, "leave_paragraph @{position}"),
            Self::EnterHeading { level, position } => {
                write!(f, "enter_heading level={level} @{position}")
            }
            Self::LeaveHeading { level, position } => {
                write!(f, "leave_heading level={level} @{position}")
            }
            Self::EnterList { list, position } => write!(
                f,
                "enter_list ordered={} depth={} start={} items={} @{position}",
                list.ordered, list.depth, list.start, list.num_items
            ),
            Self::LeaveList { list, position } => {
                write!(f, "leave_list depth={} @{position}", list.depth)
            }
            Self::EnterListItem { item, position } => write!(
                f,
                "enter_list_item ordered={} depth={} number={} @{position}",
                item.ordered, item.depth, item.number
            ),
            Self::LeaveListItem { item, position } => {
                write!(f, "leave_list_item number={} @{position}", item.number)
            }
            Self::EnterTable { shape, position } => write!(
                f,
                "enter_table columns={} header_rows={} body_rows={} @{position}",
                shape.columns, shape.header_rows, shape.body_rows
            ),
            Self::LeaveTable { position, .. } => write!(f, "leave_table @{position}"),
            Self::EnterTableRow {
                cells,
                header,
                position,
            } => write!(f, "enter_table_row cells={cells} header={header} @{position}"),
            Self::LeaveTableRow { position, .. } => write!(f, "leave_table_row @{position}"),
            Self::EnterTableCell {
                header,
                align,
                position,
            } => write!(
                f,
                "enter_table_cell header={header} align={} @{position}",
                align.as_str()
            ),
            Self::LeaveTableCell { position, .. } => write!(f, "leave_table_cell @{position}"),
            Self::EnterStyle { style, position } => {
                write!(f, "enter_style {} @{position}", style.as_str())
            }
            Self::LeaveStyle { style, position } => {
                write!(f, "leave_style {} @{position}", style.as_str())
            }
            Self::Text {
                text,
                styles,
                position,
            } => write!(f, "text {text:?} [{styles}] @{position}"),
            Self::Linebreak { position } => write!(f, "linebreak @{position}"),
            Self::Ruler { position } => write!(f, "ruler @{position}"),
            Self::EnterBlockquote { position } => write!(f, "enter_blockquote @{position}"),
            Self::LeaveBlockquote { position } => write!(f, "leave_blockquote @{position}"),
            Self::CodeBlock {
                code,
                language,
                position,
            } => write!(f, "code_block {language:?} {code:?} @{position}"),
            Self::Html { html, position } => write!(f, "html {html:?} @{position}"),
            Self::EnterLink {
                href,
                title,
                position,
            } => write!(f, "enter_link {href:?} {title:?} @{position}"),
            Self::LeaveLink { position, .. } => write!(f, "leave_link @{position}"),
            Self::Image {
                href,
                title,
                alt,
                position,
            } => write!(f, "image {href:?} {title:?} {alt:?} @{position}"),
            Self::Finish => f.write_str("finish"),
        }
    }
}

/// Theme collecting a [`ThemeCall`] for every hook.
#[derive(Debug, Default)]
pub struct RecordingTheme {
    calls: Vec<ThemeCall>,
}

impl RecordingTheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[ThemeCall] {
        &self.calls
    }

    #[must_use]
    pub fn into_calls(self) -> Vec<ThemeCall> {
        self.calls
    }

    fn record(&mut self, call: ThemeCall) {
        self.calls.push(call);
    }
}

impl Theme for RecordingTheme {
    fn enter_paragraph(&mut self, position: Position) {
        self.record(ThemeCall::EnterParagraph { position });
    }

    fn leave_paragraph(&mut self, position: Position) {
        self.record(ThemeCall::LeaveParagraph { position });
    }

    fn enter_heading(&mut self, level: u8, position: Position) {
        self.record(ThemeCall::EnterHeading { level, position });
    }

    fn leave_heading(&mut self, level: u8, position: Position) {
        self.record(ThemeCall::LeaveHeading { level, position });
    }

    fn enter_list(&mut self, list: &ListInfo, position: Position) {
        self.record(ThemeCall::EnterList {
            list: *list,
            position,
        });
    }

    fn leave_list(&mut self, list: &ListInfo, position: Position) {
        self.record(ThemeCall::LeaveList {
            list: *list,
            position,
        });
    }

    fn enter_list_item(&mut self, item: &ListItemInfo, position: Position) {
        self.record(ThemeCall::EnterListItem {
            item: *item,
            position,
        });
    }

    fn leave_list_item(&mut self, item: &ListItemInfo, position: Position) {
        self.record(ThemeCall::LeaveListItem {
            item: *item,
            position,
        });
    }

    fn enter_table(&mut self, shape: TableShape, position: Position) {
        self.record(ThemeCall::EnterTable { shape, position });
    }

    fn leave_table(&mut self, shape: TableShape, position: Position) {
        self.record(ThemeCall::LeaveTable { shape, position });
    }

    fn enter_table_row(&mut self, cells: usize, header: bool, position: Position) {
        self.record(ThemeCall::EnterTableRow {
            cells,
            header,
            position,
        });
    }

    fn leave_table_row(&mut self, cells: usize, header: bool, position: Position) {
        self.record(ThemeCall::LeaveTableRow {
            cells,
            header,
            position,
        });
    }

    fn enter_table_cell(&mut self, header: bool, align: Alignment, position: Position) {
        self.record(ThemeCall::EnterTableCell {
            header,
            align,
            position,
        });
    }

    fn leave_table_cell(&mut self, header: bool, align: Alignment, position: Position) {
        self.record(ThemeCall::LeaveTableCell {
            header,
            align,
            position,
        });
    }

    fn enter_style(&mut self, style: InlineStyle, position: Position) {
        self.record(ThemeCall::EnterStyle { style, position });
    }

    fn leave_style(&mut self, style: InlineStyle, position: Position) {
        self.record(ThemeCall::LeaveStyle { style, position });
    }

    fn text(&mut self, text: &str, styles: StyleSet, position: Position) {
        self.record(ThemeCall::Text {
            text: text.to_owned(),
            styles,
            position,
        });
    }

    fn linebreak(&mut self, position: Position) {
        self.record(ThemeCall::Linebreak { position });
    }

    fn ruler(&mut self, position: Position) {
        self.record(ThemeCall::Ruler { position });
    }

    fn enter_blockquote(&mut self, position: Position) {
        self.record(ThemeCall::EnterBlockquote { position });
    }

    fn leave_blockquote(&mut self, position: Position) {
        self.record(ThemeCall::LeaveBlockquote { position });
    }

    fn code_block(&mut self, code: &str, language: &str, position: Position) {
        self.record(ThemeCall::CodeBlock {
            code: code.to_owned(),
            language: language.to_owned(),
            position,
        });
    }

    fn html(&mut self, html: &str, position: Position) {
        self.record(ThemeCall::Html {
            html: html.to_owned(),
            position,
        });
    }

    fn enter_link(&mut self, href: &str, title: &str, position: Position) {
        self.record(ThemeCall::EnterLink {
            href: href.to_owned(),
            title: title.to_owned(),
            position,
        });
    }

    fn leave_link(&mut self, href: &str, title: &str, position: Position) {
        self.record(ThemeCall::LeaveLink {
            href: href.to_owned(),
            title: title.to_owned(),
            position,
        });
    }

    fn image(&mut self, href: &str, title: &str, alt: &str, position: Position) {
        self.record(ThemeCall::Image {
            href: href.to_owned(),
            title: title.to_owned(),
            alt: alt.to_owned(),
            position,
        });
    }

    fn finish(&mut self) {
        self.record(ThemeCall::Finish);
    }
}
