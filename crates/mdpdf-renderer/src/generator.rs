//! Depth-first walk of a decoded tree dispatching to a [`Theme`].

use mdpdf_ast::{Node, NodeKind, plain_text};

use crate::error::ConvertError;
use crate::theme::{InlineStyle, ListInfo, ListItemInfo, Position, StyleSet, TableShape, Theme};

/// Per-branch state copied on every descent.
#[derive(Clone, Copy, Debug, Default)]
struct Context {
    /// Depth a list entered at this point would get.
    list_depth: usize,
    styles: StyleSet,
}

/// Running counter of one list, shared by its direct children only.
#[derive(Debug)]
struct ListContext {
    ordered: bool,
    start: u64,
    index: usize,
    count: usize,
    depth: usize,
}

impl ListContext {
    fn item(&self) -> (ListItemInfo, Position) {
        let info = ListItemInfo {
            ordered: self.ordered,
            depth: self.depth,
            number: self.start.saturating_add(self.index as u64),
        };
        (info, Position::new(self.index, self.count))
    }
}

/// Tree walker invoking theme hooks node by node.
pub struct Generator<'t, T: Theme + ?Sized> {
    theme: &'t mut T,
}

impl<'t, T: Theme + ?Sized> Generator<'t, T> {
    #[must_use]
    pub fn new(theme: &'t mut T) -> Self {
        Self { theme }
    }

    /// Walk the tree under `root`, then call [`Theme::finish`].
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidRootStructure`] unless `root` is the
    /// block-level `#root` node produced by the decoder. No hook is called in
    /// that case.
    pub fn generate(mut self, root: &Node) -> Result<(), ConvertError> {
        let NodeKind::Root { children } = &root.kind else {
            return Err(ConvertError::InvalidRootStructure {
                kind: root.name().to_owned(),
            });
        };
        if !root.block {
            return Err(ConvertError::InvalidRootStructure {
                kind: format!("inline {}", root.name()),
            });
        }

        tracing::debug!(nodes = children.len(), "Generating document");
        self.visit_sequence(children, Context::default(), None);
        self.theme.finish();
        Ok(())
    }

    fn visit_sequence(
        &mut self,
        nodes: &[Node],
        context: Context,
        mut list: Option<&mut ListContext>,
    ) {
        let count = nodes.len();
        for (index, node) in nodes.iter().enumerate() {
            self.visit(node, Position::new(index, count), context, list.as_deref_mut());
        }
    }

    fn visit(
        &mut self,
        node: &Node,
        position: Position,
        context: Context,
        list: Option<&mut ListContext>,
    ) {
        match &node.kind {
            NodeKind::Text { text } => self.theme.text(text, context.styles, position),
            NodeKind::Paragraph { text } => {
                self.theme.enter_paragraph(position);
                self.visit_sequence(text, context, None);
                self.theme.leave_paragraph(position);
            }
            NodeKind::Heading { text, level, .. } => {
                self.theme.enter_heading(*level, position);
                self.visit_sequence(text, context, None);
                self.theme.leave_heading(*level, position);
            }
            NodeKind::List {
                items,
                ordered,
                start,
            } => self.visit_list(items, *ordered, *start, position, context),
            NodeKind::ListItem { text } => match list {
                Some(list) => self.visit_list_item(text, context, list),
                None => {
                    tracing::warn!(offset = node.span.start, "List item outside of a list");
                    let mut detached = ListContext {
                        ordered: false,
                        start: 1,
                        index: 0,
                        count: 1,
                        depth: context.list_depth,
                    };
                    self.visit_list_item(text, context, &mut detached);
                }
            },
            NodeKind::Table { header, body } => {
                let shape = TableShape {
                    columns: column_count(header, body),
                    header_rows: header.len(),
                    body_rows: body.len(),
                };
                self.theme.enter_table(shape, position);
                self.visit_sequence(header, context, None);
                self.visit_sequence(body, context, None);
                self.theme.leave_table(shape, position);
            }
            NodeKind::TableRow { content } => {
                let header = content.last().is_some_and(is_header_cell);
                self.theme.enter_table_row(content.len(), header, position);
                self.visit_sequence(content, context, None);
                self.theme.leave_table_row(content.len(), header, position);
            }
            NodeKind::TableCell {
                content,
                header,
                align,
            } => {
                let align = align.unwrap_or_default();
                self.theme.enter_table_cell(*header, align, position);
                self.visit_sequence(content, context, None);
                self.theme.leave_table_cell(*header, align, position);
            }
            NodeKind::Blockquote { quote } => {
                self.theme.enter_blockquote(position);
                self.visit_sequence(quote, context, None);
                self.theme.leave_blockquote(position);
            }
            NodeKind::Html { html } => self.theme.html(&plain_text(html), position),
            NodeKind::Code { code, language, .. } => {
                self.theme
                    .code_block(&code.to_text(), &language.to_text(), position);
            }
            NodeKind::Codespan { code: children }
            | NodeKind::Strong { text: children }
            | NodeKind::Em { text: children }
            | NodeKind::Del { text: children } => {
                if let Some(style) = InlineStyle::for_kind(&node.kind) {
                    let styled = Context {
                        styles: context.styles.with(style),
                        ..context
                    };
                    self.theme.enter_style(style, position);
                    self.visit_sequence(children, styled, None);
                    self.theme.leave_style(style, position);
                }
            }
            NodeKind::Link { href, title, text } => {
                let (href, title) = (href.to_text(), title.to_text());
                self.theme.enter_link(&href, &title, position);
                self.visit_sequence(text, context, None);
                self.theme.leave_link(&href, &title, position);
            }
            NodeKind::Image { href, title, text } => {
                self.theme
                    .image(&href.to_text(), &title.to_text(), &plain_text(text), position);
            }
            NodeKind::Br => self.theme.linebreak(position),
            NodeKind::Hr => self.theme.ruler(position),
            NodeKind::Root { .. } | NodeKind::Other { .. } => {
                tracing::debug!(kind = node.name(), "Skipping unrecognized node");
            }
        }
    }

    fn visit_list(
        &mut self,
        items: &[Node],
        ordered: bool,
        start: u64,
        position: Position,
        context: Context,
    ) {
        let depth = context.list_depth;
        let info = ListInfo {
            ordered,
            depth,
            start,
            num_items: items.len(),
        };
        let mut counter = ListContext {
            ordered,
            start,
            index: 0,
            count: items.len(),
            depth,
        };
        let nested = Context {
            list_depth: depth + 1,
            ..context
        };

        self.theme.enter_list(&info, position);
        self.visit_sequence(items, nested, Some(&mut counter));
        self.theme.leave_list(&info, position);
    }

    fn visit_list_item(&mut self, text: &[Node], context: Context, list: &mut ListContext) {
        let (item, position) = list.item();
        self.theme.enter_list_item(&item, position);
        self.visit_sequence(text, context, None);
        self.theme.leave_list_item(&item, position);
        list.index += 1;
    }
}

fn is_header_cell(node: &Node) -> bool {
    matches!(node.kind, NodeKind::TableCell { header: true, .. })
}

/// Cell count of the first header row, else of the first body row.
fn column_count(header: &[Node], body: &[Node]) -> usize {
    header
        .first()
        .or_else(|| body.first())
        .map_or(0, |row| match &row.kind {
            NodeKind::TableRow { content } => content.len(),
            _ => 0,
        })
}

#[cfg(test)]
mod tests {
    use mdpdf_ast::{Alignment, AstRenderer, CellFlags, Renderer, decode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::recording::{RecordingTheme, ThemeCall};

    fn generate(code: &str) -> Vec<ThemeCall> {
        let root = decode(code).unwrap();
        let mut theme = RecordingTheme::new();
        Generator::new(&mut theme).generate(&root).unwrap();
        theme.into_calls()
    }

    #[test]
    fn test_paragraph_with_styles() {
        let r = AstRenderer;
        let code = r.paragraph(&format!("Hi {}", r.strong(&r.em("there"))));

        let calls = generate(&code);

        let top = Position::new(0, 1);
        let bold = StyleSet::default().with(InlineStyle::Bold);
        assert_eq!(
            calls,
            vec![
                ThemeCall::EnterParagraph { position: top },
                ThemeCall::Text {
                    text: "Hi ".to_owned(),
                    styles: StyleSet::default(),
                    position: Position::new(0, 2),
                },
                ThemeCall::EnterStyle {
                    style: InlineStyle::Bold,
                    position: Position::new(1, 2),
                },
                ThemeCall::EnterStyle {
                    style: InlineStyle::Italic,
                    position: top,
                },
                ThemeCall::Text {
                    text: "there".to_owned(),
                    styles: bold.with(InlineStyle::Italic),
                    position: top,
                },
                ThemeCall::LeaveStyle {
                    style: InlineStyle::Italic,
                    position: top,
                },
                ThemeCall::LeaveStyle {
                    style: InlineStyle::Bold,
                    position: Position::new(1, 2),
                },
                ThemeCall::LeaveParagraph { position: top },
                ThemeCall::Finish,
            ]
        );
    }

    #[test]
    fn test_nested_list_depth_and_numbering() {
        let r = AstRenderer;
        let inner = r.list(&r.listitem("x"), false, 1);
        let items = format!(
            "{}{}{}",
            r.listitem("a"),
            r.listitem(&format!("b{inner}")),
            r.listitem("c")
        );
        let code = r.list(&items, true, 5);

        let items: Vec<(ListItemInfo, Position)> = generate(&code)
            .into_iter()
            .filter_map(|call| match call {
                ThemeCall::EnterListItem { item, position } => Some((item, position)),
                _ => None,
            })
            .collect();

        let outer = |number, index| {
            (
                ListItemInfo {
                    ordered: true,
                    depth: 0,
                    number,
                },
                Position::new(index, 3),
            )
        };
        assert_eq!(
            items,
            vec![
                outer(5, 0),
                outer(6, 1),
                (
                    ListItemInfo {
                        ordered: false,
                        depth: 1,
                        number: 1,
                    },
                    Position::new(0, 1),
                ),
                outer(7, 2),
            ]
        );
    }

    #[test]
    fn test_table_shape_before_rows() {
        let r = AstRenderer;
        let cell = |text: &str, header| {
            r.tablecell(
                text,
                CellFlags {
                    header,
                    align: None,
                },
            )
        };
        let header = r.tablerow(&format!("{}{}{}", cell("a", true), cell("b", true), cell("c", true)));
        let body = format!(
            "{}{}",
            r.tablerow(&cell("1", false)),
            r.tablerow(&cell("2", false))
        );
        let calls = generate(&r.table(&header, &body));

        let shape = TableShape {
            columns: 3,
            header_rows: 1,
            body_rows: 2,
        };
        assert_eq!(
            calls[0],
            ThemeCall::EnterTable {
                shape,
                position: Position::new(0, 1),
            }
        );
        assert_eq!(
            calls[1],
            ThemeCall::EnterTableRow {
                cells: 3,
                header: true,
                position: Position::new(0, 1),
            }
        );
        assert_eq!(
            calls[2],
            ThemeCall::EnterTableCell {
                header: true,
                align: Alignment::Left,
                position: Position::new(0, 3),
            }
        );
        let n = calls.len();
        assert!(matches!(calls[n - 4], ThemeCall::LeaveTableCell { .. }));
        assert!(matches!(calls[n - 3], ThemeCall::LeaveTableRow { .. }));
        assert_eq!(
            calls[n - 2],
            ThemeCall::LeaveTable {
                shape,
                position: Position::new(0, 1),
            }
        );
        assert_eq!(calls[n - 1], ThemeCall::Finish);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let calls = generate("\u{E000}1\u{E002}aside\u{E002}x\u{E001}\u{E000}1\u{E002}hr\u{E001}");
        assert_eq!(
            calls,
            vec![
                ThemeCall::Ruler {
                    position: Position::new(1, 2),
                },
                ThemeCall::Finish,
            ]
        );
    }

    #[test]
    fn test_top_level_list_item_gets_detached_counter() {
        let calls = generate(&AstRenderer.listitem("a"));
        assert_eq!(
            calls[0],
            ThemeCall::EnterListItem {
                item: ListItemInfo {
                    ordered: false,
                    depth: 0,
                    number: 1,
                },
                position: Position::new(0, 1),
            }
        );
    }

    #[test]
    fn test_invalid_root_structure() {
        let mut theme = RecordingTheme::new();
        let err = Generator::new(&mut theme)
            .generate(&Node::new(NodeKind::Hr))
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRootStructure { kind } if kind == "hr"));
        assert!(theme.calls().is_empty());
    }
}
