//! End-to-end tests: markdown through encoder, decoder and generator.

use mdpdf_ast::{Alignment, AstError, MAX_DEPTH, Node, NodeKind, dump_tree};
use mdpdf_renderer::{
    ConvertError, InlineStyle, ListInfo, ListItemInfo, MarkdownConverter, Position,
    RecordingTheme, StyleSet, TableShape, TextLayout, TextTheme, ThemeCall,
};
use pretty_assertions::assert_eq;

fn record(markdown: &str) -> Vec<ThemeCall> {
    let mut theme = RecordingTheme::new();
    MarkdownConverter::new().convert(markdown, &mut theme).unwrap();
    theme.into_calls()
}

fn list_items(calls: &[ThemeCall], depth: usize) -> Vec<(u64, Position)> {
    calls
        .iter()
        .filter_map(|call| match call {
            ThemeCall::EnterListItem { item, position } if item.depth == depth => {
                Some((item.number, *position))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_sibling_counting() {
    let tree = MarkdownConverter::new().tree("Hi **there**").unwrap();

    let NodeKind::Root { children } = tree.kind else {
        panic!("expected root");
    };
    assert_eq!(
        children,
        vec![Node::new(NodeKind::Paragraph {
            text: vec![
                Node::text("Hi "),
                Node::new(NodeKind::Strong {
                    text: vec![Node::text("there")],
                }),
            ],
        })]
    );
}

#[test]
fn test_ordered_list_numbering() {
    let calls = record("5. one\n6. two\n7. three\n");

    assert_eq!(
        calls[0],
        ThemeCall::EnterList {
            list: ListInfo {
                ordered: true,
                depth: 0,
                start: 5,
                num_items: 3,
            },
            position: Position::new(0, 1),
        }
    );
    assert_eq!(
        list_items(&calls, 0),
        vec![
            (5, Position::new(0, 3)),
            (6, Position::new(1, 3)),
            (7, Position::new(2, 3)),
        ]
    );
}

#[test]
fn test_positional_independence_of_nested_lists() {
    let markdown = "\
- a
  - a1
  - a2
  - a3
- b
- c
- d
";
    let calls = record(markdown);

    let outer = list_items(&calls, 0);
    assert_eq!(outer.len(), 4);
    for (i, (_, position)) in outer.iter().enumerate() {
        assert_eq!(*position, Position::new(i, 4));
    }

    let inner = list_items(&calls, 1);
    assert_eq!(
        inner,
        vec![
            (1, Position::new(0, 3)),
            (2, Position::new(1, 3)),
            (3, Position::new(2, 3)),
        ]
    );
}

#[test]
fn test_table_shape_propagation() {
    let markdown = "\
| a | b | c |
|---|:-:|---|
| 1 | 2 | 3 |
| 4 | 5 | 6 |
";
    let calls = record(markdown);

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

    let centered = calls
        .iter()
        .filter(|call| {
            matches!(
                call,
                ThemeCall::EnterTableCell {
                    align: Alignment::Center,
                    ..
                }
            )
        })
        .count();
    assert_eq!(centered, 3);

    let n = calls.len();
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
fn test_inline_styles_reach_text() {
    let calls = record("*a **b `c`***");

    let texts: Vec<(String, StyleSet)> = calls
        .into_iter()
        .filter_map(|call| match call {
            ThemeCall::Text { text, styles, .. } => Some((text, styles)),
            _ => None,
        })
        .collect();

    let italic = StyleSet::default().with(InlineStyle::Italic);
    let bold = italic.with(InlineStyle::Bold);
    assert_eq!(
        texts,
        vec![
            ("a ".to_owned(), italic),
            ("b ".to_owned(), bold),
            ("c".to_owned(), bold.with(InlineStyle::Monospace)),
        ]
    );
}

#[test]
fn test_supplemented_hooks() {
    let markdown = "\
> quoted

```sh
ls
```

[link](https://example.com \"Example\") ![alt](img.png)
";
    let calls = record(markdown);

    assert!(calls.contains(&ThemeCall::EnterBlockquote {
        position: Position::new(0, 3),
    }));
    assert!(calls.contains(&ThemeCall::CodeBlock {
        code: "ls\n".to_owned(),
        language: "sh".to_owned(),
        position: Position::new(1, 3),
    }));
    assert!(calls.contains(&ThemeCall::EnterLink {
        href: "https://example.com".to_owned(),
        title: "Example".to_owned(),
        position: Position::new(0, 3),
    }));
    assert!(calls.contains(&ThemeCall::Image {
        href: "img.png".to_owned(),
        title: String::new(),
        alt: "alt".to_owned(),
        position: Position::new(2, 3),
    }));
}

#[test]
fn test_list_item_hooks_nest_in_order() {
    let calls = record("- x\n");
    let item = ListItemInfo {
        ordered: false,
        depth: 0,
        number: 1,
    };
    assert_eq!(
        &calls[1..4],
        &[
            ThemeCall::EnterListItem {
                item,
                position: Position::new(0, 1),
            },
            ThemeCall::Text {
                text: "x".to_owned(),
                styles: StyleSet::default(),
                position: Position::new(0, 1),
            },
            ThemeCall::LeaveListItem {
                item,
                position: Position::new(0, 1),
            },
        ]
    );
}

#[test]
fn test_tree_dump_is_deterministic() {
    let converter = MarkdownConverter::new();
    let first = dump_tree(&converter.tree("# T\n\n- a\n- b\n").unwrap());
    let second = dump_tree(&converter.tree("# T\n\n- a\n- b\n").unwrap());
    assert_eq!(first, second);
    assert!(first.starts_with("name = \"#root\" -> block\n"));
}

#[test]
fn test_text_theme_document() {
    let markdown = "\
# Report

Intro paragraph.

1. first
2. second

| k | v |
|---|--:|
| a | 10 |
";
    let mut theme = TextTheme::new(TextLayout {
        width: 40,
        footer: String::new(),
        ..TextLayout::default()
    });
    MarkdownConverter::new().convert(markdown, &mut theme).unwrap();

    assert_eq!(
        theme.render(),
        "\
Report
======

Intro paragraph.

1.  first
2.  second

| k   |   v |
| --- | --: |
| a   |  10 |
"
    );
}

#[test]
fn test_inline_html_stays_in_paragraph() {
    let mut theme = TextTheme::new(TextLayout {
        footer: String::new(),
        ..TextLayout::default()
    });
    MarkdownConverter::new()
        .convert("Press <kbd>Ctrl</kbd> to copy.", &mut theme)
        .unwrap();

    assert_eq!(theme.render(), "Press <kbd>Ctrl</kbd> to copy.\n");
}

#[test]
fn test_deeply_nested_quotes_are_rejected() {
    let markdown = format!("{} x", ">".repeat(1000));
    let mut theme = RecordingTheme::new();

    let err = MarkdownConverter::new()
        .convert(&markdown, &mut theme)
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Decode(AstError::NestingTooDeep {
            depth: MAX_DEPTH,
            ..
        })
    ));
    assert!(theme.calls().is_empty());
}

#[test]
fn test_moderately_nested_quotes_convert() {
    let markdown = format!("{} x", ">".repeat(100));
    let calls = record(&markdown);

    let quotes = calls
        .iter()
        .filter(|call| matches!(call, ThemeCall::EnterBlockquote { .. }))
        .count();
    assert_eq!(quotes, 100);
}
