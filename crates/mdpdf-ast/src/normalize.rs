//! Promotion of positional arguments into named node fields.

use std::str::FromStr;

use crate::error::AstError;
use crate::node::{Alignment, Node, NodeKind, Reduced, Span};

/// Positional arguments of a node being normalized.
///
/// Missing trailing arguments read as empty sequences.
struct Args(std::vec::IntoIter<Vec<Node>>);

impl Args {
    fn next(&mut self) -> Vec<Node> {
        self.0.next().unwrap_or_default()
    }

    fn reduced(&mut self) -> Reduced {
        Reduced::from_nodes(self.next())
    }

    fn flag(&mut self) -> bool {
        self.reduced().as_literal() == Some("true")
    }
}

/// Build a typed node from its decoded header and positional arguments.
///
/// # Errors
///
/// Returns [`AstError::InvalidLiteral`] if a numeric or alignment field does
/// not reduce to a parsable literal.
pub fn normalize(
    block: bool,
    name: &str,
    args: Vec<Vec<Node>>,
    span: Span,
) -> Result<Node, AstError> {
    let mut args = Args(args.into_iter());

    let kind = match name {
        "hr" => NodeKind::Hr,
        "br" => NodeKind::Br,
        "blockquote" => NodeKind::Blockquote { quote: args.next() },
        "html" => NodeKind::Html { html: args.next() },
        "codespan" => NodeKind::Codespan { code: args.next() },
        "listitem" => NodeKind::ListItem { text: args.next() },
        "paragraph" => NodeKind::Paragraph { text: args.next() },
        "strong" => NodeKind::Strong { text: args.next() },
        "em" => NodeKind::Em { text: args.next() },
        "del" => NodeKind::Del { text: args.next() },
        "code" => NodeKind::Code {
            code: args.reduced(),
            language: args.reduced(),
            escaped: args.reduced(),
        },
        "heading" => {
            let text = args.next();
            let level = parse_number(args.reduced(), "heading", "level", span)?;
            NodeKind::Heading {
                text,
                level,
                raw: args.reduced(),
            }
        }
        "list" => {
            let items = args.next();
            let ordered = args.flag();
            let start = match args.reduced() {
                Reduced::Text(text) if text.is_empty() => 1,
                start => parse_number(start, "list", "start", span)?,
            };
            NodeKind::List {
                items,
                ordered,
                start,
            }
        }
        "table" => NodeKind::Table {
            header: args.next(),
            body: args.next(),
        },
        "tablerow" => NodeKind::TableRow {
            content: args.next(),
        },
        "tablecell" => {
            let content = args.next();
            let header = args.flag();
            let align = parse_alignment(args.reduced(), span)?;
            NodeKind::TableCell {
                content,
                header,
                align,
            }
        }
        "link" => NodeKind::Link {
            href: args.reduced(),
            title: args.reduced(),
            text: args.next(),
        },
        "image" => NodeKind::Image {
            href: args.reduced(),
            title: args.reduced(),
            text: args.next(),
        },
        _ => NodeKind::Other {
            name: name.to_owned(),
            args: args.0.collect(),
        },
    };

    tracing::trace!(kind = name, start = span.start, "Normalized node");

    Ok(Node { block, kind, span })
}

fn parse_number<T: FromStr>(
    value: Reduced,
    kind: &'static str,
    field: &'static str,
    span: Span,
) -> Result<T, AstError> {
    value
        .as_literal()
        .and_then(|literal| literal.trim().parse().ok())
        .ok_or_else(|| AstError::InvalidLiteral {
            offset: span.start,
            kind,
            field,
            value: value.to_text(),
        })
}

fn parse_alignment(value: Reduced, span: Span) -> Result<Option<Alignment>, AstError> {
    match value.as_literal() {
        Some("null" | "") => Ok(None),
        Some(literal) => Alignment::parse(literal).map(Some).ok_or_else(|| invalid_align(&value, span)),
        None => Err(invalid_align(&value, span)),
    }
}

fn invalid_align(value: &Reduced, span: Span) -> AstError {
    AstError::InvalidLiteral {
        offset: span.start,
        kind: "tablecell",
        field: "align",
        value: value.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Vec<Node> {
        vec![Node::text(value)]
    }

    #[test]
    fn test_heading_fields() {
        let node = normalize(
            true,
            "heading",
            vec![text("Title"), text("2"), text("Title")],
            Span::default(),
        )
        .unwrap();
        assert_eq!(
            node.kind,
            NodeKind::Heading {
                text: text("Title"),
                level: 2,
                raw: Reduced::from("Title"),
            }
        );
    }

    #[test]
    fn test_list_flags() {
        let node = normalize(
            true,
            "list",
            vec![Vec::new(), text("true"), text("5")],
            Span::default(),
        )
        .unwrap();
        assert_eq!(
            node.kind,
            NodeKind::List {
                items: Vec::new(),
                ordered: true,
                start: 5,
            }
        );
    }

    #[test]
    fn test_list_without_start_defaults_to_one() {
        let node = normalize(true, "list", vec![Vec::new(), text("false")], Span::default())
            .unwrap();
        assert!(matches!(
            node.kind,
            NodeKind::List {
                ordered: false,
                start: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_list_start_must_be_numeric() {
        let err = normalize(
            true,
            "list",
            vec![Vec::new(), text("true"), text("five")],
            Span::new(7, 30),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AstError::InvalidLiteral {
                offset: 7,
                kind: "list",
                field: "start",
                value: "five".to_owned(),
            }
        );
    }

    #[test]
    fn test_structured_start_is_rejected() {
        let strong = Node::new(NodeKind::Strong { text: text("1") });
        let err = normalize(
            true,
            "list",
            vec![Vec::new(), text("true"), vec![strong]],
            Span::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AstError::InvalidLiteral { field: "start", .. }));
    }

    #[test]
    fn test_tablecell_null_alignment() {
        let node = normalize(
            true,
            "tablecell",
            vec![text("x"), text("true"), text("null")],
            Span::default(),
        )
        .unwrap();
        assert_eq!(
            node.kind,
            NodeKind::TableCell {
                content: text("x"),
                header: true,
                align: None,
            }
        );
    }

    #[test]
    fn test_tablecell_alignment() {
        let node = normalize(
            true,
            "tablecell",
            vec![text("x"), text("false"), text("right")],
            Span::default(),
        )
        .unwrap();
        assert!(matches!(
            node.kind,
            NodeKind::TableCell {
                header: false,
                align: Some(Alignment::Right),
                ..
            }
        ));
    }

    #[test]
    fn test_link_reduces_href_and_title() {
        let node = normalize(
            false,
            "link",
            vec![text("https://a.example"), Vec::new(), text("A")],
            Span::default(),
        )
        .unwrap();
        assert_eq!(
            node.kind,
            NodeKind::Link {
                href: Reduced::from("https://a.example"),
                title: Reduced::from(""),
                text: text("A"),
            }
        );
    }

    #[test]
    fn test_unknown_kind_keeps_arguments() {
        let node = normalize(true, "footnote", vec![text("1"), text("note")], Span::default())
            .unwrap();
        assert_eq!(
            node.kind,
            NodeKind::Other {
                name: "footnote".to_owned(),
                args: vec![text("1"), text("note")],
            }
        );
    }
}
