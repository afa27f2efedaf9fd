//! Single-pass state machine turning a token stream back into a tree.

use crate::error::{AstError, ParserState};
use crate::node::{Node, NodeKind, Span};
use crate::normalize::normalize;
use crate::sentinel::{MARKER_LEN, Marker};

/// Deepest node nesting a token stream may contain.
///
/// Decoding, generation and dropping a tree all recurse once per level.
pub const MAX_DEPTH: usize = 128;

/// Position of a marker found in the token stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentinelMatch {
    pub marker: Marker,
    /// Byte offset of the marker.
    pub offset: usize,
}

/// Cursor shared by all recursion levels of one decode.
///
/// Holds the whole token stream, the offset of the next unconsumed byte and
/// the most recent marker match. A cursor belongs to exactly one decode and
/// is advanced in place by nested calls.
#[derive(Debug)]
pub struct AstContext<'a> {
    code: &'a str,
    index: usize,
    last: Option<SentinelMatch>,
    depth: usize,
}

impl<'a> AstContext<'a> {
    #[must_use]
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            index: 0,
            last: None,
            depth: 0,
        }
    }

    /// The token stream being decoded.
    #[must_use]
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// Offset of the next unconsumed byte.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Most recent marker match, `None` once the end of the stream is reached.
    #[must_use]
    pub fn last_match(&self) -> Option<SentinelMatch> {
        self.last
    }

    /// Number of nodes opened and not yet closed.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn open_node(&mut self, offset: usize) -> Result<(), AstError> {
        if self.depth == MAX_DEPTH {
            return Err(AstError::NestingTooDeep {
                offset,
                depth: MAX_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn close_node(&mut self) {
        self.depth -= 1;
    }

    /// Move past the next marker, or to the end of the stream if none is left.
    fn advance(&mut self) -> Option<SentinelMatch> {
        let base = self.index;
        let found = self.code[base..].char_indices().find_map(|(i, c)| {
            Marker::from_char(c).map(|marker| SentinelMatch {
                marker,
                offset: base + i,
            })
        });

        self.index = found.map_or(self.code.len(), |m| m.offset + MARKER_LEN);
        self.last = found;
        found
    }
}

/// Decode a complete token stream into a `#root` node.
///
/// # Errors
///
/// Returns an [`AstError`] carrying the offset and parser state if the stream
/// is malformed. No partial tree is returned.
pub fn decode(code: &str) -> Result<Node, AstError> {
    tracing::debug!(length = code.len(), "Decoding token stream");

    let mut context = AstContext::new(code);
    let children = decode_sequence(&mut context, true)?;

    tracing::debug!(nodes = children.len(), "Decoded token stream");

    Ok(Node {
        block: true,
        kind: NodeKind::Root { children },
        span: Span::new(0, code.len()),
    })
}

/// Header of a node whose encoding is being read.
struct Pending<'a> {
    start: usize,
    block: bool,
    name: &'a str,
    args: Vec<Vec<Node>>,
}

/// Decode a run of sibling nodes.
///
/// At top level the run ends with the stream. Inside an argument it ends at
/// the `SEP` or `CLOSE` terminating that argument, which is left in
/// [`AstContext::last_match`] for the caller.
fn decode_sequence(context: &mut AstContext<'_>, is_root: bool) -> Result<Vec<Node>, AstError> {
    let code = context.code;
    let mut nodes = Vec::new();
    let mut state = ParserState::AwaitOpener;
    let mut pending = Pending {
        start: 0,
        block: false,
        name: "",
        args: Vec::new(),
    };

    loop {
        if state == ParserState::AwaitEndOfArgument {
            let arg = decode_sequence(context, false)?;
            pending.args.push(arg);

            // A nested sequence only returns on the SEP or CLOSE ending it.
            if context.last_match().map(|m| m.marker) == Some(Marker::Close) {
                nodes.push(finish(&mut pending, context)?);
                state = ParserState::AwaitOpener;
            }
            continue;
        }

        let run_start = context.index;
        let Some(found) = context.advance() else {
            let end = code.len();
            return match state {
                ParserState::AwaitOpener if is_root => {
                    push_text(&mut nodes, code, run_start, end);
                    Ok(nodes)
                }
                ParserState::AwaitOpener => Err(AstError::UnterminatedStream {
                    offset: end,
                    state: ParserState::AwaitEndOfArgument,
                }),
                state => Err(AstError::UnterminatedStream { offset: end, state }),
            };
        };
        let literal = &code[run_start..found.offset];

        match (found.marker, state) {
            (Marker::Open, ParserState::AwaitOpener) => {
                push_text(&mut nodes, code, run_start, found.offset);
                context.open_node(found.offset)?;
                pending.start = found.offset;
                state = ParserState::AwaitEndOfType;
            }
            (Marker::Sep | Marker::Close, ParserState::AwaitOpener) => {
                if is_root {
                    return Err(unexpected(found, state));
                }
                push_text(&mut nodes, code, run_start, found.offset);
                return Ok(nodes);
            }
            (Marker::Sep, ParserState::AwaitEndOfType) => {
                pending.block = parse_block_flag(literal, run_start)?;
                state = ParserState::AwaitEndOfName;
            }
            (Marker::Sep | Marker::Close, ParserState::AwaitEndOfName) => {
                let name = literal.trim();
                if name.is_empty() {
                    return Err(unexpected(found, state));
                }
                pending.name = name;

                if found.marker == Marker::Sep {
                    state = ParserState::AwaitEndOfArgument;
                } else {
                    nodes.push(finish(&mut pending, context)?);
                    state = ParserState::AwaitOpener;
                }
            }
            (marker, state) => {
                return Err(unexpected(
                    SentinelMatch {
                        marker,
                        offset: found.offset,
                    },
                    state,
                ));
            }
        }
    }
}

/// Normalize the pending node, leaving `pending` ready for the next sibling.
fn finish(pending: &mut Pending<'_>, context: &mut AstContext<'_>) -> Result<Node, AstError> {
    context.close_node();
    let args = std::mem::take(&mut pending.args);
    normalize(
        pending.block,
        pending.name,
        args,
        Span::new(pending.start, context.index),
    )
}

fn push_text(nodes: &mut Vec<Node>, code: &str, start: usize, end: usize) {
    if end > start {
        nodes.push(Node::text(&code[start..end]).with_span(Span::new(start, end)));
    }
}

fn parse_block_flag(flag: &str, offset: usize) -> Result<bool, AstError> {
    match flag {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(AstError::InvalidBlockFlag {
            offset,
            flag: flag.to_owned(),
        }),
    }
}

fn unexpected(found: SentinelMatch, state: ParserState) -> AstError {
    let offset = found.offset;
    match found.marker {
        Marker::Open => AstError::UnexpectedOpener { offset, state },
        Marker::Sep => AstError::UnexpectedSeparator { offset, state },
        Marker::Close => AstError::UnexpectedCloser { offset, state },
    }
}
