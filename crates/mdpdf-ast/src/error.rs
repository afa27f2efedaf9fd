//! Error types for token stream decoding.

use std::fmt;

/// Decoder state at the point a token stream was found malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    /// Scanning literal text and sibling nodes.
    AwaitOpener,
    /// Reading the block flag after an opener.
    AwaitEndOfType,
    /// Reading the kind name.
    AwaitEndOfName,
    /// Collecting positional arguments.
    AwaitEndOfArgument,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitOpener => "start of node",
            Self::AwaitEndOfType => "end of type",
            Self::AwaitEndOfName => "end of name",
            Self::AwaitEndOfArgument => "end of argument",
        })
    }
}

/// Malformed token stream or unparsable node field.
///
/// A token stream is produced by this crate's own encoder, so every variant
/// signals a contract violation between encoder and decoder. Decoding is not
/// resumable after an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("unexpected start of node at #{offset} while awaiting {state}")]
    UnexpectedOpener { offset: usize, state: ParserState },

    #[error("unexpected separator at #{offset} while awaiting {state}")]
    UnexpectedSeparator { offset: usize, state: ParserState },

    #[error("node prematurely closed at #{offset} while awaiting {state}")]
    UnexpectedCloser { offset: usize, state: ParserState },

    #[error("unexpected end of token stream at #{offset} while awaiting {state}")]
    UnterminatedStream { offset: usize, state: ParserState },

    #[error("nodes nested deeper than {depth} levels at #{offset}")]
    NestingTooDeep { offset: usize, depth: usize },

    #[error("invalid block flag {flag:?} at #{offset}")]
    InvalidBlockFlag { offset: usize, flag: String },

    #[error("invalid {field} of {kind} node at #{offset}: {value:?}")]
    InvalidLiteral {
        offset: usize,
        kind: &'static str,
        field: &'static str,
        value: String,
    },
}

impl AstError {
    /// Byte offset into the token stream where decoding failed.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedOpener { offset, .. }
            | Self::UnexpectedSeparator { offset, .. }
            | Self::UnexpectedCloser { offset, .. }
            | Self::UnterminatedStream { offset, .. }
            | Self::NestingTooDeep { offset, .. }
            | Self::InvalidBlockFlag { offset, .. }
            | Self::InvalidLiteral { offset, .. } => *offset,
        }
    }
}
