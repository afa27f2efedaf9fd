//! Reserved code points delimiting nodes in a token stream.
//!
//! All three markers live in the Unicode Private Use Area, which ordinary
//! document text never uses. Content containing them is rejected before it
//! reaches the encoder.

use static_assertions::const_assert;

/// Begins a node encoding.
pub const OPEN: char = '\u{e000}';
/// Ends a node encoding.
pub const CLOSE: char = '\u{e001}';
/// Separates block flag, kind name and positional arguments.
pub const SEP: char = '\u{e002}';

/// Byte length of every marker in UTF-8.
pub(crate) const MARKER_LEN: usize = 3;

const_assert!(OPEN as u32 != CLOSE as u32);
const_assert!(OPEN as u32 != SEP as u32);
const_assert!(CLOSE as u32 != SEP as u32);
const_assert!(OPEN as u32 >= 0xE000 && OPEN as u32 <= 0xF8FF);
const_assert!(CLOSE as u32 >= 0xE000 && CLOSE as u32 <= 0xF8FF);
const_assert!(SEP as u32 >= 0xE000 && SEP as u32 <= 0xF8FF);
const_assert!(OPEN.len_utf8() == MARKER_LEN);
const_assert!(CLOSE.len_utf8() == MARKER_LEN);
const_assert!(SEP.len_utf8() == MARKER_LEN);

/// One of the three structural markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Open,
    Close,
    Sep,
}

impl Marker {
    /// Classify a character, returning `None` for ordinary text.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            OPEN => Some(Self::Open),
            CLOSE => Some(Self::Close),
            SEP => Some(Self::Sep),
            _ => None,
        }
    }

    /// The reserved character for this marker.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Open => OPEN,
            Self::Close => CLOSE,
            Self::Sep => SEP,
        }
    }

    /// Printable digraph used by [`dump_tokens`](crate::dump_tokens).
    #[must_use]
    pub fn digraph(self) -> &'static str {
        match self {
            Self::Open => "{{",
            Self::Close => "}}",
            Self::Sep => "::",
        }
    }
}

/// Check whether a character is one of the reserved markers.
#[must_use]
pub fn is_sentinel(c: char) -> bool {
    Marker::from_char(c).is_some()
}

/// Find the first reserved marker in `text`.
///
/// Returns the byte offset and the offending character.
#[must_use]
pub fn find_sentinel(text: &str) -> Option<(usize, char)> {
    text.char_indices().find(|&(_, c)| is_sentinel(c))
}
