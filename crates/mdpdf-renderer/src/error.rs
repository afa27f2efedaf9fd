//! Error type for markdown conversion.

use mdpdf_ast::AstError;

/// Error raised while converting markdown into theme calls.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Token stream could not be decoded.
    #[error(transparent)]
    Decode(#[from] AstError),

    /// Generator was handed a tree whose root is not the synthetic block root.
    #[error("Invalid root structure: expected block #root, found {kind}")]
    InvalidRootStructure { kind: String },

    /// Document content contains one of the reserved sentinel characters.
    #[error("Reserved character {character:?} at source offset {offset}")]
    ReservedCharacter { character: char, offset: usize },
}
