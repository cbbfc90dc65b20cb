//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Structural failures that keep a formula from producing any value.
///
/// These never escape [`evaluate`](crate::evaluate), which reports them as `#ERROR`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// A character that cannot start any token
    #[error("Unexpected character '{ch}' at offset {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    /// A string literal with no closing quote
    #[error("Unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),

    /// A token that does not fit the grammar at this point
    #[error("Unexpected {found} at offset {pos}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        pos: usize,
    },

    /// A cell label that does not name a cell (e.g. row 0)
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}
