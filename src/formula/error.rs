use thiserror::Error;

use crate::formula::tokenizer::TokenKind;
use crate::formula::{MAX_ELEMENTS, MAX_NESTING};

/// Errors produced when parsing a chemical formula.
///
/// Every variant carries the zero-based character position it refers to.
/// A failed parse never yields a partial compound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A character outside the formula alphabet was encountered.
    #[error("unrecognized character '{ch}' at position {pos}")]
    UnrecognizedCharacter { ch: char, pos: usize },
    /// A token of the wrong kind appeared, e.g. `)` closing a `[` group.
    #[error("expected {expected}, found {found} at position {pos}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        pos: usize,
    },
    /// A digit run does not fit the integer type it is read into.
    #[error("malformed integer at position {pos}")]
    MalformedInteger { pos: usize },
    /// A group opened more than [`MAX_NESTING`] levels deep.
    #[error("groups nested more than {max} deep at position {pos}", max = MAX_NESTING)]
    NestingTooDeep { pos: usize },
    /// The formula expands to more than [`MAX_ELEMENTS`] element occurrences.
    #[error(
        "formula expands to more than {max} elements at position {pos}",
        max = MAX_ELEMENTS
    )]
    TooManyElements { pos: usize },
}

impl FormulaError {
    /// Character position the error refers to.
    pub fn position(&self) -> usize {
        match self {
            Self::UnrecognizedCharacter { pos, .. }
            | Self::UnexpectedToken { pos, .. }
            | Self::MalformedInteger { pos }
            | Self::NestingTooDeep { pos }
            | Self::TooManyElements { pos } => *pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unrecognized() {
        let e = FormulaError::UnrecognizedCharacter { ch: '$', pos: 2 };
        assert_eq!(e.to_string(), "unrecognized character '$' at position 2");
    }

    #[test]
    fn display_unexpected() {
        let e = FormulaError::UnexpectedToken {
            expected: TokenKind::CloseBracket,
            found: TokenKind::CloseParen,
            pos: 4,
        };
        assert_eq!(e.to_string(), "expected ']', found ')' at position 4");
    }

    #[test]
    fn display_limits() {
        assert_eq!(
            FormulaError::TooManyElements { pos: 1 }.to_string(),
            "formula expands to more than 100000 elements at position 1"
        );
        assert_eq!(
            FormulaError::NestingTooDeep { pos: 128 }.to_string(),
            "groups nested more than 128 deep at position 128"
        );
    }

    #[test]
    fn position_of_every_variant() {
        assert_eq!(FormulaError::MalformedInteger { pos: 7 }.position(), 7);
        assert_eq!(FormulaError::NestingTooDeep { pos: 128 }.position(), 128);
        assert_eq!(FormulaError::TooManyElements { pos: 1 }.position(), 1);
        assert_eq!(
            FormulaError::UnrecognizedCharacter { ch: 'x', pos: 0 }.position(),
            0
        );
    }
}
