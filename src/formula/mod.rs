//! Chemical formula parsing and canonical formatting.
//!
//! [`parse`] turns a formula such as `Ca(OH)2` or `[Fe(CN)6]-3` into a
//! [`Compound`], looking element symbols up in any [`ElementLookup`].
//! [`format`] renders a compound back to its canonical string.

pub mod error;
mod parser;
pub mod tokenizer;
pub(crate) mod writer;

use crate::compound::Compound;
use crate::traits::ElementLookup;
pub use error::FormulaError;
pub use parser::{MAX_ELEMENTS, MAX_NESTING};
pub use tokenizer::{tokenize, Token, TokenKind, Tokenizer};
pub use writer::{format, format_molecule};

/// Parse a formula against an element table.
///
/// Digits directly after a symbol or a closing bracket are always a count,
/// and only digits after a sign are a charge: `[Fe(CN)6]3-` is three copies
/// of the group at charge -1 each, while `[Fe(CN)6]-3` is one copy at -3.
///
/// Parsing stops at the first token that cannot continue the formula;
/// anything after it is ignored. Use [`parse_exact`] to reject it instead.
/// Formulas nested deeper than [`MAX_NESTING`] or expanding to more than
/// [`MAX_ELEMENTS`] element occurrences are rejected.
pub fn parse<L: ElementLookup + ?Sized>(formula: &str, table: &L) -> Result<Compound, FormulaError> {
    parser::Parser::new(formula, table).parse_compound()
}

/// Like [`parse`], but the whole input must be consumed.
pub fn parse_exact<L: ElementLookup + ?Sized>(
    formula: &str,
    table: &L,
) -> Result<Compound, FormulaError> {
    let mut parser = parser::Parser::new(formula, table);
    let compound = parser.parse_compound()?;
    parser.expect_end()?;
    Ok(compound)
}
