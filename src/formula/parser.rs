//! Recursive-descent parser for chemical formulas.
//!
//! ```text
//! Compound   := (ElementRun | Group)* Charge?
//! Group      := ("(" | "[") (ElementRun | Group)* (")" | "]") Count? Charge?
//! ElementRun := ELEMENT Count? Charge?
//! Count      := INTEGER
//! Charge     := ("+" | "-") INTEGER?
//! ```

use crate::compound::Compound;
use crate::element::Element;
use crate::formula::error::FormulaError;
use crate::formula::tokenizer::{SpannedToken, Token, TokenKind, Tokenizer};
use crate::molecule::Molecule;
use crate::traits::ElementLookup;

/// Deepest group nesting the parser accepts.
pub const MAX_NESTING: usize = 128;

/// Most element occurrences a single formula may expand to.
pub const MAX_ELEMENTS: usize = 100_000;

pub(crate) struct Parser<'t, L: ElementLookup + ?Sized> {
    tokens: Tokenizer,
    table: &'t L,
    depth: usize,
}

impl<'t, L: ElementLookup + ?Sized> Parser<'t, L> {
    pub(crate) fn new(input: &str, table: &'t L) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            table,
            depth: 0,
        }
    }

    /// Parse the `Compound` production. Input after the last element, group
    /// or charge is left unconsumed.
    pub(crate) fn parse_compound(&mut self) -> Result<Compound, FormulaError> {
        let molecules = self.parse_units()?;
        let charge = self.parse_charge()?.unwrap_or(0);
        Ok(Compound::new(molecules, charge))
    }

    /// Fail unless the whole input has been consumed.
    pub(crate) fn expect_end(&self) -> Result<(), FormulaError> {
        let next = self.tokens.peek()?;
        if next.token == Token::End {
            Ok(())
        } else {
            Err(unexpected(TokenKind::End, &next))
        }
    }

    /// `(ElementRun | Group)*`. Contiguous element runs accumulate into one
    /// molecule; a group flushes it so molecule order follows the input.
    fn parse_units(&mut self) -> Result<Vec<Molecule>, FormulaError> {
        let mut molecules = Vec::new();
        let mut pending = Vec::new();
        let mut total = 0;

        loop {
            let next = self.tokens.peek()?;
            let added = match next.token {
                Token::Element(_) => {
                    let run = self.parse_element_run()?;
                    let n = run.len();
                    pending.extend(run);
                    n
                }
                Token::OpenParen | Token::OpenBracket => {
                    flush(&mut pending, &mut molecules);
                    let group = self.parse_group()?;
                    let n: usize = group.iter().map(Molecule::len).sum();
                    molecules.extend(group);
                    n
                }
                _ => break,
            };
            total += added;
            if total > MAX_ELEMENTS {
                return Err(FormulaError::TooManyElements { pos: next.pos });
            }
        }

        flush(&mut pending, &mut molecules);
        Ok(molecules)
    }

    fn parse_group(&mut self) -> Result<Vec<Molecule>, FormulaError> {
        let open = self.tokens.next_token()?;
        let close = match open.token {
            Token::OpenParen => TokenKind::CloseParen,
            Token::OpenBracket => TokenKind::CloseBracket,
            _ => return Err(unexpected(TokenKind::OpenParen, &open)),
        };
        if self.depth >= MAX_NESTING {
            return Err(FormulaError::NestingTooDeep { pos: open.pos });
        }

        self.depth += 1;
        let inner = self.parse_units()?;
        self.depth -= 1;

        let closing = self.tokens.next_token()?;
        if closing.token.kind() != close {
            return Err(unexpected(close, &closing));
        }

        let mut molecules = match self.parse_count()? {
            Some((count, pos)) => {
                let size: usize = inner.iter().map(Molecule::len).sum();
                expanded_size(size, count, pos)?;
                repeat(&inner, count)
            }
            None => inner,
        };

        if let Some(charge) = self.parse_charge()? {
            for molecule in &mut molecules {
                molecule.charge = charge;
            }
        }

        Ok(molecules)
    }

    fn parse_element_run(&mut self) -> Result<Vec<Element>, FormulaError> {
        let SpannedToken { token, pos } = self.tokens.next_token()?;
        let symbol = match token {
            Token::Element(symbol) => symbol,
            other => {
                return Err(FormulaError::UnexpectedToken {
                    expected: TokenKind::Element,
                    found: other.kind(),
                    pos,
                })
            }
        };

        let element = self
            .table
            .lookup(&symbol)
            .unwrap_or_else(|| Element::placeholder(symbol));

        let count = match self.parse_count()? {
            Some((count, pos)) => expanded_size(1, count, pos)?,
            None => 1,
        };
        let mut elements = vec![element; count];

        if let Some(charge) = self.parse_charge()? {
            for element in &mut elements {
                element.charge = charge;
            }
        }

        Ok(elements)
    }

    /// A count and the position it was written at.
    fn parse_count(&mut self) -> Result<Option<(u32, usize)>, FormulaError> {
        let next = self.tokens.peek()?;
        match next.token {
            Token::Integer(n) => {
                self.tokens.next_token()?;
                Ok(Some((n, next.pos)))
            }
            _ => Ok(None),
        }
    }

    fn parse_charge(&mut self) -> Result<Option<i32>, FormulaError> {
        let sign = match self.tokens.peek()?.token {
            Token::Plus => 1,
            Token::Minus => -1,
            _ => return Ok(None),
        };
        self.tokens.next_token()?;

        let next = self.tokens.peek()?;
        let magnitude = match next.token {
            Token::Integer(n) => {
                self.tokens.next_token()?;
                i32::try_from(n).map_err(|_| FormulaError::MalformedInteger { pos: next.pos })?
            }
            _ => 1,
        };

        Ok(Some(sign * magnitude))
    }
}

fn flush(pending: &mut Vec<Element>, molecules: &mut Vec<Molecule>) {
    if !pending.is_empty() {
        molecules.push(Molecule::new(std::mem::take(pending)));
    }
}

/// Element occurrences in `count` copies of a unit of `size`, refused
/// before anything is allocated when it would exceed [`MAX_ELEMENTS`].
fn expanded_size(size: usize, count: u32, pos: usize) -> Result<usize, FormulaError> {
    usize::try_from(count)
        .ok()
        .and_then(|count| size.checked_mul(count))
        .filter(|&n| n <= MAX_ELEMENTS)
        .ok_or(FormulaError::TooManyElements { pos })
}

fn repeat(molecules: &[Molecule], count: u32) -> Vec<Molecule> {
    if molecules.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(molecules.len() * count as usize);
    for _ in 0..count {
        out.extend_from_slice(molecules);
    }
    out
}

fn unexpected(expected: TokenKind, found: &SpannedToken) -> FormulaError {
    FormulaError::UnexpectedToken {
        expected,
        found: found.token.kind(),
        pos: found.pos,
    }
}
