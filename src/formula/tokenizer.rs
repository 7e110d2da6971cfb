use std::fmt;

use crate::formula::error::FormulaError;

/// A lexical token of a chemical formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Uppercase letter followed by lowercase letters. Not checked against
    /// any element table.
    Element(String),
    Integer(u32),
    Plus,
    Minus,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    End,
}

/// Payload-free classification of a [`Token`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Element,
    Integer,
    Plus,
    Minus,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    End,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Element(_) => TokenKind::Element,
            Token::Integer(_) => TokenKind::Integer,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::OpenParen => TokenKind::OpenParen,
            Token::CloseParen => TokenKind::CloseParen,
            Token::OpenBracket => TokenKind::OpenBracket,
            Token::CloseBracket => TokenKind::CloseBracket,
            Token::End => TokenKind::End,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Element => f.write_str("element symbol"),
            TokenKind::Integer => f.write_str("integer"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::OpenBracket => f.write_str("'['"),
            TokenKind::CloseBracket => f.write_str("']'"),
            TokenKind::End => f.write_str("end of input"),
        }
    }
}

/// A token together with the character position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub pos: usize,
}

/// Lazy scanner over a formula.
///
/// Tokens are produced on demand. [`peek`](Tokenizer::peek) scans without
/// moving the cursor; [`next_token`](Tokenizer::next_token) commits the
/// advance. Once the input is exhausted every call yields [`Token::End`].
#[derive(Debug, Clone)]
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    finished: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            finished: false,
        }
    }

    /// Current scan position, in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Result<SpannedToken, FormulaError> {
        self.scan_token().map(|(token, _)| token)
    }

    pub fn next_token(&mut self) -> Result<SpannedToken, FormulaError> {
        let (token, next) = self.scan_token()?;
        self.pos = next;
        Ok(token)
    }

    fn scan_token(&self) -> Result<(SpannedToken, usize), FormulaError> {
        let chars = &self.chars;
        let mut i = self.pos;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }

        if i >= chars.len() {
            let end = SpannedToken {
                token: Token::End,
                pos: chars.len(),
            };
            return Ok((end, chars.len()));
        }

        let start = i;
        let token = match chars[i] {
            c if c.is_ascii_uppercase() => {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_lowercase() {
                    i += 1;
                }
                Token::Element(chars[start..i].iter().collect())
            }
            c if c.is_ascii_digit() => {
                let mut value: u32 = 0;
                while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(d))
                        .ok_or(FormulaError::MalformedInteger { pos: start })?;
                    i += 1;
                }
                Token::Integer(value)
            }
            '(' => {
                i += 1;
                Token::OpenParen
            }
            ')' => {
                i += 1;
                Token::CloseParen
            }
            '[' => {
                i += 1;
                Token::OpenBracket
            }
            ']' => {
                i += 1;
                Token::CloseBracket
            }
            '+' => {
                i += 1;
                Token::Plus
            }
            '-' => {
                i += 1;
                Token::Minus
            }
            ch => return Err(FormulaError::UnrecognizedCharacter { ch, pos: i }),
        };

        Ok((SpannedToken { token, pos: start }, i))
    }
}

impl Iterator for Tokenizer {
    type Item = Result<SpannedToken, FormulaError>;

    /// Yields every token up to and including [`Token::End`], or up to the
    /// first error, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if !matches!(&result, Ok(t) if t.token != Token::End) {
            self.finished = true;
        }
        Some(result)
    }
}

/// Tokenize a whole formula. The trailing [`Token::End`] is not included.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, FormulaError> {
    let mut tokens = Vec::new();
    for token in Tokenizer::new(input) {
        let token = token?;
        if token.token == Token::End {
            break;
        }
        tokens.push(token);
    }
    Ok(tokens)
}
