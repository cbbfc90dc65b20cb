//! Formula tokenizer
//!
//! Splits a formula body (the text after `=`) into a flat token list. Each
//! token records the byte offset it started at so parse errors can point at it.

use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::CellAddress;
use std::fmt;

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    String(String),

    // Names
    /// Function name, boolean literal, or an unknown bare name
    Identifier(String),
    /// A1-style label not followed by `(`
    Cell(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Ampersand,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Punctuation
    LeftParen,
    RightParen,
    Comma,
    Colon,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(s) => write!(f, "string \"{}\"", s),
            TokenKind::Identifier(s) => write!(f, "identifier {}", s),
            TokenKind::Cell(s) => write!(f, "cell {}", s),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::Caret => f.write_str("'^'"),
            TokenKind::Ampersand => f.write_str("'&'"),
            TokenKind::Equal => f.write_str("'='"),
            TokenKind::NotEqual => f.write_str("'<>'"),
            TokenKind::LessThan => f.write_str("'<'"),
            TokenKind::LessEqual => f.write_str("'<='"),
            TokenKind::GreaterThan => f.write_str("'>'"),
            TokenKind::GreaterEqual => f.write_str("'>='"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Eof => f.write_str("end of formula"),
        }
    }
}

/// A token and the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Tokenize a formula body. The returned list always ends with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();
        let start = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos: start,
            });
        };

        let kind = match c {
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '^' => self.single(TokenKind::Caret),
            '&' => self.single(TokenKind::Ampersand),
            '=' => self.single(TokenKind::Equal),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '<' => {
                self.advance();
                match self.peek_char() {
                    Some('=') => self.single(TokenKind::LessEqual),
                    Some('>') => self.single(TokenKind::NotEqual),
                    _ => TokenKind::LessThan,
                }
            }
            '>' => {
                self.advance();
                match self.peek_char() {
                    Some('=') => self.single(TokenKind::GreaterEqual),
                    _ => TokenKind::GreaterThan,
                }
            }
            '"' => self.scan_string()?,
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()) => {
                self.scan_number()
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),
            ch => return Err(FormulaError::UnexpectedCharacter { ch, pos: start }),
        };

        Ok(Token { kind, pos: start })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn scan_string(&mut self) -> FormulaResult<TokenKind> {
        let start = self.pos;
        self.advance(); // opening quote

        let mut s = String::new();
        loop {
            match self.peek_char() {
                None => return Err(FormulaError::UnterminatedString(start)),
                Some('"') => {
                    self.advance();
                    // "" is an escaped quote
                    if self.peek_char() == Some('"') {
                        s.push('"');
                        self.advance();
                    } else {
                        return Ok(TokenKind::String(s));
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;

        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent only when digits follow, so `2E` lexes as 2 then E
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_char_at(1), Some('+' | '-')));
            if self
                .peek_char_at(1 + sign)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..=sign {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        // The scanned text is always valid float syntax
        let text = &self.input[start..self.pos];
        TokenKind::Number(text.parse().unwrap_or(f64::NAN))
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];

        // LOG10( is a function, not a cell
        if CellAddress::is_label(text) && self.peek_char() != Some('(') {
            TokenKind::Cell(text.to_string())
        } else {
            TokenKind::Identifier(text.to_string())
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, char::is_whitespace) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            kinds("1 + 2.5*x_1"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Plus,
                TokenKind::Number(2.5),
                TokenKind::Star,
                TokenKind::Identifier("x_1".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_comparisons() {
        assert_eq!(
            kinds("<> <= >= < > ="),
            vec![
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::LessThan,
                TokenKind::GreaterThan,
                TokenKind::Equal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
        assert_eq!(kinds("1e3")[0], TokenKind::Number(1000.0));
        assert_eq!(kinds("2.5E-1")[0], TokenKind::Number(0.25));
        assert_eq!(
            kinds("2E"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Identifier("E".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_string_with_escaped_quote() {
        assert_eq!(
            kinds(r#""say ""hi""""#)[0],
            TokenKind::String(r#"say "hi""#.into())
        );
    }

    #[test]
    fn test_cell_versus_function_name() {
        assert_eq!(
            kinds("A1:b20"),
            vec![
                TokenKind::Cell("A1".into()),
                TokenKind::Colon,
                TokenKind::Cell("b20".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("LOG10(1)")[0], TokenKind::Identifier("LOG10".into()));
        assert_eq!(kinds("ABCD1")[0], TokenKind::Identifier("ABCD1".into()));
        // whitespace before the paren keeps it a cell
        assert_eq!(kinds("A1 (")[0], TokenKind::Cell("A1".into()));
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("  SUM( A1 )").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![2, 5, 7, 10, 11]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokenize("1 & \"abc"),
            Err(FormulaError::UnterminatedString(4))
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("$A$1"),
            Err(FormulaError::UnexpectedCharacter { ch: '$', pos: 0 })
        );
        assert_eq!(
            tokenize("10%"),
            Err(FormulaError::UnexpectedCharacter { ch: '%', pos: 2 })
        );
    }
}
