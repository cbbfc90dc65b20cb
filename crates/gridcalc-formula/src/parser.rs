//! Formula parser
//!
//! A recursive descent parser over the token list with one function per
//! precedence level.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{tokenize, Token, TokenKind};
use gridcalc_core::{CellAddress, CellRange};

/// Parse a formula body (the text after the leading `=`) into an AST
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("SUM(A1:A10)").unwrap();
/// let ast = parse_formula("IF(A1>0,\"Yes\",\"No\")").unwrap();
/// assert!(parse_formula("(1+").is_err());
/// ```
pub fn parse_formula(body: &str) -> FormulaResult<Expr> {
    let tokens = tokenize(body)?;
    let mut parser = FormulaParser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if parser.current_kind() != &TokenKind::Eof {
        return Err(parser.unexpected("end of formula"));
    }

    Ok(expr)
}

struct FormulaParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl FormulaParser {
    // === Token access ===

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> &TokenKind {
        self.current().map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn current_pos(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.pos)
    }

    fn consume(&mut self) -> TokenKind {
        let kind = self.current_kind().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn expect(&mut self, expected: &TokenKind, what: &'static str) -> FormulaResult<()> {
        if self.current_kind() == expected {
            self.consume();
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, expected: &'static str) -> FormulaError {
        FormulaError::UnexpectedToken {
            found: self.current_kind().to_string(),
            expected,
            pos: self.current_pos(),
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Comparison: =, <>, <, <=, >, >=
    // 2. Concatenation: &
    // 3. Addition/Subtraction: +, -
    // 4. Multiplication/Division: *, /
    // 5. Exponentiation: ^ (left-associative)
    // 6. Unary: prefix +, -
    // 7. Primary: literals, references, function calls, parentheses
    // All binary levels are left-associative.

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.parse_comparison()
    }

    fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn parse_comparison(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_concatenation()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Equal => BinaryOperator::Equal,
                TokenKind::NotEqual => BinaryOperator::NotEqual,
                TokenKind::LessThan => BinaryOperator::LessThan,
                TokenKind::LessEqual => BinaryOperator::LessEqual,
                TokenKind::GreaterThan => BinaryOperator::GreaterThan,
                TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
                _ => break,
            };

            self.consume();
            let right = self.parse_concatenation()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_concatenation(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_additive()?;

        while matches!(self.current_kind(), TokenKind::Ampersand) {
            self.consume();
            let right = self.parse_additive()?;
            left = Self::binary(BinaryOperator::Concat, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_power()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_power()?;
            left = Self::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;

        // 2^3^2 is (2^3)^2
        while matches!(self.current_kind(), TokenKind::Caret) {
            self.consume();
            let right = self.parse_unary()?;
            left = Self::binary(BinaryOperator::Power, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume();
        let operand = self.parse_unary()?;
        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.current_kind().clone() {
            TokenKind::Number(n) => {
                self.consume();
                Ok(Expr::Number(n))
            }

            TokenKind::String(s) => {
                self.consume();
                Ok(Expr::Text(s))
            }

            TokenKind::LeftParen => {
                self.consume();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RightParen, "')'")?;
                Ok(expr)
            }

            TokenKind::Cell(label) => {
                let pos = self.current_pos();
                self.consume();
                self.parse_reference(&label, pos)
            }

            TokenKind::Identifier(name) => {
                self.consume();
                if matches!(self.current_kind(), TokenKind::LeftParen) {
                    return self.parse_function_call(name);
                }
                if name.eq_ignore_ascii_case("TRUE") {
                    Ok(Expr::Boolean(true))
                } else if name.eq_ignore_ascii_case("FALSE") {
                    Ok(Expr::Boolean(false))
                } else {
                    Ok(Expr::Name(name))
                }
            }

            _ => Err(self.unexpected("a value")),
        }
    }

    /// A cell, optionally extended into a range by one or more `:cell` suffixes
    fn parse_reference(&mut self, label: &str, pos: usize) -> FormulaResult<Expr> {
        let start = Self::cell_address(label, pos)?;
        if !matches!(self.current_kind(), TokenKind::Colon) {
            return Ok(Expr::CellRef(start));
        }

        let mut range = CellRange::single(start);
        while matches!(self.current_kind(), TokenKind::Colon) {
            self.consume();
            let TokenKind::Cell(label) = self.current_kind().clone() else {
                return Err(self.unexpected("a cell reference after ':'"));
            };
            let end = Self::cell_address(&label, self.current_pos())?;
            self.consume();
            range = range.union(&CellRange::single(end));
        }

        Ok(Expr::RangeRef(range))
    }

    fn cell_address(label: &str, pos: usize) -> FormulaResult<CellAddress> {
        CellAddress::parse(label)
            .map_err(|e| FormulaError::InvalidReference(format!("{} at offset {}", e, pos)))
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<Expr> {
        self.expect(&TokenKind::LeftParen, "'('")?;

        let mut args = Vec::new();

        if !matches!(self.current_kind(), TokenKind::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_kind(), TokenKind::Comma) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&TokenKind::RightParen, "',' or ')'")?;

        Ok(Expr::Function { name, args })
    }
}
