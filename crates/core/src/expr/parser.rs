//! Recursive descent parser and evaluator.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Evaluation is exact decimal arithmetic; callers round the final result once.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::error::{ExprError, ExprResult};
use super::lexer::{tokenize, Token};

/// Position of a literal in the expression.
///
/// Literals to the right of `*` or `/` are scale factors, not amounts, which
/// changes how an ambiguous separator is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    /// A quantity of money.
    Amount,
    /// A multiplier or divisor.
    Scalar,
}

/// Converts a raw numeric literal into its value.
pub trait NumberReader {
    /// Reads `raw` given where it sits in the expression.
    ///
    /// # Errors
    ///
    /// Returns `ExprError::InvalidNumber` when the literal is malformed.
    fn read(&self, raw: &str, role: OperandRole) -> ExprResult<Decimal>;
}

/// Reads literals with `.` as the only decimal separator and no grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNumbers;

impl NumberReader for PlainNumbers {
    fn read(&self, raw: &str, _role: OperandRole) -> ExprResult<Decimal> {
        Decimal::from_str(raw).map_err(|_| ExprError::InvalidNumber(raw.to_string()))
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal value.
    Number(Decimal),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluates the tree.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when a divisor is exactly zero and
    /// `Overflow` when an intermediate result is out of range.
    pub fn eval(&self) -> ExprResult<Decimal> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Neg(inner) => Ok(-inner.eval()?),
            Self::Binary { op, lhs, rhs } => {
                let left = lhs.eval()?;
                let right = rhs.eval()?;
                let result = match op {
                    BinaryOp::Add => left.checked_add(right),
                    BinaryOp::Sub => left.checked_sub(right),
                    BinaryOp::Mul => left.checked_mul(right),
                    BinaryOp::Div => {
                        if right.is_zero() {
                            return Err(ExprError::DivisionByZero);
                        }
                        left.checked_div(right)
                    }
                };
                result.ok_or(ExprError::Overflow)
            }
        }
    }
}

/// Deepest expression tree, or parenthesis/sign nesting, the parser accepts.
pub const MAX_DEPTH: usize = 256;

fn bounded(depth: usize) -> ExprResult<usize> {
    if depth > MAX_DEPTH {
        return Err(ExprError::TooDeep(MAX_DEPTH));
    }
    Ok(depth)
}

/// Parser over a token stream.
///
/// Recursion and tree height are both capped at [`MAX_DEPTH`], so `eval` and
/// drop of the resulting tree stay shallow too.
pub struct Parser<'a, R: NumberReader + ?Sized> {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
    reader: &'a R,
}

impl<'a, R: NumberReader + ?Sized> Parser<'a, R> {
    /// Creates a parser over already tokenized input.
    pub fn new(tokens: Vec<Token>, reader: &'a R) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
            reader,
        }
    }

    /// Parses the whole token stream as one expression.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, unbalanced parentheses, misplaced
    /// tokens, malformed literals or nesting deeper than [`MAX_DEPTH`].
    pub fn parse(mut self) -> ExprResult<Expr> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let (expr, _) = self.parse_expr(OperandRole::Amount)?;
        match self.peek() {
            None => Ok(expr),
            Some(Token::RightParen) => Err(ExprError::UnbalancedParens),
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> ExprResult<()> {
        self.nesting = bounded(self.nesting + 1)?;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn parse_expr(&mut self, role: OperandRole) -> ExprResult<(Expr, usize)> {
        let (mut lhs, mut depth) = self.parse_term(role)?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok((lhs, depth)),
            };
            self.advance();
            let (rhs, rhs_depth) = self.parse_term(role)?;
            depth = bounded(depth.max(rhs_depth) + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_term(&mut self, role: OperandRole) -> ExprResult<(Expr, usize)> {
        let (mut lhs, mut depth) = self.parse_unary(role)?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok((lhs, depth)),
            };
            self.advance();
            let (rhs, rhs_depth) = self.parse_unary(OperandRole::Scalar)?;
            depth = bounded(depth.max(rhs_depth) + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary(&mut self, role: OperandRole) -> ExprResult<(Expr, usize)> {
        let negate = match self.peek() {
            Some(Token::Minus) => true,
            Some(Token::Plus) => false,
            _ => return self.parse_primary(role),
        };
        self.advance();
        self.enter()?;
        let (inner, depth) = self.parse_unary(role)?;
        self.leave();
        if negate {
            Ok((Expr::Neg(Box::new(inner)), bounded(depth + 1)?))
        } else {
            Ok((inner, depth))
        }
    }

    fn parse_primary(&mut self, role: OperandRole) -> ExprResult<(Expr, usize)> {
        match self.advance() {
            Some(Token::Number(raw)) => {
                let value = self.reader.read(&raw, role)?;
                trace!(raw = %raw, ?role, %value, "Read literal");
                Ok((Expr::Number(value), 0))
            }
            Some(Token::LeftParen) => {
                self.enter()?;
                let inner = self.parse_expr(role)?;
                self.leave();
                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    None => Err(ExprError::UnbalancedParens),
                    Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
                }
            }
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

/// Tokenizes and parses `input` with a custom literal reader.
///
/// # Errors
///
/// See [`tokenize`] and [`Parser::parse`].
pub fn parse_with<R: NumberReader + ?Sized>(input: &str, reader: &R) -> ExprResult<Expr> {
    Parser::new(tokenize(input)?, reader).parse()
}

/// Evaluates a plain arithmetic expression such as `21 * 4 / (1 + 1)`.
///
/// # Errors
///
/// Returns any tokenizing, parsing or evaluation error.
pub fn evaluate(input: &str) -> ExprResult<Decimal> {
    parse_with(input, &PlainNumbers)?.eval()
}
