//! Arithmetic expressions over decimal literals.
//!
//! Supports `+ - * / ( )` with the usual precedence. Literals are read through
//! a [`NumberReader`] so the amount parser can plug in its separator rules.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ExprError, ExprResult};
pub use lexer::{tokenize, Token};
pub use parser::{evaluate, parse_with, BinaryOp, Expr, NumberReader, OperandRole, Parser, PlainNumbers, MAX_DEPTH};
