use std::rc::Rc;

use thiserror::Error;

use crate::ast::*;
use crate::lexer::{Lexer, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("error[{line}:{col}]: {msg}")]
    Error {
        msg: String,
        line: usize,
        col: usize,
    },
}

/// Pratt-style recursive-descent parser. Pulls tokens from the lexer on
/// demand with one token of lookahead. It never panics: failures are pushed
/// onto `errors` and parsing resynchronizes at the next statement boundary.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

/// Binding strength ladder, weakest first. An infix token only takes over
/// while its precedence is strictly greater than the surrounding minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < > ?
    Sum,         // + - ++ --
    Product,     // * / ** %
    Prefix,      // -x !x ++x --x
    Call,        // fn(...)
    Index,       // arr[...]
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::Neq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::Question => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus | TokenKind::Increment | TokenKind::Decrement => {
            Precedence::Sum
        }
        TokenKind::Star | TokenKind::Slash | TokenKind::Power | TokenKind::Percent => {
            Precedence::Product
        }
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

mod blocks;
mod core;
mod expr;
