//! Lexing and parsing of the surface syntax
//!
//! A source text lexes into a flat token stream, which parses into a closed
//! set of [`Statement`] variants. The engine itself never sees surface
//! syntax; it consumes the terms these statements carry.

pub mod expr;
pub mod lexer;
pub mod statement;

pub use lexer::{lex, TokenStream};
pub use statement::Statement;

use crate::ast::Term;
use crate::error::{Result, VerilyError};

/// Parse a complete source text into statements.
pub fn parse_text(text: &str) -> Result<Vec<Statement>> {
    let mut ts = TokenStream::new(lex(text)?);
    statement::parse_statements(&mut ts)
}

/// Parse a single expression from text. Useful for tests and embedding.
pub fn parse_expression(text: &str) -> Result<Term> {
    let mut tokens = lex(text)?;
    // parse_expr needs a terminator; supply one.
    tokens.push(";".into());
    let mut ts = TokenStream::new(tokens);
    let term = expr::parse_expr(&mut ts)?;
    ts.expect(&[";"])?;
    if !ts.done() {
        return Err(VerilyError::Parse(format!(
            "trailing tokens after expression, starting at {}",
            ts.cur()
        )));
    }
    Ok(term)
}
