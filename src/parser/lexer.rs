//! Tokenizer for the surface syntax

use crate::error::{Result, VerilyError};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, one_of},
    combinator::{opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

/// Characters that always lex as single-character tokens.
const DELIMITERS: &str = ":;(){}.,[]'";

fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(alt((tag("#"), tag("//"))), opt(is_not("\n"))))(input)
}

fn skip(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), take_while1(|c: char| c.is_whitespace())),
            comment,
        ))),
    )(input)
}

/// A double-quoted string is one token, quotes included.
fn string_token(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('"'), opt(is_not("\"")), char('"')))(input)
}

fn delimiter_token(input: &str) -> IResult<&str, &str> {
    recognize(one_of(DELIMITERS))(input)
}

fn word_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !DELIMITERS.contains(c) && c != '"' && c != '#')(
        input,
    )
}

fn lexeme(input: &str) -> IResult<&str, &str> {
    alt((string_token, delimiter_token, word_token))(input)
}

/// Reserved spellings are canonicalized before parsing.
fn normalize(token: &str) -> &str {
    match token {
        "!" => "not",
        "&&" => "and",
        "||" => "or",
        "symbol" => "bind",
        other => other,
    }
}

/// Lex a source text into tokens.
pub fn lex(text: &str) -> Result<Vec<String>> {
    let mut rest = text;
    let mut tokens = Vec::new();

    loop {
        let (after_skip, ()) = skip(rest)
            .map_err(|_| VerilyError::Parse("tokenizer failed to skip whitespace".into()))?;
        rest = after_skip;
        if rest.is_empty() {
            return Ok(tokens);
        }
        match lexeme(rest) {
            Ok((remaining, token)) => {
                tokens.push(normalize(token).to_string());
                rest = remaining;
            }
            Err(_) => {
                return Err(VerilyError::Parse(format!(
                    "unexpected input at {:?}",
                    rest.chars().take(20).collect::<String>()
                )))
            }
        }
    }
}

/// A sequence of tokens used in parsing.
pub struct TokenStream {
    data: Vec<String>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<String>) -> Self {
        TokenStream {
            data: tokens,
            pos: 0,
        }
    }

    /// True iff we have advanced past the end of the stream.
    pub fn done(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// The current token, or `"EOF"` past the end.
    pub fn cur(&self) -> &str {
        self.data.get(self.pos).map_or("EOF", |t| t.as_str())
    }

    pub fn next(&mut self) {
        self.pos += 1;
    }

    /// The current token, advancing past it.
    pub fn cur_next(&mut self) -> String {
        let out = self.cur().to_string();
        self.next();
        out
    }

    /// Require the current token to be one of `what` and advance.
    pub fn expect(&mut self, what: &[&str]) -> Result<()> {
        let cur = self.cur();
        if !what.contains(&cur) {
            let wanted = what
                .iter()
                .map(|w| format!("\"{}\"", w))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(VerilyError::Parse(format!(
                "Expected {{{}}}, but saw {}",
                wanted, cur
            )));
        }
        self.next();
        Ok(())
    }
}
