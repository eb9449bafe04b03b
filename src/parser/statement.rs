//! Statement parsing: top-level declarations into a closed variant set

use super::expr::parse_expr;
use super::lexer::TokenStream;
use crate::ast::Term;
use crate::error::{Result, VerilyError};

/// A parsed top-level statement.
///
/// Statement kinds the engine cannot execute (function and method
/// definitions) are carried as [`Statement::Other`]; the driver warns and
/// skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Rule {
        name: Option<String>,
        free_variables: Vec<Term>,
        premises: Vec<Term>,
        consequence: Term,
    },
    Axiom(Term),
    ProveForward(Term),
    /// Covers both `theorem` and `prove_backward`.
    ProveBackward(Term),
    ProveSmt(Term),
    Include(String),
    Other(Term),
}

/// Parse every statement in the stream.
pub fn parse_statements(ts: &mut TokenStream) -> Result<Vec<Statement>> {
    let mut out = Vec::new();
    while !ts.done() {
        if let Some(stmt) = parse_statement(ts)? {
            out.push(stmt);
        }
    }
    Ok(out)
}

/// Parse one statement; a lone `;` yields `None`.
fn parse_statement(ts: &mut TokenStream) -> Result<Option<Statement>> {
    let t = ts.cur_next();
    match t.as_str() {
        ";" => Ok(None),
        "function" => Ok(Some(Statement::Other(parse_function(ts)?))),
        "method" => Ok(Some(Statement::Other(parse_method(ts)?))),
        "include" => {
            let written = ts.cur_next();
            let path = written
                .strip_prefix('"')
                .and_then(|w| w.strip_suffix('"'))
                .ok_or_else(|| {
                    VerilyError::Parse(format!("include expects a quoted path, saw {}", written))
                })?;
            Ok(Some(Statement::Include(path.to_string())))
        }
        "prove_forward" | "prove_backward" | "prove_smt" | "theorem" | "axiom" => {
            // An optional name may precede the colon; it is not retained.
            if ts.cur() != ":" {
                ts.next();
            }
            ts.expect(&[":"])?;
            let expr = parse_expr(ts)?;
            Ok(Some(match t.as_str() {
                "prove_forward" => Statement::ProveForward(expr),
                "prove_smt" => Statement::ProveSmt(expr),
                "axiom" => Statement::Axiom(expr),
                _ => Statement::ProveBackward(expr),
            }))
        }
        "rule" => {
            let mut name = None;
            if ts.cur() != ":" {
                name = Some(ts.cur_next());
            }
            ts.expect(&[":"])?;

            let mut free_variables = Vec::new();
            if ts.cur() == "over" {
                ts.next();
                while !ts.done() && ts.cur() != "given" && ts.cur() != "deduce" {
                    free_variables.push(parse_expr(ts)?);
                    while ts.cur() == "," {
                        ts.next();
                    }
                }
            }

            let mut premises = Vec::new();
            if ts.cur() == "given" {
                ts.next();
                while !ts.done() && ts.cur() != "deduce" {
                    premises.push(parse_expr(ts)?);
                    while ts.cur() == "," {
                        ts.next();
                    }
                }
            }

            ts.expect(&["deduce"])?;
            let consequence = parse_expr(ts)?;

            Ok(Some(Statement::Rule {
                name,
                free_variables,
                premises,
                consequence,
            }))
        }
        other => Err(VerilyError::Parse(format!(
            "Unexpected statement start token '{}'",
            other
        ))),
    }
}

fn parse_function(ts: &mut TokenStream) -> Result<Term> {
    let name = ts.cur_next();
    let args = parse_args(ts)?;
    let reqs_and_ens = parse_req_ens(ts)?;

    ts.expect(&["{"])?;
    let body = parse_expr(ts)?;
    ts.expect(&["}"])?;

    Ok(Term::new(
        "FUNCTION",
        vec![Term::leaf(name), args, reqs_and_ens, body],
    ))
}

fn parse_method(ts: &mut TokenStream) -> Result<Term> {
    let name = ts.cur_next();
    let args = parse_args(ts)?;

    ts.expect(&["returns"])?;
    let returns = ts.cur_next();

    let reqs_and_ens = parse_req_ens(ts)?;
    let body = parse_method_statement(ts)?
        .ok_or_else(|| VerilyError::Parse("method body must be a statement".into()))?;

    Ok(Term::new(
        "METHOD",
        vec![Term::leaf(name), args, Term::leaf(returns), reqs_and_ens, body],
    ))
}

fn parse_args(ts: &mut TokenStream) -> Result<Term> {
    ts.expect(&["("])?;
    let mut args = Term::new("ARGS", vec![]);
    while !ts.done() && ts.cur() != ")" {
        let argname = ts.cur_next();
        ts.expect(&["in", ":"])?;
        let domain = ts.cur_next();

        args.children.push(Term::new(
            "ARG",
            vec![Term::leaf(argname), Term::leaf(domain)],
        ));

        if ts.cur() == "," {
            ts.next();
        }
    }
    ts.expect(&[")"])?;
    Ok(args)
}

fn parse_req_ens(ts: &mut TokenStream) -> Result<Term> {
    let mut out = Term::new("REQS_AND_ENS", vec![]);
    while ts.cur() == "requires" || ts.cur() == "ensures" {
        let t = ts.cur_next();
        out.children.push(Term::new(t, vec![parse_expr(ts)?]));
    }
    Ok(out)
}

/// One statement inside a method body; a lone `;` yields `None`.
fn parse_method_statement(ts: &mut TokenStream) -> Result<Option<Term>> {
    let cur = ts.cur_next();
    match cur.as_str() {
        "{" => {
            let mut body = Term::new("SCOPE", vec![]);
            while !ts.done() && ts.cur() != "}" {
                if let Some(stmt) = parse_method_statement(ts)? {
                    body.children.push(stmt);
                }
            }
            ts.expect(&["}"])?;
            Ok(Some(body))
        }
        "annotation" | "theorem" => Ok(Some(Term::new("THEOREM", vec![parse_expr(ts)?]))),
        "let" => {
            let name = ts.cur_next();
            ts.expect(&["="])?;
            Ok(Some(Term::new(
                "LET",
                vec![Term::leaf(name), parse_expr(ts)?],
            )))
        }
        "if" => {
            let cond = parse_expr(ts)?;
            let then = parse_method_statement(ts)?
                .ok_or_else(|| VerilyError::Parse("'if' needs a statement".into()))?;
            let mut out = Term::new("IF", vec![cond, then]);
            if ts.cur() == "else" {
                ts.next();
                if let Some(alt) = parse_method_statement(ts)? {
                    out.children.push(alt);
                }
            }
            Ok(Some(out))
        }
        "while" => {
            let cond = parse_expr(ts)?;
            let body = parse_method_statement(ts)?
                .ok_or_else(|| VerilyError::Parse("'while' needs a statement".into()))?;
            Ok(Some(Term::new("WHILE", vec![cond, body])))
        }
        ";" => Ok(None),
        target => {
            ts.expect(&["="])?;
            Ok(Some(Term::new(
                "SET",
                vec![Term::leaf(target), parse_expr(ts)?],
            )))
        }
    }
}
