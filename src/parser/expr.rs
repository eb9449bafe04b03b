//! Expression parsing: item collection followed by precedence reduction
//!
//! Expressions are first gathered into a flat list of items (resolving call
//! syntax, grouping, and the `A[x = B]` replacement notation), then reduced
//! operator by operator, tightest binding first, with quantifiers bound in a
//! final backwards scan.

use super::lexer::TokenStream;
use crate::ast::{Term, REPLACE};
use crate::error::{Result, VerilyError};
use std::collections::VecDeque;

/// Tokens that end the enclosing expression without being consumed.
const EXPRESSION_TERMINATORS: &[&str] = &[
    ",", ";", "requires", "ensures", "given", "deduce", "{", "}", "=", "]",
];

/// Operator keywords that may directly precede a parenthesized group.
const KEYWORDS: &[&str] = &["not", "and", "or", "implies", "iff"];

/// Binary/unary operators, tightest first. `'` is postfix, `not` is prefix,
/// the rest are left-associative infix.
const ORDER_OF_OPERATIONS: &[&str] = &[
    "'", "*", "/", "%", "+", "-", "in", "<", ">", "<=", ">=", "==", "not", "or", "and", "iff",
    "implies",
];

/// Parse one expression, stopping at a terminator or an unmatched `)`.
pub fn parse_expr(ts: &mut TokenStream) -> Result<Term> {
    let mut items: Vec<Term> = Vec::new();

    while !ts.done() && !EXPRESSION_TERMINATORS.contains(&ts.cur()) {
        if ts.cur() == ")" {
            break;
        }

        let cur = ts.cur_next();

        if cur == "(" {
            let is_call =
                matches!(items.last(), Some(last) if !KEYWORDS.contains(&last.head.as_str()));
            if is_call {
                // Call: the preceding item gains the arguments as children.
                let mut call = items
                    .pop()
                    .ok_or_else(|| VerilyError::Parse("Malformed expression".into()))?;
                while !ts.done() && ts.cur() != ")" {
                    call.children.push(parse_expr(ts)?);
                    if ts.cur() == "," {
                        ts.next();
                    }
                }
                ts.expect(&[")"])?;
                items.push(call);
            } else {
                items.push(parse_expr(ts)?);
                ts.expect(&[")"])?;
            }
        } else if cur == "[" {
            // Replacement notation: A[x = B] means "replace x in A with B".
            let a = items.pop().ok_or_else(|| {
                VerilyError::Parse(
                    "Malformed expression: replacement operator '[' must act upon an expression"
                        .into(),
                )
            })?;
            let x = parse_expr(ts)?;
            ts.expect(&["="])?;
            let b = parse_expr(ts)?;
            ts.expect(&["]"])?;
            return Ok(Term::new(REPLACE, vec![a, x, b]));
        } else if cur == ":" {
            // Within an expression, ':' is shorthand for 'in'.
            items.push(Term::leaf("in"));
        } else {
            items.push(Term::leaf(cur));
        }
    }
    if ts.done() {
        return Err(VerilyError::Parse("EOF during expression".into()));
    }

    reduce_items(&items).map_err(|e| {
        let listing = items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        VerilyError::Parse(format!("In [{}]: {}", listing, e))
    })
}

/// Collapse a flat item list into a single tree.
fn reduce_items(input: &[Term]) -> Result<Term> {
    if input.is_empty() {
        return Err(VerilyError::Parse("Expressions must not be empty".into()));
    }

    let mut items: Vec<Term> = input.to_vec();
    for &op in ORDER_OF_OPERATIONS {
        items = match op {
            "not" => reduce_prefix_not(&items)?,
            "'" => reduce_postfix_prime(&items)?,
            _ => reduce_binary(&items, op)?,
        };
    }
    reduce_quantifiers(&items)
}

fn reduce_prefix_not(items: &[Term]) -> Result<Vec<Term>> {
    let mut out: VecDeque<Term> = VecDeque::new();
    for item in items.iter().rev() {
        if item.head == "not" && item.children.is_empty() {
            let operand = out.pop_front().ok_or_else(|| {
                VerilyError::Parse("Malformed expression: 'not' does not act on anything".into())
            })?;
            out.push_front(Term::new("not", vec![operand]));
        } else {
            out.push_front(item.clone());
        }
    }
    Ok(out.into_iter().collect())
}

fn reduce_postfix_prime(items: &[Term]) -> Result<Vec<Term>> {
    let mut out: Vec<Term> = Vec::new();
    for item in items {
        if item.head == "'" {
            let operand = out.pop().ok_or_else(|| {
                VerilyError::Parse("Malformed expression: 'prime' does not act on anything".into())
            })?;
            out.push(Term::new("prime", vec![operand]));
        } else {
            out.push(item.clone());
        }
    }
    Ok(out)
}

fn reduce_binary(items: &[Term], op: &str) -> Result<Vec<Term>> {
    let mut out: Vec<Term> = Vec::new();
    let mut lhs_waiting: Option<Term> = None;
    for item in items {
        if let Some(lhs) = lhs_waiting.take() {
            out.push(Term::new(op, vec![lhs, item.clone()]));
        } else if item.head == op && item.children.is_empty() {
            lhs_waiting = Some(out.pop().ok_or_else(|| {
                VerilyError::Parse(format!("Malformed expression: {} has no LHS", op))
            })?);
        } else {
            out.push(item.clone());
        }
    }
    if lhs_waiting.is_some() {
        return Err(VerilyError::Parse(format!(
            "Malformed expression: {} has no RHS",
            op
        )));
    }
    Ok(out)
}

/// Bind quantifiers in a backwards scan: `Q x . body` becomes `(Q x body)`.
fn reduce_quantifiers(items: &[Term]) -> Result<Term> {
    // 0: copying; 1: the output head is a body, expect the variable;
    // 2: expect the quantifier itself.
    let mut state = 0u8;
    let mut out: VecDeque<Term> = VecDeque::new();

    for item in items.iter().rev() {
        match state {
            1 => {
                out.push_front(item.clone());
                state = 2;
            }
            2 => {
                if !item.children.is_empty() {
                    return Err(VerilyError::Parse("Illegal non-atomic quantifier".into()));
                }
                let (Some(var), Some(body)) = (out.pop_front(), out.pop_front()) else {
                    return Err(VerilyError::Parse("Malformed quantifier".into()));
                };
                out.push_front(Term::new(item.head.clone(), vec![var, body]));
                state = 0;
            }
            _ => {
                if item.head == "." {
                    state = 1;
                } else {
                    out.push_front(item.clone());
                }
            }
        }
    }
    if state != 0 {
        return Err(VerilyError::Parse("Malformed quantifier".into()));
    }

    let n = out.len();
    match out.pop_front() {
        Some(tree) if n == 1 => Ok(tree),
        _ => Err(VerilyError::Parse(format!(
            "Malformed expression: Failed to produce single tree. Instead, {}",
            n
        ))),
    }
}
