//! LaTeX rendering of rules, axioms, and proofs in 'inferrule' notation

use crate::ast::Term;
use crate::driver::Session;
use crate::error::Result;
use crate::proof::proof_to_ast;
use std::io::{self, Write};

/// Escape underscores for LaTeX.
fn sanitize_name(s: &str) -> String {
    s.replace('_', "\\_")
}

fn write_infix<W: Write>(w: &mut W, lhs: &Term, op: &str, rhs: &Term) -> io::Result<()> {
    write!(w, "(")?;
    write_term(w, lhs)?;
    write!(w, " {} ", op)?;
    write_term(w, rhs)?;
    write!(w, ")")
}

/// Print a term in LaTeX notation (EG 'and' -> '\land').
fn write_term<W: Write>(w: &mut W, term: &Term) -> io::Result<()> {
    match (term.head.as_str(), term.children.as_slice()) {
        // Normal PL stuff
        ("and", [a, b]) => write_infix(w, a, "\\land", b),
        ("or", [a, b]) => write_infix(w, a, "\\lor", b),
        ("implies", [a, b]) => write_infix(w, a, "\\implies", b),
        ("iff", [a, b]) => write_infix(w, a, "\\iff", b),
        ("in", [a, b]) => write_infix(w, a, "\\in", b),
        ("==", [a, b]) => write_infix(w, a, "=", b),
        ("not", [a]) => {
            write!(w, " \\lnot ")?;
            write_term(w, a)
        }
        ("prime", [a]) => {
            write_term(w, a)?;
            write!(w, "' ")
        }

        // Quantification
        ("forall", [var, body]) => {
            write!(w, "( \\forall ")?;
            write_term(w, var)?;
            write!(w, " . ")?;
            write_term(w, body)?;
            write!(w, " )")
        }
        ("exists", [var, body]) => {
            write!(w, "( \\exists ")?;
            write_term(w, var)?;
            write!(w, " . ")?;
            write_term(w, body)?;
            write!(w, " )")
        }
        ("REPLACE", [a, x, b]) => {
            write_term(w, a)?;
            write!(w, " [ ")?;
            write_term(w, x)?;
            write!(w, " := ")?;
            write_term(w, b)?;
            write!(w, " ]")
        }

        // Proof trees
        ("axiom", [thm]) => {
            write!(w, "\\inferrule*[right=axiom]{{\\,}}{{\n")?;
            write_term(w, thm)?;
            write!(w, "\n}}")
        }
        ("theorem", [thm, app]) => match proof_parts(app) {
            Some((rule_name, premises)) => {
                write!(w, "\\inferrule*[right={}]{{", sanitize_name(rule_name))?;
                if premises.is_empty() {
                    write!(w, "\\,")?;
                }
                for (i, premise) in premises.iter().enumerate() {
                    if i > 0 {
                        write!(w, "\n")?;
                    }
                    write_term(w, premise)?;
                }
                write!(w, "}}{{\n")?;
                write_term(w, thm)?;
                write!(w, "\n}}")
            }
            None => write_plain(w, term),
        },

        // A '_'-headed node prints as a bare tuple.
        ("_", children) => {
            write!(w, "(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(w, ", ")?;
                }
                write_term(w, child)?;
            }
            write!(w, ")")
        }

        // Default case: the s-expr itself, typeset.
        _ => write_plain(w, term),
    }
}

fn write_plain<W: Write>(w: &mut W, term: &Term) -> io::Result<()> {
    write!(w, "\\texttt{{{}}}", sanitize_name(&term.head))?;
    if term.children.is_empty() {
        return Ok(());
    }
    write!(w, "(")?;
    for (i, child) in term.children.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write_term(w, child)?;
    }
    write!(w, ")")
}

/// Split a `rule_application` node into its rule name and premise proofs.
fn proof_parts(app: &Term) -> Option<(&str, &[Term])> {
    if app.head != "rule_application" {
        return None;
    }
    let [rule, premises] = app.children.as_slice() else {
        return None;
    };
    let [name] = rule.children.as_slice() else {
        return None;
    };
    Some((name.head.as_str(), &premises.children))
}

/// Print the session's rules, axioms, and proven theorems as a LaTeX
/// document in 'inferrule' notation.
pub fn write_latex<W: Write>(w: &mut W, session: &Session) -> Result<()> {
    write!(
        w,
        "\\documentclass{{article}}\n\
         \\usepackage{{amsmath}}\n\
         \\usepackage{{amssymb}}\n\
         \\usepackage{{mathpartir}}\n\
         \\begin{{document}}\n\n"
    )?;

    write!(w, "\\textbf{{Rules:}}\n\n")?;
    for (rule_index, rule) in session.engine().rules().iter().enumerate() {
        if !rule.free_variables.is_empty() {
            write!(w, "For generic")?;
            for (i, fv) in rule.free_variables.iter().enumerate() {
                if i > 0 {
                    write!(w, ",")?;
                }
                write!(w, " \\texttt{{{}}}", fv)?;
            }
            write!(w, ":\n\n")?;
        }

        let rule_name = match &rule.name {
            Some(name) => name.clone(),
            None => rule_index.to_string(),
        };
        write!(
            w,
            "\\[\n\\inferrule*[right={}]{{",
            sanitize_name(&rule_name)
        )?;

        if rule.premises.is_empty() {
            write!(w, "\\,")?;
        }
        for (i, premise) in rule.premises.iter().enumerate() {
            if i > 0 {
                write!(w, "\n")?;
            }
            write_term(w, premise)?;
        }

        write!(w, "}}{{\n")?;
        write_term(w, &rule.consequence)?;
        write!(w, "  }}\n\\]\n\n")?;
    }

    write!(w, "\\textbf{{Axioms:}}\n\n")?;
    for &axiom in &session.axioms {
        write!(w, "\\[\n")?;
        write_term(w, &proof_to_ast(session.engine(), axiom)?)?;
        write!(w, "\n\\]\n\n")?;
    }

    write!(w, "\\textbf{{Selected Theorems:}}\n\n")?;
    for &theorem in &session.proven_theorems {
        write!(w, "\\[\n")?;
        write_term(w, &proof_to_ast(session.engine(), theorem)?)?;
        write!(w, "\n\\]\n\n")?;
    }

    write!(w, "\\end{{document}}\n")?;
    Ok(())
}
