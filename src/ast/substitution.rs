//! Substitutions and the `REPLACE` normal-form reduction

use super::term::{Term, REPLACE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of `(pattern, replacement)` pairs.
///
/// Application is a single pass: at each node the FIRST pair whose pattern
/// equals the node wins, and the replacement is returned without recursing
/// into it. An earlier binding for a pattern therefore shadows later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pairs: Vec<(Term, Term)>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution { pairs: Vec::new() }
    }

    /// Append a binding. Does not displace an existing binding for the same
    /// pattern; the earlier one keeps winning on lookup.
    pub fn bind(&mut self, pattern: Term, replacement: Term) {
        self.pairs.push((pattern, replacement));
    }

    /// First-match-wins lookup in list order.
    pub fn lookup(&self, pattern: &Term) -> Option<&Term> {
        self.pairs
            .iter()
            .find(|(p, _)| p == pattern)
            .map(|(_, q)| q)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Term, Term)> {
        self.pairs.iter()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (p, q)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", p, q)?;
        }
        write!(f, "}}")
    }
}

impl Term {
    /// Apply a substitution in a single pass, first match wins per node.
    pub fn replace(&self, subs: &Substitution) -> Term {
        if let Some(replacement) = subs.lookup(self) {
            return replacement.clone();
        }
        Term {
            head: self.head.clone(),
            children: self.children.iter().map(|c| c.replace(subs)).collect(),
        }
    }

    /// Single-pair variant of [`replace`](Term::replace).
    pub fn replace_one(&self, pattern: &Term, replacement: &Term) -> Term {
        if self == pattern {
            return replacement.clone();
        }
        Term {
            head: self.head.clone(),
            children: self
                .children
                .iter()
                .map(|c| c.replace_one(pattern, replacement))
                .collect(),
        }
    }

    /// Exhaustively reduce every `REPLACE` node already present in the tree.
    ///
    /// `(REPLACE a x b)` becomes `a` with `x` substituted by `b`, itself
    /// reduced again. A self-referential replacement never reaches a normal
    /// form; no guard is attempted here and such a term will exhaust the
    /// stack.
    pub fn beta_star(&self) -> Term {
        if self.head == REPLACE {
            if let [a, x, b] = self.children.as_slice() {
                return a.replace_one(x, b).beta_star();
            }
        }
        Term {
            head: self.head.clone(),
            children: self.children.iter().map(|c| c.beta_star()).collect(),
        }
    }
}
