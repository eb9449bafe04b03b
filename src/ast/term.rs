//! Terms: named tree nodes with ordered children

use serde::{Deserialize, Serialize};
use std::fmt;

/// The distinguished binder-substitution head. A `(REPLACE a x b)` node
/// denotes "substitute `x` by `b` in `a`, then reduce".
pub const REPLACE: &str = "REPLACE";

/// A term: a head symbol plus an ordered list of sub-terms.
///
/// The engine never inspects the meaning of a head symbol except for
/// [`REPLACE`]. Equality is structural; the derived order compares heads
/// first and is used only to keep set iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    pub head: String,
    pub children: Vec<Term>,
}

impl Term {
    /// Build an interior node.
    pub fn new(head: impl Into<String>, children: Vec<Term>) -> Self {
        Term {
            head: head.into(),
            children,
        }
    }

    /// Build a leaf.
    pub fn leaf(head: impl Into<String>) -> Self {
        Term {
            head: head.into(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True iff this term equals `what` or any child transitively does.
    ///
    /// A leaf `what` whose head equals this node's head also counts as
    /// contained, so a function symbol "mentions" its own name even when it
    /// appears applied to arguments.
    pub fn contains(&self, what: &Term) -> bool {
        if self == what {
            return true;
        }
        if what.children.is_empty() && what.head == self.head {
            return true;
        }
        self.children.iter().any(|child| child.contains(what))
    }

    /// True iff `symbol` occurs as the head of this term or any sub-term.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.head == symbol || self.children.iter().any(|c| c.contains_symbol(symbol))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            write!(f, "{}", self.head)
        } else {
            write!(f, "({}", self.head)?;
            for child in &self.children {
                write!(f, " {}", child)?;
            }
            write!(f, ")")
        }
    }
}
