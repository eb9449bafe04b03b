//! The knowledge base: derived theorems with their provenance

use crate::ast::Term;
use crate::error::{Result, VerilyError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a theorem entered the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Derivation {
    /// Asserted true, no premises.
    Axiom,
    /// Produced by applying `rule` to the theorems at `premises`.
    RuleApplication { rule: usize, premises: Vec<usize> },
}

impl Derivation {
    pub fn is_axiom(&self) -> bool {
        matches!(self, Derivation::Axiom)
    }

    /// Premise indices, empty for axioms.
    pub fn premises(&self) -> &[usize] {
        match self {
            Derivation::Axiom => &[],
            Derivation::RuleApplication { premises, .. } => premises,
        }
    }
}

/// A statement along with proof that it is a theorem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theorem {
    /// Index into the knowledge base, stable for the session.
    pub index: usize,
    /// The statement, always in beta_star normal form.
    pub thm: Term,
    /// Provenance; premise indices are strictly less than `index`.
    pub derivation: Derivation,
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.derivation {
            Derivation::Axiom => write!(f, "axiom: {}", self.thm),
            Derivation::RuleApplication { rule, premises } => {
                write!(
                    f,
                    "thm {}: {} due to rule {} on premises (",
                    self.index, self.thm, rule
                )?;
                for (i, premise) in premises.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", premise)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Append-only store of theorems plus an equality lookup on the normalized
/// statement. Entries are never removed or reordered; their indices are the
/// identifiers other theorems' derivations refer to.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<Theorem>,
    by_term: IndexMap<Term, usize>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Theorem] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Result<&Theorem> {
        self.entries
            .get(index)
            .ok_or(VerilyError::InvalidTheoremIndex(index))
    }

    /// Index of `what` if it has already been derived. The query is
    /// normalized first; storage only ever holds normal forms.
    pub fn has(&self, what: &Term) -> Option<usize> {
        self.by_term.get(&what.beta_star()).copied()
    }

    /// Insert an axiom, returning its index. Re-asserting a known statement
    /// returns the existing index.
    pub fn add_axiom(&mut self, what: Term) -> usize {
        let (index, _) = self.insert(what, Derivation::Axiom);
        index
    }

    /// Insert a derived theorem. Returns the index and whether a new entry
    /// was actually created (false when the normalized statement was already
    /// known; no duplicate is inserted).
    pub fn add(&mut self, thm: Term, rule: usize, premises: Vec<usize>) -> (usize, bool) {
        self.insert(thm, Derivation::RuleApplication { rule, premises })
    }

    fn insert(&mut self, thm: Term, derivation: Derivation) -> (usize, bool) {
        let normalized = thm.beta_star();
        if let Some(&existing) = self.by_term.get(&normalized) {
            return (existing, false);
        }

        let index = self.entries.len();
        debug_assert!(derivation.premises().iter().all(|&p| p < index));
        self.by_term.insert(normalized.clone(), index);
        self.entries.push(Theorem {
            index,
            thm: normalized,
            derivation,
        });
        (index, true)
    }
}
