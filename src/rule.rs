//! Inference rules: schematic premises, a consequence, and a direction

use crate::ast::{Substitution, Term, REPLACE};
use crate::error::{Result, VerilyError};
use crate::matching::is_of_form;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a rule's free variables occur, and hence which searches may use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Every free variable occurs in some premise: given premises, deduce.
    ForwardOnly,
    /// Every free variable occurs in the consequence: given a goal, attempt
    /// the premises.
    BackwardOnly,
    /// Both hold.
    Bidirectional,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        !matches!(self, Direction::BackwardOnly)
    }

    pub fn is_backward(self) -> bool {
        !matches!(self, Direction::ForwardOnly)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ForwardOnly => write!(f, "forward"),
            Direction::BackwardOnly => write!(f, "backward"),
            Direction::Bidirectional => write!(f, "bidirectional"),
        }
    }
}

/// If all the premises are met, the consequence is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRule {
    /// If given, the name of the rule; anonymous rules are identified by
    /// their insertion index.
    pub name: Option<String>,
    /// The terms bound by matching.
    pub free_variables: BTreeSet<Term>,
    /// The schemas that must each be matched by a known theorem.
    pub premises: Vec<Term>,
    /// The schema produced when all premises match consistently.
    pub consequence: Term,
    /// Computed once at construction.
    pub direction: Direction,
}

impl InferenceRule {
    /// Construct and classify a rule.
    ///
    /// A consequence containing `REPLACE` disqualifies backward use: the
    /// reduction after substitution makes its syntactic shape unreliable for
    /// goal matching. A rule that is neither forward- nor backward-derivable
    /// would leave variables unbound whichever direction was used and is
    /// rejected.
    pub fn new(
        name: Option<String>,
        free_variables: BTreeSet<Term>,
        premises: Vec<Term>,
        consequence: Term,
    ) -> Result<Self> {
        let mut in_consequence = true;
        let mut in_premises = true;
        for fv in &free_variables {
            if !consequence.contains(fv) {
                in_consequence = false;
            }
            if !premises.iter().any(|p| p.contains(fv)) {
                in_premises = false;
            }
        }

        if consequence.contains_symbol(REPLACE) {
            in_consequence = false;
        }

        let direction = match (in_consequence, in_premises) {
            (true, true) => Direction::Bidirectional,
            (true, false) => Direction::BackwardOnly,
            (false, true) => Direction::ForwardOnly,
            (false, false) => {
                let rule = InferenceRule {
                    name,
                    free_variables,
                    premises,
                    consequence,
                    direction: Direction::BackwardOnly,
                };
                return Err(VerilyError::IllFormedRule(rule.to_string()));
            }
        };

        let rule = InferenceRule {
            name,
            free_variables,
            premises,
            consequence,
            direction,
        };

        if direction == Direction::ForwardOnly {
            eprintln!("WARNING: Rule is not backward-derivable! {}", rule);
        }

        Ok(rule)
    }

    /// Specialize by consuming the first premise.
    ///
    /// If `candidate` matches the first premise, returns a new rule with the
    /// remaining premises and the consequence rewritten under the discovered
    /// substitution, and the free variables restricted to those still
    /// unbound. Returns `None` when there is no premise to consume, the
    /// match fails, or the residual rule is unclassifiable.
    pub fn remove_first_req(&self, candidate: &Term) -> Option<InferenceRule> {
        let first = self.premises.first()?;
        let mut remaining_vars = self.free_variables.clone();
        let mut subs = Substitution::new();

        if !is_of_form(candidate, first, &mut remaining_vars, &mut subs) {
            return None;
        }

        let premises = self.premises[1..]
            .iter()
            .map(|p| p.replace(&subs))
            .collect();
        InferenceRule::new(
            self.name.clone(),
            remaining_vars,
            premises,
            self.consequence.replace(&subs),
        )
        .ok()
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]<", self.direction)?;
        for (i, fv) in self.free_variables.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", fv)?;
        }
        write!(f, ">(")?;
        for (i, premise) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", premise)?;
        }
        write!(f, ") -> {}", self.consequence)
    }
}
