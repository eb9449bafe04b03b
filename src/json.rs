//! JSON serialization types for terms, rules, and proof trees

use crate::ast::Term;
use crate::driver::Session;
use crate::engine::Engine;
use crate::error::Result;
use crate::kb::Derivation;
use crate::rule::InferenceRule;
use serde::{Deserialize, Serialize};

/// JSON representation of a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermJson {
    pub head: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TermJson>,
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        TermJson {
            head: term.head.clone(),
            children: term.children.iter().map(|c| c.into()).collect(),
        }
    }
}

/// JSON representation of an inference rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub direction: String,
    pub free_variables: Vec<TermJson>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub premises: Vec<TermJson>,
    pub consequence: TermJson,
}

impl From<&InferenceRule> for RuleJson {
    fn from(rule: &InferenceRule) -> Self {
        RuleJson {
            name: rule.name.clone(),
            direction: rule.direction.to_string(),
            free_variables: rule.free_variables.iter().map(|v| v.into()).collect(),
            premises: rule.premises.iter().map(|p| p.into()).collect(),
            consequence: (&rule.consequence).into(),
        }
    }
}

/// JSON representation of a proof tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProofJson {
    Axiom {
        statement: TermJson,
    },
    Theorem {
        statement: TermJson,
        rule: String,
        premises: Vec<ProofJson>,
    },
}

impl ProofJson {
    /// Reconstruct the proof of a theorem as a JSON tree.
    pub fn from_theorem(engine: &Engine, index: usize) -> Result<Self> {
        let theorem = engine.get_theorem(index)?;
        match &theorem.derivation {
            Derivation::Axiom => Ok(ProofJson::Axiom {
                statement: (&theorem.thm).into(),
            }),
            Derivation::RuleApplication { rule, premises } => {
                let rule_name = match &engine.get_rule(*rule)?.name {
                    Some(name) => name.clone(),
                    None => rule.to_string(),
                };
                let premises = premises
                    .iter()
                    .map(|&p| ProofJson::from_theorem(engine, p))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ProofJson::Theorem {
                    statement: (&theorem.thm).into(),
                    rule: rule_name,
                    premises,
                })
            }
        }
    }
}

/// Everything a session produced, for machine consumption.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryJson {
    pub rules: Vec<RuleJson>,
    pub axioms: Vec<TermJson>,
    pub proofs: Vec<ProofJson>,
    pub saw_error: bool,
}

impl SessionSummaryJson {
    pub fn from_session(session: &Session) -> Result<Self> {
        let engine = session.engine();
        let axioms = session
            .axioms
            .iter()
            .map(|&i| engine.get_theorem(i).map(|t| (&t.thm).into()))
            .collect::<Result<Vec<_>>>()?;
        let proofs = session
            .proven_theorems
            .iter()
            .map(|&i| ProofJson::from_theorem(engine, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(SessionSummaryJson {
            rules: engine.rules().iter().map(|r| r.into()).collect(),
            axioms,
            proofs,
            saw_error: session.saw_error,
        })
    }
}
