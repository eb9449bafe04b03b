//! Proof-tree reconstruction: from a theorem index to a witness AST

use crate::ast::Term;
use crate::engine::Engine;
use crate::error::Result;
use crate::kb::Derivation;

/// Rebuild the proof of a theorem as an AST suitable for display.
///
/// Axioms become `(axiom <thm>)`; derived theorems become
/// `(theorem <thm> (rule_application (rule <name>) (premises <proof>...)))`
/// where `<name>` is the rule's name or, for anonymous rules, its index.
/// Reads the knowledge base only; no state is modified.
pub fn proof_to_ast(engine: &Engine, thm_index: usize) -> Result<Term> {
    let theorem = engine.get_theorem(thm_index)?;

    match &theorem.derivation {
        Derivation::Axiom => Ok(Term::new("axiom", vec![theorem.thm.clone()])),
        Derivation::RuleApplication { rule, premises } => {
            let mut premise_proofs = Vec::with_capacity(premises.len());
            for &premise in premises {
                premise_proofs.push(proof_to_ast(engine, premise)?);
            }

            let rule_name = match &engine.get_rule(*rule)?.name {
                Some(name) => name.clone(),
                None => rule.to_string(),
            };

            Ok(Term::new(
                "theorem",
                vec![
                    theorem.thm.clone(),
                    Term::new(
                        "rule_application",
                        vec![
                            Term::new("rule", vec![Term::leaf(rule_name)]),
                            Term::new("premises", premise_proofs),
                        ],
                    ),
                ],
            ))
        }
    }
}
