//! Search behavior and knowledge-base invariants under both directions

use std::collections::BTreeSet;
use verily::{
    parse_expression, Engine, EngineConfig, InferenceRule, Term, REPLACE,
};

fn term(text: &str) -> Term {
    parse_expression(text).unwrap()
}

fn rule(name: &str, fv: &[&str], premises: &[&str], consequence: &str) -> InferenceRule {
    let fv: BTreeSet<Term> = fv.iter().map(|n| Term::leaf(*n)).collect();
    InferenceRule::new(
        Some(name.into()),
        fv,
        premises
            .iter()
            .map(|p| parse_expression(p).unwrap())
            .collect(),
        parse_expression(consequence).unwrap(),
    )
    .unwrap()
}

/// Every stored theorem is in normal form, deduplicated, and its premises
/// point strictly backwards.
fn check_invariants(engine: &Engine) {
    let mut seen = BTreeSet::new();
    for thm in engine.known() {
        assert_eq!(thm.thm, thm.thm.beta_star());
        assert!(seen.insert(thm.thm.clone()), "duplicate theorem {}", thm.thm);
        for &premise in thm.derivation.premises() {
            assert!(premise < thm.index);
        }
    }
}

#[test]
fn test_invariants_after_mixed_searches() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    engine.add_rule(rule(
        "trans",
        &["a", "b", "c"],
        &["implies(a, b)", "implies(b, c)"],
        "implies(a, c)",
    ));
    engine.add_rule(rule(
        "and_intro",
        &["a", "b"],
        &["a", "b"],
        "and(a, b)",
    ));
    engine.add_axiom(term("implies(p, q)"));
    engine.add_axiom(term("implies(q, r)"));
    engine.add_axiom(term("p"));

    assert!(engine.forward_prove(&term("r"), 8).is_some());
    assert!(engine.backward_prove(&term("and(p, r)"), 8).is_some());
    assert!(engine.backward_prove(&term("missing"), 4).is_none());

    check_invariants(&engine);
}

#[test]
fn test_successful_goal_lands_in_normal_form() {
    // The goal itself contains a REPLACE; the stored theorem must be its
    // reduced form, and proving it again hits the knowledge base.
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_axiom(term("wrap(payload)"));

    let goal = term("wrap(hole) [ hole = payload ]");
    assert!(goal.contains_symbol(REPLACE));

    let thm = engine.backward_prove(&goal, 0).unwrap();
    assert_eq!(thm.thm, term("wrap(payload)"));
    check_invariants(&engine);
}

#[test]
fn test_budget_zero_forward() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    engine.add_axiom(term("implies(p, q)"));
    engine.add_axiom(term("p"));

    // Zero passes: only the knowledge-base lookup runs.
    assert!(engine.forward_prove(&term("q"), 0).is_none());
    assert!(engine.forward_prove(&term("p"), 0).is_some());
}

#[test]
fn test_rule_added_mid_session_is_used() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_axiom(term("implies(p, q)"));
    engine.add_axiom(term("p"));
    assert!(engine.forward_prove(&term("q"), 4).is_none());

    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    assert!(engine.forward_prove(&term("q"), 4).is_some());
}

#[test]
fn test_forward_result_reused_by_later_searches() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    engine.add_axiom(term("implies(p, q)"));
    engine.add_axiom(term("p"));

    let first = engine.forward_prove(&term("q"), 4).unwrap();
    let n_known = engine.known().len();

    // The second search returns the same entry without deriving anything.
    let second = engine.backward_prove(&term("q"), 4).unwrap();
    assert_eq!(first.index, second.index);
    assert_eq!(engine.known().len(), n_known);
}

#[test]
fn test_repeated_variable_premise_constrains_tuples() {
    // eq_self only fires when both sides of the pair agree.
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule(
        "eq_self",
        &["a"],
        &["pair(a, a)"],
        "selfpair(a)",
    ));
    engine.add_axiom(term("pair(m, m)"));
    engine.add_axiom(term("pair(m, n)"));

    assert!(engine.forward_prove(&term("selfpair(m)"), 2).is_some());
    assert!(engine.forward_prove(&term("selfpair(n)"), 2).is_none());
    check_invariants(&engine);
}

#[test]
fn test_shared_substitution_across_premises() {
    // The binding of 'a' from the first premise constrains the second.
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule(
        "join",
        &["a", "b"],
        &["left(a)", "right(a, b)"],
        "joined(a, b)",
    ));
    engine.add_axiom(term("left(x)"));
    engine.add_axiom(term("right(x, y)"));
    engine.add_axiom(term("right(z, w)"));

    assert!(engine.forward_prove(&term("joined(x, y)"), 2).is_some());
    // z never appears in a left(...), so no joined(z, ...) may exist.
    assert!(engine.forward_prove(&term("joined(z, w)"), 2).is_none());
}

#[test]
fn test_backward_premise_order_is_declared_order() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule(
        "and_intro",
        &["a", "b"],
        &["a", "b"],
        "and(a, b)",
    ));
    let p = engine.add_axiom(term("p"));
    let q = engine.add_axiom(term("q"));

    let thm = engine.backward_prove(&term("and(q, p)"), 3).unwrap();
    // Premises are recorded in the rule's declared order: first a = q,
    // then b = p.
    assert_eq!(thm.derivation.premises(), &[q, p]);
}

#[test]
fn test_deep_goal_normalizes_before_lookup() {
    let mut engine = Engine::new(EngineConfig::default());
    let index = engine.add_axiom(term("f(a, b)"));

    // A nested REPLACE tower reducing to the axiom.
    let inner = term("f(u, v) [ u = a ]");
    let goal = Term::new(REPLACE, vec![inner, Term::leaf("v"), Term::leaf("b")]);
    assert_eq!(engine.has(&goal), Some(index));
}
