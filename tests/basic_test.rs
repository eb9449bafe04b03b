//! End-to-end scenarios for the inference engine

use std::collections::BTreeSet;
use verily::{
    parse_expression, Derivation, Engine, EngineConfig, InferenceRule, Term, REPLACE,
};

fn vars(names: &[&str]) -> BTreeSet<Term> {
    names.iter().map(|n| Term::leaf(*n)).collect()
}

fn rule(name: &str, fv: &[&str], premises: &[&str], consequence: &str) -> InferenceRule {
    InferenceRule::new(
        Some(name.into()),
        vars(fv),
        premises
            .iter()
            .map(|p| parse_expression(p).unwrap())
            .collect(),
        parse_expression(consequence).unwrap(),
    )
    .unwrap()
}

fn term(text: &str) -> Term {
    parse_expression(text).unwrap()
}

#[test]
fn test_axiom_lookup() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_axiom(term("p"));

    let thm = engine.backward_prove(&term("p"), 0).unwrap();
    assert!(thm.derivation.is_axiom());
    assert_eq!(thm.thm, term("p"));
}

#[test]
fn test_modus_ponens_backward() {
    // Modus ponens is forward-only (its premises mention a variable the
    // consequence lacks), so the backward entry point reaches it through
    // alternation.
    let mut engine = Engine::new(EngineConfig {
        enable_alternation: true,
        ..EngineConfig::default()
    });
    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    let imp = engine.add_axiom(term("implies(p, q)"));
    let p = engine.add_axiom(term("p"));

    let thm = engine.backward_prove(&term("q"), 5).unwrap();
    assert_eq!(thm.thm, term("q"));
    assert_eq!(
        thm.derivation,
        Derivation::RuleApplication {
            rule: 0,
            premises: vec![imp, p],
        }
    );
}

#[test]
fn test_modus_ponens_forward() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule("mp", &["a", "b"], &["implies(a, b)", "a"], "b"));
    let imp = engine.add_axiom(term("implies(p, q)"));
    let p = engine.add_axiom(term("p"));

    let thm = engine.forward_prove(&term("q"), 5).unwrap();
    assert_eq!(thm.thm, term("q"));
    assert_eq!(
        thm.derivation,
        Derivation::RuleApplication {
            rule: 0,
            premises: vec![imp, p],
        }
    );
}

#[test]
fn test_transitivity_in_one_pass() {
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule(
        "trans",
        &["a", "b", "c"],
        &["implies(a, b)", "implies(b, c)"],
        "implies(a, c)",
    ));
    engine.add_axiom(term("implies(p, q)"));
    engine.add_axiom(term("implies(q, r)"));

    let thm = engine.forward_prove(&term("implies(p, r)"), 1).unwrap();
    assert_eq!(thm.thm, term("implies(p, r)"));
}

#[test]
fn test_replace_consequence_is_forward_only() {
    let beta = rule(
        "beta",
        &["f", "x"],
        &["applies(f, x)"],
        "body(f) [ x = arg ]",
    );
    assert_eq!(beta.direction, verily::Direction::ForwardOnly);
    assert!(beta.consequence.contains_symbol(REPLACE));

    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(beta);
    engine.add_axiom(term("applies(g, y)"));

    // Forward use reduces the consequence before storing it: the premise
    // binds f = g and x = y, and y does not occur in body(g).
    let thm = engine.forward_prove(&term("body(g)"), 3).unwrap();
    assert_eq!(thm.thm, term("body(g)"));

    // Backward search must not try to match goals against the un-reduced
    // consequence; with no other rules it simply fails.
    let mut engine = Engine::new(EngineConfig::default());
    engine.add_rule(rule(
        "beta",
        &["f", "x"],
        &["applies(f, x)"],
        "body(f) [ x = arg ]",
    ));
    engine.add_axiom(term("applies(g, y)"));
    assert!(engine.backward_prove(&term("body(g)"), 3).is_none());
}

/// A chain requiring six backward expansions:
/// reach(zero) <- reach(s(zero)) <- ... <- reach(s^6(zero)) [axiom].
fn chain_engine(config: EngineConfig) -> (Engine, Term) {
    let mut engine = Engine::new(config);
    engine.add_rule(rule("step", &["n"], &["reach(s(n))"], "reach(n)"));

    let mut deep = term("zero");
    for _ in 0..6 {
        deep = Term::new("s", vec![deep]);
    }
    engine.add_axiom(Term::new("reach", vec![deep]));
    (engine, term("reach(zero)"))
}

#[test]
fn test_budget_exhaustion() {
    let (mut engine, goal) = chain_engine(EngineConfig::default());
    assert!(engine.backward_prove(&goal, 3).is_none());

    let (mut engine, goal) = chain_engine(EngineConfig::default());
    assert!(engine.backward_prove(&goal, 10).is_some());
}

#[test]
fn test_budget_exhaustion_with_alternation() {
    // Alternation rescues budget 4: the nested forward fallbacks saturate
    // part of the chain, and the final forward run at budget 3 walks the
    // rest. Budget 3 still comes up short.
    let (mut engine, goal) = chain_engine(EngineConfig {
        enable_alternation: true,
        ..EngineConfig::default()
    });
    assert!(engine.backward_prove(&goal, 4).is_some());

    let (mut engine, goal) = chain_engine(EngineConfig {
        enable_alternation: true,
        ..EngineConfig::default()
    });
    assert!(engine.backward_prove(&goal, 3).is_none());
}
