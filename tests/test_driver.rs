//! Driver behavior: statement execution, includes, and error aggregation

use std::fs;
use std::path::{Path, PathBuf};
use verily::{parse_expression, proof_to_ast, Session, SessionConfig, VerilyError};

/// Create a scratch directory for include tests, cleaned up on drop.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("verily_test_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Scratch { dir }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn test_session_proves_from_file() {
    let scratch = Scratch::new("file");
    let main = scratch.write(
        "main.vly",
        "rule mp: over a, b given implies(a, b), a deduce b;\n\
         axiom: implies(p, q);\n\
         axiom: p;\n\
         prove_forward: q;\n",
    );

    let mut session = Session::new(SessionConfig::default());
    session.run_file(&main).unwrap();

    assert!(!session.saw_error);
    assert_eq!(session.proven_theorems.len(), 1);

    let &index = session.proven_theorems.iter().next().unwrap();
    let ast = proof_to_ast(session.engine(), index).unwrap();
    assert_eq!(ast.head, "theorem");
    assert_eq!(ast.children[0], parse_expression("q").unwrap());
}

#[test]
fn test_include_resolves_against_including_file() {
    let scratch = Scratch::new("include");
    // main includes lib/rules.vly, which includes base.vly relative to
    // lib/, not relative to main.
    scratch.write(
        "lib/base.vly",
        "axiom: implies(p, q);\naxiom: p;\n",
    );
    scratch.write(
        "lib/rules.vly",
        "include \"base.vly\";\n\
         rule mp: over a, b given implies(a, b), a deduce b;\n",
    );
    let main = scratch.write(
        "main.vly",
        "include \"lib/rules.vly\";\nprove_forward: q;\n",
    );

    let mut session = Session::new(SessionConfig::default());
    session.run_file(&main).unwrap();

    assert!(!session.saw_error);
    assert_eq!(session.axioms.len(), 2);
    assert_eq!(session.proven_theorems.len(), 1);
}

#[test]
fn test_missing_include_is_fatal() {
    let scratch = Scratch::new("missing");
    let main = scratch.write("main.vly", "include \"nowhere.vly\";\n");

    let mut session = Session::new(SessionConfig::default());
    assert!(matches!(
        session.run_file(&main),
        Err(VerilyError::Io(_))
    ));
}

#[test]
fn test_failed_goals_accumulate_without_stopping() {
    let mut session = Session::new(SessionConfig::default());
    session
        .run_text(
            "axiom: p;\n\
             theorem: q;\n\
             prove_forward: r;\n\
             theorem: p;\n",
            Path::new(""),
        )
        .unwrap();

    assert!(session.saw_error);
    assert_eq!(session.proven_theorems.len(), 1);
}

#[test]
fn test_unknown_statement_kinds_are_skipped() {
    let mut session = Session::new(SessionConfig::default());
    session
        .run_text(
            "function id(x in Nat) { x } ;\naxiom: p;\ntheorem: p;",
            Path::new(""),
        )
        .unwrap();

    assert!(!session.saw_error);
    assert_eq!(session.proven_theorems.len(), 1);
}

#[test]
fn test_repeated_goal_reuses_theorem() {
    let mut session = Session::new(SessionConfig::default());
    session
        .run_text("axiom: p; theorem: p; theorem: p;", Path::new(""))
        .unwrap();

    // Both requests resolve to the one axiom entry.
    assert_eq!(session.proven_theorems.len(), 1);
    assert_eq!(session.engine().known().len(), 1);
}
