//! Statement execution: feeding parsed statements to the engine

use crate::ast::Term;
use crate::engine::{Engine, EngineConfig};
use crate::error::{Result, VerilyError};
use crate::parser::{parse_text, Statement};
use crate::rule::InferenceRule;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Session knobs, assembled by the CLI and passed in explicitly.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub debug: bool,
    pub pass_limit: usize,
    pub enable_alternation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            debug: false,
            pass_limit: 64,
            enable_alternation: false,
        }
    }
}

/// A proving session: an engine plus the bookkeeping the outputs need.
///
/// Proof failures are recorded in `saw_error` and do not stop the session;
/// ill-formed rules, unimplemented statements, and I/O problems surface as
/// errors to the caller.
pub struct Session {
    engine: Engine,
    /// Indices of theorems inserted as axioms, in insertion order.
    pub axioms: BTreeSet<usize>,
    /// Indices of theorems successfully proven on request.
    pub proven_theorems: BTreeSet<usize>,
    /// True once any proof request has failed.
    pub saw_error: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            engine: Engine::new(EngineConfig {
                pass_limit: config.pass_limit,
                enable_alternation: config.enable_alternation,
                debug: config.debug,
            }),
            axioms: BTreeSet::new(),
            proven_theorems: BTreeSet::new(),
            saw_error: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Execute one statement. `cur_path` is the file the statement came
    /// from; include paths resolve against its directory.
    pub fn execute(&mut self, stmt: &Statement, cur_path: &Path) -> Result<()> {
        if self.engine.config.debug {
            println!("On stmt {:?}\n", stmt);
        }

        match stmt {
            Statement::Rule {
                name,
                free_variables,
                premises,
                consequence,
            } => {
                let free_variables: BTreeSet<Term> = free_variables.iter().cloned().collect();
                let rule = InferenceRule::new(
                    name.clone(),
                    free_variables,
                    premises.clone(),
                    consequence.clone(),
                )?;
                self.engine.add_rule(rule);
            }

            Statement::Axiom(term) => {
                let index = self.engine.add_axiom(term.clone());
                self.axioms.insert(index);
            }

            Statement::ProveForward(goal) => {
                let budget = self.engine.config.pass_limit;
                match self.engine.forward_prove(goal, budget) {
                    Some(thm) => {
                        self.proven_theorems.insert(thm.index);
                    }
                    None => {
                        self.saw_error = true;
                        eprintln!("ERROR:   Failed to prove {}", goal);
                    }
                }
            }

            Statement::ProveBackward(goal) => {
                let budget = self.engine.config.pass_limit;
                match self.engine.backward_prove(goal, budget) {
                    Some(thm) => {
                        self.proven_theorems.insert(thm.index);
                    }
                    None => {
                        self.saw_error = true;
                        eprintln!("ERROR:   Failed to prove {}", goal);
                    }
                }
            }

            Statement::ProveSmt(_) => {
                return Err(VerilyError::Unimplemented("prove_smt"));
            }

            Statement::Include(written) => {
                let path = match cur_path.parent() {
                    Some(parent) => parent.join(written),
                    None => PathBuf::from(written),
                };
                // The resolved path is threaded into the recursive call so
                // the included file's own includes resolve against it.
                self.run_file(&path)?;
            }

            Statement::Other(term) => {
                println!("WARNING: Skipping statement {}", term);
            }
        }
        Ok(())
    }

    /// Execute every statement in a file, sequentially.
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.run_text(&text, path)
    }

    /// Execute every statement in a source text attributed to `cur_path`.
    pub fn run_text(&mut self, text: &str, cur_path: &Path) -> Result<()> {
        let statements = parse_text(text)?;
        for stmt in &statements {
            self.execute(stmt, cur_path)?;
        }
        Ok(())
    }
}
