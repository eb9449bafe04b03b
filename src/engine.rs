//! The inference engine: forward saturation and backward goal-directed search

use crate::ast::{Substitution, Term};
use crate::error::{Result, VerilyError};
use crate::kb::{KnowledgeBase, Theorem};
use crate::matching::is_of_form;
use crate::rule::InferenceRule;
use std::collections::HashSet;

/// Engine knobs. All state is explicit; nothing ambient.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Depth budget for backward search, pass budget for forward search.
    pub pass_limit: usize,
    /// If true, each search direction falls back to the other on local
    /// failure, with a decremented budget.
    pub enable_alternation: bool,
    /// If true, prints search progress.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pass_limit: 64,
            enable_alternation: false,
            debug: false,
        }
    }
}

/// Takes rules and axioms and deduces theorems.
///
/// Neither search is a decision procedure: both are bounded by their budget
/// and a failed search is an ordinary `None`, not an error.
pub struct Engine {
    pub config: EngineConfig,
    rules: Vec<InferenceRule>,
    kb: KnowledgeBase,
    /// Forward-search memo: premise pairings that yielded nothing new.
    /// Session-local; invalidated whenever a rule or axiom is added, since
    /// either can make an old pairing viable again.
    exhausted: HashSet<(usize, Vec<usize>)>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            rules: Vec::new(),
            kb: KnowledgeBase::new(),
            exhausted: HashSet::new(),
        }
    }

    pub fn rules(&self) -> &[InferenceRule] {
        &self.rules
    }

    /// All theorems derived so far, in insertion order.
    pub fn known(&self) -> &[Theorem] {
        self.kb.entries()
    }

    pub fn get_rule(&self, index: usize) -> Result<&InferenceRule> {
        self.rules.get(index).ok_or(VerilyError::InvalidRuleIndex(index))
    }

    pub fn get_theorem(&self, index: usize) -> Result<&Theorem> {
        self.kb.get(index)
    }

    /// Index of `what` if it has already been derived.
    pub fn has(&self, what: &Term) -> Option<usize> {
        self.kb.has(what)
    }

    /// Insert an already-classified rule.
    pub fn add_rule(&mut self, rule: InferenceRule) {
        self.exhausted.clear();
        if self.config.debug {
            println!("Added rule w/ index {}: {}\n", self.rules.len(), rule);
        }
        self.rules.push(rule);
    }

    /// Assert a ground term, returning its theorem index.
    pub fn add_axiom(&mut self, what: Term) -> usize {
        self.exhausted.clear();
        let index = self.kb.add_axiom(what);
        if self.config.debug {
            println!("Added axiom: {}\n", self.kb.entries()[index].thm);
        }
        index
    }

    fn add_theorem(&mut self, thm: Term, rule: usize, premises: Vec<usize>) -> (usize, bool) {
        let (index, actually_added) = self.kb.add(thm, rule, premises);
        if actually_added && self.config.debug {
            println!("Derived theorem {}\n", self.kb.entries()[index]);
        }
        (index, actually_added)
    }

    /// Attempt to prove `what` backwards, from goal to premises.
    ///
    /// A goal already in the knowledge base is returned immediately, even at
    /// budget zero; otherwise each backward-usable rule whose consequence
    /// matches the goal has its premises proven recursively at `budget - 1`.
    /// Premises that succeeded are never retried when a later one fails; the
    /// next rule is attempted instead.
    pub fn backward_prove(&mut self, what: &Term, budget: usize) -> Option<Theorem> {
        if let Some(index) = self.kb.has(what) {
            return self.kb.get(index).ok().cloned();
        }
        if budget == 0 {
            return None;
        }

        for rule_index in 0..self.rules.len() {
            let rule = self.rules[rule_index].clone();
            if !rule.direction.is_backward() {
                continue;
            }

            let mut free_vars = rule.free_variables.clone();
            let mut subs = Substitution::new();
            if !is_of_form(what, &rule.consequence, &mut free_vars, &mut subs) {
                continue;
            }
            // A backward-usable rule mentions every free variable in its
            // consequence, so a successful match consumes them all.
            assert!(free_vars.is_empty());

            let mut premises = Vec::with_capacity(rule.premises.len());
            let mut rule_works = true;
            for schema in &rule.premises {
                let to_prove = schema.replace(&subs);
                match self.backward_prove(&to_prove, budget - 1) {
                    Some(thm) => premises.push(thm.index),
                    None => {
                        rule_works = false;
                        break;
                    }
                }
            }

            if rule_works {
                let (index, _) = self.add_theorem(what.clone(), rule_index, premises);
                return self.kb.get(index).ok().cloned();
            }
        }

        if self.config.enable_alternation {
            return self.forward_prove(what, budget.saturating_sub(1));
        }
        None
    }

    /// Attempt to prove `what` forwards by saturation.
    ///
    /// Runs up to `passes` rounds. Each round applies every forward-usable
    /// rule in insertion order to all premise tuples drawn from the theorems
    /// known at the START of that rule's turn, so a round's new theorems
    /// only feed the next round. A round that adds nothing ends the search
    /// early; the goal is checked after every rule.
    pub fn forward_prove(&mut self, what: &Term, passes: usize) -> Option<Theorem> {
        if let Some(index) = self.kb.has(what) {
            return self.kb.get(index).ok().cloned();
        }

        for pass in 0..passes {
            let mut new_this_pass = 0;

            for rule_index in 0..self.rules.len() {
                if !self.rules[rule_index].direction.is_forward() {
                    if self.config.debug {
                        println!(
                            "In forward pass {} of {} skipping rule {} of total {}",
                            pass,
                            passes,
                            self.rules[rule_index],
                            self.rules.len()
                        );
                    }
                    continue;
                }
                if self.config.debug {
                    println!(
                        "In forward pass {} of {} examining rule {} of total {}",
                        pass,
                        passes,
                        self.rules[rule_index],
                        self.rules.len()
                    );
                }

                let n_known_before = self.kb.len();
                self.instantiate_all(rule_index, n_known_before);
                if self.kb.len() != n_known_before {
                    new_this_pass += self.kb.len() - n_known_before;

                    if let Some(index) = self.kb.has(what) {
                        return self.kb.get(index).ok().cloned();
                    }
                }
            }

            if self.config.debug {
                println!("Pass {} produced {} new theorems\n", pass, new_this_pass);
            }
            if new_this_pass == 0 {
                break;
            }
        }

        if self.config.enable_alternation {
            return self.backward_prove(what, passes.saturating_sub(1));
        }
        None
    }

    /// Apply one rule to every ordered tuple of theorem indices drawn from
    /// `[0, first_n)`, instantiating the consequence wherever the premises
    /// match consistently. Tuples are enumerated lexicographically with the
    /// last position varying fastest.
    fn instantiate_all(&mut self, rule_index: usize, first_n: usize) {
        let rule = self.rules[rule_index].clone();
        let n_premises = rule.premises.len();
        if n_premises > 0 && first_n == 0 {
            return;
        }

        let mut tuple = vec![0usize; n_premises];
        loop {
            self.try_pairing(rule_index, &rule, &tuple);

            let mut pos = n_premises;
            loop {
                if pos == 0 {
                    return;
                }
                pos -= 1;
                tuple[pos] += 1;
                if tuple[pos] < first_n {
                    break;
                }
                tuple[pos] = 0;
            }
        }
    }

    fn try_pairing(&mut self, rule_index: usize, rule: &InferenceRule, tuple: &[usize]) {
        let key = (rule_index, tuple.to_vec());
        if self.exhausted.contains(&key) {
            return;
        }

        let mut free_vars = rule.free_variables.clone();
        let mut subs = Substitution::new();
        for (premise, &thm_index) in rule.premises.iter().zip(tuple) {
            let thm = self.kb.entries()[thm_index].thm.clone();
            if !is_of_form(&thm, &premise.replace(&subs), &mut free_vars, &mut subs) {
                self.exhausted.insert(key);
                return;
            }
        }

        let (_, actually_added) =
            self.add_theorem(rule.consequence.replace(&subs), rule_index, tuple.to_vec());
        if !actually_added {
            self.exhausted.insert(key);
        }
    }
}
