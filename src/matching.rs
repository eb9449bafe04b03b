//! Schema matching: does a ground term fit a form with free variables?

use crate::ast::{Substitution, Term};
use std::collections::BTreeSet;

/// Decide whether `ground` matches the schematic `form` given the free
/// variables in `free_vars`, accumulating witnessing bindings in `subs`.
///
/// A form node that is already bound must be matched by an equal ground term
/// (repeated occurrences of a variable are linear). A form node that is a
/// free variable consumes it: the binding is recorded and the variable is
/// removed so its next occurrence goes through the bound-lookup path. Any
/// other node must agree with the ground term on head and arity, with
/// children matched pairwise.
///
/// Both accumulators are mutated in place and are NOT restored on failure;
/// callers that want to retry must snapshot them first.
pub fn is_of_form(
    ground: &Term,
    form: &Term,
    free_vars: &mut BTreeSet<Term>,
    subs: &mut Substitution,
) -> bool {
    if let Some(bound) = subs.lookup(form) {
        return ground == bound;
    }

    if free_vars.remove(form) {
        subs.bind(form.clone(), ground.clone());
        return true;
    }

    if ground.head != form.head || ground.children.len() != form.children.len() {
        return false;
    }
    ground
        .children
        .iter()
        .zip(form.children.iter())
        .all(|(g, f)| is_of_form(g, f, free_vars, subs))
}
