//! Term representation: s-expression trees, substitution, and reduction
//!
//! This module provides the fundamental types the engine computes over:
//! terms (a head symbol plus ordered children), first-match-wins
//! substitutions, and the `REPLACE` normal-form reduction.

pub mod substitution;
pub mod term;


pub use substitution::Substitution;
pub use term::{Term, REPLACE};
