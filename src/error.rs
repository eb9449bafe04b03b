//! Error types for Verily

use std::io;
use thiserror::Error;

/// Fatal error conditions. Proof failure is deliberately not among them:
/// an exhausted search returns `None` and the driver aggregates it into the
/// process exit status instead.
#[derive(Error, Debug)]
pub enum VerilyError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Rule is neither forward-derivable nor backward-derivable: {0}")]
    IllFormedRule(String),

    #[error("'{0}' is unimplemented!")]
    Unimplemented(&'static str),

    #[error("Invalid rule index {0}")]
    InvalidRuleIndex(usize),

    #[error("Invalid theorem index {0}")]
    InvalidTheoremIndex(usize),
}

pub type Result<T> = std::result::Result<T, VerilyError>;
