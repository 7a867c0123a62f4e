use std::path::PathBuf;

use layered_ccg::Category;
use thiserror::Error;

/// Errors surfaced by predication construction, rendering and rewriting.
///
/// Structural gaps in a parse (cycles, unmodelled argument categories) are
/// never reported here; they degrade to a Gap or an absent slot instead.
#[derive(Debug, Error)]
pub enum PredicationError {
    /// A phrase was requested at a category that cannot be reached from the
    /// predication's own category.
    #[error("{predicate:?} has category {actual}, which cannot be realized as {desired}")]
    CategoryMismatch {
        predicate: String,
        actual: Category,
        desired: Category,
    },

    /// Rendering needed an argument slot that has no binding.
    #[error("{predicate:?} has no argument bound to slot {slot}")]
    MissingArgument { predicate: String, slot: usize },

    /// Feature changes on expletives, which carry no real features.
    #[error("cannot {operation} an expletive noun")]
    InvalidFeatureMutation { operation: &'static str },

    /// A constructor was handed something that violates its variant's
    /// invariants.
    #[error("invalid predication: {message}")]
    InvalidPredication { message: String },

    #[error("no pronoun realizes {detail}")]
    UnrealizablePronoun { detail: String },

    #[error("inflection dictionary line {line}: {message}")]
    Dictionary { line: usize, message: String },

    #[error("configuration {path:?}: {message}")]
    Config { path: Option<PathBuf>, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PredicationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PredicationError::InvalidPredication {
            message: message.into(),
        }
    }
}

pub type PredicationResult<T> = Result<T, PredicationError>;
