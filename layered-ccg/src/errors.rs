use thiserror::Error;

/// A category string that is not valid CCGbank notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid category {input:?} at offset {position}: {message}")]
pub struct CategoryParseError {
    pub input: String,
    pub position: usize,
    pub message: String,
}

/// Errors raised while assembling a [`crate::Parse`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{field} has {actual} entries but the sentence has {expected} words")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("dependency {head} -> {argument} points outside a sentence of {len} words")]
    IndexOutOfRange {
        head: usize,
        argument: usize,
        len: usize,
    },

    #[error("dependency slot {arg_number} does not exist on {category}")]
    SlotOutOfRange { arg_number: usize, category: String },

    #[error(transparent)]
    Category(#[from] CategoryParseError),

    #[error("failed to read parse record: {0}")]
    Ron(#[from] ron::error::SpannedError),
}
